use crate::stencil::*;

/// Forward difference in time, central difference in space.
/// Axis 0 uses `dx`, axis 1 uses `dy`.
pub fn heat_2d(dt: f64, dx: f64, dy: f64, diffusivity: f64) -> Stencil<2, 5> {
    let dx2 = dx * dx;
    let dy2 = dy * dy;
    Stencil::new(
        [[0, 0], [1, 0], [-1, 0], [0, 1], [0, -1]],
        move |args: &[f64; 5]| {
            let middle = args[0];
            let down = args[1];
            let up = args[2];
            let right = args[3];
            let left = args[4];
            middle
                + diffusivity
                    * dt
                    * ((down - 2.0 * middle + up) / dx2
                        + (right - 2.0 * middle + left) / dy2)
        },
    )
}

/// Self plus left/right/down/up neighbors over a flattened, row-major image.
/// Neighbors are found purely by linear index arithmetic, so the last pixel
/// of a row is linked to the first pixel of the next one.
///
/// Offsets are `[0, -1, +1, +row_stride, -row_stride]`.
/// With `row_stride == 1` the vertical offsets land on the horizontal ones,
/// their weights are zeroed so each neighbor still counts once.
pub fn flat_neighbor_blur(row_stride: usize, a: f64, b: f64) -> Stencil<1, 5> {
    debug_assert!(row_stride > 0);
    let stride = row_stride as i32;
    let vertical = if row_stride == 1 { 0.0 } else { b };
    Stencil::new(
        [[0], [-1], [1], [stride], [-stride]],
        move |args: &[f64; 5]| {
            a * args[0]
                + b * (args[1] + args[2])
                + vertical * (args[3] + args[4])
        },
    )
}

/// Mean of three consecutive cells along `axis` of a 2D grid.
pub fn box_1d(axis: usize) -> Stencil<2, 3> {
    debug_assert!(axis < 2);
    let offsets = if axis == 0 {
        [[-1, 0], [0, 0], [1, 0]]
    } else {
        [[0, -1], [0, 0], [0, 1]]
    };
    Stencil::new(offsets, |args: &[f64; 3]| {
        (args[0] + args[1] + args[2]) / 3.0
    })
}
