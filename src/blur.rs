//! Blurring an image channel with a neighbor stencil written as a dense
//! linear operator, next to a 3x3 box filter.
//!
//! The operator works on the flattened, row-major channel and finds
//! neighbors by index arithmetic only, with the first array dimension
//! (`rows`) as the vertical stride. Rows therefore wrap: the last pixel of
//! a row is blurred with the first pixel of the next row. Both the dense
//! and the matrix-free forms keep that behavior so they agree exactly.

use crate::domain::*;
use crate::error::{Error, Result};
use crate::par_stencil;
use crate::plot_log::{Axes, Colormap, Figure};
use crate::stencil::*;
use crate::util::*;
use nalgebra::{DMatrix, DVector};

/// Dense `n x n` operator for a channel of `shape`, `n = rows * cols`.
///
/// `A[i, i] = a`, and `b` at `i - 1`, `i + 1`, `i + rows`, `i - rows`
/// whenever that index is inside `[0, n)`.
pub fn neighbor_operator(shape: [usize; 2], a: f64, b: f64) -> DMatrix<f64> {
    profiling::scope!("blur::neighbor_operator");
    let n = shape[0] * shape[1];
    log::debug!("Building {n} x {n} blur operator");
    let stencil = standard_stencils::flat_neighbor_blur(shape[0], a, b);
    let mut operator = DMatrix::zeros(n, n);
    for i in 0..n {
        for (offset, weight) in stencil.neighbors() {
            let j = i as i64 + offset[0] as i64;
            if j >= 0 && (j as usize) < n {
                // duplicate neighbors carry zero weight
                operator[(i, j as usize)] += weight;
            }
        }
    }
    operator
}

/// Multiply the flattened channel by `operator`, reshaped back.
pub fn apply_operator<DomainType: DomainView<2>>(
    operator: &DMatrix<f64>,
    channel: &DomainType,
) -> Result<OwnedDomain<2>> {
    profiling::scope!("blur::apply_operator");
    let n = channel.aabb().buffer_size();
    if operator.nrows() != n || operator.ncols() != n {
        return Err(Error::Config(format!(
            "operator is {} x {}, channel has {n} pixels",
            operator.nrows(),
            operator.ncols()
        )));
    }
    let flat = DVector::from_column_slice(channel.buffer());
    let blurred = operator * flat;
    OwnedDomain::from_buffer(*channel.aabb(), blurred.as_slice().to_vec())
}

/// Same result as `apply_operator(&neighbor_operator(..), channel)`
/// without materialising the matrix.
pub fn apply_neighbor_blur<DomainType: DomainView<2>>(
    channel: &DomainType,
    a: f64,
    b: f64,
    chunk_size: usize,
) -> Result<OwnedDomain<2>> {
    profiling::scope!("blur::apply_neighbor_blur");
    let [rows, _] = channel.aabb().shape();
    let stencil = standard_stencils::flat_neighbor_blur(rows, a, b);
    let flat_aabb = AABB::from_shape([channel.aabb().buffer_size()]);
    let input = OwnedDomain::from_buffer(flat_aabb, channel.buffer().to_vec())?;
    let mut output = OwnedDomain::new(flat_aabb);
    let bc = ConstantCheck::new(0.0, flat_aabb);
    par_stencil::apply(&bc, &stencil, &input, &mut output, chunk_size);
    OwnedDomain::from_buffer(*channel.aabb(), output.into_buffer())
}

/// 3x3 mean filter, mirroring pixels at the border.
pub fn uniform_filter(channel: &OwnedDomain<2>, chunk_size: usize) -> OwnedDomain<2> {
    profiling::scope!("blur::uniform_filter");
    let aabb = *channel.aabb();
    let mut rows_pass = OwnedDomain::new(aabb);
    let down = standard_stencils::box_1d(0);
    par_stencil::apply_reflect(&down, channel, &mut rows_pass, chunk_size);
    let mut result = OwnedDomain::new(aabb);
    let across = standard_stencils::box_1d(1);
    par_stencil::apply_reflect(&across, &rows_pass, &mut result, chunk_size);
    result
}

/// Blurred, original and box filtered channels side by side.
pub fn blur_figure<DomainType: DomainView<2>>(
    original: &DomainType,
    blurred: &DomainType,
    boxed: &DomainType,
) -> Figure {
    Figure::new()
        .with_panel(Axes::titled("blur").image(blurred, Colormap::Gray))
        .with_panel(Axes::titled("original").image(original, Colormap::Gray))
        .with_panel(Axes::titled("uniform filter").image(boxed, Colormap::Gray))
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn ramp(shape: [usize; 2]) -> OwnedDomain<2> {
        let mut d = OwnedDomain::new(AABB::from_shape(shape));
        d.par_set_values(|c| ((c[0] * 7 + c[1] * 3) % 11) as f64, 4);
        d
    }

    #[test]
    fn operator_entries() {
        // 3 rows, 4 columns: the vertical stride is 3
        let op = neighbor_operator([3, 4], 0.2, 0.3);
        assert_eq!(op.shape(), (12, 12));
        assert_approx_eq!(f64, op[(0, 0)], 0.2);
        assert_approx_eq!(f64, op[(0, 1)], 0.3);
        assert_approx_eq!(f64, op[(0, 3)], 0.3);
        assert_approx_eq!(f64, op[(0, 4)], 0.0);
        assert_approx_eq!(f64, op[(11, 8)], 0.3);
        assert_approx_eq!(f64, op[(11, 10)], 0.3);
        for i in 0..12 {
            let nonzero = op.row(i).iter().filter(|v| **v != 0.0).count();
            assert!(nonzero <= 5);
        }
    }

    #[test]
    fn rows_wrap() {
        let op = neighbor_operator([3, 3], 0.2, 0.2);
        for i in 0..8 {
            if (i + 1) % 3 == 0 {
                assert_approx_eq!(f64, op[(i, i + 1)], 0.2);
                assert_approx_eq!(f64, op[(i + 1, i)], 0.2);
            }
        }
    }

    #[test]
    fn single_row_counts_neighbors_once() {
        let op = neighbor_operator([1, 4], 0.5, 0.25);
        assert_approx_eq!(f64, op[(1, 0)], 0.25);
        assert_approx_eq!(f64, op[(1, 1)], 0.5);
        assert_approx_eq!(f64, op[(1, 2)], 0.25);
    }

    #[test]
    fn matrix_free_matches_dense() {
        for shape in [[4, 4], [3, 5], [5, 2], [1, 6]] {
            let channel = ramp(shape);
            let op = neighbor_operator(shape, 0.2, 0.2);
            let dense = apply_operator(&op, &channel).unwrap();
            let free = apply_neighbor_blur(&channel, 0.2, 0.2, 3).unwrap();
            assert_eq!(dense.aabb(), channel.aabb());
            for (d, f) in dense.buffer().iter().zip(free.buffer()) {
                assert_approx_eq!(f64, *d, *f, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn operator_shape_mismatch() {
        let op = neighbor_operator([2, 2], 0.2, 0.2);
        assert!(matches!(
            apply_operator(&op, &ramp([3, 3])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn uniform_filter_spreads_a_spike() {
        let mut channel = OwnedDomain::new(AABB::from_shape([3, 3]));
        channel.set_coord(&vector![1, 1], 9.0);
        let boxed = uniform_filter(&channel, 2);
        for v in boxed.buffer() {
            assert_approx_eq!(f64, *v, 1.0, ulps = 4);
        }

        let flat = OwnedDomain::filled(AABB::from_shape([4, 6]), 200.0);
        for v in uniform_filter(&flat, 5).buffer() {
            assert_approx_eq!(f64, *v, 200.0, ulps = 4);
        }
    }

    #[test]
    fn figure_panel_order() {
        let original = ramp([2, 2]);
        let blurred = OwnedDomain::filled(AABB::from_shape([2, 2]), 1.0);
        let boxed = OwnedDomain::filled(AABB::from_shape([2, 2]), 2.0);
        let figure = blur_figure(&original, &blurred, &boxed);
        let titles: Vec<_> = figure.panels.iter().map(|a| a.title.as_deref()).collect();
        assert_eq!(
            titles,
            vec![Some("blur"), Some("original"), Some("uniform filter")]
        );
    }
}
