use crate::util::*;

/// Weights of a linear update, found by evaluating it on unit vectors:
/// neighbor `n` gets `update(e_n)`.
pub fn extract_weights<
    const NEIGHBORHOOD_SIZE: usize,
    F: Fn(&[f64; NEIGHBORHOOD_SIZE]) -> f64,
>(
    update: F,
) -> Values<NEIGHBORHOOD_SIZE> {
    Values::from_fn(|n, _| {
        let mut unit = [0.0; NEIGHBORHOOD_SIZE];
        unit[n] = 1.0;
        update(&unit)
    })
}

/// A linear update over a fixed neighborhood.
/// Offsets are relative to the cell being written, each with one weight.
#[derive(Debug, Clone)]
pub struct Stencil<const GRID_DIMENSION: usize, const NEIGHBORHOOD_SIZE: usize>
{
    offsets: [Coord<GRID_DIMENSION>; NEIGHBORHOOD_SIZE],
    weights: Values<NEIGHBORHOOD_SIZE>,
}

impl<const GRID_DIMENSION: usize, const NEIGHBORHOOD_SIZE: usize>
    Stencil<GRID_DIMENSION, NEIGHBORHOOD_SIZE>
{
    /// `update` receives the neighbor values in `offsets` order and must be
    /// linear in them.
    pub fn new<F: Fn(&[f64; NEIGHBORHOOD_SIZE]) -> f64>(
        offsets: [[i32; GRID_DIMENSION]; NEIGHBORHOOD_SIZE],
        update: F,
    ) -> Self {
        Stencil {
            offsets: offsets.map(Coord::from),
            weights: extract_weights(update),
        }
    }

    pub fn offsets(&self) -> &[Coord<GRID_DIMENSION>; NEIGHBORHOOD_SIZE] {
        &self.offsets
    }

    /// `(offset, weight)` pairs in construction order.
    pub fn neighbors(
        &self,
    ) -> impl Iterator<Item = (&Coord<GRID_DIMENSION>, f64)> + '_ {
        self.offsets.iter().zip(self.weights.iter().copied())
    }

    pub fn apply(&self, args: &Values<NEIGHBORHOOD_SIZE>) -> f64 {
        self.weights.dot(args)
    }
}
