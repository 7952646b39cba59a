mod constant;
mod reflect;

pub use constant::*;
pub use reflect::*;

use crate::util::*;

/// Decide the value of a neighbor, `None` means read it from the input.
pub trait BCCheck<const GRID_DIMENSION: usize>: Sync {
    fn check(&self, world_coord: &Coord<GRID_DIMENSION>) -> Option<f64>;
}
