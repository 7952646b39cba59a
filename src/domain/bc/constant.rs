use crate::domain::bc::BCCheck;
use crate::util::*;

/// Every coordinate outside `aabb` reads as `value`.
pub struct ConstantCheck<const GRID_DIMENSION: usize> {
    value: f64,
    aabb: AABB<GRID_DIMENSION>,
}

impl<const GRID_DIMENSION: usize> ConstantCheck<GRID_DIMENSION> {
    pub fn new(value: f64, aabb: AABB<GRID_DIMENSION>) -> Self {
        ConstantCheck { value, aabb }
    }
}

impl<const GRID_DIMENSION: usize> BCCheck<GRID_DIMENSION>
    for ConstantCheck<GRID_DIMENSION>
{
    fn check(&self, world_coord: &Coord<GRID_DIMENSION>) -> Option<f64> {
        if self.aabb.contains(world_coord) {
            None
        } else {
            Some(self.value)
        }
    }
}
