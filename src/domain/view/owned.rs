use super::*;
use crate::error::{Error, Result};
use crate::util::*;

/// A domain that owns its buffer, laid out row-major over its AABB.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedDomain<const GRID_DIMENSION: usize> {
    aabb: AABB<GRID_DIMENSION>,
    buffer: Vec<f64>,
}

impl<const GRID_DIMENSION: usize> OwnedDomain<GRID_DIMENSION> {
    pub fn new(aabb: AABB<GRID_DIMENSION>) -> Self {
        Self::filled(aabb, 0.0)
    }

    pub fn filled(aabb: AABB<GRID_DIMENSION>, value: f64) -> Self {
        let buffer = vec![value; aabb.buffer_size()];
        OwnedDomain { aabb, buffer }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_buffer(
        aabb: AABB<GRID_DIMENSION>,
        buffer: Vec<f64>,
    ) -> Result<Self> {
        if buffer.len() != aabb.buffer_size() {
            return Err(Error::Config(format!(
                "buffer of {} values does not match shape {:?}",
                buffer.len(),
                aabb.shape()
            )));
        }
        Ok(OwnedDomain { aabb, buffer })
    }

    pub fn into_buffer(self) -> Vec<f64> {
        self.buffer
    }
}

impl<const GRID_DIMENSION: usize> DomainView<GRID_DIMENSION>
    for OwnedDomain<GRID_DIMENSION>
{
    fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        &self.aabb
    }

    fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    fn aabb_buffer_mut(&mut self) -> (&AABB<GRID_DIMENSION>, &mut [f64]) {
        (&self.aabb, &mut self.buffer)
    }

    #[track_caller]
    fn view(&self, world_coord: &Coord<GRID_DIMENSION>) -> f64 {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        let index = self.aabb.coord_to_linear(world_coord);
        self.buffer[index]
    }

    #[track_caller]
    fn set_coord(&mut self, world_coord: &Coord<GRID_DIMENSION>, value: f64) {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        let index = self.aabb.coord_to_linear(world_coord);
        self.buffer[index] = value;
    }
}
