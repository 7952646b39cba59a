mod chunk;
mod owned;

pub use chunk::*;
pub use owned::*;

use crate::util::*;
use rayon::prelude::*;

pub trait DomainView<const GRID_DIMENSION: usize>: Sync {
    fn aabb(&self) -> &AABB<GRID_DIMENSION>;

    fn buffer(&self) -> &[f64];

    fn buffer_mut(&mut self) -> &mut [f64];

    fn aabb_buffer_mut(&mut self) -> (&AABB<GRID_DIMENSION>, &mut [f64]);

    fn view(&self, world_coord: &Coord<GRID_DIMENSION>) -> f64;

    fn set_coord(&mut self, world_coord: &Coord<GRID_DIMENSION>, value: f64);

    fn par_modify_access<'a>(
        &'a mut self,
        chunk_size: usize,
    ) -> impl ParallelIterator<Item = DomainChunk<'a, GRID_DIMENSION>> {
        let (aabb, buffer) = self.aabb_buffer_mut();
        par_modify_access_impl(buffer, aabb, chunk_size)
    }

    fn par_set_values<
        F: Fn(Coord<GRID_DIMENSION>) -> f64 + Send + Sync,
    >(
        &mut self,
        f: F,
        chunk_size: usize,
    ) {
        self.par_modify_access(chunk_size)
            .for_each(|mut d| d.for_each_coord(|coord, value| *value = f(coord)));
    }

    /// Set every coordinate inside `region` to `value`.
    fn par_set_region(
        &mut self,
        region: &AABB<GRID_DIMENSION>,
        value: f64,
        chunk_size: usize,
    ) {
        debug_assert!(self.aabb().contains_aabb(region));
        self.par_modify_access(chunk_size)
            .for_each(|mut d| d.for_each_in(region, |_, v| *v = value));
    }

    /// Smallest and largest value, `None` for NaN containing buffers.
    fn min_max(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in self.buffer() {
            if v.is_nan() {
                return None;
            }
            min = min.min(*v);
            max = max.max(*v);
        }
        Some((min, max))
    }
}

/// Split `buffer` into chunks of `chunk_size` cells.
/// Taking the two borrows as arguments lets them share the lifetime `'a`.
fn par_modify_access_impl<'a, const GRID_DIMENSION: usize>(
    buffer: &'a mut [f64],
    aabb: &'a AABB<GRID_DIMENSION>,
    chunk_size: usize,
) -> impl ParallelIterator<Item = DomainChunk<'a, GRID_DIMENSION>> + 'a {
    buffer[0..aabb.buffer_size()]
        .par_chunks_mut(chunk_size)
        .enumerate()
        .map(move |(i, cells)| DomainChunk::new(i * chunk_size, aabb, cells))
}
