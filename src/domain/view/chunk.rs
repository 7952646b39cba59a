use crate::util::*;

/// The cells one rayon task owns: a run of consecutive linear indices
/// starting at `start`, mapped back to world coordinates through `aabb`.
pub struct DomainChunk<'a, const GRID_DIMENSION: usize> {
    start: usize,
    aabb: &'a AABB<GRID_DIMENSION>,
    cells: &'a mut [f64],
}

impl<'a, const GRID_DIMENSION: usize> DomainChunk<'a, GRID_DIMENSION> {
    pub(super) fn new(
        start: usize,
        aabb: &'a AABB<GRID_DIMENSION>,
        cells: &'a mut [f64],
    ) -> Self {
        debug_assert!(start + cells.len() <= aabb.buffer_size());
        DomainChunk { start, aabb, cells }
    }

    /// Call `f` with the world coordinate and value of every cell.
    pub fn for_each_coord<F>(&mut self, mut f: F)
    where
        F: FnMut(Coord<GRID_DIMENSION>, &mut f64),
    {
        let (start, aabb) = (self.start, self.aabb);
        for (i, value) in self.cells.iter_mut().enumerate() {
            f(aabb.linear_to_coord(start + i), value);
        }
    }

    /// Like `for_each_coord`, skipping cells outside `region`.
    pub fn for_each_in<F>(&mut self, region: &AABB<GRID_DIMENSION>, mut f: F)
    where
        F: FnMut(Coord<GRID_DIMENSION>, &mut f64),
    {
        self.for_each_coord(|coord, value| {
            if region.contains(&coord) {
                f(coord, value);
            }
        });
    }
}
