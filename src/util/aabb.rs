use crate::util::indexing::*;
use crate::util::*;

/// Axis Aligned Bounding Box (AABB) for coordinate types.
/// Each instance is inclusive of both corners.
/// This class is responsible for alot of indexing operations,
/// where we map between a linear buffer and coordinates.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct AABB<const DIMENSION: usize> {
    pub bounds: Bounds<DIMENSION>,
}

impl<const DIMENSION: usize> AABB<DIMENSION> {
    /// Create AABB from raw bounds.
    #[inline]
    pub fn new(bounds: Bounds<DIMENSION>) -> Self {
        AABB { bounds }
    }

    /// Create AABB anchored at the origin from an array shape,
    /// i.e. shape [4, 3] gives [0, 3] x [0, 2].
    pub fn from_shape(shape: [usize; DIMENSION]) -> Self {
        debug_assert!(Self::checked_from_shape(shape).is_some());
        let mut bounds = Bounds::zero();
        for d in 0..DIMENSION {
            bounds[(d, 1)] = shape[d] as i32 - 1;
        }
        AABB { bounds }
    }

    /// Like `from_shape`, but `None` when a dimension is zero or does not
    /// fit a coordinate, or when the cell count overflows `usize`.
    pub fn checked_from_shape(shape: [usize; DIMENSION]) -> Option<Self> {
        let mut bounds = Bounds::zero();
        let mut cells = 1usize;
        for d in 0..DIMENSION {
            if shape[d] == 0 || shape[d] > i32::MAX as usize {
                return None;
            }
            cells = cells.checked_mul(shape[d])?;
            bounds[(d, 1)] = shape[d] as i32 - 1;
        }
        Some(AABB { bounds })
    }

    /// Moving min to the origin, returns the exclusie size in each direction
    /// i.e. [0, 9]  would have exclusive size of 10.
    pub fn exclusive_bounds(&self) -> Coord<DIMENSION> {
        (self.bounds.column(1) - self.bounds.column(0)).add_scalar(1)
    }

    /// Array shape, numpy style.
    pub fn shape(&self) -> [usize; DIMENSION] {
        let exclusive_bounds = self.exclusive_bounds();
        std::array::from_fn(|d| exclusive_bounds[d] as usize)
    }

    /// Return the number of coordinates contained in the instance.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        real_buffer_size(&self.exclusive_bounds())
    }

    /// Return the linear index for a coord in the instance
    pub fn coord_to_linear(&self, coord: &Coord<DIMENSION>) -> usize {
        coord_to_linear(&(coord - self.min()), &self.exclusive_bounds())
    }

    /// Return the coordinate in the instance for a given linear index.
    pub fn linear_to_coord(&self, index: usize) -> Coord<DIMENSION> {
        linear_to_coord(index, &self.exclusive_bounds()) + self.min()
    }

    /// Check whether the instance contains a coordinate.
    pub fn contains(&self, coord: &Coord<DIMENSION>) -> bool {
        for d in 0..DIMENSION {
            if coord[d] < self.bounds[(d, 0)] || coord[d] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    /// Check whether another AABB is contained in the instance.
    pub fn contains_aabb(&self, other: &Self) -> bool {
        for d in 0..DIMENSION {
            if other.bounds[(d, 0)] < self.bounds[(d, 0)]
                || other.bounds[(d, 1)] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    /// Mirror a coordinate that falls just outside the box back in,
    /// repeating the edge sample (d c b a | a b c d).
    /// Assumes that coords are no more than one box away!
    pub fn reflect_coord(&self, coord: &Coord<DIMENSION>) -> Coord<DIMENSION> {
        let mut result = Coord::zero();
        for d in 0..DIMENSION {
            let lo = self.bounds[(d, 0)];
            let hi = self.bounds[(d, 1)];
            let di_raw = coord[d];
            result[d] = if di_raw < lo {
                (lo + (lo - di_raw) - 1).min(hi)
            } else if di_raw > hi {
                (hi - (di_raw - hi) + 1).max(lo)
            } else {
                di_raw
            };
        }
        result
    }

    /// Return the box with `margin` removed from every side,
    /// `None` if nothing would be left.
    pub fn shrink(&self, margin: i32) -> Option<Self> {
        let mut result = *self;
        for d in 0..DIMENSION {
            result.bounds[(d, 0)] += margin;
            result.bounds[(d, 1)] -= margin;
        }
        result.check_validity().then_some(result)
    }

    /// Return min corner.
    pub fn min(&self) -> Coord<DIMENSION> {
        self.bounds.column(0).into()
    }

    /// Check that max >= min
    pub fn check_validity(&self) -> bool {
        for d in 0..DIMENSION {
            if self.bounds[(d, 0)] > self.bounds[(d, 1)] {
                return false;
            }
        }
        true
    }

    /// Return iterator over contained coords
    /// in linear ordering.
    pub fn coord_iter(&self) -> impl Iterator<Item = Coord<DIMENSION>> + '_ {
        (0..self.buffer_size()).map(|i| self.linear_to_coord(i))
    }
}
