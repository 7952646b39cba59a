use crate::util::*;
use serde::{Deserialize, Serialize};

/// One full border line of a 2D grid.
/// Rows run along the first axis, so `LastRow` is `u[-1, :]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    FirstRow,
    #[default]
    LastRow,
    FirstColumn,
    LastColumn,
}

impl Edge {
    /// The sub-box of `aabb` covered by this edge.
    pub fn aabb(&self, aabb: &AABB<2>) -> AABB<2> {
        let mut result = *aabb;
        match self {
            Edge::FirstRow => result.bounds[(0, 1)] = aabb.bounds[(0, 0)],
            Edge::LastRow => result.bounds[(0, 0)] = aabb.bounds[(0, 1)],
            Edge::FirstColumn => result.bounds[(1, 1)] = aabb.bounds[(1, 0)],
            Edge::LastColumn => result.bounds[(1, 0)] = aabb.bounds[(1, 1)],
        }
        result
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn edge_aabb_test() {
        let aabb = AABB::from_shape([4, 5]);
        assert_eq!(Edge::LastRow.aabb(&aabb), AABB::new(matrix![3, 3; 0, 4]));
        assert_eq!(Edge::FirstRow.aabb(&aabb), AABB::new(matrix![0, 0; 0, 4]));
        assert_eq!(
            Edge::FirstColumn.aabb(&aabb),
            AABB::new(matrix![0, 3; 0, 0])
        );
        assert_eq!(Edge::LastColumn.aabb(&aabb), AABB::new(matrix![0, 3; 4, 4]));
    }
}
