use crate::domain::*;
use crate::stencil::*;
use crate::util::*;

/// Collect the neighbor values a stencil needs for `world_coord`,
/// asking the boundary condition first.
pub fn gather_args<
    BC,
    DomainType,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
>(
    stencil: &Stencil<GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    bc: &BC,
    input: &DomainType,
    world_coord: &Coord<GRID_DIMENSION>,
) -> Values<NEIGHBORHOOD_SIZE>
where
    BC: BCCheck<GRID_DIMENSION>,
    DomainType: DomainView<GRID_DIMENSION>,
{
    let mut result = Values::zero();
    for (i, n_i) in stencil.offsets().iter().enumerate() {
        let n_world_coord = world_coord + n_i;
        result[i] = bc
            .check(&n_world_coord)
            .unwrap_or_else(|| input.view(&n_world_coord));
    }
    result
}
