use crate::domain::bc::BCCheck;
use crate::domain::DomainView;
use crate::util::*;

/// Mirror out of bound neighbors back into the domain
/// (d c b a | a b c d), the default mode of an image uniform filter.
pub struct ReflectCheck<'a, const GRID_DIMENSION: usize, DomainType>
where
    DomainType: DomainView<GRID_DIMENSION>,
{
    domain: &'a DomainType,
}

impl<'a, const GRID_DIMENSION: usize, DomainType>
    ReflectCheck<'a, GRID_DIMENSION, DomainType>
where
    DomainType: DomainView<GRID_DIMENSION>,
{
    pub fn new(domain: &'a DomainType) -> Self {
        ReflectCheck { domain }
    }
}

impl<const GRID_DIMENSION: usize, DomainType> BCCheck<GRID_DIMENSION>
    for ReflectCheck<'_, GRID_DIMENSION, DomainType>
where
    DomainType: DomainView<GRID_DIMENSION>,
{
    fn check(&self, world_coord: &Coord<GRID_DIMENSION>) -> Option<f64> {
        let r_coord = self.domain.aabb().reflect_coord(world_coord);
        if r_coord != *world_coord {
            return Some(self.domain.view(&r_coord));
        }
        None
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::domain::OwnedDomain;
    use float_cmp::assert_approx_eq;

    #[test]
    fn reflect_check_test() {
        let aabb = AABB::new(matrix![0, 10]);
        let mut domain = OwnedDomain::new(aabb);
        domain.par_set_values(|coord| coord[0] as f64, 4);
        let bc = ReflectCheck::new(&domain);

        assert_eq!(bc.check(&vector![3]), None);
        assert_approx_eq!(f64, bc.check(&vector![-1]).unwrap(), 0.0);
        assert_approx_eq!(f64, bc.check(&vector![-2]).unwrap(), 1.0);
        assert_approx_eq!(f64, bc.check(&vector![11]).unwrap(), 10.0);
        assert_approx_eq!(f64, bc.check(&vector![12]).unwrap(), 9.0);
    }
}
