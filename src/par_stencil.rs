use crate::domain::*;
use crate::stencil::*;
use crate::util::*;
use rayon::prelude::*;

/// Write `stencil` applied to `input` into every `output` cell inside `region`.
/// Cells outside `region` are left as they are.
pub fn apply_region<
    BC,
    DomainType,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
>(
    bc: &BC,
    stencil: &Stencil<GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    input: &DomainType,
    output: &mut DomainType,
    region: &AABB<GRID_DIMENSION>,
    chunk_size: usize,
) where
    BC: BCCheck<GRID_DIMENSION>,
    DomainType: DomainView<GRID_DIMENSION>,
{
    debug_assert_eq!(input.aabb(), output.aabb());
    debug_assert!(output.aabb().contains_aabb(region));
    output.par_modify_access(chunk_size).for_each(|mut d| {
        d.for_each_in(region, |world_coord, value| {
            let args = gather_args(stencil, bc, input, &world_coord);
            *value = stencil.apply(&args);
        })
    })
}

/// Apply `stencil` over the whole domain.
pub fn apply<
    BC,
    DomainType,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
>(
    bc: &BC,
    stencil: &Stencil<GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    input: &DomainType,
    output: &mut DomainType,
    chunk_size: usize,
) where
    BC: BCCheck<GRID_DIMENSION>,
    DomainType: DomainView<GRID_DIMENSION>,
{
    let region = *input.aabb();
    apply_region(bc, stencil, input, output, &region, chunk_size);
}

/// Apply `stencil` over the whole domain,
/// mirroring neighbors that fall outside of it.
pub fn apply_reflect<
    DomainType,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
>(
    stencil: &Stencil<GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    input: &DomainType,
    output: &mut DomainType,
    chunk_size: usize,
) where
    DomainType: DomainView<GRID_DIMENSION>,
{
    let bc = ReflectCheck::new(input);
    apply(&bc, stencil, input, output, chunk_size);
}

#[cfg(test)]
mod unit_test {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn par_stencil_test_1d_simple() {
        let stencil = Stencil::new([[0]], |args: &[f64; 1]| args[0]);
        let bound = AABB::new(matrix![0, 99]);
        {
            let input_domain = OwnedDomain::filled(bound, 1.0);
            let mut output_domain = OwnedDomain::filled(bound, 2.0);

            let bc = ConstantCheck::new(0.0, bound);
            apply(&bc, &stencil, &input_domain, &mut output_domain, 1);
            for x in output_domain.buffer() {
                assert_approx_eq!(f64, *x, 1.0);
            }
        }

        {
            let input_domain = OwnedDomain::filled(bound, 2.0);
            let mut output_domain = OwnedDomain::filled(bound, 1.0);

            let bc = ConstantCheck::new(0.0, bound);
            apply(&bc, &stencil, &input_domain, &mut output_domain, 7);
            for x in output_domain.buffer() {
                assert_approx_eq!(f64, *x, 2.0);
            }
        }
    }

    // Throw an error if we hit boundary
    struct ErrorCheck {
        bound: AABB<1>,
    }
    impl BCCheck<1> for ErrorCheck {
        fn check(&self, c: &Coord<1>) -> Option<f64> {
            assert!(self.bound.contains(c));
            None
        }
    }

    #[test]
    fn par_stencil_region_test_1d_simple() {
        let stencil = Stencil::new([[-1], [0], [1]], |args: &[f64; 3]| {
            let mut r = 0.0;
            for a in args {
                r += a / 3.0;
            }
            r
        });

        let bound = AABB::new(matrix![0, 10]);
        let region = AABB::new(matrix![1, 9]);

        let input_domain = OwnedDomain::filled(bound, 1.0);
        let mut output_domain = OwnedDomain::filled(bound, 5.0);

        let bc = ErrorCheck { bound };

        apply_region(&bc, &stencil, &input_domain, &mut output_domain, &region, 2);

        let buffer = output_domain.buffer();
        assert_approx_eq!(f64, buffer[0], 5.0);
        assert_approx_eq!(f64, buffer[10], 5.0);
        for i in &buffer[1..10] {
            assert_approx_eq!(f64, *i, 1.0, ulps = 2);
        }
    }

    #[test]
    fn reflect_keeps_constant_field() {
        let stencil = standard_stencils::box_1d(1);
        let bound = AABB::from_shape([5, 7]);
        let input_domain = OwnedDomain::filled(bound, 3.0);
        let mut output_domain = OwnedDomain::new(bound);
        apply_reflect(&stencil, &input_domain, &mut output_domain, 4);
        for x in output_domain.buffer() {
            assert_approx_eq!(f64, *x, 3.0, ulps = 2);
        }
    }
}
