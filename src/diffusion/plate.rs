use crate::diffusion::DiffusionConfig;
use crate::domain::*;
use crate::error::Result;
use crate::par_slice;
use crate::par_stencil;
use crate::stencil::*;

/// Both live buffers at the start of a run.
/// Every cell is `t_cool`, `prev` additionally has the hot edge pinned.
/// `next` gets its hot edge on the first step.
pub fn initial_state(
    config: &DiffusionConfig,
    chunk_size: usize,
) -> (OwnedDomain<2>, OwnedDomain<2>) {
    let aabb = config.aabb();
    let mut prev = OwnedDomain::filled(aabb, config.t_cool);
    let next = prev.clone();
    prev.par_set_region(&config.hot_edge.aabb(&aabb), config.t_hot, chunk_size);
    (prev, next)
}

/// Advance one time step.
///
/// Interior cells of `next` get the stencil applied to `prev`,
/// the hot edge of `next` is re-pinned, then `next` is copied back into
/// `prev` so both hold the new state.
/// Border cells other than the hot edge are never written.
pub fn do_timestep<DomainType: DomainView<2>>(
    config: &DiffusionConfig,
    stencil: &Stencil<2, 5>,
    prev: &mut DomainType,
    next: &mut DomainType,
    chunk_size: usize,
) {
    profiling::scope!("diffusion::do_timestep");
    debug_assert_eq!(prev.aabb(), next.aabb());
    let aabb = *prev.aabb();
    if let Some(interior) = aabb.shrink(1) {
        // The interior never reads past the border, NaN makes a leak obvious.
        let bc = ConstantCheck::new(f64::NAN, aabb);
        par_stencil::apply_region(&bc, stencil, prev, next, &interior, chunk_size);
    }
    next.par_set_region(&config.hot_edge.aabb(&aabb), config.t_hot, chunk_size);
    par_slice::copy_from(prev.buffer_mut(), next.buffer(), chunk_size);
}

/// A plate being heated from one edge.
pub struct HeatPlate {
    config: DiffusionConfig,
    stencil: Stencil<2, 5>,
    prev: OwnedDomain<2>,
    next: OwnedDomain<2>,
    steps_taken: usize,
    chunk_size: usize,
}

impl HeatPlate {
    pub fn new(config: DiffusionConfig, chunk_size: usize) -> Result<Self> {
        config.validate()?;
        let stencil = standard_stencils::heat_2d(
            config.dt(),
            config.dx,
            config.dy,
            config.diffusivity,
        );
        let (prev, next) = initial_state(&config, chunk_size);
        Ok(HeatPlate {
            config,
            stencil,
            prev,
            next,
            steps_taken: 0,
            chunk_size,
        })
    }

    pub fn config(&self) -> &DiffusionConfig {
        &self.config
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// The current temperature field.
    pub fn state(&self) -> &OwnedDomain<2> {
        &self.prev
    }

    pub fn into_state(self) -> OwnedDomain<2> {
        self.prev
    }

    pub fn step(&mut self) {
        do_timestep(
            &self.config,
            &self.stencil,
            &mut self.prev,
            &mut self.next,
            self.chunk_size,
        );
        self.steps_taken += 1;
    }

    /// Take all configured steps.
    pub fn run(&mut self) {
        let start = self.log_start();
        for _ in 0..self.config.steps {
            self.step();
        }
        self.log_finish(start);
    }

    /// Take all configured steps, calling `observer` with the step number
    /// (starting at 1) and the new state after each one.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<()>
    where
        F: FnMut(usize, &OwnedDomain<2>) -> Result<()>,
    {
        let start = self.log_start();
        for _ in 0..self.config.steps {
            self.step();
            observer(self.steps_taken, &self.prev)?;
        }
        self.log_finish(start);
        Ok(())
    }

    fn log_start(&self) -> std::time::Instant {
        let (nx, ny) = self.config.cells();
        log::info!(
            "Diffusing {} x {} grid, dt: {:e}, steps: {}, simulated time: {:e}",
            nx,
            ny,
            self.config.dt(),
            self.config.steps,
            self.config.duration()
        );
        std::time::Instant::now()
    }

    fn log_finish(&self, start: std::time::Instant) {
        log::info!("Finished {} steps in {:?}", self.config.steps, start.elapsed());
    }
}

/// Run `config` to completion and return the final field.
pub fn simulate(config: &DiffusionConfig, chunk_size: usize) -> Result<OwnedDomain<2>> {
    let mut plate = HeatPlate::new(config.clone(), chunk_size)?;
    plate.run();
    Ok(plate.into_state())
}
