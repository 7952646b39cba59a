use coursenum::diffusion::*;
use coursenum::domain::*;
use coursenum::npy;
use coursenum::stencil::*;
use coursenum::util::*;

use float_cmp::assert_approx_eq;
use rand::prelude::*;

/// Straight nested loop version of one explicit step.
fn naive_step(config: &DiffusionConfig, u0: &mut [Vec<f64>], u: &mut [Vec<f64>]) {
    let (nx, ny) = config.cells();
    let dx2 = config.dx * config.dx;
    let dy2 = config.dy * config.dy;
    let dt = config.dt();
    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            let uxx = (u0[i + 1][j] - 2.0 * u0[i][j] + u0[i - 1][j]) / dx2;
            let uyy = (u0[i][j + 1] - 2.0 * u0[i][j] + u0[i][j - 1]) / dy2;
            u[i][j] = u0[i][j] + config.diffusivity * dt * (uxx + uyy);
        }
    }
    for j in 0..ny {
        u[nx - 1][j] = config.t_hot;
    }
    for (dst, src) in u0.iter_mut().zip(u.iter()) {
        dst.copy_from_slice(src);
    }
}

#[test]
fn random_field_matches_naive() {
    let config = DiffusionConfig {
        plate_width: 12.0,
        plate_height: 9.0,
        dx: 1.0,
        dy: 1.0,
        ..Default::default()
    };
    let (nx, ny) = config.cells();
    assert_eq!((nx, ny), (12, 9));

    // Random start between the two temperatures
    let mut rng = rand::thread_rng();
    let values: Vec<f64> = (0..nx * ny)
        .map(|_| rng.gen_range(config.t_cool..config.t_hot))
        .collect();
    let mut prev = OwnedDomain::from_buffer(config.aabb(), values.clone()).unwrap();
    let mut next = prev.clone();
    let mut u0: Vec<Vec<f64>> = values.chunks(ny).map(|r| r.to_vec()).collect();
    let mut u = u0.clone();

    let stencil = standard_stencils::heat_2d(
        config.dt(),
        config.dx,
        config.dy,
        config.diffusivity,
    );
    for _ in 0..25 {
        do_timestep(&config, &stencil, &mut prev, &mut next, 7);
        naive_step(&config, &mut u0, &mut u);
    }

    for c in prev.aabb().coord_iter() {
        let expected = u0[c[0] as usize][c[1] as usize];
        assert_approx_eq!(f64, prev.view(&c), expected, epsilon = 1e-9);
    }
}

#[test]
fn stays_between_temperatures() {
    let config = DiffusionConfig {
        plate_width: 20.0,
        plate_height: 30.0,
        dx: 1.0,
        dy: 1.0,
        steps: 300,
        ..Default::default()
    };
    let mut plate = HeatPlate::new(config.clone(), 64).unwrap();
    let hot_row = config.cells().0 as i32 - 1;
    let mut last_neighbor = config.t_cool;
    plate
        .run_with(|_, state| {
            let (lo, hi) = state.min_max().unwrap();
            assert!(lo >= config.t_cool);
            assert!(hi <= config.t_hot);

            // cells next to the hot edge only warm up
            let neighbor = state.view(&vector![hot_row - 1, 10]);
            assert!(neighbor >= last_neighbor);
            last_neighbor = neighbor;

            for j in 0..config.cells().1 as i32 {
                assert_eq!(state.view(&vector![hot_row, j]), config.t_hot);
                assert_eq!(state.view(&vector![0, j]), config.t_cool);
            }
            Ok(())
        })
        .unwrap();
    assert!(last_neighbor > config.t_cool);
}

#[test]
fn npy_file_round_trip() {
    let config = DiffusionConfig {
        plate_width: 5.0,
        plate_height: 7.0,
        dx: 1.0,
        dy: 1.0,
        steps: 40,
        ..Default::default()
    };
    let state = simulate(&config, 16).unwrap();
    assert_eq!(state.aabb().shape(), [5, 7]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diffusion.npy");
    npy::write_npy(&path, &state).unwrap();
    // overwritten, not appended
    npy::write_npy(&path, &state).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 128 + 5 * 7 * 8);
    let loaded = npy::read_npy(&path).unwrap();
    assert_eq!(loaded, state);
}

#[test]
fn invalid_configs() {
    let tiny = DiffusionConfig {
        plate_width: 0.2,
        ..Default::default()
    };
    assert!(HeatPlate::new(tiny, 1).is_err());

    let negative = DiffusionConfig {
        diffusivity: -1.0,
        ..Default::default()
    };
    assert!(simulate(&negative, 1).is_err());
}

#[test]
fn config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plate.json");
    std::fs::write(&path, r#"{"plate_width": 1.0, "steps": 5, "hot_edge": "first_column"}"#)
        .unwrap();
    let config = DiffusionConfig::load(&path).unwrap();
    assert_eq!(config.steps, 5);
    assert_eq!(config.hot_edge, Edge::FirstColumn);
    assert_approx_eq!(f64, config.plate_height, 10.0);
    assert_eq!(config.cells(), (10, 100));

    assert!(DiffusionConfig::load(&dir.path().join("missing.json")).is_err());
}
