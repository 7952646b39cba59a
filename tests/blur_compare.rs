use coursenum::blur::*;
use coursenum::domain::*;
use coursenum::util::*;

use float_cmp::assert_approx_eq;
use rand::prelude::*;

fn random_channel(shape: [usize; 2]) -> OwnedDomain<2> {
    let mut rng = rand::thread_rng();
    let aabb = AABB::from_shape(shape);
    let values = (0..aabb.buffer_size())
        .map(|_| rng.gen_range(0..=255) as f64)
        .collect();
    OwnedDomain::from_buffer(aabb, values).unwrap()
}

#[test]
fn dense_and_matrix_free_agree() {
    for shape in [[10, 10], [7, 12], [12, 7]] {
        let channel = random_channel(shape);
        let operator = neighbor_operator(shape, 0.2, 0.2);
        let dense = apply_operator(&operator, &channel).unwrap();
        let matrix_free = apply_neighbor_blur(&channel, 0.2, 0.2, 13).unwrap();
        for (d, f) in dense.buffer().iter().zip(matrix_free.buffer()) {
            assert_approx_eq!(f64, *d, *f, epsilon = 1e-9);
        }
    }
}

#[test]
fn row_end_mixes_with_next_row_start() {
    // one bright pixel at the start of row 1
    let mut channel = OwnedDomain::new(AABB::from_shape([4, 4]));
    channel.set_coord(&vector![1, 0], 100.0);
    let blurred = apply_neighbor_blur(&channel, 0.2, 0.2, 4).unwrap();

    // the last pixel of row 0 picks it up through the flat index
    assert_approx_eq!(f64, blurred.view(&vector![0, 3]), 20.0, ulps = 4);
    assert_approx_eq!(f64, blurred.view(&vector![1, 0]), 20.0, ulps = 4);
    assert_approx_eq!(f64, blurred.view(&vector![1, 1]), 20.0, ulps = 4);
    // rows are 4 apart
    assert_approx_eq!(f64, blurred.view(&vector![0, 0]), 20.0, ulps = 4);
    assert_approx_eq!(f64, blurred.view(&vector![2, 0]), 20.0, ulps = 4);
    assert_approx_eq!(f64, blurred.view(&vector![2, 1]), 0.0);
}

#[test]
fn box_filter_keeps_mean_of_constant_image() {
    let channel = OwnedDomain::filled(AABB::from_shape([9, 5]), 37.0);
    let boxed = uniform_filter(&channel, 8);
    for v in boxed.buffer() {
        assert_approx_eq!(f64, *v, 37.0, ulps = 4);
    }
}

#[test]
fn box_filter_matches_direct_sum() {
    let channel = random_channel([6, 8]);
    let boxed = uniform_filter(&channel, 5);
    let aabb = *channel.aabb();
    let mirror = |c: i32, n: i32| {
        if c < 0 {
            -c - 1
        } else if c >= n {
            2 * n - c - 1
        } else {
            c
        }
    };
    for c in aabb.coord_iter() {
        let mut sum = 0.0;
        for di in -1..=1 {
            for dj in -1..=1 {
                let n = vector![mirror(c[0] + di, 6), mirror(c[1] + dj, 8)];
                sum += channel.view(&n);
            }
        }
        assert_approx_eq!(f64, boxed.view(&c), sum / 9.0, epsilon = 1e-9);
    }
}
