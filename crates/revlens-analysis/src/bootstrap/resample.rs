//! Deterministic parallel resampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPool;
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// RNG for one iteration, derived from the base seed and iteration index.
pub fn iteration_rng(seed: u64, iteration: usize) -> StdRng {
    let stream = xxh3_64_with_seed(&(iteration as u64).to_le_bytes(), seed);
    StdRng::seed_from_u64(stream)
}

/// Fill `out` with `n` indices drawn uniformly from `0..n` with replacement.
pub fn draw_indices(rng: &mut StdRng, n: usize, out: &mut Vec<usize>) {
    out.clear();
    out.extend((0..n).map(|_| rng.random_range(0..n)));
}

/// Run `iterations` resamples of size `n` and collect `f`'s outputs in
/// iteration order.
///
/// `init` builds per-worker scratch state reused across that worker's
/// iterations. With `pool`, the work runs inside that pool.
pub fn resample_map<S, T, I, F>(
    pool: Option<&ThreadPool>,
    iterations: usize,
    seed: u64,
    n: usize,
    init: I,
    f: F,
) -> Vec<T>
where
    T: Send,
    I: Fn() -> S + Sync + Send,
    F: Fn(&mut S, &[usize]) -> T + Sync + Send,
{
    let run = || {
        (0..iterations)
            .into_par_iter()
            .map_init(
                || (Vec::with_capacity(n), init()),
                |(indices, state), i| {
                    let mut rng = iteration_rng(seed, i);
                    draw_indices(&mut rng, n, indices);
                    f(state, indices)
                },
            )
            .collect::<Vec<T>>()
    };
    match pool {
        Some(pool) => pool.install(run),
        None => run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_rng_is_stable() {
        let mut a = iteration_rng(42, 7);
        let mut b = iteration_rng(42, 7);
        let mut out_a = Vec::new();
        let mut out_b = Vec::new();
        draw_indices(&mut a, 20, &mut out_a);
        draw_indices(&mut b, 20, &mut out_b);
        assert_eq!(out_a, out_b);
        assert!(out_a.iter().all(|&i| i < 20));
    }

    #[test]
    fn test_iterations_get_distinct_streams() {
        let draws: Vec<Vec<usize>> = (0..5)
            .map(|i| {
                let mut out = Vec::new();
                draw_indices(&mut iteration_rng(42, i), 50, &mut out);
                out
            })
            .collect();
        assert!(draws.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_resample_map_order_independent_of_pool() {
        let sum = |_: &mut (), idx: &[usize]| idx.iter().sum::<usize>();
        let global = resample_map(None, 200, 9, 30, || (), sum);

        let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();
        let pooled = resample_map(Some(&pool), 200, 9, 30, || (), sum);
        assert_eq!(global, pooled);
        assert_eq!(global.len(), 200);
    }
}
