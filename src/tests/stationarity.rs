use log::info;

use rand::{rngs::SmallRng, SeedableRng};

use crate::{
    prelude::Propagator,
    tests::{gps, init_logger, test_config, CircularOrbits, ORBITS_BEGIN_GPST_S, ORBITS_END_GPST_S},
};

const NB_RESETS: usize = 10_000;

/// After spin-up, the inner process should be drawn from its stationary
/// distribution: zero mean, w² / (1 - exp(-2 * betas2 * dt)) variance.
#[test]
fn inner_process_stationary_variance() {
    init_logger();

    let (beta2, dt, sigma) = (1.0_f64, 1.0_f64, 1.0_f64);

    let cfg = test_config()
        .with_beta1(10.0)
        .with_beta2(beta2)
        .with_sigma(sigma)
        .with_dt(dt)
        .with_t_start(150_000.0)
        .with_svs(&[gps(1)]);

    let orbits = CircularOrbits::new(ORBITS_BEGIN_GPST_S, ORBITS_END_GPST_S);

    let mut rng = SmallRng::seed_from_u64(2025);
    let mut propagator = Propagator::new(&cfg, orbits).unwrap();
    let handle = propagator.handle();

    let mut samples = Vec::with_capacity(NB_RESETS);

    for _ in 0..NB_RESETS {
        propagator.reset(&mut rng).unwrap();

        let state = handle.read();

        assert!(state.prns()[0].is_finite());
        assert!(state.prns1()[0].is_finite());

        samples.push(state.prns1()[0]);
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

    let expected = sigma.powi(2) / (1.0 - (-2.0 * dt / beta2).exp());

    info!(
        "prns1: mean={:.4} variance={:.4} (expected {:.4})",
        mean, variance, expected
    );

    assert!(mean.abs() < 0.05, "mean {}", mean);
    assert!(
        (variance - expected).abs() / expected < 0.05,
        "variance {} expected {}",
        variance,
        expected
    );
}
