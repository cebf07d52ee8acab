use std::thread;

use rand::{rngs::SmallRng, SeedableRng};

use crate::{
    prelude::{NoiseStateHandle, Propagator},
    tests::{gps, test_config, test_svs, CircularOrbits, ORBITS_BEGIN_GPST_S, ORBITS_END_GPST_S},
};

/// Receiver that only reads the shared state
struct TestReceiver {
    noise: NoiseStateHandle,
}

impl TestReceiver {
    fn pseudorange_errors(&self) -> Vec<f64> {
        test_svs()
            .iter()
            .filter_map(|sv| self.noise.pseudorange_error(*sv))
            .collect()
    }
}

#[test]
fn receivers_share_noise() {
    let mut rng = SmallRng::seed_from_u64(3);

    let mut propagator = Propagator::new(
        &test_config(),
        CircularOrbits::new(ORBITS_BEGIN_GPST_S, ORBITS_END_GPST_S),
    )
    .unwrap();

    let receivers = (0..4)
        .map(|_| TestReceiver {
            noise: propagator.handle(),
        })
        .collect::<Vec<_>>();

    assert!(receivers[0].noise.shares_state_with(&receivers[3].noise));

    propagator.reset(&mut rng).unwrap();

    for _ in 0..10 {
        propagator.update(&mut rng).unwrap();

        let errors = receivers[0].pseudorange_errors();
        assert_eq!(errors.len(), 3);

        for receiver in receivers.iter().skip(1) {
            assert_eq!(receiver.pseudorange_errors(), errors);
        }

        let state = receivers[1].noise.read();
        assert_eq!(errors, state.prns().iter().copied().collect::<Vec<_>>());
    }
}

#[test]
fn satellite_lookup() {
    let mut rng = SmallRng::seed_from_u64(4);

    let mut propagator = Propagator::new(
        &test_config(),
        CircularOrbits::new(ORBITS_BEGIN_GPST_S, ORBITS_END_GPST_S),
    )
    .unwrap();

    propagator.reset(&mut rng).unwrap();

    let handle = propagator.handle();
    let state = handle.read();

    assert_eq!(state.svs(), test_svs().as_slice());

    for (index, sv) in test_svs().iter().enumerate() {
        assert_eq!(state.index_of(*sv), Some(index));
        assert_eq!(state.pseudorange_error(*sv), Some(state.prns()[index]));
        assert_eq!(
            state.position(*sv),
            Some(state.svspos().column(index).into_owned())
        );
    }

    assert_eq!(state.index_of(gps(32)), None);
    assert_eq!(state.pseudorange_error(gps(32)), None);
    assert_eq!(state.position(gps(32)), None);
}

#[test]
fn readers_on_other_threads() {
    let mut rng = SmallRng::seed_from_u64(5);

    let mut propagator = Propagator::new(
        &test_config(),
        CircularOrbits::new(ORBITS_BEGIN_GPST_S, ORBITS_END_GPST_S),
    )
    .unwrap();

    propagator.reset(&mut rng).unwrap();

    for _ in 0..5 {
        propagator.update(&mut rng).unwrap();

        let expected = propagator.handle().snapshot();

        // update completed: all readers of this tick observe it
        let readers = (0..4)
            .map(|_| {
                let handle = propagator.handle();
                thread::spawn(move || handle.snapshot())
            })
            .collect::<Vec<_>>();

        for reader in readers {
            assert_eq!(reader.join().unwrap(), expected);
        }
    }
}
