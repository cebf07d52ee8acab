mod orbits;
mod shared;
mod stationarity;

pub use orbits::CircularOrbits;

use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{Config, Constellation, Duration, Epoch, OrbitTable, Vector3, SV};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Orbit data begins here (GPST seconds)
pub const ORBITS_BEGIN_GPST_S: f64 = 100_000.0;

/// Orbit data ends here (GPST seconds)
pub const ORBITS_END_GPST_S: f64 = 200_000.0;

/// Precise orbit sampling period
pub const ORBITS_SAMPLING_S: f64 = 900.0;

pub fn gps(prn: u8) -> SV {
    SV::new(Constellation::GPS, prn)
}

pub fn test_svs() -> Vec<SV> {
    vec![gps(1), gps(2), gps(3)]
}

/// Complete and valid [Config]: random time origin
pub fn test_config() -> Config {
    Config::default()
        .with_dt(0.2)
        .with_active(true)
        .with_beta1(2000.0)
        .with_beta2(200.0)
        .with_sigma(0.1)
        .with_t_start(0.0)
        .with_orbit_file("igs21000.sp3")
        .with_svs(&test_svs())
}

/// Tabulates [CircularOrbits] at [ORBITS_SAMPLING_S] over `[begin, end]` (GPST seconds).
pub fn test_orbit_table(svs: &[SV], begin_s: f64, end_s: f64) -> OrbitTable {
    let orbits = CircularOrbits::new(ORBITS_BEGIN_GPST_S, ORBITS_END_GPST_S);
    let begin = Epoch::from_gpst_seconds(begin_s);
    let nb_samples = ((end_s - begin_s) / ORBITS_SAMPLING_S).floor() as usize + 1;

    let mut table = OrbitTable::default();

    for sv in svs {
        for i in 0..nb_samples {
            let t = begin + Duration::from_seconds(i as f64 * ORBITS_SAMPLING_S);
            table.add_sample(*sv, t, orbits.analytic_position(*sv, t));
        }
    }

    table
}

pub fn distance_m(lhs: &Vector3<f64>, rhs: &Vector3<f64>) -> f64 {
    (lhs - rhs).norm()
}
