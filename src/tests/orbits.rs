use std::f64::consts::PI;

use crate::prelude::{Epoch, Error, OrbitSource, Vector3, SV};

/// GPS like circular orbits, that we can evaluate analytically.
pub struct CircularOrbits {
    begin: Epoch,
    end: Epoch,
    prepared: Vec<SV>,
}

impl CircularOrbits {
    /// Semi major axis (m)
    const RADIUS_M: f64 = 26_560_000.0;

    /// Orbital period (s)
    const PERIOD_S: f64 = 43_082.0;

    /// Orbital plane inclination
    const INCLINATION_RAD: f64 = 55.0 * PI / 180.0;

    /// Builds [CircularOrbits] valid over `[begin, end]` (GPST seconds)
    pub fn new(begin_gpst_s: f64, end_gpst_s: f64) -> Self {
        Self {
            begin: Epoch::from_gpst_seconds(begin_gpst_s),
            end: Epoch::from_gpst_seconds(end_gpst_s),
            prepared: Vec::new(),
        }
    }

    pub fn analytic_position(&self, sv: SV, t: Epoch) -> Vector3<f64> {
        let phase = sv.prn as f64 * 2.0 * PI / 32.0;
        let theta = 2.0 * PI * (t - self.begin).to_seconds() / Self::PERIOD_S + phase;

        Vector3::new(
            Self::RADIUS_M * theta.cos(),
            Self::RADIUS_M * theta.sin() * Self::INCLINATION_RAD.cos(),
            Self::RADIUS_M * theta.sin() * Self::INCLINATION_RAD.sin(),
        )
    }
}

impl OrbitSource for CircularOrbits {
    fn prepare(&mut self, svs: &[SV]) -> Result<(), Error> {
        self.prepared = svs.to_vec();
        Ok(())
    }

    fn valid_interval(&self) -> Result<(Epoch, Epoch), Error> {
        Ok((self.begin, self.end))
    }

    fn position_at(&self, sv: SV, t: Epoch) -> Result<Vector3<f64>, Error> {
        if !self.prepared.contains(&sv) {
            return Err(Error::UnknownSatellite(sv));
        }

        if t < self.begin || t > self.end {
            return Err(Error::TimeOutOfBounds(t));
        }

        Ok(self.analytic_position(sv, t))
    }
}
