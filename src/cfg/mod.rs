#[cfg(feature = "serde")]
use serde::Deserialize;

use itertools::Itertools;

use crate::{error::Error, prelude::SV};

mod origin;
pub use origin::TimeOrigin;

/// [Parameter] identifies one [Config] field.
/// Its textual representation is the configuration key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Simulation step size
    Dt,
    /// Active flag
    Active,
    /// Inner process time constant
    Beta2,
    /// Outer process time constant
    Beta1,
    /// Noise gain
    Sigma,
    /// Time origin
    TimeStart,
    /// Orbit source descriptor
    OrbitFile,
    /// Satellite set
    Svs,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dt => write!(f, "dt"),
            Self::Active => write!(f, "on"),
            Self::Beta2 => write!(f, "PR_BETA2"),
            Self::Beta1 => write!(f, "PR_BETA1"),
            Self::Sigma => write!(f, "PR_SIGMA"),
            Self::TimeStart => write!(f, "tStart"),
            Self::OrbitFile => write!(f, "orbitfile"),
            Self::Svs => write!(f, "svs"),
        }
    }
}

/// [Config] as provided by the simulation environment.
/// All fields are required: they are optional here only so
/// their absence can be reported by [Config::validate].
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Simulation step size, in seconds
    pub dt: Option<f64>,
    /// Noise is applied when active
    #[cfg_attr(feature = "serde", serde(alias = "on"))]
    pub active: Option<bool>,
    /// Inner (fast) process time constant, in seconds
    #[cfg_attr(feature = "serde", serde(alias = "PR_BETA2"))]
    pub beta2: Option<f64>,
    /// Outer (slow) process time constant, in seconds
    #[cfg_attr(feature = "serde", serde(alias = "PR_BETA1"))]
    pub beta1: Option<f64>,
    /// Noise gain, in pseudo range error units
    #[cfg_attr(feature = "serde", serde(alias = "PR_SIGMA"))]
    pub sigma: Option<f64>,
    /// Time origin in GPST seconds, 0 meaning random
    #[cfg_attr(feature = "serde", serde(alias = "tStart"))]
    pub t_start: Option<f64>,
    /// Orbit source descriptor
    #[cfg_attr(feature = "serde", serde(alias = "orbitfile"))]
    pub orbit_file: Option<String>,
    /// Ordered satellite set
    pub svs: Option<Vec<SV>>,
}

/// Validated [Config]
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Simulation step size, in seconds
    pub dt: f64,
    /// Noise is applied when active
    pub active: bool,
    /// Inner process time constant, in seconds
    pub beta2: f64,
    /// Outer process time constant, in seconds
    pub beta1: f64,
    /// Noise gain
    pub sigma: f64,
    /// [TimeOrigin]
    pub t_start: TimeOrigin,
    /// Orbit source descriptor
    pub orbit_file: String,
    /// Ordered satellite set, never empty
    pub svs: Vec<SV>,
}

/// Strictly positive and finite
fn strictly_positive(value: Option<f64>, param: Parameter) -> Result<f64, Error> {
    let value = value.ok_or(Error::MissingParameter(param))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(param))
    }
}

impl Config {
    /// Copies and returns [Config] with desired step size (s)
    pub fn with_dt(&self, dt: f64) -> Self {
        let mut s = self.clone();
        s.dt = Some(dt);
        s
    }

    /// Copies and returns [Config] with desired active flag
    pub fn with_active(&self, active: bool) -> Self {
        let mut s = self.clone();
        s.active = Some(active);
        s
    }

    /// Copies and returns [Config] with desired outer time constant (s)
    pub fn with_beta1(&self, beta1: f64) -> Self {
        let mut s = self.clone();
        s.beta1 = Some(beta1);
        s
    }

    /// Copies and returns [Config] with desired inner time constant (s)
    pub fn with_beta2(&self, beta2: f64) -> Self {
        let mut s = self.clone();
        s.beta2 = Some(beta2);
        s
    }

    /// Copies and returns [Config] with desired noise gain
    pub fn with_sigma(&self, sigma: f64) -> Self {
        let mut s = self.clone();
        s.sigma = Some(sigma);
        s
    }

    /// Copies and returns [Config] with desired time origin,
    /// in GPST seconds. Use 0 to draw it at each reset.
    pub fn with_t_start(&self, t_start: f64) -> Self {
        let mut s = self.clone();
        s.t_start = Some(t_start);
        s
    }

    /// Copies and returns [Config] with desired orbit source descriptor
    pub fn with_orbit_file(&self, descriptor: &str) -> Self {
        let mut s = self.clone();
        s.orbit_file = Some(descriptor.to_string());
        s
    }

    /// Copies and returns [Config] with desired satellite set
    pub fn with_svs(&self, svs: &[SV]) -> Self {
        let mut s = self.clone();
        s.svs = Some(svs.to_vec());
        s
    }

    /// Validates [Config], field by field, and returns [Settings].
    /// Fails on first missing or invalid [Parameter].
    pub fn validate(&self) -> Result<Settings, Error> {
        let dt = strictly_positive(self.dt, Parameter::Dt)?;

        let active = self.active.ok_or(Error::MissingParameter(Parameter::Active))?;

        let beta2 = strictly_positive(self.beta2, Parameter::Beta2)?;
        let beta1 = strictly_positive(self.beta1, Parameter::Beta1)?;
        let sigma = strictly_positive(self.sigma, Parameter::Sigma)?;

        let t_start = self
            .t_start
            .ok_or(Error::MissingParameter(Parameter::TimeStart))?;

        if !t_start.is_finite() || t_start < 0.0 {
            return Err(Error::InvalidParameter(Parameter::TimeStart));
        }

        let orbit_file = self
            .orbit_file
            .as_ref()
            .ok_or(Error::MissingParameter(Parameter::OrbitFile))?;

        let svs = self
            .svs
            .as_ref()
            .ok_or(Error::MissingParameter(Parameter::Svs))?;

        if svs.is_empty() || !svs.iter().all_unique() {
            return Err(Error::InvalidParameter(Parameter::Svs));
        }

        Ok(Settings {
            dt,
            active,
            beta2,
            beta1,
            sigma,
            t_start: TimeOrigin::from_gpst_seconds(t_start),
            orbit_file: orbit_file.clone(),
            svs: svs.clone(),
        })
    }
}
