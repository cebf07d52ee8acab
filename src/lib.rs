#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod cfg;
mod constants;
mod error;
mod noise;
mod orbit;
mod propagator;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, Parameter, Settings, TimeOrigin};
    pub use crate::constants::{
        DEFAULT_INTERPOLATION_ORDER, MAX_SPIN_UP_ITERATIONS, RANDOM_TIME_ORIGIN_S,
    };
    pub use crate::error::Error;
    pub use crate::noise::{NoiseState, NoiseStateHandle};
    pub use crate::orbit::{OrbitSource, OrbitTable};
    pub use crate::propagator::{Lifecycle, Propagator};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::{DVector, Matrix3xX, Vector3};
}
