use thiserror::Error;

use crate::{
    cfg::Parameter,
    prelude::{Epoch, SV},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required [Config](crate::prelude::Config) field was not provided.
    #[error("missing parameter \"{0}\"")]
    MissingParameter(Parameter),

    /// A [Config](crate::prelude::Config) field was provided but does not
    /// satisfy its domain constraint (strictly positive, finite, non empty..).
    #[error("invalid parameter \"{0}\"")]
    InvalidParameter(Parameter),

    /// The orbit source could not be prepared or interpolated.
    /// This is fatal and surfaced at construction.
    #[error("orbit source error: {0}")]
    OrbitFile(String),

    /// Requested [Epoch] lies outside the orbit source's valid interval.
    /// We never clamp silently.
    #[error("{0} is out of bounds of the orbit data")]
    TimeOutOfBounds(Epoch),

    /// [SV] was not part of the prepared satellite set.
    #[error("{0} is not known to the orbit source")]
    UnknownSatellite(SV),

    /// [Propagator::update](crate::prelude::Propagator::update) was invoked
    /// prior any successful reset: this is a scheduling bug in the host.
    #[error("internal error: noise state is not initialized (bad op)")]
    NotInitialized,
}
