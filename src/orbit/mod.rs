use crate::{
    error::Error,
    prelude::{Epoch, Vector3, SV},
};

mod table;
pub use table::OrbitTable;

/// Any orbit provider should implement the [OrbitSource] trait to
/// propose satellite positions to the [Propagator](crate::prelude::Propagator).
///
/// The [Propagator](crate::prelude::Propagator) is fully synchronous:
/// all queries are expected to be fast in memory computations, once
/// [OrbitSource::prepare] has completed.
pub trait OrbitSource {
    /// Prepare the interpolation structure for this ordered satellite set.
    /// This is invoked exactly once, at construction, and may be expensive.
    /// Should fail with [Error::OrbitFile] if the set cannot be served.
    fn prepare(&mut self, svs: &[SV]) -> Result<(), Error>;

    /// Returns the `(begin, end)` time interval this source can serve.
    fn valid_interval(&self) -> Result<(Epoch, Epoch), Error>;

    /// Returns [SV] position at requested [Epoch].
    /// Should fail with [Error::TimeOutOfBounds] outside [OrbitSource::valid_interval].
    fn position_at(&self, sv: SV, t: Epoch) -> Result<Vector3<f64>, Error>;
}
