use log::{debug, error};
use rand::Rng;

use crate::{
    constants::RANDOM_TIME_ORIGIN_S,
    error::Error,
    prelude::{Duration, Epoch},
};

/// [TimeOrigin] marks when the simulated scenario begins, within the
/// orbit data timeline.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub enum TimeOrigin {
    /// A new origin is drawn uniformly within the orbit source
    /// valid interval, at every reset.
    #[default]
    Random,
    /// Fixed origin, that must lie within the orbit source valid interval.
    Fixed(Epoch),
}

impl std::fmt::Display for TimeOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Fixed(t) => write!(f, "{}", t),
        }
    }
}

impl TimeOrigin {
    /// Builds [TimeOrigin] from GPST seconds. The zero sentinel
    /// selects [TimeOrigin::Random].
    pub fn from_gpst_seconds(seconds: f64) -> Self {
        if seconds == RANDOM_TIME_ORIGIN_S {
            Self::Random
        } else {
            Self::Fixed(Epoch::from_gpst_seconds(seconds))
        }
    }

    /// True if [TimeOrigin] is drawn at each reset.
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random)
    }

    /// Resolves the absolute origin [Epoch], drawing it when need be,
    /// and verifies it lies within `[begin, end]`.
    pub(crate) fn resolve<R: Rng>(
        &self,
        (begin, end): (Epoch, Epoch),
        rng: &mut R,
    ) -> Result<Epoch, Error> {
        let t = match self {
            Self::Fixed(t) => *t,
            Self::Random => {
                let span_s = (end - begin).to_seconds();
                if span_s < 0.0 {
                    return Err(Error::OrbitFile(format!(
                        "invalid time frame {} - {}",
                        begin, end
                    )));
                }

                let offset_s = rng.random_range(0.0..=span_s);
                let mut t = begin + Duration::from_seconds(offset_s);

                // nanosecond rounding
                if t > end {
                    t = end;
                }

                debug!("random time origin {} (+{:.3}s)", t, offset_s);
                t
            },
        };

        if t < begin || t > end {
            error!("time origin {} out of [{}, {}]", t, begin, end);
            return Err(Error::TimeOutOfBounds(t));
        }

        Ok(t)
    }
}
