//! Satellite noise and position propagator
use std::sync::{Arc, RwLock};

use itertools::Itertools;
use log::{debug, error, info};
use rand::Rng;

use crate::{
    cfg::{Config, Settings},
    error::Error,
    noise::{read_lock, write_lock, NoiseState, NoiseStateHandle},
    orbit::OrbitSource,
    prelude::{Duration, Epoch, Matrix3xX},
};

/// [Propagator] lifecycle
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built but never (successfully) reset: [NoiseState] must not be read.
    #[default]
    Uninitialized,
    /// [NoiseState] is consistent and may be updated.
    Ready,
}

/// [Propagator] owns the [NoiseState] of one simulation run and is the only
/// entity allowed to write to it. Receivers obtain read access through
/// [Propagator::handle].
///
/// The host scheduler is expected to:
/// - [Propagator::reset] at the beginning of the run (and whenever the run restarts)
/// - [Propagator::update] exactly once per tick, before any receiver reads
///   the [NoiseState] for that tick.
///
/// The random stream is shared by the whole simulation run and is lent
/// to both operations: seed it identically to replay a run exactly.
pub struct Propagator<O: OrbitSource> {
    /// Validated [Settings]
    settings: Settings,
    /// Step size
    dt: Duration,
    /// [OrbitSource]
    orbits: O,
    /// Shared [NoiseState]
    state: Arc<RwLock<NoiseState>>,
    /// [Lifecycle]
    lifecycle: Lifecycle,
    /// Time origin, resolved at reset
    t_start: Option<Epoch>,
    /// Elapsed simulation time since reset
    elapsed: Duration,
    /// Last spin-up length
    spin_up_iterations: usize,
}

impl<O: OrbitSource> Propagator<O> {
    /// Builds a new [Propagator].
    /// ## Inputs
    /// - cfg: [Config] that is validated here
    /// - orbits: [OrbitSource] that we prepare for the configured satellite set.
    ///   This may be a lengthy operation.
    ///
    /// Satellite positions are not computed until [Propagator::reset].
    pub fn new(cfg: &Config, mut orbits: O) -> Result<Self, Error> {
        let settings = cfg.validate().map_err(|e| {
            error!("invalid configuration: {}", e);
            e
        })?;

        info!(
            "satellites: {} - orbit source: \"{}\"",
            settings.svs.iter().join(", "),
            settings.orbit_file
        );

        orbits.prepare(&settings.svs).map_err(|e| {
            error!("failed to prepare orbit source: {}", e);
            e
        })?;

        debug!(
            "beta1={}s beta2={}s sigma={} dt={}s t_start={} active={}",
            settings.beta1,
            settings.beta2,
            settings.sigma,
            settings.dt,
            settings.t_start,
            settings.active,
        );

        let state = NoiseState::new(&settings);

        Ok(Self {
            dt: Duration::from_seconds(settings.dt),
            settings,
            orbits,
            state: Arc::new(RwLock::new(state)),
            lifecycle: Lifecycle::default(),
            t_start: None,
            elapsed: Duration::ZERO,
            spin_up_iterations: 0,
        })
    }

    /// Validated [Settings]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// [OrbitSource] in use
    pub fn orbits(&self) -> &O {
        &self.orbits
    }

    /// Returns a new read only [NoiseStateHandle], to be distributed
    /// to each receiver of this simulation run.
    pub fn handle(&self) -> NoiseStateHandle {
        NoiseStateHandle::new(&self.state)
    }

    /// Current [Lifecycle]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True once [Propagator::reset] has completed
    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    /// Time origin, resolved by the latest reset
    pub fn t_start(&self) -> Option<Epoch> {
        self.t_start
    }

    /// Elapsed simulation time since latest reset
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current absolute [Epoch]
    pub fn epoch(&self) -> Option<Epoch> {
        Some(self.t_start? + self.elapsed)
    }

    /// Number of recursion steps run by the latest spin-up
    pub fn spin_up_iterations(&self) -> usize {
        self.spin_up_iterations
    }

    /// Query all satellite positions, in satellite set order
    fn positions(&self, t: Epoch) -> Result<Matrix3xX<f64>, Error> {
        let mut svspos = Matrix3xX::zeros(self.settings.svs.len());

        for (index, sv) in self.settings.svs.iter().enumerate() {
            let position = self.orbits.position_at(*sv, t).map_err(|e| {
                error!("{} ({}): {}", t, sv, e);
                e
            })?;

            svspos.set_column(index, &position);
        }

        Ok(svspos)
    }

    /// Resets the simulation run:
    /// - resolves the time origin (possibly drawn at random)
    ///   and verifies it is covered by the [OrbitSource]
    /// - zeroes, then spins up the noise processes
    /// - computes satellite positions at time origin.
    ///
    /// May be invoked at any time. On failure, [Self] is left [Lifecycle::Uninitialized]
    /// and the shared [NoiseState] is left untouched.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) -> Result<(), Error> {
        self.lifecycle = Lifecycle::Uninitialized;

        let interval = self.orbits.valid_interval()?;
        let t_start = self.settings.t_start.resolve(interval, rng)?;

        let mut state = read_lock(&self.state).clone();

        state.zero();

        let iterations = if self.settings.active {
            state.spin_up(self.settings.dt, rng)
        } else {
            0
        };

        state.svspos = self.positions(t_start)?;

        *write_lock(&self.state) = state;

        self.t_start = Some(t_start);
        self.elapsed = Duration::ZERO;
        self.spin_up_iterations = iterations;
        self.lifecycle = Lifecycle::Ready;

        info!(
            "{} - reset (time origin {}, spin-up {})",
            t_start, self.settings.t_start, iterations
        );

        Ok(())
    }

    /// Advances the simulation run by one step:
    /// noise processes are propagated and satellite positions are
    /// refreshed for the new [Epoch]. Invoked by the host scheduler,
    /// once per tick.
    ///
    /// Fails with [Error::NotInitialized] prior any successful reset.
    /// When the new [Epoch] is not covered by the [OrbitSource], we fail with
    /// [Error::TimeOutOfBounds] and nothing is modified.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Result<(), Error> {
        let t_start = match (self.lifecycle, self.t_start) {
            (Lifecycle::Ready, Some(t_start)) => t_start,
            _ => {
                error!("update prior reset");
                return Err(Error::NotInitialized);
            },
        };

        let elapsed = self.elapsed + self.dt;
        let t = t_start + elapsed;

        let svspos = self.positions(t)?;

        {
            let mut state = write_lock(&self.state);

            if self.settings.active {
                state.propagate(self.settings.dt, rng);
            }

            state.svspos = svspos;
        }

        self.elapsed = elapsed;

        debug!("{} - updated (+{})", t, elapsed);
        Ok(())
    }
}
