use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    cfg::Settings,
    prelude::{DVector, Matrix3xX, Vector3, SV},
};

/// [NoiseState] is the noise and geometry state shared by all receivers
/// of one simulation run. Every vector (and every [Self::svspos] column)
/// is indexed like [Self::svs]: this ordering never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseState {
    /// Ordered satellite set
    pub(crate) svs: Vec<SV>,
    /// Outer process rate constant, 1/beta1
    pub(crate) betas1: DVector<f64>,
    /// Inner process rate constant, 1/beta2
    pub(crate) betas2: DVector<f64>,
    /// Noise gain
    pub(crate) w: DVector<f64>,
    /// Outer (slow) process, in pseudo range error units
    pub(crate) prns: DVector<f64>,
    /// Inner (fast) process
    pub(crate) prns1: DVector<f64>,
    /// Satellite positions at current epoch
    pub(crate) svspos: Matrix3xX<f64>,
}

impl NoiseState {
    /// Builds a new [NoiseState] from validated [Settings].
    /// Process constants are replicated per satellite, processes
    /// and positions are zeroed.
    pub(crate) fn new(settings: &Settings) -> Self {
        let n = settings.svs.len();
        Self {
            svs: settings.svs.clone(),
            betas1: DVector::from_element(n, 1.0 / settings.beta1),
            betas2: DVector::from_element(n, 1.0 / settings.beta2),
            w: DVector::from_element(n, settings.sigma),
            prns: DVector::zeros(n),
            prns1: DVector::zeros(n),
            svspos: Matrix3xX::zeros(n),
        }
    }

    /// Ordered satellite set
    pub fn svs(&self) -> &[SV] {
        &self.svs
    }

    /// Number of satellites
    pub fn len(&self) -> usize {
        self.svs.len()
    }

    /// Never true for a validated satellite set
    pub fn is_empty(&self) -> bool {
        self.svs.is_empty()
    }

    /// Index of this [SV] in every vector and matrix of [Self]
    pub fn index_of(&self, sv: SV) -> Option<usize> {
        self.svs.iter().position(|s| *s == sv)
    }

    pub fn betas1(&self) -> &DVector<f64> {
        &self.betas1
    }

    pub fn betas2(&self) -> &DVector<f64> {
        &self.betas2
    }

    pub fn w(&self) -> &DVector<f64> {
        &self.w
    }

    /// Outer process values: the additive pseudo range errors
    pub fn prns(&self) -> &DVector<f64> {
        &self.prns
    }

    /// Inner process values
    pub fn prns1(&self) -> &DVector<f64> {
        &self.prns1
    }

    /// 3xN satellite positions
    pub fn svspos(&self) -> &Matrix3xX<f64> {
        &self.svspos
    }

    /// Additive pseudo range error for this [SV]
    pub fn pseudorange_error(&self, sv: SV) -> Option<f64> {
        let index = self.index_of(sv)?;
        Some(self.prns[index])
    }

    /// Current position of this [SV]
    pub fn position(&self, sv: SV) -> Option<Vector3<f64>> {
        let index = self.index_of(sv)?;
        Some(self.svspos.column(index).into_owned())
    }
}

pub(crate) fn read_lock(state: &RwLock<NoiseState>) -> RwLockReadGuard<'_, NoiseState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock(state: &RwLock<NoiseState>) -> RwLockWriteGuard<'_, NoiseState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// [NoiseStateHandle] gives receivers read access to the [NoiseState]
/// of one simulation run. Handles are cheap to clone and all point to the
/// same [NoiseState]. Only the [Propagator](crate::prelude::Propagator)
/// may write to it.
#[derive(Debug, Clone)]
pub struct NoiseStateHandle {
    inner: Arc<RwLock<NoiseState>>,
}

impl NoiseStateHandle {
    pub(crate) fn new(inner: &Arc<RwLock<NoiseState>>) -> Self {
        Self {
            inner: Arc::clone(inner),
        }
    }

    /// Locks the [NoiseState] for reading. Hold the guard for the duration
    /// of one tick only: reset and update wait for it to be released.
    pub fn read(&self) -> RwLockReadGuard<'_, NoiseState> {
        read_lock(&self.inner)
    }

    /// Copies the current [NoiseState]
    pub fn snapshot(&self) -> NoiseState {
        self.read().clone()
    }

    /// Additive pseudo range error for this [SV]
    pub fn pseudorange_error(&self, sv: SV) -> Option<f64> {
        self.read().pseudorange_error(sv)
    }

    /// Current position of this [SV]
    pub fn position(&self, sv: SV) -> Option<Vector3<f64>> {
        self.read().position(sv)
    }

    /// True if both handles share the same [NoiseState]
    pub fn shares_state_with(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &rhs.inner)
    }
}
