use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, error};
use polyfit_rs::polyfit_rs::polyfit;

use crate::{
    constants::DEFAULT_INTERPOLATION_ORDER,
    error::Error,
    orbit::OrbitSource,
    prelude::{Duration, Epoch, Vector3, SV},
};

/// Interpolation polynomial, valid from `start` to the next [Segment].
#[derive(Debug, Clone)]
struct Segment {
    /// First [Epoch] this [Segment] applies to
    start: Epoch,
    /// Abscissa origin (window center)
    t_ref: Epoch,
    /// Abscissa normalization (window half span), in seconds
    half_span_s: f64,
    /// x, y, z polynomials (ascending powers)
    coefs: [Vec<f64>; 3],
}

impl Segment {
    fn eval(&self, t: Epoch) -> Vector3<f64> {
        let x = (t - self.t_ref).to_seconds() / self.half_span_s;

        let horner = |coefs: &[f64]| coefs.iter().rev().fold(0.0_f64, |acc, c| acc * x + c);

        Vector3::new(
            horner(&self.coefs[0]),
            horner(&self.coefs[1]),
            horner(&self.coefs[2]),
        )
    }
}

/// Prepared interpolator, for one [SV]
#[derive(Debug, Clone)]
struct Interpolator {
    begin: Epoch,
    end: Epoch,
    segments: Vec<Segment>,
}

impl Interpolator {
    fn position_at(&self, t: Epoch) -> Result<Vector3<f64>, Error> {
        if t < self.begin || t > self.end {
            return Err(Error::TimeOutOfBounds(t));
        }

        let index = self
            .segments
            .partition_point(|seg| seg.start <= t)
            .saturating_sub(1);

        Ok(self.segments[index].eval(t))
    }
}

/// [OrbitTable] is an in-memory precise orbit table, made of
/// tabulated satellite positions, that implements [OrbitSource].
///
/// Positions are interpolated by one polynomial of degree `order`
/// per axis, fitted over the `order + 1` samples surrounding each
/// sampling interval. Interpolation is exact at the samples themselves.
/// Units are preserved: positions are returned in the unit they were
/// tabulated with.
#[derive(Debug, Clone)]
pub struct OrbitTable {
    /// Interpolation order
    order: usize,
    /// Tabulated samples
    samples: HashMap<SV, Vec<(Epoch, Vector3<f64>)>>,
    /// Prepared interpolators
    interpolators: HashMap<SV, Interpolator>,
    /// Common valid interval, once prepared
    interval: Option<(Epoch, Epoch)>,
}

impl Default for OrbitTable {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPOLATION_ORDER)
    }
}

impl OrbitTable {
    /// Builds a new empty [OrbitTable] with desired interpolation order.
    pub fn new(order: usize) -> Self {
        Self {
            order,
            samples: Default::default(),
            interpolators: Default::default(),
            interval: None,
        }
    }

    /// Builds [OrbitTable] from tabulated `(SV, Epoch, position)` samples
    pub fn from_samples(
        order: usize,
        samples: impl IntoIterator<Item = (SV, Epoch, Vector3<f64>)>,
    ) -> Self {
        let mut s = Self::new(order);
        for (sv, t, position) in samples {
            s.add_sample(sv, t, position);
        }
        s
    }

    /// Interpolation order
    pub fn order(&self) -> usize {
        self.order
    }

    /// Add one tabulated sample. Invalidates any previous preparation.
    pub fn add_sample(&mut self, sv: SV, t: Epoch, position: Vector3<f64>) {
        self.samples.entry(sv).or_default().push((t, position));
        self.interpolators.clear();
        self.interval = None;
    }

    /// Copies and returns [OrbitTable] with one more tabulated sample
    pub fn with_sample(&self, sv: SV, t: Epoch, position: Vector3<f64>) -> Self {
        let mut s = self.clone();
        s.add_sample(sv, t, position);
        s
    }

    /// Iterates over all tabulated samples, in no particular order
    pub fn samples(&self) -> impl Iterator<Item = (SV, Epoch, Vector3<f64>)> + '_ {
        self.samples.iter().flat_map(|(sv, samples)| {
            samples
                .iter()
                .map(move |(t, position)| (*sv, *t, *position))
        })
    }

    /// Total number of tabulated samples
    pub fn len(&self) -> usize {
        self.samples.values().map(|samples| samples.len()).sum()
    }

    /// True if no samples were tabulated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fits all [Segment]s for this [SV]
    fn interpolator(&self, sv: SV) -> Result<Interpolator, Error> {
        let samples = self
            .samples
            .get(&sv)
            .ok_or(Error::OrbitFile(format!("no orbit data for {}", sv)))?;

        let samples = samples
            .iter()
            .sorted_by_key(|(t, _)| *t)
            .copied()
            .collect::<Vec<_>>();

        if let Some(((t, _), _)) = samples.iter().tuple_windows().find(|(a, b)| a.0 == b.0) {
            return Err(Error::OrbitFile(format!("{} ({}): duplicate sample", t, sv)));
        }

        let window = self.order + 1;
        let nb_samples = samples.len();

        if nb_samples < window.max(2) {
            return Err(Error::OrbitFile(format!(
                "{}: {} samples is not enough for order {} interpolation",
                sv, nb_samples, self.order
            )));
        }

        let mut segments = Vec::with_capacity(nb_samples - 1);

        for i in 0..nb_samples - 1 {
            // center the window on [i, i+1]
            let first = (i + 1)
                .saturating_sub(window / 2)
                .min(nb_samples - window)
                .min(i);
            let samples = &samples[first..first + window];

            let (t_first, t_last) = (samples[0].0, samples[window - 1].0);

            let mut half_span_s = (t_last - t_first).to_seconds() / 2.0;
            if half_span_s == 0.0 {
                half_span_s = 1.0;
            }

            let t_ref = t_first + Duration::from_seconds(half_span_s);

            let x = samples
                .iter()
                .map(|(t, _)| (*t - t_ref).to_seconds() / half_span_s)
                .collect::<Vec<_>>();

            let mut coefs: [Vec<f64>; 3] = Default::default();

            for (axis, coefs) in coefs.iter_mut().enumerate() {
                let y = samples.iter().map(|(_, pos)| pos[axis]).collect::<Vec<_>>();

                *coefs = polyfit(&x, &y, self.order).map_err(|e| {
                    error!("{} ({}): interpolation error: {}", samples[0].0, sv, e);
                    Error::OrbitFile(format!("{}: {}", sv, e))
                })?;
            }

            segments.push(Segment {
                start: samples[i - first].0,
                t_ref,
                half_span_s,
                coefs,
            });
        }

        Ok(Interpolator {
            begin: samples[0].0,
            end: samples[nb_samples - 1].0,
            segments,
        })
    }
}

impl OrbitSource for OrbitTable {
    fn prepare(&mut self, svs: &[SV]) -> Result<(), Error> {
        self.interpolators.clear();
        self.interval = None;

        let mut interval: Option<(Epoch, Epoch)> = None;

        for sv in svs {
            let interpolator = self.interpolator(*sv)?;

            debug!(
                "{}: {} interpolation segments [{}, {}]",
                sv,
                interpolator.segments.len(),
                interpolator.begin,
                interpolator.end
            );

            interval = Some(match interval {
                Some((begin, end)) => (
                    begin.max(interpolator.begin),
                    end.min(interpolator.end),
                ),
                None => (interpolator.begin, interpolator.end),
            });

            self.interpolators.insert(*sv, interpolator);
        }

        match interval {
            Some((begin, end)) if begin <= end => {
                self.interval = Some((begin, end));
                Ok(())
            },
            Some(_) => Err(Error::OrbitFile(
                "satellites do not share a common time frame".to_string(),
            )),
            None => Err(Error::OrbitFile("empty satellite set".to_string())),
        }
    }

    fn valid_interval(&self) -> Result<(Epoch, Epoch), Error> {
        self.interval
            .ok_or(Error::OrbitFile("orbit table is not prepared".to_string()))
    }

    fn position_at(&self, sv: SV, t: Epoch) -> Result<Vector3<f64>, Error> {
        self.interpolators
            .get(&sv)
            .ok_or(Error::UnknownSatellite(sv))?
            .position_at(t)
    }
}
