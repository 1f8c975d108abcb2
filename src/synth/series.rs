//! Reflectivity series
//!
//! Sparse (sample, coefficient) spikes for one trace.

use crate::model::Boundary;
use crate::reflectivity::ReflectivityMethod;
use crate::rock::RockProperties;
use serde::Serialize;

/// A reflection coefficient placed at a time sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spike {
    pub sample: usize,
    pub coefficient: f64,
}

/// Time-ordered reflection spikes for one trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectivitySeries {
    spikes: Vec<Spike>,
    num_samples: usize,
}

impl ReflectivitySeries {
    /// Create a series from spikes sorted by sample
    pub fn new(num_samples: usize, spikes: Vec<Spike>) -> Self {
        debug_assert!(spikes.windows(2).all(|w| w[0].sample < w[1].sample));
        debug_assert!(spikes.iter().all(|s| s.sample < num_samples));
        Self { spikes, num_samples }
    }

    /// Evaluate `method` at every boundary of a trace
    ///
    /// `rocks` must hold an entry for every layer index named by `boundaries`.
    pub fn from_boundaries(
        boundaries: &[Boundary],
        rocks: &[RockProperties],
        method: ReflectivityMethod,
        theta_deg: f64,
        num_samples: usize,
    ) -> Self {
        let spikes = boundaries
            .iter()
            .map(|b| Spike {
                sample: b.sample,
                coefficient: method.coefficient(&rocks[b.upper], &rocks[b.lower], theta_deg),
            })
            .collect();
        Self::new(num_samples, spikes)
    }

    pub fn spikes(&self) -> &[Spike] {
        &self.spikes
    }

    pub fn len(&self) -> usize {
        self.spikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spikes.is_empty()
    }

    /// Length of the trace the series lives on
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Every coefficient multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            spikes: self
                .spikes
                .iter()
                .map(|s| Spike {
                    sample: s.sample,
                    coefficient: s.coefficient * factor,
                })
                .collect(),
            num_samples: self.num_samples,
        }
    }

    /// Dense impulse train of length `num_samples`
    pub fn to_impulses(&self) -> Vec<f64> {
        let mut impulses = vec![0.0; self.num_samples];
        for spike in &self.spikes {
            impulses[spike.sample] = spike.coefficient;
        }
        impulses
    }
}
