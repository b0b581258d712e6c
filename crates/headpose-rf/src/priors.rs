//! Pose-class frequencies used to rebalance scores and leaves.

use tracing::{debug, warn};

use crate::label::{N_POSE_CLASSES, PoseClass};
use crate::sample::{TrainingSample, pose_histogram};

/// Empirical pose-class frequencies among the face patches of a training set.
///
/// Frequencies sum to 1 when the set had at least one face patch and are all
/// zero otherwise.
#[derive(
    Debug, Clone, Copy, PartialEq, Default,
    serde::Serialize, serde::Deserialize,
)]
pub struct ClassPriors([f64; N_POSE_CLASSES]);

impl ClassPriors {
    /// Compute class frequencies over the positive samples of `set`.
    ///
    /// A set without face patches yields all-zero priors and a warning event
    /// instead of dividing by zero.
    #[must_use]
    pub fn from_samples(set: &[&TrainingSample]) -> Self {
        let hist = pose_histogram(set);
        let n_positive: usize = hist.iter().sum();
        if n_positive == 0 {
            warn!(n_samples = set.len(), "no positive samples, class priors are zero");
            return Self::default();
        }

        let mut frequencies = [0.0; N_POSE_CLASSES];
        for (class, (&count, freq)) in hist.iter().zip(frequencies.iter_mut()).enumerate() {
            *freq = count as f64 / n_positive as f64;
            debug!(class, count, frequency = *freq, "class histogram");
        }
        Self(frequencies)
    }

    /// Wrap precomputed frequencies.
    #[must_use]
    pub fn from_frequencies(frequencies: [f64; N_POSE_CLASSES]) -> Self {
        Self(frequencies)
    }

    /// Frequency of `class`.
    #[must_use]
    pub fn frequency(&self, class: PoseClass) -> f64 {
        self.0[class.index()]
    }

    /// All frequencies, indexed by class.
    #[must_use]
    pub fn frequencies(&self) -> &[f64; N_POSE_CLASSES] {
        &self.0
    }

    /// Return true if no class has a positive frequency.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&f| f <= 0.0)
    }

    /// Divide per-class counts by their prior to undo class imbalance.
    ///
    /// Classes with a zero prior keep their raw count.
    #[must_use]
    pub fn reweight(&self, counts: &[usize; N_POSE_CLASSES]) -> [f64; N_POSE_CLASSES] {
        let mut weighted = [0.0; N_POSE_CLASSES];
        for ((w, &count), &prior) in weighted.iter_mut().zip(counts).zip(&self.0) {
            *w = if prior > 0.0 {
                count as f64 / prior
            } else {
                count as f64
            };
        }
        weighted
    }
}
