//! Terminal-node statistics.

use tracing::{debug, warn};

use crate::label::{N_POSE_CLASSES, PoseClass};
use crate::priors::ClassPriors;
use crate::sample::{TrainingSample, pose_histogram};

/// Statistics stored in a terminal node.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LeafSummary {
    /// Face patches per pose class. Sums to the number of face patches.
    pub hist_labels: [usize; N_POSE_CLASSES],
    /// Fraction of face patches among all patches; 0 for an empty leaf.
    pub foreground: f64,
    /// Number of patches that reached the leaf.
    pub n_samples: usize,
    /// Pose distribution of the face patches, reweighted by the class priors
    /// and normalized. All zero when the leaf holds no face patches.
    pub distribution: [f64; N_POSE_CLASSES],
}

impl LeafSummary {
    /// Number of face patches in the leaf.
    #[must_use]
    pub fn n_positive(&self) -> usize {
        self.hist_labels.iter().sum()
    }

    /// Pose class with the largest reweighted share, ties going to the lower
    /// class. `None` for a leaf without face patches.
    #[must_use]
    pub fn dominant_pose(&self) -> Option<PoseClass> {
        if self.n_positive() == 0 {
            return None;
        }
        let (best, _) = self
            .distribution
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv { (i, v) } else { (bi, bv) }
            });
        PoseClass::new(best).ok()
    }
}

/// Summarize the patches that reached leaf `leaf_id`.
///
/// Leaves without face patches (including empty leaves) get a zero
/// histogram and emit a warning event; they are not an error.
#[must_use]
pub fn make_leaf(set: &[&TrainingSample], priors: &ClassPriors, leaf_id: usize) -> LeafSummary {
    let n_samples = set.len();
    let hist_labels = pose_histogram(set);
    let n_positive: usize = hist_labels.iter().sum();

    let foreground = if n_samples == 0 {
        0.0
    } else {
        n_positive as f64 / n_samples as f64
    };

    let mut distribution = [0.0; N_POSE_CLASSES];
    if n_positive == 0 {
        warn!(leaf_id, n_samples, "leaf with only negative samples");
    } else {
        let weighted = priors.reweight(&hist_labels);
        let total: f64 = weighted.iter().sum();
        for (d, w) in distribution.iter_mut().zip(weighted) {
            *d = w / total;
        }
        debug!(leaf_id, n_samples, foreground, hist = ?hist_labels, "leaf created");
    }

    LeafSummary {
        hist_labels,
        foreground,
        n_samples,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::make_leaf;
    use crate::label::PoseClass;
    use crate::priors::ClassPriors;
    use crate::sample::TrainingSample;
    use crate::testutil::labelled;

    #[test]
    fn histogram_counts_positives_only() {
        let set = labelled(&[Some(0), Some(0), Some(1), Some(1), Some(2), Some(2), None, None, None, None]);
        let refs: Vec<&TrainingSample> = set.iter().collect();
        let leaf = make_leaf(&refs, &ClassPriors::default(), 7);
        assert_eq!(leaf.hist_labels, [2, 2, 2, 0, 0]);
        assert_eq!(leaf.n_samples, 10);
        assert!((leaf.foreground - 0.6).abs() < 1e-12);
        assert_eq!(leaf.n_positive(), 6);
    }

    #[test]
    fn all_negative_leaf_is_zero() {
        let set = labelled(&[None, None, None]);
        let refs: Vec<&TrainingSample> = set.iter().collect();
        let leaf = make_leaf(&refs, &ClassPriors::default(), 0);
        assert_eq!(leaf.hist_labels, [0; 5]);
        assert_eq!(leaf.distribution, [0.0; 5]);
        assert_eq!(leaf.foreground, 0.0);
        assert_eq!(leaf.n_samples, 3);
        assert_eq!(leaf.dominant_pose(), None);
    }

    #[test]
    fn empty_leaf_is_defined() {
        let leaf = make_leaf(&[], &ClassPriors::default(), 1);
        assert_eq!(leaf.n_samples, 0);
        assert_eq!(leaf.foreground, 0.0);
        assert_eq!(leaf.hist_labels, [0; 5]);
    }

    #[test]
    fn distribution_is_reweighted_by_priors() {
        let set = labelled(&[Some(0), Some(0), Some(0), Some(4)]);
        let refs: Vec<&TrainingSample> = set.iter().collect();

        let plain = make_leaf(&refs, &ClassPriors::default(), 0);
        assert_eq!(plain.distribution, [0.75, 0.0, 0.0, 0.0, 0.25]);
        assert_eq!(plain.dominant_pose(), PoseClass::new(0).ok());

        let priors = ClassPriors::from_frequencies([0.9, 0.0, 0.0, 0.0, 0.1]);
        let weighted = make_leaf(&refs, &priors, 0);
        assert_eq!(weighted.hist_labels, plain.hist_labels);
        assert!(weighted.distribution[4] > weighted.distribution[0]);
        assert!((weighted.distribution.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(weighted.dominant_pose(), PoseClass::new(4).ok());
    }
}
