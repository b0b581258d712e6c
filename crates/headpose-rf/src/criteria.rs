//! Split quality criteria.
//!
//! Every score here is `<= 0`, with `0` for a perfect partition (pure
//! foreground/background or zero pose spread). Trainers keep the candidate
//! with the largest score. Sides that cannot be scored because they hold no
//! face patches get [`UNSCORABLE`], the worst possible value.

use tracing::trace;

use crate::label::N_POSE_CLASSES;
use crate::priors::ClassPriors;
use crate::sample::{TrainingSample, pose_histogram};

/// Score of a set with nothing to measure. Loses against every real score.
pub const UNSCORABLE: f64 = f64::MIN;

/// Default boundary between classification and regression split modes.
pub const DEFAULT_REGRESSION_THRESHOLD: f64 = 50.0;

/// A per-side score and the number of samples it is weighted by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScore {
    /// Score of the side.
    pub value: f64,
    /// Weight of the side in a partition average.
    pub weight: usize,
}

impl WeightedScore {
    fn unscorable() -> Self {
        Self {
            value: UNSCORABLE,
            weight: 0,
        }
    }
}

/// Binary foreground entropy `p ln p + (1 - p) ln(1 - p)` of `set`.
///
/// `p` is the fraction of face patches; `0 ln 0` counts as `0`, so pure and
/// empty sets score `0`.
#[must_use]
pub fn entropy(set: &[&TrainingSample]) -> f64 {
    if set.is_empty() {
        return 0.0;
    }
    let n_positive = set.iter().filter(|s| s.is_positive()).count();
    let p_pos = n_positive as f64 / set.len() as f64;
    plogp(p_pos) + plogp(1.0 - p_pos)
}

/// Multi-class pose entropy `Σ p_i ln p_i` over the face patches of `set`.
///
/// Sets without face patches score `0`.
#[must_use]
pub fn pose_entropy(set: &[&TrainingSample]) -> f64 {
    let hist = pose_histogram(set);
    let weights = hist.map(|c| c as f64);
    distribution_entropy(&weights)
}

/// Pose entropy after dividing each class count by its prior, weighted by
/// the number of face patches.
///
/// Sets without face patches are [`UNSCORABLE`].
#[must_use]
pub fn pose_entropy_weighted(set: &[&TrainingSample], priors: &ClassPriors) -> WeightedScore {
    let hist = pose_histogram(set);
    let n_positive: usize = hist.iter().sum();
    if n_positive == 0 {
        return WeightedScore::unscorable();
    }
    WeightedScore {
        value: distribution_entropy(&priors.reweight(&hist)),
        weight: n_positive,
    }
}

/// How the pose-label variance of a set is computed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    serde::Serialize, serde::Deserialize,
)]
pub enum VarianceEstimator {
    /// Mean first, then the mean squared deviation from it.
    TwoPass,
    /// `E[x²] - E[x]²` from running sums in a single pass.
    SumOfSquares,
}

impl VarianceEstimator {
    /// Negated pose-label variance over the face patches of `set`, weighted
    /// by their count.
    ///
    /// Both estimators agree up to rounding. Sets without face patches are
    /// [`UNSCORABLE`] with weight 0.
    #[must_use]
    pub fn gain(self, set: &[&TrainingSample]) -> WeightedScore {
        let labels = || set.iter().filter_map(|s| s.pose()).map(|c| c.index() as f64);
        let n = labels().count();
        if n == 0 {
            return WeightedScore::unscorable();
        }
        let n_f = n as f64;

        let variance = match self {
            VarianceEstimator::TwoPass => {
                let mean = labels().sum::<f64>() / n_f;
                labels().map(|l| (l - mean) * (l - mean)).sum::<f64>() / n_f
            }
            VarianceEstimator::SumOfSquares => {
                let (sum, sq_sum) = labels().fold((0.0, 0.0), |(s, sq), l| (s + l, sq + l * l));
                let mean = sum / n_f;
                (sq_sum / n_f - mean * mean).max(0.0)
            }
        };
        WeightedScore {
            value: -variance,
            weight: n,
        }
    }
}

/// Criterion used when a node is split in regression mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    serde::Serialize, serde::Deserialize,
)]
pub enum RegressionCriterion {
    /// Negated pose-label variance.
    Variance(VarianceEstimator),
    /// Prior-reweighted multi-class pose entropy.
    PoseEntropy,
}

/// Which question a split should answer, chosen per node by the trainer's
/// split mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitObjective {
    /// Separate face from background patches.
    Classification,
    /// Separate face patches by pose.
    Regression,
}

/// Scores candidate partitions.
///
/// Construct via [`SplitScorer::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter              | Default                   |
/// |------------------------|---------------------------|
/// | `regression_threshold` | 50.0                      |
/// | `regression_criterion` | `Variance(SumOfSquares)`  |
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SplitScorer {
    pub(crate) regression_threshold: f64,
    pub(crate) regression_criterion: RegressionCriterion,
}

impl SplitScorer {
    /// Create a scorer with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regression_threshold: DEFAULT_REGRESSION_THRESHOLD,
            regression_criterion: RegressionCriterion::Variance(VarianceEstimator::SumOfSquares),
        }
    }

    /// Set the split mode at and above which nodes are split by pose.
    #[must_use]
    pub fn with_regression_threshold(mut self, regression_threshold: f64) -> Self {
        self.regression_threshold = regression_threshold;
        self
    }

    /// Set the criterion for regression-mode splits.
    #[must_use]
    pub fn with_regression_criterion(mut self, regression_criterion: RegressionCriterion) -> Self {
        self.regression_criterion = regression_criterion;
        self
    }

    /// Return the regression threshold.
    #[must_use]
    pub fn regression_threshold(&self) -> f64 {
        self.regression_threshold
    }

    /// Return the regression criterion.
    #[must_use]
    pub fn regression_criterion(&self) -> RegressionCriterion {
        self.regression_criterion
    }

    /// Map a split mode to its objective.
    #[must_use]
    pub fn objective(&self, mode: f64) -> SplitObjective {
        if mode < self.regression_threshold {
            SplitObjective::Classification
        } else {
            SplitObjective::Regression
        }
    }

    /// Score the partition of a node into `set_a` and `set_b`.
    ///
    /// Classification averages the binary [`entropy`] of both sides weighted
    /// by their sizes. Regression averages the regression criterion weighted
    /// by the number of face patches per side. When both weights are zero the
    /// partition is [`UNSCORABLE`].
    #[must_use]
    pub fn eval_split(
        &self,
        set_a: &[&TrainingSample],
        set_b: &[&TrainingSample],
        priors: &ClassPriors,
        mode: f64,
        depth: usize,
    ) -> f64 {
        let objective = self.objective(mode);
        let (a, b) = match objective {
            SplitObjective::Classification => (
                WeightedScore {
                    value: entropy(set_a),
                    weight: set_a.len(),
                },
                WeightedScore {
                    value: entropy(set_b),
                    weight: set_b.len(),
                },
            ),
            SplitObjective::Regression => match self.regression_criterion {
                RegressionCriterion::Variance(estimator) => {
                    (estimator.gain(set_a), estimator.gain(set_b))
                }
                RegressionCriterion::PoseEntropy => (
                    pose_entropy_weighted(set_a, priors),
                    pose_entropy_weighted(set_b, priors),
                ),
            },
        };
        let score = weighted_average(a, b);
        trace!(depth, mode, ?objective, score, "partition scored");
        score
    }
}

impl Default for SplitScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn weighted_average(a: WeightedScore, b: WeightedScore) -> f64 {
    let total = a.weight + b.weight;
    if total == 0 {
        return UNSCORABLE;
    }
    // A zero-weight side drops out even when it carries the sentinel.
    let part = |s: WeightedScore| {
        if s.weight == 0 {
            0.0
        } else {
            s.value * s.weight as f64
        }
    };
    (part(a) + part(b)) / total as f64
}

fn plogp(p: f64) -> f64 {
    if p > 0.0 { p * p.ln() } else { 0.0 }
}

/// `Σ p_i ln p_i` of the normalized `weights`; all-zero weights score `0`.
fn distribution_entropy(weights: &[f64; N_POSE_CLASSES]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    weights.iter().map(|&w| plogp(w / total)).sum()
}
