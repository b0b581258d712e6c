//! Split selection and leaf summarization for head-pose patch forests.
//!
//! Provides binary patch tests over multi-channel images (with O(1)
//! rectangle sums on integral channels), random test generation, binary and
//! multi-class entropy, pose-variance gain, class-prior weighting and leaf
//! summaries. Growing trees from these pieces is left to the caller; every
//! function here is a pure function of its arguments and a caller-owned RNG.

mod config;
mod criteria;
mod error;
mod image;
mod label;
mod leaf;
mod priors;
mod sample;
mod split;
#[cfg(test)]
mod testutil;

pub use config::{PatchConfig, TestKind};
pub use criteria::{
    DEFAULT_REGRESSION_THRESHOLD, RegressionCriterion, SplitObjective, SplitScorer, UNSCORABLE,
    VarianceEstimator, WeightedScore, entropy, pose_entropy, pose_entropy_weighted,
};
pub use error::PoseError;
pub use image::{ImageArena, ImageId, ImageSample};
pub use label::{N_POSE_CLASSES, PatchLabel, PoseClass};
pub use leaf::{LeafSummary, make_leaf};
pub use priors::ClassPriors;
pub use sample::{TrainingSample, partition};
pub use split::{NUM_THRESHOLDS, PatchTest, SplitDescriptor, generate_split, generate_split_for};
