//! One configuration surface for the whole pipeline.

use tq_cover::{CoverConfig, OptimizerConfig};
use tq_reaction::{MissingPointPolicy, ReactionConfig};

/// All tolerances, weights, budgets and policies in one place.
///
/// The defaults are the documented production values; frontends override
/// individual fields with struct-update syntax.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub cover: CoverConfig,
    pub optimizer: OptimizerConfig,
    /// Run the post-hoc record optimizer after the range builder.
    pub use_optimization: bool,
    pub missing_point: MissingPointPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cover: CoverConfig::default(),
            optimizer: OptimizerConfig::default(),
            use_optimization: true,
            missing_point: MissingPointPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// The reaction-engine view of this configuration.
    pub fn reaction_config(&self) -> ReactionConfig {
        ReactionConfig {
            use_optimization: self.use_optimization,
            missing_point: self.missing_point,
            cover: self.cover,
            optimizer: self.optimizer,
        }
    }
}
