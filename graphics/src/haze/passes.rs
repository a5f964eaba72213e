//! Pass selection.

use super::pipelines::HazePipelineKind;

/// The pipelines a qualifying frame draws with, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassPlan {
    /// One draw over every pixel outside the mask.
    Unified,
    /// Shape pixels first, then background pixels.
    Separated,
}

impl PassPlan {
    pub fn kinds(self) -> &'static [HazePipelineKind] {
        match self {
            Self::Unified => &[HazePipelineKind::Unified],
            Self::Separated => &[
                HazePipelineKind::SeparatedForeground,
                HazePipelineKind::SeparatedBackground,
            ],
        }
    }

    pub fn pass_count(self) -> usize {
        self.kinds().len()
    }
}

/// Choose between the unified pass and the shape/background pass pair.
pub fn select_passes(separate_background_pass: bool) -> PassPlan {
    if separate_background_pass {
        PassPlan::Separated
    } else {
        PassPlan::Unified
    }
}
