//! Stages of one impact run

use std::fmt;

/// Step of the impact pipeline, in execution order
///
/// The environment must be known before the physics runs (crater scaling
/// depends on the target) and the population query needs the effect radii,
/// so the stages are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PipelineStage {
    ResolvingEnvironment,
    ResolvingMaterial,
    ComputingPhysics,
    ResolvingPopulation,
    EstimatingCasualties,
    Done,
}

impl PipelineStage {
    /// Stage a run starts in
    pub const FIRST: PipelineStage = PipelineStage::ResolvingEnvironment;

    /// Following stage; `Done` stays `Done`
    pub fn next(self) -> Self {
        match self {
            PipelineStage::ResolvingEnvironment => PipelineStage::ResolvingMaterial,
            PipelineStage::ResolvingMaterial => PipelineStage::ComputingPhysics,
            PipelineStage::ComputingPhysics => PipelineStage::ResolvingPopulation,
            PipelineStage::ResolvingPopulation => PipelineStage::EstimatingCasualties,
            PipelineStage::EstimatingCasualties | PipelineStage::Done => PipelineStage::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == PipelineStage::Done
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::ResolvingEnvironment => "resolving environment",
            PipelineStage::ResolvingMaterial => "resolving material",
            PipelineStage::ComputingPhysics => "computing physics",
            PipelineStage::ResolvingPopulation => "resolving population",
            PipelineStage::EstimatingCasualties => "estimating casualties",
            PipelineStage::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Records the stages a run passed through
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StageTracker {
    current: PipelineStage,
    visited: Vec<PipelineStage>,
}

impl StageTracker {
    pub(crate) fn new() -> Self {
        tracing::trace!(stage = %PipelineStage::FIRST, "Pipeline stage");
        Self {
            current: PipelineStage::FIRST,
            visited: vec![PipelineStage::FIRST],
        }
    }

    /// Move to the next stage, which must be `expected`
    pub(crate) fn advance(&mut self, expected: PipelineStage) {
        let next = self.current.next();
        debug_assert_eq!(next, expected, "pipeline stages out of order");
        self.current = next;
        self.visited.push(next);
        tracing::trace!(stage = %next, "Pipeline stage");
    }

    pub(crate) fn finish(mut self) -> Vec<PipelineStage> {
        while !self.current.is_terminal() {
            self.current = self.current.next();
            self.visited.push(self.current);
        }
        self.visited
    }
}
