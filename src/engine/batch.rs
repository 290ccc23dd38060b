//! Independent runs for several congregations or weeks.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::orchestrator::{AssignmentGenerator, RunContext};
use crate::error::AssignError;
use crate::model::{Assignment, Participant, Program};

/// Inputs of one run inside a batch.
#[derive(Debug, Clone, Copy)]
pub struct GenerationJob<'a> {
    pub program: &'a Program,
    pub roster: &'a [Participant],
    pub context: &'a RunContext,
}

impl AssignmentGenerator {
    /// Runs every job independently; results are in job order.
    ///
    /// With the `parallel` feature the jobs run on the rayon pool. Each job
    /// owns its own exclusion set, so results match the sequential path.
    pub fn generate_batch(
        &self,
        jobs: &[GenerationJob<'_>],
    ) -> Vec<Result<Vec<Assignment>, AssignError>> {
        let run = |job: &GenerationJob<'_>| self.generate(job.program, job.roster, job.context);

        #[cfg(feature = "parallel")]
        let results = jobs.par_iter().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let results = jobs.iter().map(run).collect();

        results
    }
}
