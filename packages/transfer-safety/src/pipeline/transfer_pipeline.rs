//! Transfer Safety Pipeline
//!
//! Drives one or more capsule templates through verification:
//! perform the four collaborators (pointer analysis, site classification,
//! both liveness analyses), then run the verifier inside the shared context.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::context::AnalysisContext;
use super::program_model::ProgramCollaborators;
use crate::config::VerifierConfig;
use crate::errors::Result;
use crate::features::liveness::ports::{CallGraphLiveness, TransferLiveness};
use crate::features::points_to::ports::PointerAnalysisOracle;
use crate::features::site_analysis::ports::SiteClassifier;
use crate::features::transfer_safety::{
    CapsuleTemplate, Collaborators, OwnershipTransferVerifier, ResultsIndex,
};

#[derive(Debug)]
pub struct TransferSafetyPipeline {
    ctx: AnalysisContext,
}

impl TransferSafetyPipeline {
    pub fn new(config: VerifierConfig) -> Result<Self> {
        Ok(Self {
            ctx: AnalysisContext::init(config)?,
        })
    }

    #[inline]
    pub fn context(&self) -> &AnalysisContext {
        &self.ctx
    }

    /// Perform the collaborators (no-op for those already performed), then verify
    pub fn run<O, S, L, G>(
        &self,
        template: CapsuleTemplate,
        oracle: &mut O,
        classifier: &mut S,
        local_liveness: &mut L,
        global_liveness: &mut G,
    ) -> Result<ResultsIndex>
    where
        O: PointerAnalysisOracle,
        S: SiteClassifier,
        L: TransferLiveness,
        G: CallGraphLiveness,
    {
        debug!("performing collaborators for {}", template);
        oracle.perform()?;
        classifier.perform()?;
        local_liveness.perform()?;
        global_liveness.perform()?;

        let collaborators = Collaborators {
            oracle: &*oracle,
            classifier: &*classifier,
            local_liveness: &*local_liveness,
            global_liveness: &*global_liveness,
        };
        Ok(OwnershipTransferVerifier::new(template, collaborators).verify(&self.ctx))
    }

    /// Verify collaborators loaded from a program model
    pub fn run_program(&self, program: &mut ProgramCollaborators) -> Result<ResultsIndex> {
        self.run(
            program.template.clone(),
            &mut program.oracle,
            &mut program.classifier,
            &mut program.local_liveness,
            &mut program.global_liveness,
        )
    }

    /// Write the JSON report log into `dir`, named after the template
    pub fn write_report(&self, index: &ResultsIndex, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(index.log_file_name());
        std::fs::write(&path, index.report_json(self.ctx.config().report.pretty)?)?;
        info!("wrote transfer report to {}", path.display());
        Ok(path)
    }

    /// Release the context
    pub fn finish(self) {
        self.ctx.teardown();
    }
}
