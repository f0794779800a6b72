//! One monitoring pass: fetch, evaluate, render.

use tracing::info;

use crate::context::AppContext;
use crate::directory::DirectoryClient;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::report::{renderer_for, Report};
use crate::Error;

pub struct SecretMonitor<D: DirectoryClient> {
    directory: D,
}

impl<D: DirectoryClient> SecretMonitor<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Lists the directory once and returns the credentials due within the
    /// threshold. A failed listing aborts with no partial results.
    pub async fn check_secrets(&self, ctx: &AppContext) -> Result<Vec<EvaluationResult>, Error> {
        let settings = ctx.settings();
        info!(
            monitor_tag = %settings.monitor_tag,
            threshold_days = settings.expiry_threshold_days,
            "checking application secrets"
        );

        let applications = self
            .directory
            .list_applications()
            .await
            .map_err(Error::Fetch)?;

        let results = Evaluator::new(settings).evaluate(&applications, ctx.now());
        info!(
            applications = applications.len(),
            expiring = results.len(),
            "evaluation finished"
        );
        Ok(results)
    }

    /// Runs [`check_secrets`](Self::check_secrets) and renders the report in
    /// the configured format.
    pub async fn run(&self, ctx: &AppContext) -> Result<String, Error> {
        let results = self.check_secrets(ctx).await?;
        renderer_for(ctx.settings().format).render(&Report::new(&results, ctx))
    }
}
