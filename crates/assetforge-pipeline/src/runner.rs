//! The composite build: clean, then the transformation tasks in
//! parallel.
//!
//! The five transformation tasks write to disjoint dist subtrees, so
//! they run concurrently with no further synchronization. A failing
//! task is reported and does not cancel its siblings.

use assetforge_common_core::{Error, Result};
use tracing::{info, instrument};

use crate::context::PipelineContext;
use crate::report;
use crate::task::TaskKind;
use crate::tasks;

/// Outcome of one composite build.
#[derive(Debug, Default)]
pub struct BuildSummary {
    /// Tasks that completed.
    pub succeeded: Vec<TaskKind>,
    /// Tasks that failed, with their errors.
    pub failures: Vec<(TaskKind, Error)>,
}

impl BuildSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run a single task by kind.
pub async fn run_task(ctx: &PipelineContext, kind: TaskKind) -> Result<()> {
    match kind {
        TaskKind::Clean => tasks::clean(ctx).await,
        TaskKind::Copy => tasks::copy(ctx).await,
        TaskKind::Styles => tasks::styles(ctx).await,
        TaskKind::Scripts => tasks::scripts(ctx).await,
        TaskKind::Images => tasks::images(ctx).await,
        TaskKind::Vendor => tasks::vendor(ctx).await,
    }
}

/// Run the full build: clean first, then all transformation tasks
/// concurrently. A clean failure aborts the build; transformation
/// failures are collected and reported.
#[instrument(skip(ctx), fields(production = ctx.production))]
pub async fn build(ctx: &PipelineContext) -> Result<BuildSummary> {
    tasks::clean(ctx).await?;

    let (vendor, styles, scripts, images, copy) = tokio::join!(
        tasks::vendor(ctx),
        tasks::styles(ctx),
        tasks::scripts(ctx),
        tasks::images(ctx),
        tasks::copy(ctx),
    );

    let mut summary = BuildSummary::default();
    let results = [
        (TaskKind::Vendor, vendor),
        (TaskKind::Styles, styles),
        (TaskKind::Scripts, scripts),
        (TaskKind::Images, images),
        (TaskKind::Copy, copy),
    ];

    for (kind, result) in results {
        match result {
            Ok(()) => summary.succeeded.push(kind),
            Err(err) => {
                report::task_failed(kind.name(), &err);
                summary.failures.push((kind, err));
            }
        }
    }

    info!(
        succeeded = summary.succeeded.len(),
        failed = summary.failures.len(),
        "build finished"
    );
    Ok(summary)
}
