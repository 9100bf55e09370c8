//! Watch source trees and re-run the affected task.
//!
//! A change event re-runs only the task whose globs match the changed
//! path. There is no debouncing or cancellation: tasks are idempotent
//! and duplicate events just run them again.

use std::path::{Path, PathBuf};

use assetforge_common_core::{Error, Result};
use assetforge_common_fs::GlobSet;
use glob::Pattern;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::context::PipelineContext;
use crate::report;
use crate::runner;
use crate::task::TaskKind;

/// Maps a changed path to the task that consumes it.
#[derive(Debug, Clone)]
pub struct TaskClassifier {
    root: PathBuf,
    dist: PathBuf,
    styles: Pattern,
    scripts: GlobSet,
    assets: GlobSet,
    images_root: PathBuf,
    vendor_root: PathBuf,
}

impl TaskClassifier {
    pub fn new(ctx: &PipelineContext) -> Result<Self> {
        let paths = &ctx.settings.paths;
        let styles = Pattern::new(&paths.styles_watch)
            .map_err(|e| Error::config(format!("invalid styles_watch glob: {e}")))?;

        Ok(Self {
            root: ctx.root.clone(),
            dist: PathBuf::from(&paths.dist),
            styles,
            scripts: GlobSet::new(&paths.javascript)?,
            assets: GlobSet::new(&paths.assets)?,
            images_root: PathBuf::from(&paths.images),
            vendor_root: PathBuf::from(&paths.bower),
        })
    }

    /// Which task consumes this path, if any. Paths under dist are
    /// never classified: the pipeline's own writes must not feed back
    /// into the watch loop.
    pub fn classify(&self, path: &Path) -> Option<TaskKind> {
        let rel = path.strip_prefix(&self.root).ok()?;

        if rel.starts_with(&self.dist) {
            return None;
        }
        if self.styles.matches_path(rel) {
            return Some(TaskKind::Styles);
        }
        if self.scripts.is_match(rel) {
            return Some(TaskKind::Scripts);
        }
        if rel.starts_with(&self.images_root) {
            return Some(TaskKind::Images);
        }
        if rel.starts_with(&self.vendor_root) {
            return Some(TaskKind::Vendor);
        }
        if self.assets.is_match(rel) {
            return Some(TaskKind::Copy);
        }
        None
    }
}

/// Watches the project tree and yields the task to re-run per change.
pub struct PipelineWatcher {
    _watcher: notify::RecommendedWatcher,
    receiver: mpsc::Receiver<(TaskKind, PathBuf)>,
}

impl PipelineWatcher {
    pub fn new(ctx: &PipelineContext) -> Result<Self> {
        let classifier = TaskClassifier::new(ctx)?;
        let (tx, rx) = mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: std::result::Result<Event, _>| {
            if let Ok(event) = res {
                if !is_change(&event.kind) {
                    return;
                }
                for path in &event.paths {
                    if let Some(kind) = classifier.classify(path) {
                        let _ = tx.blocking_send((kind, path.clone()));
                    }
                }
            }
        })
        .map_err(watch_error)?;

        watcher
            .watch(&ctx.root, RecursiveMode::Recursive)
            .map_err(watch_error)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Next (task, path) pair, or `None` when the watcher is gone.
    pub async fn next_event(&mut self) -> Option<(TaskKind, PathBuf)> {
        self.receiver.recv().await
    }
}

fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

fn watch_error(e: notify::Error) -> Error {
    Error::new(format!("file watcher error: {e}"))
}

/// Run a build, then keep re-running the affected task on change.
/// Task failures are reported and the loop continues.
pub async fn watch(ctx: &PipelineContext) -> Result<()> {
    let summary = runner::build(ctx).await?;
    if !summary.is_success() {
        warn!(failed = summary.failures.len(), "initial build had failures");
    }

    let mut watcher = PipelineWatcher::new(ctx)?;
    info!(root = %ctx.root.display(), "watching for changes");

    while let Some((kind, path)) = watcher.next_event().await {
        info!(task = %kind, path = %path.display(), "change detected");
        if let Err(err) = runner::run_task(ctx, kind).await {
            report::task_failed(kind.name(), &err);
        }
    }

    Ok(())
}
