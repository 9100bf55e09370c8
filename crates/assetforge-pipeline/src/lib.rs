//! Build tasks, runner, and watch loop for Assetforge.
//!
//! The pipeline is a static task graph: `build` runs clean first, then
//! the five transformation tasks concurrently. Each task reads files
//! matching settings globs, pipes them through external filter tools,
//! and writes to its own subtree under the dist directory. The watch
//! loop re-runs the single task whose globs match a changed path.

pub mod context;
pub mod filter;
pub mod report;
pub mod runner;
pub mod sourcemap;
pub mod task;
pub mod tasks;
pub mod vendor;
pub mod watcher;

pub use context::PipelineContext;
pub use runner::{build, run_task, BuildSummary};
pub use task::TaskKind;
pub use watcher::{watch, PipelineWatcher, TaskClassifier};
