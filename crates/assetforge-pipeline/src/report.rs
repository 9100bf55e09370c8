//! Non-fatal failure reporting.
//!
//! A transformation failure never kills the watch loop: it is formatted
//! and surfaced as a console notification, and the affected task simply
//! produces no output for that run.

use assetforge_common_core::Error;
use tracing::error;

/// Format a failure for the notification: `": "` joins go onto their
/// own lines so long tool messages stay readable.
pub fn format_failure(err: &Error) -> String {
    let mut text = err.to_string().split(": ").collect::<Vec<_>>().join(":\n");
    if let Error::Tool {
        stderr: Some(stderr),
        ..
    } = err
    {
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            text.push('\n');
            text.push_str(stderr);
        }
    }
    text
}

/// Report a task failure and carry on.
pub fn task_failed(task: &str, err: &Error) {
    error!(task, "{}", format_failure(err));
}
