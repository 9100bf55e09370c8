//! Task identities.

use std::fmt;

/// The named, invokable build steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Clean,
    Copy,
    Styles,
    Scripts,
    Images,
    Vendor,
}

impl TaskKind {
    /// The five transformation tasks that run concurrently in a build,
    /// after clean.
    pub const TRANSFORMS: [TaskKind; 5] = [
        TaskKind::Vendor,
        TaskKind::Styles,
        TaskKind::Scripts,
        TaskKind::Images,
        TaskKind::Copy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Clean => "clean",
            TaskKind::Copy => "copy",
            TaskKind::Styles => "styles",
            TaskKind::Scripts => "scripts",
            TaskKind::Images => "images",
            TaskKind::Vendor => "vendor",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
