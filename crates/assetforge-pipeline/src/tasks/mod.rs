//! Task implementations.
//!
//! Each task mirrors one step of the original pipeline: read inputs
//! matching settings globs, pipe them through external filter tools
//! depending on the production flag, write to its own dist subtree.

mod clean;
mod copy;
mod images;
mod scripts;
mod styles;

pub use clean::clean;
pub use copy::copy;
pub use images::images;
pub use scripts::scripts;
pub use styles::styles;

pub use crate::vendor::vendor;
