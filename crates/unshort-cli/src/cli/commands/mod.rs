//! CLI command handlers. Each command is in its own file.

mod canonicalize;
mod expand;

pub use canonicalize::run_canonicalize;
pub use expand::run_expand;
