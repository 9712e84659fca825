//! CLI command handlers, one per file.

mod completions;
mod list;
pub(crate) mod play;
mod save;

pub use completions::{run_completions, run_manpage};
pub use list::run_list;
pub use play::run_play;
pub use save::run_save;
