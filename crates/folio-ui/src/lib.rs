//! Terminal-side core: the command interpreter, the structured output it
//! produces, the bounded recall buffer, and the session that ties them to a
//! linear transcript. Rendering lives in the CLI shell; nothing here writes
//! to a screen.

mod command;
mod output;
mod recall;
mod session;

pub use command::{CommandName, CommandResult, Effect, REPO_URL, RESUME_URL, command_table, interpret};
pub use output::{CommandOutput, HelpEntry};
pub use recall::{RECALL_CAP, RecallBuffer};
pub use session::{HistoryEntry, TerminalSession};
