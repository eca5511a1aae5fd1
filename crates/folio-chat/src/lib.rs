//! Chat-side core: the streaming transcript reducer, the prompt routing that
//! frames a message for the completion service, and the session that runs one
//! exchange at a time.

mod prompt;
mod session;
mod transcript;

pub use prompt::{PromptRoute, build_request, route};
pub use session::{ChatSession, FAILURE_NOTICE, Notifier, NullNotifier, SubmitError};
pub use transcript::{ChatMessage, ChatTranscript, ERROR_REPLY, Sender};
