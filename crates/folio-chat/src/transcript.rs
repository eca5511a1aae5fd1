use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

/// Fixed reply used to repair a dangling placeholder after a failed exchange.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            sender,
        }
    }
}

/// Ordered chat turns with at most one "open" assistant placeholder, always
/// the last message while open. Append-only apart from the placeholder's
/// in-place text growth.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    open: bool,
}

impl ChatTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether an assistant placeholder is currently receiving fragments.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Append a user turn. The caller trims and rejects empty text.
    pub fn push_user(&mut self, text: &str) {
        self.messages.push(ChatMessage::new(text, Sender::User));
    }

    /// Append a sealed assistant turn (greeting, canned replies).
    pub fn push_ai(&mut self, text: &str) {
        self.messages.push(ChatMessage::new(text, Sender::Ai));
    }

    /// Append an empty assistant placeholder before any fragment arrives, so
    /// a "thinking" indicator has a concrete slot to render against.
    pub fn open_placeholder(&mut self) -> Result<()> {
        if self.open {
            anyhow::bail!("an assistant placeholder is already open");
        }
        self.messages.push(ChatMessage::new("", Sender::Ai));
        self.open = true;
        Ok(())
    }

    /// Concatenate one fragment onto the open placeholder, byte-exact.
    /// Fragments arriving after the placeholder closed are dropped.
    pub fn append_fragment(&mut self, fragment: &str) {
        if !self.open {
            return;
        }
        if let Some(last) = self.messages.last_mut() {
            last.text.push_str(fragment);
        }
    }

    /// End-of-stream: the placeholder's content becomes immutable.
    pub fn seal(&mut self) {
        self.open = false;
    }

    /// Repair after a failed exchange. An open-but-empty placeholder is
    /// overwritten with the fixed error reply; partial content is kept and
    /// the reply appended as its own message.
    pub fn fail(&mut self) {
        if self.open {
            let empty = self
                .messages
                .last()
                .is_some_and(|last| last.text.is_empty());
            if empty {
                if let Some(last) = self.messages.last_mut() {
                    last.text = ERROR_REPLY.to_string();
                }
            } else {
                self.messages.push(ChatMessage::new(ERROR_REPLY, Sender::Ai));
            }
            self.open = false;
        } else {
            self.messages.push(ChatMessage::new(ERROR_REPLY, Sender::Ai));
        }
    }
}
