use crate::prompt::build_request;
use crate::transcript::{ChatMessage, ChatTranscript};
use folio_core::{CancelToken, ChatConfig, LlmConfig, StreamCallback, StreamChunk};
use folio_data::PortfolioData;
use folio_llm::LlmClient;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Transient notification text raised alongside the transcript repair.
pub const FAILURE_NOTICE: &str = "Failed to get response from AI assistant.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyMessage,
    /// Single-flight is a UI convention, not a server-side lock; the session
    /// still refuses to interleave exchanges on one transcript.
    #[error("an exchange is already in flight")]
    ExchangeInFlight,
}

/// Toast-equivalent channel for transient user-visible notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}
}

/// One chat conversation against the completion service. Owns the transcript;
/// runs at most one exchange at a time.
pub struct ChatSession<C> {
    client: C,
    data: PortfolioData,
    llm_cfg: LlmConfig,
    chat_cfg: ChatConfig,
    transcript: Arc<Mutex<ChatTranscript>>,
    notifier: Arc<dyn Notifier>,
}

impl<C: LlmClient> ChatSession<C> {
    pub fn new(
        client: C,
        data: PortfolioData,
        llm_cfg: LlmConfig,
        chat_cfg: ChatConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let mut transcript = ChatTranscript::new();
        if !chat_cfg.greeting.trim().is_empty() {
            transcript.push_ai(&chat_cfg.greeting);
        }
        Self {
            client,
            data,
            llm_cfg,
            chat_cfg,
            transcript: Arc::new(Mutex::new(transcript)),
            notifier,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChatTranscript> {
        // The transcript's mutators don't panic; recover a poisoned lock
        // rather than propagating the panic.
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the transcript messages in order.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().messages().to_vec()
    }

    #[must_use]
    pub fn quick_prompts(&self) -> &[String] {
        &self.chat_cfg.quick_prompts
    }

    /// Run one exchange: append the user turn, open the placeholder, stream
    /// fragments into it, seal on clean end-of-stream. Transport failures are
    /// absorbed into the transcript plus a notification; the session stays
    /// usable. `progress` observes fragments as they arrive (live echo).
    pub fn submit(
        &self,
        text: &str,
        cancel: &CancelToken,
        progress: Option<StreamCallback>,
    ) -> Result<(), SubmitError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitError::EmptyMessage);
        }

        let request = {
            let mut transcript = self.lock();
            if transcript.is_open() {
                return Err(SubmitError::ExchangeInFlight);
            }
            // Prior turns only; the new message goes in as the final turn.
            let request = build_request(&self.data, transcript.messages(), trimmed, &self.llm_cfg);
            transcript.push_user(trimmed);
            transcript
                .open_placeholder()
                .map_err(|_| SubmitError::ExchangeInFlight)?;
            request
        };

        let sink = Arc::clone(&self.transcript);
        let cb: StreamCallback = Arc::new(move |chunk: StreamChunk| {
            if let StreamChunk::ContentDelta(delta) = &chunk {
                let mut transcript = sink
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                transcript.append_fragment(delta);
            }
            if let Some(progress) = &progress {
                progress(chunk);
            }
        });

        let outcome = if self.llm_cfg.stream {
            self.client.complete_streaming(&request, cb, cancel)
        } else {
            self.client.complete(&request).map(|resp| {
                cb(StreamChunk::ContentDelta(resp.text.clone()));
                cb(StreamChunk::Done);
                resp
            })
        };

        match outcome {
            Ok(_) => self.lock().seal(),
            Err(_) => {
                self.lock().fail();
                self.notifier.notify(FAILURE_NOTICE);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{ERROR_REPLY, Sender};
    use anyhow::anyhow;
    use folio_core::{ChatRequest, LlmResponse};

    struct ScriptedClient {
        fragments: Vec<&'static str>,
    }

    impl LlmClient for ScriptedClient {
        fn complete(&self, _req: &ChatRequest) -> anyhow::Result<LlmResponse> {
            Ok(LlmResponse {
                text: self.fragments.concat(),
                finish_reason: "stop".to_string(),
            })
        }

        fn complete_streaming(
            &self,
            _req: &ChatRequest,
            cb: StreamCallback,
            _cancel: &CancelToken,
        ) -> anyhow::Result<LlmResponse> {
            for fragment in &self.fragments {
                cb(StreamChunk::ContentDelta((*fragment).to_string()));
            }
            cb(StreamChunk::Done);
            Ok(LlmResponse {
                text: self.fragments.concat(),
                finish_reason: "stop".to_string(),
            })
        }
    }

    struct FailingClient {
        /// Fragments delivered before the stream breaks.
        partial: Vec<&'static str>,
    }

    impl LlmClient for FailingClient {
        fn complete(&self, _req: &ChatRequest) -> anyhow::Result<LlmResponse> {
            Err(anyhow!("connection reset"))
        }

        fn complete_streaming(
            &self,
            _req: &ChatRequest,
            cb: StreamCallback,
            _cancel: &CancelToken,
        ) -> anyhow::Result<LlmResponse> {
            for fragment in &self.partial {
                cb(StreamChunk::ContentDelta((*fragment).to_string()));
            }
            Err(anyhow!("connection reset"))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            if let Ok(mut notices) = self.notices.lock() {
                notices.push(message.to_string());
            }
        }
    }

    fn bare_chat_cfg() -> ChatConfig {
        ChatConfig {
            greeting: String::new(),
            quick_prompts: Vec::new(),
        }
    }

    fn session_with<C: LlmClient>(client: C) -> ChatSession<C> {
        ChatSession::new(
            client,
            PortfolioData::builtin(),
            LlmConfig::default(),
            bare_chat_cfg(),
            Arc::new(NullNotifier),
        )
    }

    #[test]
    fn greeting_is_seeded_when_configured() {
        let session = ChatSession::new(
            ScriptedClient { fragments: vec![] },
            PortfolioData::builtin(),
            LlmConfig::default(),
            ChatConfig::default(),
            Arc::new(NullNotifier),
        );
        let messages = session.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Ai);
    }

    #[test]
    fn streamed_fragments_assemble_into_a_sealed_reply() {
        let session = session_with(ScriptedClient {
            fragments: vec!["Hel", "lo", " world"],
        });
        session
            .submit("hello there", &CancelToken::new(), None)
            .expect("submit");
        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "hello there");
        assert_eq!(messages[1].sender, Sender::Ai);
        assert_eq!(messages[1].text, "Hello world");
    }

    #[test]
    fn user_text_is_trimmed_before_append() {
        let session = session_with(ScriptedClient {
            fragments: vec!["ok"],
        });
        session
            .submit("  question  ", &CancelToken::new(), None)
            .expect("submit");
        assert_eq!(session.messages()[0].text, "question");
    }

    #[test]
    fn empty_submit_is_rejected_without_transcript_change() {
        let session = session_with(ScriptedClient { fragments: vec![] });
        assert_eq!(
            session.submit("   ", &CancelToken::new(), None),
            Err(SubmitError::EmptyMessage)
        );
        assert!(session.messages().is_empty());
    }

    #[test]
    fn failure_with_no_fragments_leaves_exactly_one_error_reply() {
        let notifier = Arc::new(RecordingNotifier::default());
        let session = ChatSession::new(
            FailingClient { partial: vec![] },
            PortfolioData::builtin(),
            LlmConfig::default(),
            bare_chat_cfg(),
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        session
            .submit("hello", &CancelToken::new(), None)
            .expect("submit handles failure internally");
        let messages = session.messages();
        let ai: Vec<&ChatMessage> = messages.iter().filter(|m| m.sender == Sender::Ai).collect();
        assert_eq!(ai.len(), 1);
        assert_eq!(ai[0].text, ERROR_REPLY);
        let notices = notifier.notices.lock().expect("notices");
        assert_eq!(notices.as_slice(), [FAILURE_NOTICE.to_string()]);
    }

    #[test]
    fn failure_after_partial_content_keeps_the_partial() {
        let session = session_with(FailingClient {
            partial: vec!["half an "],
        });
        session
            .submit("hello", &CancelToken::new(), None)
            .expect("submit");
        let texts: Vec<String> = session.messages().iter().map(|m| m.text.clone()).collect();
        assert_eq!(
            texts,
            vec![
                "hello".to_string(),
                "half an ".to_string(),
                ERROR_REPLY.to_string()
            ]
        );
    }

    #[test]
    fn session_stays_usable_after_a_failure() {
        let session = session_with(FailingClient { partial: vec![] });
        session
            .submit("first", &CancelToken::new(), None)
            .expect("submit");
        // A second submit is accepted; the placeholder from the failed
        // exchange was repaired and sealed.
        session
            .submit("second", &CancelToken::new(), None)
            .expect("submit");
        let users = session
            .messages()
            .iter()
            .filter(|m| m.sender == Sender::User)
            .count();
        assert_eq!(users, 2);
    }

    #[test]
    fn non_streaming_path_appends_the_whole_reply() {
        let session = ChatSession::new(
            ScriptedClient {
                fragments: vec!["full ", "answer"],
            },
            PortfolioData::builtin(),
            LlmConfig {
                stream: false,
                ..LlmConfig::default()
            },
            bare_chat_cfg(),
            Arc::new(NullNotifier),
        );
        session
            .submit("hello", &CancelToken::new(), None)
            .expect("submit");
        assert_eq!(session.messages()[1].text, "full answer");
    }

    #[test]
    fn progress_callback_observes_fragments() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress: StreamCallback = Arc::new(move |chunk| {
            if let StreamChunk::ContentDelta(delta) = chunk {
                if let Ok(mut seen) = sink.lock() {
                    seen.push(delta);
                }
            }
        });
        let session = session_with(ScriptedClient {
            fragments: vec!["a", "b"],
        });
        session
            .submit("hello", &CancelToken::new(), Some(progress))
            .expect("submit");
        assert_eq!(
            seen.lock().expect("seen").as_slice(),
            ["a".to_string(), "b".to_string()]
        );
    }
}
