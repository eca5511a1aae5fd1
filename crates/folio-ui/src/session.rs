use crate::command::{CommandResult, Effect, interpret};
use crate::output::CommandOutput;
use crate::recall::RecallBuffer;
use folio_data::PortfolioData;
use serde::Serialize;

/// One exchange in the terminal transcript. Ids are strictly increasing and
/// equal the entry's position at append time.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: usize,
    pub input: String,
    pub output: Option<CommandOutput>,
}

/// A single-user terminal session: the append-only transcript, the recall
/// buffer, and the in-progress input line. The shell feeds key events in and
/// executes the effects that come back.
pub struct TerminalSession {
    data: PortfolioData,
    transcript: Vec<HistoryEntry>,
    recall: RecallBuffer,
    input: String,
}

impl TerminalSession {
    #[must_use]
    pub fn new(data: PortfolioData) -> Self {
        let mut session = Self {
            data,
            transcript: Vec::new(),
            recall: RecallBuffer::default(),
            input: String::new(),
        };
        session.seed();
        session
    }

    fn seed(&mut self) {
        self.transcript.push(HistoryEntry {
            id: 0,
            input: String::new(),
            output: Some(CommandOutput::Welcome),
        });
    }

    #[must_use]
    pub fn data(&self) -> &PortfolioData {
        &self.data
    }

    #[must_use]
    pub fn transcript(&self) -> &[HistoryEntry] {
        &self.transcript
    }

    #[must_use]
    pub fn recall(&self) -> &RecallBuffer {
        &self.recall
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace_input(&mut self) {
        self.input.pop();
    }

    /// Enter: commit non-empty input to recall, then run it. A blank line
    /// appends a blank entry and leaves recall alone.
    pub fn submit(&mut self) -> Vec<Effect> {
        let line = std::mem::take(&mut self.input);
        if !line.trim().is_empty() {
            self.recall.commit(&line);
        }
        self.invoke(&line)
    }

    /// Run a command programmatically (output links re-running commands).
    /// Appends to the transcript but never touches the recall buffer.
    pub fn invoke(&mut self, raw: &str) -> Vec<Effect> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.append(String::new(), None);
            return Vec::new();
        }
        // `clear` short-circuits: the transcript is replaced wholesale, so no
        // entry is recorded for the command itself.
        if trimmed.eq_ignore_ascii_case("clear") {
            self.reset();
            return vec![Effect::ClearScreen];
        }
        let CommandResult { output, effects } = interpret(raw, &self.data);
        self.append(raw.to_string(), output);
        effects
    }

    fn append(&mut self, input: String, output: Option<CommandOutput>) {
        let id = self.transcript.len();
        self.transcript.push(HistoryEntry { id, input, output });
    }

    /// Reset the transcript to its seeded initial state.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.seed();
    }

    /// Ctrl+L: same reset as the `clear` command.
    pub fn clear_shortcut(&mut self) -> Vec<Effect> {
        self.reset();
        vec![Effect::ClearScreen]
    }

    /// Up-arrow: replace the input with the next-older recalled command, if
    /// there is one.
    pub fn recall_up(&mut self) {
        if let Some(previous) = self.recall.navigate_up() {
            let previous = previous.to_string();
            self.input = previous;
        }
    }

    /// Down-arrow: replace the input with the next-newer recalled command, or
    /// empty it at the boundary.
    pub fn recall_down(&mut self) {
        let next = self.recall.navigate_down().map(ToString::to_string);
        self.input = next.unwrap_or_default();
    }
}
