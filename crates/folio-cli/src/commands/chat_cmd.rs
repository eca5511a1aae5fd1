//! The chat surface: a line-based REPL over a [`ChatSession`], with streamed
//! reply echo. Reached from `folio chat` or from the `chat` terminal command.

use anyhow::Result;
use folio_chat::{ChatSession, ERROR_REPLY, Notifier, Sender, SubmitError};
use folio_core::{AppConfig, CancelToken, StreamCallback, StreamChunk};
use folio_data::PortfolioData;
use folio_llm::HttpLlmClient;
use folio_observe::Observer;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

/// Failure notices surface on stderr so they never interleave with the
/// streamed reply on stdout.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("[folio] {message}");
    }
}

pub(crate) struct ChatRepl {
    session: ChatSession<HttpLlmClient>,
}

impl ChatRepl {
    pub(crate) fn new(cfg: &AppConfig, data: &PortfolioData) -> Result<Self> {
        let client = HttpLlmClient::new(cfg.llm.clone())?;
        let session = ChatSession::new(
            client,
            data.clone(),
            cfg.llm.clone(),
            cfg.chat.clone(),
            Arc::new(StderrNotifier),
        );
        Ok(Self { session })
    }

    /// Run the REPL until `exit`, `quit`, or end of input. The conversation
    /// survives across invocations, so leaving and coming back resumes it.
    pub(crate) fn run(&mut self, observer: &Observer) -> Result<()> {
        println!();
        for message in self.session.messages() {
            let tag = match message.sender {
                Sender::Ai => "ai>",
                Sender::User => "you>",
            };
            println!("{tag} {}", message.text);
        }
        let prompts = self.session.quick_prompts().to_vec();
        if !prompts.is_empty() {
            println!();
            println!("Quick prompts:");
            for prompt in &prompts {
                println!("  - {prompt}");
            }
        }
        println!();
        println!("Type a message, or `exit` to leave the chat.");
        println!();

        let stdin = io::stdin();
        loop {
            print!("you> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                break;
            }
            exchange(&self.session, line, observer)?;
        }
        println!();
        Ok(())
    }
}

pub(crate) fn run_chat(
    cfg: &AppConfig,
    data: &PortfolioData,
    prompt: Option<&str>,
    observer: &Observer,
) -> Result<()> {
    let mut repl = ChatRepl::new(cfg, data)?;
    match prompt {
        Some(text) => exchange(&repl.session, text, observer),
        None => repl.run(observer),
    }
}

/// One exchange: echo the reply as it streams, then print whatever the
/// transcript holds that never went over the wire (the apology message after
/// a transport failure).
fn exchange(
    session: &ChatSession<HttpLlmClient>,
    text: &str,
    observer: &Observer,
) -> Result<()> {
    let before = session.messages().len();
    let streamed = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&streamed);

    print!("ai> ");
    io::stdout().flush()?;
    let progress: StreamCallback = Arc::new(move |chunk| match chunk {
        StreamChunk::ContentDelta(delta) => {
            if let Ok(mut buf) = sink.lock() {
                buf.push_str(&delta);
            }
            print!("{delta}");
            let _ = io::stdout().flush();
        }
        StreamChunk::Done => println!(),
    });

    match session.submit(text, &CancelToken::new(), Some(progress)) {
        Ok(()) => {}
        Err(SubmitError::EmptyMessage) => {
            println!();
            return Ok(());
        }
        Err(SubmitError::ExchangeInFlight) => {
            println!("(still waiting on the previous reply)");
            return Ok(());
        }
    }

    let streamed_text = streamed
        .lock()
        .map(|buf| buf.clone())
        .unwrap_or_default();
    let mut failed = false;
    // Skip the user turn appended by submit; anything assistant-side that
    // differs from what streamed must be printed now.
    for message in session.messages().iter().skip(before + 1) {
        if message.sender == Sender::Ai && message.text != streamed_text {
            if !streamed_text.is_empty() {
                println!();
                print!("ai> ");
            }
            println!("{}", message.text);
            failed = message.text == ERROR_REPLY;
        }
    }
    observer.record_chat_exchange(if failed { "failed" } else { "ok" })?;
    Ok(())
}
