use anyhow::Result;
use chrono::Utc;
use folio_core::runtime_dir;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only session log under `.folio/observe.log`, plus a verbose
/// channel to stderr for interactive debugging.
pub struct Observer {
    log_path: PathBuf,
    verbose: bool,
}

impl Observer {
    pub fn new(workspace: &Path) -> Result<Self> {
        let dir = runtime_dir(workspace);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            log_path: dir.join("observe.log"),
            verbose: false,
        })
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Record an interpreted command by name (never its arguments — slugs and
    /// free text stay out of the log).
    pub fn record_command(&self, name: &str) -> Result<()> {
        self.append_log_line(&format!("{} COMMAND {name}", Utc::now().to_rfc3339()))
    }

    /// Record a chat exchange outcome: `ok`, `failed`, or `cancelled`.
    pub fn record_chat_exchange(&self, outcome: &str) -> Result<()> {
        self.append_log_line(&format!("{} CHAT {outcome}", Utc::now().to_rfc3339()))
    }

    /// Log a message to stderr with `[folio]` prefix when verbose mode is on.
    pub fn verbose_log(&self, msg: &str) {
        if self.verbose {
            eprintln!("[folio] {msg}");
        }
    }

    /// Log a warning — always written to the log file, and to stderr.
    pub fn warn_log(&self, msg: &str) {
        eprintln!("[folio WARN] {msg}");
        let _ = self.append_log_line(&format!("{} WARN {msg}", Utc::now().to_rfc3339()));
    }

    fn append_log_line(&self, line: &str) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_append_to_the_session_log() {
        let dir = tempfile::tempdir().expect("tempdir");
        let observer = Observer::new(dir.path()).expect("observer");
        observer.record_command("help").expect("record");
        observer.record_chat_exchange("ok").expect("record");

        let log = fs::read_to_string(runtime_dir(dir.path()).join("observe.log")).expect("log");
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("COMMAND help"));
        assert!(lines[1].contains("CHAT ok"));
    }

    #[test]
    fn verbose_defaults_off() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut observer = Observer::new(dir.path()).expect("observer");
        assert!(!observer.is_verbose());
        observer.set_verbose(true);
        assert!(observer.is_verbose());
    }
}
