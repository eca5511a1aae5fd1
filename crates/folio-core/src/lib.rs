use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub type Result<T> = anyhow::Result<T>;

/// Per-workspace runtime directory for config, content overrides and logs.
pub fn runtime_dir(workspace: &Path) -> PathBuf {
    workspace.join(".folio")
}

// ── Portfolio data model ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub location: String,
    pub short_bio: String,
    pub long_bio: String,
    pub availability_status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Email,
    Github,
    Linkedin,
    Portfolio,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<SkillItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Unique lookup key; compared case-insensitively on lookup.
    pub slug: String,
    pub short_description: String,
    pub long_description: String,
    pub tech_stack: Vec<String>,
    pub role: String,
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    pub location: String,
    pub description: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

// ── Theme ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => write!(f, "Dark"),
            Self::Light => write!(f, "Light"),
        }
    }
}

impl FromStr for ThemeName {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

// ── Chat wire types ────────────────────────────────────────────────────

/// A role-tagged turn in a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatTurn {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatTurn>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

fn default_finish_reason() -> String {
    "stop".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    #[serde(default = "default_finish_reason")]
    pub finish_reason: String,
}

/// A single chunk emitted during streaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// A content text delta, byte-exact as delivered by the transport.
    ContentDelta(String),
    /// Streaming is done; the final assembled response follows.
    Done,
}

/// Callback type for receiving streaming chunks.
/// Uses `Arc<dyn Fn>` so it can be cloned across multiple turns in a chat loop.
pub type StreamCallback = Arc<dyn Fn(StreamChunk) + Send + Sync>;

/// Cooperative cancellation flag checked between stream reads.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// ── Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub max_retries: u8,
    pub retry_base_ms: u64,
    pub stream: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".to_string(),
            endpoint: "https://api.deepseek.com/chat/completions".to_string(),
            api_key: None,
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            temperature: 0.4,
            max_tokens: 1024,
            timeout_seconds: 120,
            max_retries: 2,
            retry_base_ms: 500,
            stream: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeName,
    pub prompt_symbol: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::Dark,
            prompt_symbol: ">".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Assistant message seeded into a fresh chat transcript.
    pub greeting: String,
    pub quick_prompts: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Hello! I'm the AI assistant for this portfolio. You can ask me \
                       anything about skills, projects, or experience. How can I help you?"
                .to_string(),
            quick_prompts: vec![
                "Why should we hire you?".to_string(),
                "Tell me about the web-monitor-saas project.".to_string(),
                "How do your skills match a senior frontend developer role?".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub ui: UiConfig,
    pub chat: ChatConfig,
}

impl AppConfig {
    pub fn config_path(workspace: &Path) -> PathBuf {
        runtime_dir(workspace).join("config.toml")
    }

    /// Load config from `.folio/config.toml`, falling back to defaults for a
    /// missing file and for any field a partial file leaves out.
    pub fn load(workspace: &Path) -> Result<Self> {
        let path = Self::config_path(workspace);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load the config, writing the default file on first run.
    pub fn ensure(workspace: &Path) -> Result<Self> {
        let path = Self::config_path(workspace);
        if path.exists() {
            return Self::load(workspace);
        }
        let cfg = Self::default();
        cfg.save(workspace)?;
        Ok(cfg)
    }

    pub fn save(&self, workspace: &Path) -> Result<()> {
        let path = Self::config_path(workspace);
        fs::create_dir_all(
            path.parent()
                .ok_or_else(|| anyhow::anyhow!("invalid config path"))?,
        )?;
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("dark".parse::<ThemeName>(), Ok(ThemeName::Dark));
        assert_eq!("LIGHT".parse::<ThemeName>(), Ok(ThemeName::Light));
        assert!("purple".parse::<ThemeName>().is_err());
    }

    #[test]
    fn theme_displays_capitalized() {
        assert_eq!(ThemeName::Dark.to_string(), "Dark");
        assert_eq!(ThemeName::Light.to_string(), "Light");
    }

    #[test]
    fn unknown_link_type_maps_to_other() {
        let link: Link = toml::from_str(
            r#"
            type = "devpost"
            label = "Devpost"
            url = "https://devpost.com/example"
            "#,
        )
        .expect("link parse");
        assert_eq!(link.link_type, LinkType::Other);
    }

    #[test]
    fn partial_config_keeps_field_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [llm]
            model = "deepseek-reasoner"
            "#,
        )
        .expect("config parse");
        assert_eq!(cfg.llm.model, "deepseek-reasoner");
        assert_eq!(cfg.llm.api_key_env, "DEEPSEEK_API_KEY");
        assert!(cfg.llm.stream);
        assert_eq!(cfg.ui.theme, ThemeName::Dark);
    }

    #[test]
    fn ensure_writes_default_config_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = AppConfig::ensure(dir.path()).expect("ensure");
        assert!(AppConfig::config_path(dir.path()).exists());
        let second = AppConfig::load(dir.path()).expect("load");
        assert_eq!(first.llm.model, second.llm.model);
        assert_eq!(first.chat.greeting, second.chat.greeting);
    }

    #[test]
    fn chat_turns_serialize_role_tagged() {
        let req = ChatRequest {
            model: "deepseek-chat".to_string(),
            messages: vec![
                ChatTurn::System {
                    content: "sys".to_string(),
                },
                ChatTurn::User {
                    content: "hi".to_string(),
                },
            ],
            max_tokens: 64,
            temperature: Some(0.4),
        };
        let value = serde_json::to_value(&req).expect("serialize");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hi");
    }
}
