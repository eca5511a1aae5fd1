use folio_core::{
    Achievement, Education, Experience, Link, Profile, Project, SkillCategory, ThemeName,
};
use serde::Serialize;

/// One row of the `help` table.
#[derive(Debug, Clone, Serialize)]
pub struct HelpEntry {
    pub name: String,
    pub description: String,
}

/// Structured command output. The interpreter decides *what* to show; the
/// presentation layer decides how it looks.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    /// Seeded banner entry of a fresh session.
    Welcome,
    Help {
        entries: Vec<HelpEntry>,
    },
    /// Single-command description for `help <cmd>` with a known name.
    HelpTopic {
        name: String,
        description: String,
    },
    About {
        profile: Profile,
    },
    Skills {
        skills: Vec<SkillCategory>,
    },
    Projects {
        projects: Vec<Project>,
        featured_only: bool,
    },
    ProjectDetail {
        project: Project,
    },
    Experience {
        entries: Vec<Experience>,
    },
    Education {
        entries: Vec<Education>,
    },
    Achievements {
        entries: Vec<Achievement>,
    },
    Links {
        links: Vec<Link>,
    },
    Contact {
        profile: Profile,
        links: Vec<Link>,
    },
    ThemeChanged {
        theme: ThemeName,
    },
    /// Plain text: confirmations, the bare email address, and every
    /// user-input error. Errors never propagate past the transcript.
    Text {
        body: String,
    },
}
