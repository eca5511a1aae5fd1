use crate::output::{CommandOutput, HelpEntry};
use folio_core::ThemeName;
use folio_data::PortfolioData;
use serde::Serialize;

pub const REPO_URL: &str = "https://github.com/afroz-sh/terminal-portfolio";
/// Placeholder resource; the `resume` command says so in its confirmation.
pub const RESUME_URL: &str = "/resume.pdf";

/// Closed set of recognized commands. Aliases resolve during parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Help,
    About,
    Skills,
    Projects,
    Project,
    Experience,
    Education,
    Achievements,
    Links,
    Contact,
    Email,
    Repo,
    Resume,
    Theme,
    Chat,
    Clear,
}

impl CommandName {
    /// Parse an already-lowercased command token. `None` means "Command not
    /// found" at the interpreter level.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "help" => Self::Help,
            "about" | "bio" | "whois" => Self::About,
            "skills" => Self::Skills,
            "projects" => Self::Projects,
            "project" => Self::Project,
            "experience" => Self::Experience,
            "education" => Self::Education,
            "achievements" => Self::Achievements,
            "links" | "social" => Self::Links,
            "contact" => Self::Contact,
            "email" => Self::Email,
            "repo" => Self::Repo,
            "resume" => Self::Resume,
            "theme" => Self::Theme,
            "chat" => Self::Chat,
            "clear" => Self::Clear,
            _ => return None,
        })
    }
}

/// Help table, in display order.
#[must_use]
pub fn command_table() -> &'static [(&'static str, &'static str)] {
    &[
        ("help", "Show this help message."),
        ("about", "Display summary about me."),
        ("skills", "List my technical skills."),
        ("projects", "Show my projects. Use --featured or <slug>."),
        ("experience", "Display my work experience."),
        ("education", "Show my education background."),
        ("achievements", "List my notable achievements."),
        ("links", "Get my social and professional links."),
        ("contact", "Show how to contact me."),
        ("theme", "Change the theme. Use \"dark\" or \"light\"."),
        ("chat", "Open the AI chat assistant."),
        ("clear", "Clear the terminal screen."),
        ("whois", "Alias for the \"about\" command."),
        ("repo", "Opens the GitHub repository for this portfolio."),
        ("email", "Display my email address."),
        ("resume", "Get a link to my resume (placeholder)."),
    ]
}

/// Side effect a command asks the shell to perform. Commands describe
/// effects; they never execute them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Effect {
    SetTheme(ThemeName),
    ShowChat,
    OpenUrl(String),
    ClearScreen,
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub output: Option<CommandOutput>,
    pub effects: Vec<Effect>,
}

impl CommandResult {
    fn none() -> Self {
        Self {
            output: None,
            effects: Vec::new(),
        }
    }

    fn output(output: CommandOutput) -> Self {
        Self {
            output: Some(output),
            effects: Vec::new(),
        }
    }

    fn text(body: impl Into<String>) -> Self {
        Self::output(CommandOutput::Text { body: body.into() })
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Interpret one typed line against the portfolio data. Pure: all side
/// effects come back as `Effect` values for the caller to run.
#[must_use]
pub fn interpret(raw: &str, data: &PortfolioData) -> CommandResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CommandResult::none();
    }
    let mut parts = trimmed.split_whitespace();
    let name = parts.next().unwrap_or("").to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let Some(cmd) = CommandName::parse(&name) else {
        return CommandResult::text(format!(
            "Command not found: \"{name}\". Type `help` for a list of commands."
        ));
    };

    match cmd {
        CommandName::Help => help(args.first().copied()),
        CommandName::About => CommandResult::output(CommandOutput::About {
            profile: data.profile.clone(),
        }),
        CommandName::Skills => CommandResult::output(CommandOutput::Skills {
            skills: data.skills.clone(),
        }),
        CommandName::Projects => match args.first().map(|a| a.to_ascii_lowercase()) {
            Some(flag) if flag == "--featured" => CommandResult::output(CommandOutput::Projects {
                projects: data
                    .featured_projects()
                    .into_iter()
                    .cloned()
                    .collect(),
                featured_only: true,
            }),
            Some(flag) if flag == "--all" => all_projects(data),
            // Anything else is a direct slug lookup.
            Some(_) => project_detail(data, args[0]),
            None => all_projects(data),
        },
        CommandName::Project => match args.first() {
            Some(slug) => project_detail(data, slug),
            None => CommandResult::text(
                "Please specify a project slug. Type `projects` to see all available projects.",
            ),
        },
        CommandName::Experience => CommandResult::output(CommandOutput::Experience {
            entries: data.experience.clone(),
        }),
        CommandName::Education => CommandResult::output(CommandOutput::Education {
            entries: data.education.clone(),
        }),
        CommandName::Achievements => CommandResult::output(CommandOutput::Achievements {
            entries: data.achievements.clone(),
        }),
        CommandName::Links => CommandResult::output(CommandOutput::Links {
            links: data.links.clone(),
        }),
        CommandName::Contact => CommandResult::output(CommandOutput::Contact {
            profile: data.profile.clone(),
            links: data.links.clone(),
        }),
        CommandName::Email => match data.email_link() {
            Some(link) => {
                let address = link.url.strip_prefix("mailto:").unwrap_or(&link.url);
                CommandResult::text(address)
            }
            None => CommandResult::text("Email not found."),
        },
        CommandName::Repo => CommandResult::text("Opening GitHub repository...")
            .with_effect(Effect::OpenUrl(REPO_URL.to_string())),
        CommandName::Resume => CommandResult::text("Opening resume... (Note: This is a placeholder link)")
            .with_effect(Effect::OpenUrl(RESUME_URL.to_string())),
        CommandName::Theme => match args.first().and_then(|a| a.parse::<ThemeName>().ok()) {
            Some(theme) => CommandResult::output(CommandOutput::ThemeChanged { theme })
                .with_effect(Effect::SetTheme(theme)),
            None => CommandResult::text("Invalid theme. Please use `theme dark` or `theme light`."),
        },
        CommandName::Chat => {
            CommandResult::text("Opening AI chat assistant...").with_effect(Effect::ShowChat)
        }
        // The session intercepts `clear` before the interpreter; this branch
        // covers direct calls. The reset is the caller's to perform.
        CommandName::Clear => CommandResult::none().with_effect(Effect::ClearScreen),
    }
}

fn help(topic: Option<&str>) -> CommandResult {
    if let Some(topic) = topic {
        let wanted = topic.to_ascii_lowercase();
        if let Some((name, description)) = command_table().iter().find(|(n, _)| *n == wanted) {
            return CommandResult::output(CommandOutput::HelpTopic {
                name: (*name).to_string(),
                description: (*description).to_string(),
            });
        }
        // Unknown sub-argument falls through to the full table.
    }
    CommandResult::output(CommandOutput::Help {
        entries: command_table()
            .iter()
            .map(|(name, description)| HelpEntry {
                name: (*name).to_string(),
                description: (*description).to_string(),
            })
            .collect(),
    })
}

fn all_projects(data: &PortfolioData) -> CommandResult {
    CommandResult::output(CommandOutput::Projects {
        projects: data.projects.clone(),
        featured_only: false,
    })
}

fn project_detail(data: &PortfolioData, slug: &str) -> CommandResult {
    match data.find_project(slug) {
        Some(project) => CommandResult::output(CommandOutput::ProjectDetail {
            project: project.clone(),
        }),
        None => CommandResult::text(format!(
            "Project \"{slug}\" not found. Type `projects` to see all available projects."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> PortfolioData {
        PortfolioData::builtin()
    }

    fn body(result: &CommandResult) -> &str {
        match result.output.as_ref() {
            Some(CommandOutput::Text { body }) => body,
            other => panic!("expected text output, got {other:?}"),
        }
    }

    #[test]
    fn empty_line_is_a_no_op() {
        let result = interpret("   ", &data());
        assert!(result.output.is_none());
        assert!(result.effects.is_empty());
    }

    #[test]
    fn unknown_command_names_the_token() {
        let result = interpret("frobnicate now", &data());
        assert!(body(&result).contains("Command not found: \"frobnicate\""));
        assert!(result.effects.is_empty());
    }

    #[test]
    fn command_name_is_case_insensitive() {
        let result = interpret("ABOUT", &data());
        assert!(matches!(result.output, Some(CommandOutput::About { .. })));
    }

    #[test]
    fn aliases_resolve() {
        for alias in ["about", "bio", "whois"] {
            assert!(matches!(
                interpret(alias, &data()).output,
                Some(CommandOutput::About { .. })
            ));
        }
        assert!(matches!(
            interpret("social", &data()).output,
            Some(CommandOutput::Links { .. })
        ));
    }

    #[test]
    fn help_with_known_topic_returns_single_entry() {
        let result = interpret("help theme", &data());
        match result.output {
            Some(CommandOutput::HelpTopic { name, .. }) => assert_eq!(name, "theme"),
            other => panic!("expected help topic, got {other:?}"),
        }
    }

    #[test]
    fn help_with_unknown_topic_falls_back_to_full_table() {
        let result = interpret("help frobnicate", &data());
        match result.output {
            Some(CommandOutput::Help { entries }) => {
                assert_eq!(entries.len(), command_table().len());
            }
            other => panic!("expected full help, got {other:?}"),
        }
    }

    #[test]
    fn theme_dark_sets_theme_and_confirms() {
        let result = interpret("theme dark", &data());
        assert_eq!(result.effects, vec![Effect::SetTheme(ThemeName::Dark)]);
        assert!(matches!(
            result.output,
            Some(CommandOutput::ThemeChanged {
                theme: ThemeName::Dark
            })
        ));
    }

    #[test]
    fn invalid_theme_names_both_options_and_has_no_effect() {
        for line in ["theme purple", "theme"] {
            let result = interpret(line, &data());
            assert!(result.effects.is_empty());
            let text = body(&result);
            assert!(text.contains("dark"));
            assert!(text.contains("light"));
        }
    }

    #[test]
    fn project_without_slug_prompts_for_one() {
        let result = interpret("project", &data());
        assert!(body(&result).contains("Please specify a project slug"));
    }

    #[test]
    fn unknown_slug_is_reported_verbatim() {
        let result = interpret("project unknown-slug", &data());
        assert!(body(&result).contains("Project \"unknown-slug\" not found"));
    }

    #[test]
    fn projects_bare_slug_acts_as_lookup() {
        let result = interpret("projects web-monitor-saas", &data());
        match result.output {
            Some(CommandOutput::ProjectDetail { project }) => {
                assert_eq!(project.slug, "web-monitor-saas");
            }
            other => panic!("expected project detail, got {other:?}"),
        }
    }

    #[test]
    fn slug_lookup_ignores_case() {
        let result = interpret("project Web-Monitor-SaaS", &data());
        assert!(matches!(
            result.output,
            Some(CommandOutput::ProjectDetail { .. })
        ));
    }

    #[test]
    fn projects_featured_filters_in_collection_order() {
        let data = data();
        let result = interpret("projects --featured", &data);
        match result.output {
            Some(CommandOutput::Projects {
                projects,
                featured_only,
            }) => {
                assert!(featured_only);
                let expected: Vec<&str> = data
                    .projects
                    .iter()
                    .filter(|p| p.is_featured)
                    .map(|p| p.slug.as_str())
                    .collect();
                let got: Vec<&str> = projects.iter().map(|p| p.slug.as_str()).collect();
                assert_eq!(got, expected);
            }
            other => panic!("expected projects, got {other:?}"),
        }
    }

    #[test]
    fn projects_all_and_bare_show_everything() {
        let data = data();
        for line in ["projects", "projects --all"] {
            match interpret(line, &data).output {
                Some(CommandOutput::Projects {
                    projects,
                    featured_only,
                }) => {
                    assert!(!featured_only);
                    assert_eq!(projects.len(), data.projects.len());
                }
                other => panic!("expected projects, got {other:?}"),
            }
        }
    }

    #[test]
    fn email_strips_the_mailto_prefix() {
        let result = interpret("email", &data());
        assert_eq!(body(&result), "afroz@example.com");
    }

    #[test]
    fn email_missing_reports_not_found() {
        let mut data = data();
        data.links.retain(|l| l.link_type != folio_core::LinkType::Email);
        let result = interpret("email", &data);
        assert_eq!(body(&result), "Email not found.");
    }

    #[test]
    fn repo_and_resume_open_urls_and_still_confirm() {
        let repo = interpret("repo", &data());
        assert_eq!(repo.effects, vec![Effect::OpenUrl(REPO_URL.to_string())]);
        assert!(body(&repo).contains("Opening GitHub repository"));

        let resume = interpret("resume", &data());
        assert_eq!(resume.effects, vec![Effect::OpenUrl(RESUME_URL.to_string())]);
        assert!(body(&resume).contains("placeholder"));
    }

    #[test]
    fn chat_shows_the_panel_without_clearing() {
        let result = interpret("chat", &data());
        assert_eq!(result.effects, vec![Effect::ShowChat]);
        assert!(body(&result).contains("Opening AI chat assistant"));
    }

    #[test]
    fn clear_has_no_renderable_output() {
        let result = interpret("clear", &data());
        assert!(result.output.is_none());
        assert_eq!(result.effects, vec![Effect::ClearScreen]);
    }
}
