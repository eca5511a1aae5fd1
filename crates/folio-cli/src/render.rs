//! Plain-text presentation of structured command output.
//!
//! Rendering is pure: every variant maps to a `String`, so the interactive
//! shell and `folio run` share one code path and tests never touch a tty.

use folio_ui::{CommandOutput, HelpEntry};
use unicode_width::UnicodeWidthStr;

pub(crate) fn render(output: &CommandOutput) -> String {
    match output {
        CommandOutput::Welcome => welcome_banner(),
        CommandOutput::Help { entries } => help_table(entries),
        CommandOutput::HelpTopic { name, description } => format!("{name} - {description}"),
        CommandOutput::About { profile } => {
            let mut text = format!("ABOUT ME\n\n{}\n", profile.long_bio);
            if !profile.availability_status.is_empty() {
                text.push_str(&format!("\nStatus: {}", profile.availability_status));
            }
            text
        }
        CommandOutput::Skills { skills } => {
            let mut sections = Vec::with_capacity(skills.len());
            for category in skills {
                let names: Vec<&str> =
                    category.items.iter().map(|item| item.name.as_str()).collect();
                sections.push(format!("{}\n  {}", category.category, names.join(", ")));
            }
            format!("TECHNICAL SKILLS\n\n{}", sections.join("\n\n"))
        }
        CommandOutput::Projects {
            projects,
            featured_only,
        } => {
            let title = if *featured_only {
                "FEATURED PROJECTS"
            } else {
                "ALL PROJECTS"
            };
            let mut lines = vec![title.to_string(), String::new()];
            for project in projects {
                let star = if project.is_featured { " *" } else { "" };
                lines.push(format!("{} ({}){star}", project.name, project.slug));
                lines.push(format!("  {}", project.short_description));
                lines.push(format!("  Tech: {}", project.tech_stack.join(", ")));
                lines.push(String::new());
            }
            lines.push("Type `project <slug>` for details.".to_string());
            lines.join("\n")
        }
        CommandOutput::ProjectDetail { project } => {
            let mut lines = vec![
                if project.is_featured {
                    format!("{} [Featured]", project.name)
                } else {
                    project.name.clone()
                },
                String::new(),
                project.long_description.clone(),
                String::new(),
                format!("Role: {}", project.role),
                format!("Tech Stack: {}", project.tech_stack.join(", ")),
            ];
            if !project.highlights.is_empty() {
                lines.push(String::new());
                lines.push("Highlights:".to_string());
                for item in &project.highlights {
                    lines.push(format!("  - {item}"));
                }
            }
            if let Some(url) = &project.github_url {
                lines.push(format!("GitHub: {url}"));
            }
            if let Some(url) = &project.live_url {
                lines.push(format!("Live: {url}"));
            }
            lines.join("\n")
        }
        CommandOutput::Experience { entries } => {
            let mut lines = vec!["WORK EXPERIENCE".to_string(), String::new()];
            for entry in entries {
                lines.push(format!("{} @ {} ({})", entry.role, entry.company, entry.period));
                lines.push(format!("  {}", entry.location));
                lines.push(format!("  {}", entry.description));
                for item in &entry.responsibilities {
                    lines.push(format!("  - {item}"));
                }
                lines.push(String::new());
            }
            lines.join("\n").trim_end().to_string()
        }
        CommandOutput::Education { entries } => {
            let mut lines = vec!["EDUCATION".to_string(), String::new()];
            for entry in entries {
                lines.push(entry.degree.clone());
                lines.push(format!("  {} ({})", entry.institution, entry.period));
                if let Some(description) = &entry.description {
                    lines.push(format!("  {description}"));
                }
                lines.push(String::new());
            }
            lines.join("\n").trim_end().to_string()
        }
        CommandOutput::Achievements { entries } => {
            let mut lines = vec!["ACHIEVEMENTS".to_string(), String::new()];
            for entry in entries {
                lines.push(entry.title.clone());
                lines.push(format!("  {}", entry.description));
                if let Some(link) = &entry.link {
                    lines.push(format!("  {link}"));
                }
                lines.push(String::new());
            }
            lines.join("\n").trim_end().to_string()
        }
        CommandOutput::Links { links } => {
            let width = links
                .iter()
                .map(|link| UnicodeWidthStr::width(link.label.as_str()))
                .max()
                .unwrap_or(0);
            let mut lines = vec!["FIND ME ONLINE".to_string(), String::new()];
            for link in links {
                let pad = width - UnicodeWidthStr::width(link.label.as_str());
                lines.push(format!("{}{}  {}", link.label, " ".repeat(pad), link.url));
            }
            lines.join("\n")
        }
        CommandOutput::Contact { profile, links } => {
            let mut lines = vec![
                "GET IN TOUCH".to_string(),
                String::new(),
                format!("{} - {}", profile.name, profile.title),
                format!("Location: {}", profile.location),
                String::new(),
            ];
            for link in links {
                lines.push(format!("{}: {}", link.label, link.url));
            }
            lines.join("\n")
        }
        CommandOutput::ThemeChanged { theme } => format!("Theme set to {theme}."),
        CommandOutput::Text { body } => body.clone(),
    }
}

pub(crate) fn welcome_banner() -> String {
    [
        "Welcome to my interactive portfolio terminal.",
        "",
        "Type `help` to see available commands.",
        "Type `chat` to talk to my AI assistant.",
    ]
    .join("\n")
}

fn help_table(entries: &[HelpEntry]) -> String {
    let width = entries
        .iter()
        .map(|entry| UnicodeWidthStr::width(entry.name.as_str()))
        .max()
        .unwrap_or(0);
    let mut lines = vec!["AVAILABLE COMMANDS".to_string(), String::new()];
    for entry in entries {
        let pad = width - UnicodeWidthStr::width(entry.name.as_str());
        lines.push(format!(
            "  {}{}  {}",
            entry.name,
            " ".repeat(pad),
            entry.description
        ));
    }
    lines.push(String::new());
    lines.push("Tip: use the Up and Down arrows to walk through earlier commands.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_data::PortfolioData;
    use folio_ui::{command_table, interpret};

    #[test]
    fn theme_confirmation_names_the_theme() {
        let data = PortfolioData::builtin();
        let result = interpret("theme dark", &data);
        let output = result.output.expect("output");
        assert_eq!(render(&output), "Theme set to Dark.");
    }

    #[test]
    fn help_table_lists_every_command() {
        let data = PortfolioData::builtin();
        let result = interpret("help", &data);
        let rendered = render(&result.output.expect("output"));
        for (name, _) in command_table() {
            assert!(rendered.contains(name), "missing {name}");
        }
    }

    #[test]
    fn help_table_columns_are_aligned() {
        let data = PortfolioData::builtin();
        let result = interpret("help", &data);
        let rendered = render(&result.output.expect("output"));
        let columns: Vec<usize> = command_table()
            .iter()
            .map(|(name, description)| {
                let row = rendered
                    .lines()
                    .find(|line| line.trim_start().starts_with(name) && line.contains(description))
                    .expect("row");
                row.find(description).expect("description column")
            })
            .collect();
        assert!(columns.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn contact_includes_location_and_email() {
        let data = PortfolioData::builtin();
        let result = interpret("contact", &data);
        let rendered = render(&result.output.expect("output"));
        assert!(rendered.contains("Location:"));
        assert!(rendered.to_lowercase().contains("email"));
    }

    #[test]
    fn project_detail_shows_highlights() {
        let data = PortfolioData::builtin();
        let result = interpret("project web-monitor-saas", &data);
        let rendered = render(&result.output.expect("output"));
        assert!(rendered.contains("[Featured]"));
        assert!(rendered.contains("Highlights:"));
        assert!(rendered.contains("Role:"));
    }

    #[test]
    fn unknown_command_renders_the_error_text() {
        let data = PortfolioData::builtin();
        let result = interpret("frobnicate", &data);
        let rendered = render(&result.output.expect("output"));
        assert!(rendered.starts_with("Command not found: \"frobnicate\""));
    }
}
