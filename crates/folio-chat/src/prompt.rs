//! Routes a visitor's message to one of three prompt framings and assembles
//! the completion request from the portfolio content and prior turns.

use crate::transcript::{ChatMessage, Sender};
use folio_core::{ChatRequest, ChatTurn, LlmConfig, Project};
use folio_data::PortfolioData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRoute<'a> {
    /// "Why should we hire ...?" questions.
    WhyHire,
    /// The message mentions a specific project by name or slug.
    ProjectExplanation(&'a Project),
    /// Everything else: treat the message as job requirements to match.
    SkillsSummary,
}

#[must_use]
pub fn route<'a>(data: &'a PortfolioData, message: &str) -> PromptRoute<'a> {
    if message.to_ascii_lowercase().contains("hire") {
        return PromptRoute::WhyHire;
    }
    if let Some(project) = data.find_project_mention(message) {
        return PromptRoute::ProjectExplanation(project);
    }
    PromptRoute::SkillsSummary
}

/// Build the full request: routed system prompt, prior turns role-tagged,
/// then the new user message.
#[must_use]
pub fn build_request(
    data: &PortfolioData,
    history: &[ChatMessage],
    message: &str,
    llm: &LlmConfig,
) -> ChatRequest {
    let system = match route(data, message) {
        PromptRoute::WhyHire => why_hire_prompt(data),
        PromptRoute::ProjectExplanation(project) => project_prompt(project),
        PromptRoute::SkillsSummary => skills_summary_prompt(data),
    };

    let mut messages = vec![ChatTurn::System { content: system }];
    for turn in history {
        messages.push(match turn.sender {
            Sender::User => ChatTurn::User {
                content: turn.text.clone(),
            },
            Sender::Ai => ChatTurn::Assistant {
                content: turn.text.clone(),
            },
        });
    }
    messages.push(ChatTurn::User {
        content: message.to_string(),
    });

    ChatRequest {
        model: llm.model.clone(),
        messages,
        max_tokens: llm.max_tokens,
        temperature: Some(llm.temperature),
    }
}

fn skills_line(data: &PortfolioData) -> String {
    data.skills
        .iter()
        .map(|category| {
            let items: Vec<&str> = category.items.iter().map(|i| i.name.as_str()).collect();
            format!("{}: {}", category.category, items.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn projects_lines(data: &PortfolioData) -> String {
    data.projects
        .iter()
        .map(|p| format!("{}: {}", p.name, p.short_description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn experience_line(data: &PortfolioData) -> String {
    data.experience
        .iter()
        .map(|e| format!("{} at {}", e.role, e.company))
        .collect::<Vec<_>>()
        .join("; ")
}

fn links_line(data: &PortfolioData) -> String {
    data.links
        .iter()
        .map(|l| format!("{}: {}", l.label, l.url))
        .collect::<Vec<_>>()
        .join(", ")
}

fn why_hire_prompt(data: &PortfolioData) -> String {
    let featured: Vec<&str> = data
        .featured_projects()
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    format!(
        "You are an AI assistant inside the developer portfolio of {name}. A hiring manager \
         is asking why they should hire {name}. Provide a concise, compelling answer \
         highlighting key strengths and experiences. The answer should be no more than 150 \
         words.\n\n\
         Profile Summary: {profile}\n\
         Skills: {skills}\n\
         Top Projects: {projects}\n\
         Experience: {experience}\n\
         Links: {links}",
        name = data.profile.name,
        profile = data.profile.long_bio,
        skills = skills_line(data),
        projects = featured.join(", "),
        experience = experience_line(data),
        links = links_line(data),
    )
}

fn project_prompt(project: &Project) -> String {
    let highlights = project
        .highlights
        .iter()
        .map(|h| format!("- {h}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are an AI assistant inside a developer portfolio. Your task is to provide \
         detailed explanations of the developer's projects.\n\n\
         Project Name: {name}\n\
         Description: {description}\n\
         Tech Stack: {stack}\n\
         Highlights:\n{highlights}\n\n\
         Based on the information above, provide a detailed explanation of the project, \
         focusing on its purpose, the technologies used, and its key features. Be clear, \
         friendly, and concise.",
        name = project.name,
        description = project.long_description,
        stack = project.tech_stack.join(", "),
    )
}

fn skills_summary_prompt(data: &PortfolioData) -> String {
    format!(
        "You are an AI assistant inside the developer portfolio. Your goal is to help \
         recruiters quickly assess the developer's suitability for a role. Treat the \
         visitor's message as the job requirements and create a concise summary of the \
         developer's skills and how they align with them.\n\n\
         Developer Profile Summary: {profile}\n\
         Developer Skills: {skills}\n\
         Developer Projects: {projects}",
        profile = data.profile.long_bio,
        skills = skills_line(data),
        projects = projects_lines(data),
    )
}
