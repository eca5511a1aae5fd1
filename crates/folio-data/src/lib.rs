use anyhow::Context;
use folio_core::{
    Achievement, Education, Experience, Link, LinkType, Profile, Project, Result, SkillCategory,
    runtime_dir,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

mod builtin;

/// Read-only portfolio content. Static for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioData {
    pub profile: Profile,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub achievements: Vec<Achievement>,
    pub links: Vec<Link>,
}

impl PortfolioData {
    /// The content compiled into the binary, used when no override file exists.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::content()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading portfolio content from {}", path.display()))?;
        let data: Self = toml::from_str(&raw)?;
        data.validate()?;
        Ok(data)
    }

    /// Resolve content for a workspace: `.folio/portfolio.toml`, then
    /// `portfolio.toml` at the workspace root, then the built-in content.
    pub fn load_or_builtin(workspace: &Path) -> Result<Self> {
        let candidates = [
            runtime_dir(workspace).join("portfolio.toml"),
            workspace.join("portfolio.toml"),
        ];
        for path in candidates {
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::builtin())
    }

    /// Slugs are lookup keys and must be unique (ignoring case).
    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<String> = Vec::new();
        for project in &self.projects {
            let slug = project.slug.to_ascii_lowercase();
            if seen.contains(&slug) {
                anyhow::bail!("duplicate project slug: {}", project.slug);
            }
            seen.push(slug);
        }
        Ok(())
    }

    #[must_use]
    pub fn find_project(&self, slug: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.slug.eq_ignore_ascii_case(slug))
    }

    /// Featured projects, in collection order.
    #[must_use]
    pub fn featured_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.is_featured).collect()
    }

    #[must_use]
    pub fn email_link(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.link_type == LinkType::Email)
    }

    /// First project whose name or slug appears in `message` (ignoring case).
    #[must_use]
    pub fn find_project_mention(&self, message: &str) -> Option<&Project> {
        let haystack = message.to_ascii_lowercase();
        self.projects.iter().find(|p| {
            haystack.contains(&p.name.to_ascii_lowercase())
                || haystack.contains(&p.slug.to_ascii_lowercase())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_is_valid() {
        let data = PortfolioData::builtin();
        data.validate().expect("builtin content valid");
        assert!(!data.profile.name.is_empty());
        assert!(!data.projects.is_empty());
        assert!(data.email_link().is_some());
    }

    #[test]
    fn project_lookup_ignores_case() {
        let data = PortfolioData::builtin();
        let slug = data.projects[0].slug.to_ascii_uppercase();
        assert!(data.find_project(&slug).is_some());
        assert!(data.find_project("no-such-project").is_none());
    }

    #[test]
    fn featured_subset_preserves_order() {
        let data = PortfolioData::builtin();
        let featured = data.featured_projects();
        assert!(featured.iter().all(|p| p.is_featured));
        let expected: Vec<&str> = data
            .projects
            .iter()
            .filter(|p| p.is_featured)
            .map(|p| p.slug.as_str())
            .collect();
        let got: Vec<&str> = featured.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn mention_matches_name_or_slug() {
        let data = PortfolioData::builtin();
        let by_slug = data
            .find_project_mention("tell me about the web-monitor-saas project")
            .expect("slug mention");
        assert_eq!(by_slug.slug, "web-monitor-saas");
        let by_name = data
            .find_project_mention("what is the Task Management Tool?")
            .expect("name mention");
        assert_eq!(by_name.slug, "task-manager");
        assert!(data.find_project_mention("unrelated question").is_none());
    }

    #[test]
    fn workspace_override_wins_over_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut data = PortfolioData::builtin();
        data.profile.name = "Override Person".to_string();
        let raw = toml::to_string_pretty(&data).expect("serialize");
        fs::write(dir.path().join("portfolio.toml"), raw).expect("write");

        let loaded = PortfolioData::load_or_builtin(dir.path()).expect("load");
        assert_eq!(loaded.profile.name, "Override Person");
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let mut data = PortfolioData::builtin();
        let mut dup = data.projects[0].clone();
        dup.slug = data.projects[0].slug.to_ascii_uppercase();
        data.projects.push(dup);
        assert!(data.validate().is_err());
    }
}
