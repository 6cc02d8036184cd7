//! Built-in portfolio templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping stays on for `.html`
//! templates. Rendered markdown and the URLs the generator builds itself are
//! marked `safe` where they are inserted.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{Experience, SocialLinks};

/// Stylesheet written to `css/style.css` in the output
pub const STYLESHEET: &str = include_str!("portfolio/style.css");

/// Template renderer with the embedded portfolio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("portfolio/layout.html")),
            ("index.html", include_str!("portfolio/index.html")),
            ("post.html", include_str!("portfolio/post.html")),
            ("404.html", include_str!("portfolio/404.html")),
            // Partials
            ("partials/nav.html", include_str!("portfolio/partials/nav.html")),
            ("partials/hero.html", include_str!("portfolio/partials/hero.html")),
            ("partials/about.html", include_str!("portfolio/partials/about.html")),
            (
                "partials/skills.html",
                include_str!("portfolio/partials/skills.html"),
            ),
            (
                "partials/experience.html",
                include_str!("portfolio/partials/experience.html"),
            ),
            (
                "partials/projects.html",
                include_str!("portfolio/partials/projects.html"),
            ),
            ("partials/blog.html", include_str!("portfolio/partials/blog.html")),
            (
                "partials/post_card.html",
                include_str!("portfolio/partials/post_card.html"),
            ),
            (
                "partials/resume.html",
                include_str!("portfolio/partials/resume.html"),
            ),
            (
                "partials/footer.html",
                include_str!("portfolio/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 120,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    /// Home page URL
    pub home: String,
    /// Canonical absolute URL of the home page
    pub permalink: String,
    /// Stylesheet URL
    pub css: String,
    pub current_year: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileData {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub about: String,
    pub stats: StatsData,
    pub skills: Vec<SkillGroup>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<ProjectData>,
    pub social: SocialLinks,
    pub resume: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    pub experience: String,
    pub projects: u32,
    pub articles: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectData {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub tech: Vec<String>,
    pub highlights: Vec<String>,
    pub github: Option<String>,
    pub demo: Option<String>,
}

/// A post as shown on listing cards and in `posts.json`
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub url: String,
}
