//! Portfolio section of the site configuration
//!
//! Everything the home page shows besides the blog listing: profile, stats,
//! skills, work history, projects and contact links. Purely descriptive, no
//! validation beyond the types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub name: String,
    /// Job title shown under the name
    pub title: String,
    pub bio: String,
    /// Avatar image URL or path under the static directory
    pub avatar: String,
    /// Paragraph for the about section
    pub about: String,
    pub stats: Stats,
    /// Skill category -> skills, in the order written
    pub skills: IndexMap<String, Vec<String>>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub social: SocialLinks,
    #[serde(alias = "resumePdfUrl")]
    pub resume_pdf_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Free text, e.g. "3 years"
    pub experience: String,
    pub projects: u32,
    /// Falls back to the number of blog posts when unset
    pub articles: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub period: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub tech: Vec<String>,
    pub highlights: Vec<String>,
    pub github: Option<String>,
    pub demo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub email: Option<String>,
    pub wechat: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}
