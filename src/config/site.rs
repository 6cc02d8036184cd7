//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::PortfolioConfig;

/// Config file names looked up in the site root, in order
pub const CONFIG_FILES: &[&str] = &["_config.yml", "_config.yaml", "_config.toml"];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,
    /// URL segment (and output folder) for post pages
    pub blog_dir: String,

    // Writing
    pub new_post_name: String,
    pub highlight: HighlightConfig,

    // Page content
    pub portfolio: PortfolioConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            language: "zh-CN".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content/blog".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            blog_dir: "blog".to_string(),

            new_post_name: ":title.md".to_string(),
            highlight: HighlightConfig::default(),

            portfolio: PortfolioConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => bail!("Unsupported config format: {:?}", path),
        };

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Find the config file in a site directory, if any
    pub fn locate<P: AsRef<Path>>(base_dir: P) -> Option<std::path::PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.as_ref().join(name))
            .find(|path| path.is_file())
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.blog_dir, "blog");
        assert_eq!(config.language, "zh-CN");
        assert!(!config.highlight.line_number);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
language: en
content_dir: posts
highlight:
  line_number: true
portfolio:
  name: Ada
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.language, "en");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.public_dir, "public");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.portfolio.name, "Ada");
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.toml");
        fs::write(
            &path,
            "title = \"Toml Site\"\n\n[portfolio]\nname = \"Grace\"\n\n[portfolio.stats]\nprojects = 4\n",
        )
        .unwrap();

        assert_eq!(SiteConfig::locate(dir.path()), Some(path.clone()));
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Toml Site");
        assert_eq!(config.portfolio.name, "Grace");
        assert_eq!(config.portfolio.stats.projects, 4);
    }

    #[test]
    fn test_locate_prefers_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.toml"), "").unwrap();
        fs::write(dir.path().join("_config.yml"), "").unwrap();
        assert_eq!(
            SiteConfig::locate(dir.path()),
            Some(dir.path().join("_config.yml"))
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "title=x").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
