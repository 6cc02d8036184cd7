//! folio-rs: a static generator for personal portfolio sites
//!
//! A site is a `_config.yml` describing the owner (profile, skills, experience,
//! projects, contact links) plus a directory of markdown blog posts. The
//! generator renders both into a home page and one page per post.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Directory holding label overrides, relative to the site root
pub const LANGUAGES_DIR: &str = "languages";

/// The main application: a site root and its resolved configuration
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Config file the configuration came from, if any
    pub config_path: Option<PathBuf>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Blog posts directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Files copied verbatim into the output
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = config::SiteConfig::locate(&base_dir);

        let config = match &config_path {
            Some(path) => config::SiteConfig::load(path)?,
            None => {
                tracing::debug!("No config file in {:?}, using defaults", base_dir);
                config::SiteConfig::default()
            }
        };

        Ok(Self::with_config(base_dir, config, config_path))
    }

    /// Create an instance from an already-built configuration
    pub fn with_config(
        base_dir: PathBuf,
        config: config::SiteConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            config_path,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        }
    }

    /// Directory holding label overrides
    pub fn languages_dir(&self) -> PathBuf {
        self.base_dir.join(LANGUAGES_DIR)
    }

    /// Loader for this site's blog posts
    pub fn loader(&self) -> content::BlogLoader<content::FsSource> {
        content::BlogLoader::for_site(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post, returning its path
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
