//! Configuration module

mod portfolio;
mod site;

pub use portfolio::{Experience, PortfolioConfig, Project, SocialLinks, Stats};
pub use site::{HighlightConfig, SiteConfig, CONFIG_FILES};
