//! Generator module - renders the portfolio and blog into static HTML files

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{BlogLoader, ContentSource, MarkdownRenderer, Post};
use crate::helpers::{asset_url, full_url_for, post_url, url_for};
use crate::i18n::I18n;
use crate::templates::{
    NavPost, PostCard, ProfileData, ProjectData, SiteData, SkillGroup, StatsData,
    TemplateRenderer, STYLESHEET,
};
use crate::Folio;

/// Listing metadata written next to the post pages
pub const POST_INDEX_FILE: &str = "posts.json";

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
    i18n: I18n,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let templates = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_options(&folio.config.highlight);

        let mut i18n = I18n::builtin(&folio.config.language);
        i18n.load_languages(folio.languages_dir())?;

        Ok(Self {
            folio: folio.clone(),
            templates,
            markdown,
            i18n,
        })
    }

    /// Generate the entire site.
    ///
    /// The home page is built from the post listing; every detail page is built
    /// from a fresh lookup of its slug. Returns the number of post pages written.
    pub fn generate<S: ContentSource>(&self, loader: &BlogLoader<S>) -> Result<usize> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)?;

        self.copy_static_assets()?;
        self.write_stylesheet()?;

        let posts = loader.list_posts();
        let cards: Vec<PostCard> = posts.iter().map(|p| self.post_card(p)).collect();

        let context = self.create_base_context(posts.len());

        self.generate_home(&context, &cards)?;
        let written = self.generate_post_pages(&context, loader, &posts)?;
        self.generate_not_found(&context)?;
        self.generate_post_index(&cards)?;

        Ok(written)
    }

    /// Create a base context with common variables
    fn create_base_context(&self, post_count: usize) -> Context {
        let site = self.build_site_data();
        let blog_url = format!("{}#blog", site.home);

        let mut context = Context::new();
        context.insert("site", &site);
        context.insert("profile", &self.build_profile(post_count));
        context.insert("t", &self.i18n.tree());
        context.insert("blog_url", &blog_url);
        context
    }

    /// Build site data for templates
    fn build_site_data(&self) -> SiteData {
        let config = &self.folio.config;
        SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            home: url_for(config, "/"),
            permalink: full_url_for(config, "/"),
            css: url_for(config, "css/style.css"),
            current_year: chrono::Local::now().format("%Y").to_string(),
        }
    }

    /// Build the profile shown on the home page, resolving asset URLs
    fn build_profile(&self, post_count: usize) -> ProfileData {
        let config = &self.folio.config;
        let portfolio = &config.portfolio;

        let non_empty = |s: &str| (!s.is_empty()).then(|| asset_url(config, s));

        ProfileData {
            name: portfolio.name.clone(),
            title: portfolio.title.clone(),
            bio: portfolio.bio.clone(),
            avatar: non_empty(&portfolio.avatar),
            about: portfolio.about.clone(),
            stats: StatsData {
                experience: portfolio.stats.experience.clone(),
                projects: portfolio.stats.projects,
                articles: portfolio
                    .stats
                    .articles
                    .unwrap_or_else(|| u32::try_from(post_count).unwrap_or(u32::MAX)),
            },
            skills: portfolio
                .skills
                .iter()
                .map(|(name, items)| SkillGroup {
                    name: name.clone(),
                    items: items.clone(),
                })
                .collect(),
            experiences: portfolio.experiences.clone(),
            projects: portfolio
                .projects
                .iter()
                .map(|p| ProjectData {
                    name: p.name.clone(),
                    description: p.description.clone(),
                    image: p.image.as_deref().and_then(non_empty),
                    tech: p.tech.clone(),
                    highlights: p.highlights.clone(),
                    github: p.github.clone(),
                    demo: p.demo.clone(),
                })
                .collect(),
            social: portfolio.social.clone(),
            resume: portfolio.resume_pdf_url.as_deref().and_then(non_empty),
        }
    }

    fn post_card(&self, post: &Post) -> PostCard {
        PostCard {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            url: post_url(&self.folio.config, &post.slug),
        }
    }

    /// Generate the home page with every portfolio section and the post listing
    fn generate_home(&self, base: &Context, cards: &[PostCard]) -> Result<()> {
        let mut context = base.clone();
        context.insert("posts", cards);

        let html = self.templates.render("index.html", &context)?;
        self.write_page(Path::new("index.html"), &html)
    }

    /// Generate individual post pages
    fn generate_post_pages<S: ContentSource>(
        &self,
        base: &Context,
        loader: &BlogLoader<S>,
        posts: &[Post],
    ) -> Result<usize> {
        let config = &self.folio.config;
        let blog_dir = config.blog_dir.trim_matches('/');
        let nav = |p: &Post| NavPost {
            title: p.title.clone(),
            url: post_url(config, &p.slug),
        };

        let mut written = 0;
        for listed in posts {
            // The file may have changed or vanished since it was listed
            let Some(post) = loader.get_post(&listed.slug) else {
                tracing::warn!("Post {:?} disappeared during generation", listed.slug);
                continue;
            };

            let url = post_url(config, &post.slug);
            let mut context = base.clone();
            context.insert("post", &post);
            context.insert("content", &self.markdown.render(&post.content));
            context.insert(
                "permalink",
                &format!("{}{}", config.url.trim_end_matches('/'), url),
            );
            if let Some(prev) = listed.prev(posts) {
                context.insert("prev_post", &nav(prev));
            }
            if let Some(next) = listed.next(posts) {
                context.insert("next_post", &nav(next));
            }

            let html = self.templates.render("post.html", &context)?;
            let output = Path::new(blog_dir).join(&post.slug).join("index.html");
            self.write_page(&output, &html)?;
            written += 1;
        }

        Ok(written)
    }

    /// Generate the page shown for unknown URLs
    fn generate_not_found(&self, base: &Context) -> Result<()> {
        let html = self.templates.render("404.html", base)?;
        self.write_page(Path::new("404.html"), &html)
    }

    /// Write listing metadata for client-side use
    fn generate_post_index(&self, cards: &[PostCard]) -> Result<()> {
        let blog_dir = self.folio.config.blog_dir.trim_matches('/');
        let json = serde_json::to_string_pretty(cards)?;
        self.write_page(&Path::new(blog_dir).join(POST_INDEX_FILE), &json)?;
        tracing::debug!("Generated {}", POST_INDEX_FILE);
        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        self.write_page(Path::new("css/style.css"), STYLESHEET)
    }

    /// Copy the static directory into the public directory as-is
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.is_dir() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .map_err(|e| anyhow!("Failed to copy {:?} to {:?}: {}", path, dest, e))?;
        }

        Ok(())
    }

    /// Write a file under the public directory, creating parent directories
    fn write_page(&self, relative: &Path, content: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, content)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;

    const CONFIG: &str = r#"
title: Lin's Portfolio
language: en
portfolio:
  name: Lin
  title: Backend Engineer
  avatar: avatar.png
  stats:
    experience: 2 years
    projects: 5
  skills:
    Languages: [Rust, Go]
  experiences:
    - company: Acme
      position: Intern
      period: "2023 - 2024"
      responsibilities: [Built things]
      achievements: [Shipped things]
  projects:
    - name: Folio
      description: This site
      tech: [Rust]
  social:
    email: lin@example.com
  resume_pdf_url: resume.pdf
"#;

    fn site() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), CONFIG).unwrap();
        fs::create_dir_all(dir.path().join("static/img")).unwrap();
        fs::write(dir.path().join("static/img/logo.svg"), "<svg/>").unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    fn posts() -> MemorySource {
        MemorySource::new()
            .with_file(
                "older.md",
                "---\ntitle: Older Post\ndate: 2024-01-01\n---\nFirst words.\n",
            )
            .with_file(
                "newer.md",
                "---\ntitle: Newer Post\ndate: 2024-02-01\ncategory: Rust\ntags: [async]\nexcerpt: About <async>\n---\n# Heading\n\n```rust\nfn main() {}\n```\n",
            )
    }

    #[test]
    fn test_generate_site() {
        let (_dir, folio) = site();
        let generator = Generator::new(&folio).unwrap();
        let written = generator.generate(&BlogLoader::new(posts())).unwrap();
        assert_eq!(written, 2);

        let public = &folio.public_dir;
        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(index.contains("Backend Engineer"));
        assert!(index.contains("Languages"));
        assert!(index.contains("Acme"));
        assert!(index.contains(r#"href="/blog/newer/""#));
        assert!(index.contains("About &lt;async&gt;"));
        assert!(index.contains("avatar.png"));
        assert!(index.contains("resume.pdf"));
        // Articles stat falls back to the number of posts
        assert!(index.contains("2+"));
        // Newest first
        assert!(index.find("Newer Post").unwrap() < index.find("Older Post").unwrap());

        let newer = fs::read_to_string(public.join("blog/newer/index.html")).unwrap();
        assert!(newer.contains("<h1>Heading</h1>"));
        assert!(newer.contains("#async"));
        assert!(newer.contains(r#"href="/blog/older/""#));
        assert!(!newer.contains("title: Newer Post"));

        assert!(public.join("blog/older/index.html").is_file());
        assert!(public.join("404.html").is_file());
        assert!(public.join("css/style.css").is_file());
        assert_eq!(
            fs::read_to_string(public.join("img/logo.svg")).unwrap(),
            "<svg/>"
        );
    }

    #[test]
    fn test_post_index_json() {
        let (_dir, folio) = site();
        Generator::new(&folio)
            .unwrap()
            .generate(&BlogLoader::new(posts()))
            .unwrap();

        let json = fs::read_to_string(folio.public_dir.join("blog/posts.json")).unwrap();
        let cards: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(cards[0]["slug"], "newer");
        assert_eq!(cards[0]["url"], "/blog/newer/");
        assert_eq!(cards[0]["category"], "Rust");
        assert_eq!(cards[1]["category"], serde_json::Value::Null);
    }

    #[test]
    fn test_generate_without_posts() {
        let (_dir, folio) = site();
        let written = Generator::new(&folio)
            .unwrap()
            .generate(&BlogLoader::new(MemorySource::new()))
            .unwrap();
        assert_eq!(written, 0);

        let index = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(index.contains("No posts yet"));
    }

    #[test]
    fn test_default_site_renders() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let generator = Generator::new(&folio).unwrap();
        generator.generate(&folio.loader()).unwrap();

        let index = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(index.contains("暂无博客文章"));
    }
}
