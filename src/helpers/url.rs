//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a single path segment (RFC 3986 unreserved ones are kept)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/me/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://example.com/me/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// URL of an asset named in the config: external URLs are kept, local paths
/// are placed under the site root
pub fn asset_url(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        path.to_string()
    } else {
        url_for(config, path)
    }
}

/// URL of a post's detail page, `<root><blog_dir>/<slug>/`
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(
        config,
        &format!(
            "{}/{}/",
            config.blog_dir.trim_matches('/'),
            encode_segment(slug)
        ),
    )
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("//")
        || path.starts_with("data:")
        || path.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config.root = "/me/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/me/css/style.css");
        assert_eq!(url_for(&config, ""), "/me/");
        assert_eq!(url_for(&SiteConfig::default(), "/"), "/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/"),
            "https://example.com/me/blog/"
        );
    }

    #[test]
    fn test_asset_url() {
        let config = test_config();
        assert_eq!(asset_url(&config, "avatar.png"), "/me/avatar.png");
        assert_eq!(
            asset_url(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_post_url() {
        let config = SiteConfig::default();
        assert_eq!(post_url(&config, "hello-world"), "/blog/hello-world/");
        assert_eq!(post_url(&config, "你好"), "/blog/%E4%BD%A0%E5%A5%BD/");
        assert_eq!(post_url(&config, "a b?"), "/blog/a%20b%3F/");
    }
}
