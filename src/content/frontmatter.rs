//! Front-matter parsing

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ContentError;

/// Line that opens and closes a front-matter block
pub const DELIMITER: &str = "---";

/// Visitor accepting any YAML scalar and turning it into its string form.
/// `null` becomes `None`.
struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// A single scalar list element
struct Scalar(Option<String>);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor).map(Scalar)
    }
}

fn scalar_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_any(ScalarVisitor)?
        .unwrap_or_default())
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor)
}

/// Custom deserializer that handles both a single scalar and a list of scalars
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(vec![value])
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(Scalar(item)) = seq.next_element::<Scalar>()? {
                if let Some(item) = item {
                    vec.push(item);
                }
            }
            Ok(vec)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata declared at the top of a post.
///
/// Every key is optional; an absent key takes the value from `Default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_or_empty")]
    pub title: String,
    /// Kept as written. Never parsed into a calendar type.
    #[serde(deserialize_with = "scalar_or_empty")]
    pub date: String,
    #[serde(deserialize_with = "scalar_or_empty")]
    pub excerpt: String,
    #[serde(deserialize_with = "optional_scalar")]
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A file without a front-matter block (or with an unterminated one) yields the
    /// defaults and the whole text as body. A block that is not a YAML mapping is an
    /// error.
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some((yaml, body)) = split_block(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let is_blank = yaml.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if is_blank {
            return Ok((FrontMatter::default(), body));
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ContentError::FrontMatter(e.to_string()))?;

        match value {
            serde_yaml::Value::Null => Ok((FrontMatter::default(), body)),
            serde_yaml::Value::Mapping(_) => {
                let fm = serde_yaml::from_value(value)
                    .map_err(|e| ContentError::FrontMatter(e.to_string()))?;
                Ok((fm, body))
            }
            _ => Err(ContentError::FrontMatter(
                "expected a mapping of keys to values".to_string(),
            )),
        }
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its yaml and body parts.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let (first, rest) = match content.find('\n') {
        Some(i) => (&content[..i], &content[i + 1..]),
        None => (content, ""),
    };
    if first.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
excerpt: A first post
category: Rust
tags:
  - rust
  - blog
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Hello World");
        assert_eq!(fm.date, "2024-01-15");
        assert_eq!(fm.excerpt, "A first post");
        assert_eq!(fm.category.as_deref(), Some("Rust"));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let (fm, remaining) = FrontMatter::parse("---\ntitle: Only a title\n---\nbody").unwrap();
        assert_eq!(fm.title, "Only a title");
        assert_eq!(fm.date, "");
        assert_eq!(fm.excerpt, "");
        assert_eq!(fm.category, None);
        assert!(fm.tags.is_empty());
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let content = "---\ntitle: Never closed\n\nStill going";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "");
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nHello").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "Hello");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let (fm, _) = FrontMatter::parse("---\ntags: Notes\n---\n").unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_null_tags_are_empty() {
        let (fm, _) = FrontMatter::parse("---\ntitle: x\ntags:\n---\n").unwrap();
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_non_string_scalars_are_stringified() {
        let content = "---\ntitle: 2024\ndate: 20240501\ntags: [1, true, go]\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "2024");
        assert_eq!(fm.date, "20240501");
        assert_eq!(fm.tags, vec!["1", "true", "go"]);
    }

    #[test]
    fn test_quoted_date_kept_verbatim() {
        let (fm, _) = FrontMatter::parse("---\ndate: \"2024-5-1\"\n---\n").unwrap();
        assert_eq!(fm.date, "2024-5-1");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (fm, _) = FrontMatter::parse("---\ntitle: T\nlayout: post\n---\n").unwrap();
        assert_eq!(fm.title, "T");
    }

    #[test]
    fn test_byte_order_mark_and_crlf() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Windows");
        assert_eq!(remaining, "body\r\n");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(ContentError::FrontMatter(_))
        ));
    }

    #[test]
    fn test_non_mapping_is_error() {
        assert!(FrontMatter::parse("---\n- just\n- a list\n---\nbody").is_err());
    }

    #[test]
    fn test_nested_title_is_error() {
        assert!(FrontMatter::parse("---\ntitle:\n  nested: true\n---\n").is_err());
    }

    #[test]
    fn test_horizontal_rule_later_in_body_is_kept() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Rules");
        assert_eq!(remaining, "above\n\n---\n\nbelow");
    }
}
