//! Internationalization (i18n) support for the fixed UI labels
//!
//! Built-in tables for `en` and `zh-CN` are compiled in. A site can override any
//! key with `languages/<lang>.yml` (or `.yaml` / `.json`).

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const FALLBACK_LANGUAGE: &str = "en";

const BUILTIN: &[(&str, &str)] = &[
    ("en", include_str!("en.yml")),
    ("zh-CN", include_str!("zh-CN.yml")),
];

/// Internationalization handler
pub struct I18n {
    /// Current language
    language: String,
    /// Language data: lang -> dotted key -> translation
    translations: HashMap<String, HashMap<String, String>>,
}

impl I18n {
    /// Create a handler with no translations loaded
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            translations: HashMap::new(),
        }
    }

    /// Create a handler preloaded with the built-in label tables
    pub fn builtin(language: &str) -> Self {
        let mut i18n = Self::new(language);
        for (lang, source) in BUILTIN {
            match serde_yaml::from_str::<serde_yaml::Value>(source) {
                Ok(data) => i18n.merge(lang, &data),
                Err(e) => tracing::warn!("Built-in labels for {} are invalid: {}", lang, e),
            }
        }
        i18n
    }

    /// Load language files from a directory, overriding keys already present
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("yml") | Some("yaml") | Some("json")) {
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            // JSON is a subset of YAML, one parser covers both
            match serde_yaml::from_str::<serde_yaml::Value>(&content) {
                Ok(data) => {
                    self.merge(lang, &data);
                    tracing::debug!("Loaded language file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                }
            }
        }

        Ok(())
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get a translation by dotted key, e.g. "blog.title"
    pub fn get(&self, key: &str) -> String {
        self.get_for_lang(&self.language, key)
    }

    /// Get a translation for a specific language, falling back to English and
    /// then to the key itself
    pub fn get_for_lang(&self, lang: &str, key: &str) -> String {
        [lang, FALLBACK_LANGUAGE]
            .iter()
            .find_map(|lang| self.translations.get(*lang)?.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// All translations for the current language, English filling the gaps
    pub fn get_all_translations(&self) -> HashMap<String, String> {
        let mut result = self
            .translations
            .get(&self.language)
            .cloned()
            .unwrap_or_default();

        if self.language != FALLBACK_LANGUAGE {
            if let Some(en) = self.translations.get(FALLBACK_LANGUAGE) {
                for (k, v) in en {
                    result.entry(k.clone()).or_insert_with(|| v.clone());
                }
            }
        }

        result
    }

    /// Translations as a nested JSON object, for templates (`t.blog.title`)
    pub fn tree(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();

        'keys: for (key, value) in self.get_all_translations() {
            let mut parts: Vec<&str> = key.split('.').collect();
            let Some(leaf) = parts.pop() else { continue };

            let mut node = &mut root;
            for part in parts {
                let entry = node
                    .entry(part.to_string())
                    .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
                if !entry.is_object() {
                    *entry = serde_json::Value::Object(serde_json::Map::new());
                }
                match entry.as_object_mut() {
                    Some(map) => node = map,
                    None => continue 'keys,
                }
            }
            node.insert(leaf.to_string(), serde_json::Value::String(value));
        }

        serde_json::Value::Object(root)
    }

    fn merge(&mut self, lang: &str, data: &serde_yaml::Value) {
        let table = self.translations.entry(lang.to_string()).or_default();
        flatten_translations(data, "", table);
    }
}

/// Flatten translations into a HashMap with dot-notation keys
fn flatten_translations(
    value: &serde_yaml::Value,
    prefix: &str,
    result: &mut HashMap<String, String>,
) {
    let text = match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let Some(key) = k.as_str() else { continue };
                let full_key = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_translations(v, &full_key, result);
            }
            return;
        }
        _ => return,
    };

    if !prefix.is_empty() {
        result.insert(prefix.to_string(), text);
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::builtin(FALLBACK_LANGUAGE)
    }
}
