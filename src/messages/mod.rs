//! Localized message lookup.
//!
//! Messages live in `.properties` bundles, one per locale. A lookup walks
//! from the most specific bundle (`messages_en_US`) to the root bundle
//! (`messages`) and formats the first template it finds with positional
//! `{0}`, `{1}`, ... arguments.

mod locale;

pub use locale::Locale;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

const DEFAULT_BUNDLE: &str = include_str!("../../resources/messages.properties");
const BUNDLE_BASENAME: &str = "messages";

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("No message found under code '{key}' for locale '{locale}'")]
    NoSuchMessage { key: String, locale: String },

    #[error("Failed to read message bundle {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves message keys to formatted, localized text.
pub trait MessageSource: Send + Sync {
    fn get_message(
        &self,
        key: &str,
        args: &[String],
        locale: &Locale,
    ) -> Result<String, MessageError>;
}

/// Message source backed by in-memory `.properties` bundles.
#[derive(Debug, Clone, Default)]
pub struct BundleMessageSource {
    // locale tag ("" for root) -> key -> template
    bundles: HashMap<String, HashMap<String, String>>,
}

impl BundleMessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source preloaded with the bundle shipped in `resources/`.
    pub fn with_defaults() -> Self {
        let mut source = Self::new();
        source.add_bundle(&Locale::ROOT, DEFAULT_BUNDLE);
        source
    }

    /// Merge `.properties` text into the bundle for `locale`.
    /// Keys already present are overwritten.
    pub fn add_bundle(&mut self, locale: &Locale, text: &str) {
        self.bundles
            .entry(locale.tag())
            .or_default()
            .extend(parse_properties(text));
    }

    /// Layer every `messages*.properties` file found in `dir` over the
    /// current bundles. Returns how many files were loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, MessageError> {
        let entries = std::fs::read_dir(dir).map_err(|source| MessageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry
                .map_err(|source| MessageError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();

            let Some(locale) = bundle_locale(&path) else {
                continue;
            };

            let text = std::fs::read_to_string(&path).map_err(|source| MessageError::Io {
                path: path.clone(),
                source,
            })?;

            tracing::debug!("Loaded message bundle {:?} for locale '{}'", path, locale.tag());
            self.add_bundle(&locale, &text);
            loaded += 1;
        }

        Ok(loaded)
    }

    fn find_template(&self, key: &str, locale: &Locale) -> Option<&str> {
        locale
            .fallback_chain()
            .iter()
            .filter_map(|tag| self.bundles.get(tag))
            .find_map(|bundle| bundle.get(key))
            .map(String::as_str)
    }
}

impl MessageSource for BundleMessageSource {
    fn get_message(
        &self,
        key: &str,
        args: &[String],
        locale: &Locale,
    ) -> Result<String, MessageError> {
        self.find_template(key, locale)
            .map(|template| format_message(template, args))
            .ok_or_else(|| MessageError::NoSuchMessage {
                key: key.to_string(),
                locale: locale.tag(),
            })
    }
}

/// `messages.properties` -> root, `messages_en_US.properties` -> en_US.
fn bundle_locale(path: &Path) -> Option<Locale> {
    if path.extension()? != "properties" {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem == BUNDLE_BASENAME {
        return Some(Locale::ROOT);
    }

    stem.strip_prefix(BUNDLE_BASENAME)?
        .strip_prefix('_')
        .map(Locale::from_tag)
}

/// Parse `key = value` lines. `#` and `!` start comments; the first `=` or
/// `:` separates key from value.
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let split = line.find(['=', ':'])?;
            let (key, value) = line.split_at(split);
            Some((key.trim().to_string(), value[1..].trim().to_string()))
        })
        .collect()
}

/// Substitute `{n}` placeholders with `args[n]`.
///
/// Placeholders without a matching argument are kept verbatim and `''`
/// renders a single quote.
pub fn format_message(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '\'']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix("''") {
            out.push('\'');
            rest = after;
            continue;
        }

        if rest.starts_with('\'') {
            out.push('\'');
            rest = &rest[1..];
            continue;
        }

        let substituted = rest[1..].find('}').and_then(|close| {
            let index: usize = rest[1..=close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close + 2))
        });

        match substituted {
            Some((arg, consumed)) => {
                out.push_str(arg);
                rest = &rest[consumed..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
