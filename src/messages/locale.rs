use std::borrow::Cow;
use std::fmt;

/// Language plus optional country, e.g. `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: Cow<'static, str>,
    country: Cow<'static, str>,
}

impl Locale {
    pub const US: Locale = Locale {
        language: Cow::Borrowed("en"),
        country: Cow::Borrowed("US"),
    };

    pub const ROOT: Locale = Locale {
        language: Cow::Borrowed(""),
        country: Cow::Borrowed(""),
    };

    pub fn new(language: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            language: Cow::Owned(language.into().to_lowercase()),
            country: Cow::Owned(country.into().to_uppercase()),
        }
    }

    /// Accepts `en`, `en_US` and `en-US`.
    pub fn from_tag(tag: &str) -> Self {
        let mut parts = tag.splitn(2, ['_', '-']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();
        Self::new(language, country)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Bundle tag: `en_US`, `en`, or empty for the root locale.
    pub fn tag(&self) -> String {
        match (self.language.is_empty(), self.country.is_empty()) {
            (true, _) => String::new(),
            (false, true) => self.language.to_string(),
            (false, false) => format!("{}_{}", self.language, self.country),
        }
    }

    /// Bundle tags to try, most specific first, always ending with root.
    pub fn fallback_chain(&self) -> Vec<String> {
        let mut chain = Vec::with_capacity(3);
        if !self.language.is_empty() {
            if !self.country.is_empty() {
                chain.push(self.tag());
            }
            chain.push(self.language.to_string());
        }
        chain.push(String::new());
        chain
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags() {
        assert_eq!(Locale::from_tag("en_US"), Locale::US);
        assert_eq!(Locale::from_tag("EN-us"), Locale::US);

        let fr = Locale::from_tag("fr");
        assert_eq!(fr.language(), "fr");
        assert_eq!(fr.country(), "");
        assert_eq!(fr.tag(), "fr");
    }

    #[test]
    fn fallback_chain_ends_at_root() {
        assert_eq!(Locale::US.fallback_chain(), vec!["en_US", "en", ""]);
        assert_eq!(Locale::from_tag("de").fallback_chain(), vec!["de", ""]);
        assert_eq!(Locale::ROOT.fallback_chain(), vec![""]);
    }

    #[test]
    fn displays_as_tag() {
        assert_eq!(Locale::US.to_string(), "en_US");
    }
}
