// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! POSIX locale names, as used to pick localized desktop entry keys.

use std::fmt;

/// A parsed `lang_COUNTRY.ENCODING@MODIFIER` locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    lang: String,
    country: Option<String>,
    encoding: Option<String>,
    modifier: Option<String>,
}

impl Locale {
    /// Parses a locale name. Returns `None` for `C`, `POSIX` and malformed names.
    ///
    /// Both `lang_COUNTRY.ENC@mod` and `lang_COUNTRY@mod.ENC` orders are accepted.
    pub fn parse(name: &str) -> Option<Self> {
        let (main, modifier) = match name.split_once('@') {
            Some((main, rest)) => (main, Some(rest)),
            None => (name, None),
        };

        let (main, mut encoding) = match main.split_once('.') {
            Some((main, enc)) => (main, Some(enc)),
            None => (main, None),
        };

        let modifier = modifier.map(|m| match m.split_once('.') {
            Some((m, enc)) => {
                encoding = encoding.or(Some(enc));
                m
            }
            None => m,
        });

        let (lang, country) = match main.split_once('_') {
            Some((lang, country)) => (lang, Some(country)),
            None => (main, None),
        };

        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }

        let non_empty = |s: Option<&str>| s.filter(|s| !s.is_empty()).map(str::to_string);
        Some(Self {
            lang: lang.to_string(),
            country: non_empty(country),
            encoding: non_empty(encoding),
            modifier: non_empty(modifier),
        })
    }

    /// Locale of the current process, from `LC_ALL`, `LC_MESSAGES` or `LANG`.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    /// Suffixes to try for a localized key, most specific first:
    /// `lang_COUNTRY@MODIFIER`, `lang_COUNTRY`, `lang@MODIFIER`, `lang`.
    pub fn key_suffixes(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(4);
        if let (Some(country), Some(modifier)) = (&self.country, &self.modifier) {
            out.push(format!("{}_{country}@{modifier}", self.lang));
        }
        if let Some(country) = &self.country {
            out.push(format!("{}_{country}", self.lang));
        }
        if let Some(modifier) = &self.modifier {
            out.push(format!("{}@{modifier}", self.lang));
        }
        out.push(self.lang.clone());
        out
    }
}

impl Default for Locale {
    /// `en_GB.UTF-8`.
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            country: Some("GB".to_string()),
            encoding: Some("UTF-8".to_string()),
            modifier: None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lang)?;
        if let Some(country) = &self.country {
            write!(f, "_{country}")?;
        }
        if let Some(encoding) = &self.encoding {
            write!(f, ".{encoding}")?;
        }
        if let Some(modifier) = &self.modifier {
            write!(f, "@{modifier}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_locale() {
        let locale = Locale::parse("de_DE.UTF-8@euro").unwrap();
        assert_eq!(locale.lang(), "de");
        assert_eq!(locale.country(), Some("DE"));
        assert_eq!(locale.encoding(), Some("UTF-8"));
        assert_eq!(locale.modifier(), Some("euro"));
    }

    #[test]
    fn accepts_modifier_before_encoding() {
        let locale = Locale::parse("sr_RS@latin.UTF-8").unwrap();
        assert_eq!(locale.modifier(), Some("latin"));
        assert_eq!(locale.encoding(), Some("UTF-8"));
    }

    #[test]
    fn parses_bare_language() {
        let locale = Locale::parse("fr").unwrap();
        assert_eq!(locale.lang(), "fr");
        assert_eq!(locale.country(), None);
        assert_eq!(locale.key_suffixes(), ["fr"]);
    }

    #[test]
    fn rejects_c_locale() {
        assert_eq!(Locale::parse("C"), None);
        assert_eq!(Locale::parse("POSIX"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn key_suffixes_most_specific_first() {
        let locale = Locale::parse("sr_RS.UTF-8@latin").unwrap();
        assert_eq!(
            locale.key_suffixes(),
            ["sr_RS@latin", "sr_RS", "sr@latin", "sr"]
        );
    }

    #[test]
    fn default_is_en_gb() {
        assert_eq!(Locale::default().to_string(), "en_GB.UTF-8");
    }
}
