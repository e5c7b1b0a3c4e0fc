//! Localization support for diagnostic messages.
//!
//! Translations live in TOML files as nested tables; the [`Translator`]
//! flattens them into dotted keys (`lexer.unterminated_string.label`) and
//! resolves lookups with an English fallback. A missing resource file is
//! silent: every lookup just returns the empty string and callers render
//! their untranslated defaults.
//!
//! # Examples
//!
//! ```
//! use zelc_diag::i18n::{Locale, Translator};
//!
//! let translator = Translator::new();
//! translator.load_from_str(Locale::En, r#"
//! [lexer.unterminated_string]
//! label = "string starts here"
//! "#);
//! assert_eq!(translator.get("lexer.unterminated_string.label"), "string starts here");
//! ```

use std::path::Path;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// A supported locale
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English (the fallback)
    #[default]
    En,
    /// Simplified Chinese
    ZhCn,
    /// Traditional Chinese
    ZhTw,
    /// Japanese
    Ja,
}

impl Locale {
    /// Get the locale's identifier string
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
            Locale::ZhTw => "zh-TW",
            Locale::Ja => "ja",
        }
    }

    /// Parse a locale identifier, falling back to English
    ///
    /// Accepts both `-` and `_` separators and common long forms
    /// (`zh-Hans`, `ja_JP`, ...).
    pub fn parse(s: &str) -> Locale {
        if s == "zh-CN" || s == "zh_CN" || s.starts_with("zh_CN") || s.starts_with("zh-Hans") {
            return Locale::ZhCn;
        }
        if s == "zh-TW" || s == "zh_TW" || s.starts_with("zh_TW") || s.starts_with("zh-Hant") {
            return Locale::ZhTw;
        }
        if s == "ja" || s.starts_with("ja_") || s.starts_with("ja-") {
            return Locale::Ja;
        }
        Locale::En
    }
}

/// Flatten a TOML table into dotted keys.
fn flatten_table(table: &toml::Table, prefix: &str, out: &mut FxHashMap<String, String>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(s) => {
                out.insert(full_key, s.clone());
            },
            toml::Value::Table(inner) => {
                flatten_table(inner, &full_key, out);
            },
            _ => {},
        }
    }
}

/// Resolves dotted keys to localized strings.
///
/// Thread-safe: lookups, loads, and locale switches take internal locks.
/// Lookups check the current locale's table first, then the English table,
/// then return the empty string.
pub struct Translator {
    locale: RwLock<Locale>,
    tables: RwLock<FxHashMap<Locale, FxHashMap<String, String>>>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Create an empty translator (English locale, no tables)
    pub fn new() -> Self {
        Self {
            locale: RwLock::new(Locale::En),
            tables: RwLock::new(FxHashMap::default()),
        }
    }

    /// Set the current locale
    pub fn set_locale(&self, locale: Locale) {
        *self.locale.write() = locale;
    }

    /// Get the current locale
    pub fn current_locale(&self) -> Locale {
        *self.locale.read()
    }

    /// Load translations for a locale from a TOML file.
    ///
    /// Returns false if the file cannot be read. A file that fails to parse
    /// is ignored silently, matching the silent-resource contract.
    pub fn load_from_file(&self, locale: Locale, path: &Path) -> bool {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                self.load_from_str(locale, &content);
                true
            },
            Err(_) => false,
        }
    }

    /// Load translations for a locale from TOML text
    pub fn load_from_str(&self, locale: Locale, toml_text: &str) {
        let Ok(parsed) = toml_text.parse::<toml::Table>() else {
            return;
        };
        let mut flat = FxHashMap::default();
        flatten_table(&parsed, "", &mut flat);

        let mut tables = self.tables.write();
        tables.entry(locale).or_default().extend(flat);
    }

    /// Resolve a key to a localized string.
    ///
    /// Falls back to English, then to the empty string.
    pub fn get(&self, key: &str) -> String {
        let locale = *self.locale.read();
        let tables = self.tables.read();

        if let Some(value) = tables.get(&locale).and_then(|t| t.get(key)) {
            return value.clone();
        }
        if locale != Locale::En {
            if let Some(value) = tables.get(&Locale::En).and_then(|t| t.get(key)) {
                return value.clone();
            }
        }
        String::new()
    }

    /// Resolve a key, using `fallback` when no translation exists
    pub fn get_or(&self, key: &str, fallback: &str) -> String {
        let value = self.get(key);
        if value.is_empty() {
            fallback.to_string()
        } else {
            value
        }
    }

    /// Temporarily switch the locale; the returned guard restores the
    /// previous locale when dropped, however the scope is left.
    #[must_use]
    pub fn locale_scope(&self, locale: Locale) -> LocaleGuard<'_> {
        let previous = {
            let mut current = self.locale.write();
            let previous = *current;
            *current = locale;
            previous
        };
        LocaleGuard {
            translator: self,
            previous,
        }
    }
}

/// Restores the previous locale on drop
pub struct LocaleGuard<'a> {
    translator: &'a Translator,
    previous: Locale,
}

impl Drop for LocaleGuard<'_> {
    fn drop(&mut self) {
        self.translator.set_locale(self.previous);
    }
}
