/// Message lookup and pluralisation
///
/// This module handles:
/// - The `Locale` seam every user-facing string passes through
/// - The built-in English messages (the canonical msgids themselves)
/// - TOML message catalogs for other languages
///
/// Messages are templates with `{}` placeholders, filled positionally by
/// [`fill`].
use log::debug;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

pub trait Locale {
    /// Translated text for `msgid`
    fn tr<'a>(&'a self, msgid: &'a str) -> Cow<'a, str>;

    /// Singular or plural form for `n`
    fn ntr<'a>(&'a self, singular: &'a str, plural: &'a str, n: i64) -> Cow<'a, str>;
}

/// Canonical English messages
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Locale for English {
    fn tr<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(msgid)
    }

    fn ntr<'a>(&'a self, singular: &'a str, plural: &'a str, n: i64) -> Cow<'a, str> {
        Cow::Borrowed(if n == 1 { singular } else { plural })
    }
}

/// Message catalog loaded from TOML
///
/// ```toml
/// [messages]
/// "Pip counts:" = "Pipcount:"
///
/// [plurals]
/// "{} point" = ["{} Punkt", "{} Punkte"]
/// ```
///
/// Plural entries are keyed by the singular msgid. Missing entries fall back
/// to English.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    messages: HashMap<String, String>,
    #[serde(default)]
    plurals: HashMap<String, [String; 2]>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read message catalog {}: {}", path.display(), e))?;
        let catalog: Catalog = toml::from_str(&text)
            .map_err(|e| format!("Failed to parse message catalog {}: {}", path.display(), e))?;
        debug!(
            "Loaded {} messages and {} plural forms from {:?}",
            catalog.messages.len(),
            catalog.plurals.len(),
            path
        );
        Ok(catalog)
    }
}

impl Locale for Catalog {
    fn tr<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        match self.messages.get(msgid) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => English.tr(msgid),
        }
    }

    fn ntr<'a>(&'a self, singular: &'a str, plural: &'a str, n: i64) -> Cow<'a, str> {
        match self.plurals.get(singular) {
            Some([one, other]) => Cow::Borrowed(if n == 1 { one.as_str() } else { other.as_str() }),
            None => English.ntr(singular, plural, n),
        }
    }
}

/// Replace each `{}` in `template` with the next argument
///
/// Surplus placeholders are left as they are; surplus arguments are ignored.
pub fn fill(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
