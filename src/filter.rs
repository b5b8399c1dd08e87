//! Code filtering policies.
//!
//! - [`CodeFilter`]: exact-match ignore set for semantic categories, with
//!   optional translation of numeric codes into category names.
//! - [`PrefixPolicy`]: select/ignore prefix matching used for style codes
//!   and plugin framework codes (`E1` ignores `E101`, `E111`, ...).

use crate::codes::category_for_code;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Set of categories whose diagnostics are suppressed.
pub struct CodeFilter {
    ignore: BTreeSet<String>,
}

impl CodeFilter {
    /// Build from raw identifiers.
    ///
    /// With `translate`, identifiers found in the numeric code table are
    /// replaced by their category name; unknown identifiers are kept as-is.
    pub fn new<I, S>(raw: I, translate: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        filter.extend(raw, translate);
        filter
    }

    /// Add more identifiers using the same rules as [`CodeFilter::new`].
    pub fn extend<I, S>(&mut self, raw: I, translate: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in raw {
            let id = id.as_ref().trim();
            if id.is_empty() {
                continue;
            }
            let entry = if translate {
                match category_for_code(id) {
                    Some(category) => category,
                    None => {
                        if id.starts_with('F') {
                            debug!(entry = id, "no category for code; entry matches nothing");
                        }
                        id
                    }
                }
            } else {
                id
            };
            self.ignore.insert(entry.to_string());
        }
    }

    pub fn should_ignore(&self, category: &str) -> bool {
        self.ignore.contains(category)
    }

    pub fn is_empty(&self) -> bool {
        self.ignore.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ignore.iter().map(String::as_str)
    }
}

/// Keep only the entries of a shared ignore list that belong to one code
/// family, identified by their first character. `None` keeps everything.
pub fn ignore_from_list<'a>(entries: &'a [String], family: Option<char>) -> Vec<&'a str> {
    entries
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .filter(|e| family.map_or(true, |f| e.starts_with(f)))
        .collect()
}

/// Style checker default ignore list, applied when nothing is configured.
pub const DEFAULT_STYLE_IGNORE: &[&str] =
    &["E121", "E123", "E126", "E226", "E24", "E704", "W503", "W504"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Select/ignore prefix policy.
pub struct PrefixPolicy {
    select: Vec<String>,
    ignore: Vec<String>,
}

impl PrefixPolicy {
    /// Resolve configured lists the way the style checker does:
    /// nothing configured means the default ignore list; a select list
    /// without an ignore list ignores everything not selected.
    pub fn new(select: &[String], ignore: &[String]) -> Self {
        let select: Vec<String> = clean(select);
        let ignore: Vec<String> = clean(ignore);
        let ignore = if select.is_empty() && ignore.is_empty() {
            DEFAULT_STYLE_IGNORE.iter().map(|s| s.to_string()).collect()
        } else if !select.is_empty() && ignore.is_empty() {
            vec![String::new()]
        } else {
            ignore
        };
        Self { select, ignore }
    }

    /// Policy that uses the lists exactly as given, without defaults.
    pub fn explicit(select: &[String], ignore: &[String]) -> Self {
        Self {
            select: clean(select),
            ignore: clean(ignore),
        }
    }

    pub fn ignores(&self, code: &str) -> bool {
        if code.len() < 4 && self.select.iter().any(|s| s.starts_with(code)) {
            return false;
        }
        self.ignore.iter().any(|i| code.starts_with(i.as_str()))
            && !self.select.iter().any(|s| code.starts_with(s.as_str()))
    }
}

fn clean(list: &[String]) -> Vec<String> {
    list.iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
