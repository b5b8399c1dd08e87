//! Shared Python lint configuration files (`setup.cfg`, `tox.ini`,
//! `.flake8`) read through `configparser`.
//!
//! Multi-line values keep their continuation lines joined by newlines.
//! Keys are lower-cased and `_` is normalized to `-`, so `max_line_length`
//! and `max-line-length` name the same option.

use crate::error::LintError;
use configparser::ini::Ini;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched (in order) when no lint config path is given.
pub const CANDIDATES: &[&str] = &["setup.cfg", "tox.ini", ".flake8"];

#[derive(Debug, Clone, Default)]
/// Parsed INI document.
pub struct IniFile {
    path: PathBuf,
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniFile {
    /// Read and parse `path`.
    pub fn load(path: &Path) -> Result<Self, LintError> {
        let text = fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// First existing candidate file under `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, LintError> {
        let mut defaults = Ini::new().defaults();
        defaults.multiline = true;
        let mut parser = Ini::new_from_defaults(defaults);
        let raw = parser
            .read(text.to_string())
            .map_err(|message| parse_error(path, message))?;

        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (name, entries) in raw {
            let section = sections.entry(name.clone()).or_default();
            for (key, value) in entries {
                let key = normalize_key(&key);
                if section.contains_key(&key) {
                    return Err(parse_error(
                        path,
                        format!("option `{}` in section [{}] is set twice", key, name),
                    ));
                }
                section.insert(key, value.unwrap_or_default());
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            sections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(&normalize_key(key))
            .map(String::as_str)
    }

    /// Comma and/or whitespace separated list value; empty when missing.
    pub fn get_list(&self, section: &str, key: &str) -> Vec<String> {
        self.get(section, key)
            .map(split_list)
            .unwrap_or_default()
    }

    /// First section among `sections` that defines `key`.
    pub fn get_first<'a>(&'a self, sections: &[&str], key: &str) -> Option<&'a str> {
        sections.iter().find_map(|s| self.get(s, key))
    }
}

/// Split a list value on commas and whitespace, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn parse_error(path: &Path, message: String) -> LintError {
    LintError::ConfigParse {
        path: path.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_sections_and_continuations() {
        let text = r#"
# project settings
[metadata]
name = demo

[flake8]
max_line_length: 100
ignore =
    F401,
    E501
exclude = build,.venv
"#;
        let ini = IniFile::parse(Path::new("setup.cfg"), text).unwrap();
        assert_eq!(ini.get("metadata", "name"), Some("demo"));
        assert_eq!(ini.get("flake8", "max-line-length"), Some("100"));
        assert_eq!(ini.get("flake8", "max_line_length"), Some("100"));
        assert_eq!(ini.get_list("flake8", "ignore"), vec!["F401", "E501"]);
        assert_eq!(ini.get_list("flake8", "exclude"), vec!["build", ".venv"]);
        assert!(ini.get_list("flake8", "select").is_empty());
    }

    #[test]
    fn test_get_first_falls_back_between_sections() {
        let text = "[pycodestyle]\nignore = E226\n[flake8]\nignore = F401\nselect = E,W\n";
        let ini = IniFile::parse(Path::new("tox.ini"), text).unwrap();
        assert_eq!(ini.get_first(&["pycodestyle", "flake8"], "ignore"), Some("E226"));
        assert_eq!(ini.get_first(&["pycodestyle", "flake8"], "select"), Some("E,W"));
        assert_eq!(ini.get_first(&["pycodestyle"], "select"), None);
    }

    #[test]
    fn test_spellings_of_one_option_conflict() {
        let text = "[flake8]\nmax_line_length = 100\nmax-line-length = 120\n";
        let err = IniFile::parse(Path::new(".flake8"), text).unwrap_err();
        assert!(matches!(err, LintError::ConfigParse { .. }));
        assert!(err.to_string().contains("max-line-length"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = IniFile::load(&dir.path().join("setup.cfg")).unwrap_err();
        assert!(matches!(err, LintError::Io { .. }));
    }

    #[test]
    fn test_discover_prefers_setup_cfg() {
        let dir = tempdir().unwrap();
        assert!(IniFile::discover(dir.path()).is_none());
        fs::write(dir.path().join(".flake8"), "[flake8]\n").unwrap();
        fs::write(dir.path().join("setup.cfg"), "[flake8]\n").unwrap();
        let found = IniFile::discover(dir.path()).unwrap();
        assert!(found.ends_with("setup.cfg"));
    }
}
