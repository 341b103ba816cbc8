//! Persisted display-mode preference. Single writer, read at startup,
//! written on toggle; a missing or unreadable file falls back to defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub theme: Theme,
}

impl Prefs {
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `$TUBEGRAB_PREFS` override, else `~/.config/tubegrab/prefs.json`,
    /// else a dotfile next to the working directory.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TUBEGRAB_PREFS") {
            return PathBuf::from(path);
        }
        if let Ok(home) = std::env::var("HOME") {
            return Path::new(&home)
                .join(".config")
                .join("tubegrab")
                .join("prefs.json");
        }
        PathBuf::from(".tubegrab-prefs.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Prefs::load(&dir.path().join("nope.json"));
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn corrupt_file_falls_back_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Prefs::load(&path).theme, Theme::Light);
    }

    #[test]
    fn toggle_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("prefs.json");

        let mut prefs = Prefs::load(&path);
        prefs.theme = prefs.theme.toggled();
        assert_eq!(prefs.theme, Theme::Dark);
        prefs.save(&path).unwrap();

        assert_eq!(Prefs::load(&path).theme, Theme::Dark);
        assert_eq!(Prefs::load(&path).theme.toggled(), Theme::Light);
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), r#""dark""#);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
