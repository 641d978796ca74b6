use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tracker::{Theme, TrackerOption, DEFAULT_BAR_WIDTH, DEFAULT_PREFIX, DEFAULT_THROTTLE};

/// Bar glyphs (optional `[theme]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub filled: String,
    pub leading_edge: String,
    pub padding: String,
    pub left: String,
    pub right: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Theme::default().into()
    }
}

impl From<Theme> for ThemeConfig {
    fn from(t: Theme) -> Self {
        Self {
            filled: t.filled,
            leading_edge: t.leading_edge,
            padding: t.padding,
            left: t.left,
            right: t.right,
        }
    }
}

impl From<ThemeConfig> for Theme {
    fn from(t: ThemeConfig) -> Self {
        Self {
            filled: t.filled,
            leading_edge: t.leading_edge,
            padding: t.padding,
            left: t.left,
            right: t.right,
        }
    }
}

/// Bar defaults loaded from `~/.config/procbar/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcbarConfig {
    /// Blank the bar when done instead of leaving it with a newline.
    pub clean_after_finish: bool,
    /// Size the bar to the terminal on every draw.
    pub full_width: bool,
    /// Label left of the bar.
    pub prefix: String,
    /// Bar width in cells when `full_width` is off.
    pub bar_width: usize,
    /// Minimum milliseconds between redraws.
    pub throttle_ms: u64,
    /// Optional glyph override; built-in theme when missing.
    pub theme: Option<ThemeConfig>,
}

impl Default for ProcbarConfig {
    fn default() -> Self {
        Self {
            clean_after_finish: true,
            full_width: true,
            prefix: DEFAULT_PREFIX.to_string(),
            bar_width: DEFAULT_BAR_WIDTH,
            throttle_ms: DEFAULT_THROTTLE.as_millis() as u64,
            theme: None,
        }
    }
}

impl ProcbarConfig {
    /// Tracker options equivalent to this file, in a fixed order. Options
    /// appended after these override them.
    pub fn options(&self) -> Vec<TrackerOption> {
        let mut opts = vec![
            TrackerOption::CleanAfterFinish(self.clean_after_finish),
            TrackerOption::FullWidth(self.full_width),
            TrackerOption::Prefix(self.prefix.clone()),
            TrackerOption::Width(self.bar_width),
            TrackerOption::Throttle(Duration::from_millis(self.throttle_ms)),
        ];
        if let Some(theme) = &self.theme {
            opts.push(TrackerOption::Theme(theme.clone().into()));
        }
        opts
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("procbar")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProcbarConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ProcbarConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<ProcbarConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ProcbarConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::ProgressTracker;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = ProcbarConfig::default();
        assert!(cfg.clean_after_finish);
        assert!(cfg.full_width);
        assert_eq!(cfg.prefix, "Loading");
        assert_eq!(cfg.bar_width, 80);
        assert_eq!(cfg.throttle_ms, 50);
        assert!(cfg.theme.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ProcbarConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ProcbarConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.prefix, cfg.prefix);
        assert_eq!(parsed.bar_width, cfg.bar_width);
        assert_eq!(parsed.throttle_ms, cfg.throttle_ms);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            prefix = "Syncing"
            full_width = false
        "#;
        let cfg: ProcbarConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.prefix, "Syncing");
        assert!(!cfg.full_width);
        assert!(cfg.clean_after_finish);
        assert_eq!(cfg.bar_width, 80);
    }

    #[test]
    fn config_toml_theme_section() {
        let toml = r##"
            bar_width = 40

            [theme]
            filled = "="
            leading_edge = "#"
        "##;
        let cfg: ProcbarConfig = toml::from_str(toml).unwrap();
        let theme = cfg.theme.as_ref().unwrap();
        assert_eq!(theme.filled, "=");
        assert_eq!(theme.leading_edge, "#");
        assert_eq!(theme.left, "[");
        assert_eq!(cfg.bar_width, 40);
    }

    #[test]
    fn options_feed_tracker() {
        let cfg = ProcbarConfig {
            clean_after_finish: false,
            full_width: false,
            prefix: "Upload".into(),
            bar_width: 30,
            throttle_ms: 0,
            theme: Some(ThemeConfig {
                filled: "=".into(),
                ..ThemeConfig::default()
            }),
        };
        let mut opts = cfg.options();
        opts.push(TrackerOption::Prefix("Override".into()));
        let t = ProgressTracker::with_options(10, opts);
        let c = t.config();
        assert!(!c.clean_on_finish);
        assert!(!c.full_width);
        assert_eq!(c.bar_width, 30);
        assert_eq!(c.throttle, Duration::ZERO);
        assert_eq!(c.theme.filled, "=");
        assert_eq!(c.prefix, "Override");
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"prefix = \"Disk\"\nthrottle_ms = 10\n").unwrap();
        f.flush().unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.prefix, "Disk");
        assert_eq!(cfg.throttle_ms, 10);
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"bar_width = \"wide\"\n").unwrap();
        f.flush().unwrap();
        let err = load_from(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parse config"));
    }
}
