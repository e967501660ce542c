//! Persistent default flags.
//!
//! Defaults live in a global file and an optional `.markdraftrc` in the
//! working directory, both holding command-line flags one or more per line.
//! Explicit command-line flags win over the local file, which wins over the
//! global one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "markdraft";
const LOCAL_FILE: &str = ".markdraftrc";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    /// Typography theme id
    pub typography: Option<String>,
    /// Code theme id
    pub code_theme: Option<String>,
    pub watch: bool,
    pub perf: bool,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches are OR-ed, options from `other` win.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            typography: other.typography.clone().or_else(|| self.typography.clone()),
            code_theme: other.code_theme.clone().or_else(|| self.code_theme.clone()),
            watch: self.watch || other.watch,
            perf: self.perf || other.perf,
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec!["# markdraft defaults (saved with --save)".to_string()];
        if let Some(id) = &self.typography {
            lines.push(format!("--typography {id}"));
        }
        if let Some(id) = &self.code_theme {
            lines.push(format!("--code-theme {id}"));
        }
        if self.watch {
            lines.push("--watch".to_string());
        }
        if self.perf {
            lines.push("--perf".to_string());
        }
        if let Some(path) = &self.render_debug_log {
            lines.push(format!("--render-debug-log {}", path.display()));
        }
        lines
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join(APP_DIR)
                .join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read flags from a config file; a missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Load global then local defaults, local winning.
///
/// # Errors
/// Returns an error if either file exists but cannot be read.
pub fn load_layered(global: &Path, local: &Path) -> Result<ConfigFlags> {
    let global = load_config_flags(global)?;
    let local = load_config_flags(local)?;
    Ok(global.union(&local))
}

/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", flags.to_lines().join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        match name {
            "--watch" => flags.watch = true,
            "--perf" => flags.perf = true,
            "--typography" | "--code-theme" | "--render-debug-log" => {
                let value = match inline {
                    Some(value) => Some(value.to_string()),
                    None => {
                        let next = tokens.get(i + 1).cloned();
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    }
                };
                match name {
                    "--typography" => flags.typography = value,
                    "--code-theme" => flags.code_theme = value,
                    _ => flags.render_debug_log = value.map(PathBuf::from),
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}
