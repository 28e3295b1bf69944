//! Raw configuration access.
//!
//! The [`RawConfig`] object snapshots the environment and lazily loads every
//! configuration file that applies to the current working directory. Values are
//! fetched by dotted key with [`RawConfig::get`], which uses `serde` to translate
//! config values to a target type.
//!
//! Files are discovered by walking from the working directory up to the root,
//! collecting each `tessera.toml`, and finally `config.toml` in the Tessera home
//! directory. Files closer to the working directory take priority. Environment
//! variables (see [`ConfigKey`]) override every file.
//
// ## LICENSING
//
// Based on Cargo's [`config` module](https://github.com/rust-lang/cargo/tree/master/src/cargo/util/config)
// with substantial modifications.

use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use lazycell::LazyCell;
use serde::de::DeserializeOwned;

use crate::home;
use crate::paths;

pub(crate) use key::ConfigKey;

mod key;

/// The name of per-project configuration files.
pub(crate) const PROJECT_FILE: &str = "tessera.toml";

/// Configuration information for Tessera.
#[derive(Debug)]
pub(crate) struct RawConfig {
    /// The location of the user's Tessera home directory.
    home_path: PathBuf,
    /// Merged configuration values from all discovered files.
    values: LazyCell<toml::Table>,
    /// The directory from which file discovery starts.
    cwd: PathBuf,
    /// Directory where config file searching should stop (inclusive).
    search_stop_path: Option<PathBuf>,
    /// Environment variable snapshot.
    env: HashMap<String, String>,
}

impl RawConfig {
    /// Creates a new [`RawConfig`] instance with an empty environment.
    ///
    /// This does only minimal initialization. Config files are loaded lazily.
    pub(crate) fn new(cwd: PathBuf, homedir: PathBuf) -> RawConfig {
        RawConfig {
            home_path: homedir,
            cwd,
            search_stop_path: None,
            values: LazyCell::new(),
            env: HashMap::new(),
        }
    }

    /// Creates a new [`RawConfig`] instance from the process environment.
    #[allow(clippy::should_implement_trait)]
    pub(crate) fn default() -> Result<RawConfig> {
        let cwd = env::current_dir()
            .with_context(|| "couldn't get the current directory of the process")?;
        let env: HashMap<String, String> = env::vars().collect();
        let homedir = home::tessera_home_with_env(&env, &cwd).ok_or_else(|| {
            anyhow!(
                "Tessera couldn't find your home directory. \
                 This probably means that $HOME was not set."
            )
        })?;
        let mut cfg = RawConfig::new(cwd, homedir);
        cfg.set_env(env);
        Ok(cfg)
    }

    /// Replaces the environment snapshot.
    pub(crate) fn set_env(&mut self, env: HashMap<String, String>) {
        self.env = env;
    }

    /// Sets the path where ancestor config file searching will stop. The
    /// given path is included, but its ancestors are not.
    #[cfg(test)]
    pub(crate) fn set_search_stop_path<P: Into<PathBuf>>(&mut self, path: P) {
        let path = path.into();
        debug_assert!(self.cwd.starts_with(&path));
        self.search_stop_path = Some(path);
    }

    /// Gets all config values from disk, loading them on first use.
    fn values(&self) -> Result<&toml::Table> {
        self.values.try_borrow_with(|| self.load_values())
    }

    /// Loads and merges every applicable configuration file.
    fn load_values(&self) -> Result<toml::Table> {
        let mut cfg = toml::Table::new();
        self.walk_tree(&self.cwd, &self.home_path, |path| {
            let value = load_file(path)?;
            merge(&mut cfg, value, false).with_context(|| {
                format!("failed to merge configuration at `{}`", path.display())
            })?;
            Ok(())
        })
        .with_context(|| "could not load Tessera configuration")?;
        Ok(cfg)
    }

    fn walk_tree<F>(&self, pwd: &Path, home: &Path, mut walk: F) -> Result<()>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let mut stash: HashSet<PathBuf> = HashSet::new();

        for current in paths::ancestors(pwd, self.search_stop_path.as_deref()) {
            let path = current.join(PROJECT_FILE);
            if path.exists() {
                tracing::debug!("loading configuration file {:?}", path);
                walk(&path)?;
                stash.insert(path);
            }
        }

        // The home directory is always consulted last, even if it is not an ancestor.
        let path = home.join("config.toml");
        if path.exists() && !stash.contains(&path) {
            tracing::debug!("loading home configuration file {:?}", path);
            walk(&path)?;
        }

        Ok(())
    }

    /// Looks up the environment override for `key`, if any.
    fn get_env_value(&self, key: &ConfigKey) -> Option<toml::Value> {
        let raw = self.env.get(key.as_env_key())?;
        Some(parse_env_value(raw))
    }

    /// Looks up `key` in the merged configuration files.
    fn get_file_value(&self, key: &ConfigKey) -> Result<Option<toml::Value>> {
        let mut table = self.values()?;
        let mut parts = key.parts().peekable();
        while let Some(part) = parts.next() {
            let value = match table.get(part) {
                Some(value) => value,
                None => return Ok(None),
            };
            if parts.peek().is_none() {
                return Ok(Some(value.clone()));
            }
            table = match value {
                toml::Value::Table(t) => t,
                other => {
                    return Err(anyhow!(
                        "expected a table at `{}`, but found {}",
                        part,
                        other.type_str()
                    ))
                }
            };
        }
        Ok(None)
    }

    /// Retrieves a config variable.
    ///
    /// Environment variables take priority over files. Returns `Ok(None)` if the
    /// key is defined nowhere.
    ///
    /// ```rust,ignore
    /// let v: Option<u32> = config.get("canvas.width")?;
    /// ```
    pub(crate) fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let key = ConfigKey::from_str(key);
        let (value, source) = match self.get_env_value(&key) {
            Some(value) => (value, format!("environment variable `{}`", key.as_env_key())),
            None => match self.get_file_value(&key)? {
                Some(value) => (value, "configuration files".to_string()),
                None => return Ok(None),
            },
        };
        value
            .try_into()
            .map(Some)
            .with_context(|| format!("invalid configuration for key `{}` in {}", key, source))
    }
}

/// Reads and parses a single TOML file.
fn load_file(path: &Path) -> Result<toml::Table> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file `{}`", path.display()))?;
    crate::parse::parse_document(&contents, path)
}

/// Interprets an environment variable as a TOML value, falling back to a string.
fn parse_env_value(raw: &str) -> toml::Value {
    format!("value = {}", raw)
        .parse::<toml::Table>()
        .ok()
        .and_then(|mut t| t.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}

/// Merges `from` into `into`.
///
/// If `force` is true, primitive (non-table) values override existing values.
/// If false, the original is kept and the new value ignored.
///
/// Tables are merged recursively. Tables and non-tables cannot be mixed.
fn merge(into: &mut toml::Table, from: toml::Table, force: bool) -> Result<()> {
    for (key, value) in from {
        match into.get_mut(&key) {
            Some(old) => match (old, value) {
                (toml::Value::Table(old), toml::Value::Table(new)) => {
                    merge(old, new, force)
                        .with_context(|| format!("failed to merge key `{}`", key))?;
                }
                (old, new) if old.is_table() || new.is_table() => {
                    return Err(anyhow!(
                        "failed to merge key `{}`: expected {}, but found {}",
                        key,
                        old.type_str(),
                        new.type_str()
                    ));
                }
                (old, new) => {
                    if force {
                        *old = new;
                    }
                }
            },
            None => {
                into.insert(key, value);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_are_typed_when_possible() {
        assert_eq!(parse_env_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_env_value("1.5"), toml::Value::Float(1.5));
        assert_eq!(parse_env_value("false"), toml::Value::Boolean(false));
        assert_eq!(
            parse_env_value("#ff0000ff"),
            toml::Value::String("#ff0000ff".to_string())
        );
        assert_eq!(
            parse_env_value("\"quoted\""),
            toml::Value::String("quoted".to_string())
        );
    }

    #[test]
    fn merge_prefers_existing_values_unless_forced() {
        let mut base: toml::Table = "[canvas]\nwidth = 10\n".parse().unwrap();
        let other: toml::Table = "[canvas]\nwidth = 20\nheight = 30\n".parse().unwrap();
        merge(&mut base, other.clone(), false).unwrap();
        assert_eq!(base["canvas"]["width"].as_integer(), Some(10));
        assert_eq!(base["canvas"]["height"].as_integer(), Some(30));

        merge(&mut base, other, true).unwrap();
        assert_eq!(base["canvas"]["width"].as_integer(), Some(20));
    }

    #[test]
    fn merge_rejects_mixed_table_kinds() {
        let mut base: toml::Table = "canvas = 1\n".parse().unwrap();
        let other: toml::Table = "[canvas]\nwidth = 20\n".parse().unwrap();
        assert!(merge(&mut base, other, false).is_err());
    }
}
