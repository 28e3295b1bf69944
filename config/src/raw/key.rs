//! Key type for querying configuration values.
//
// ## LICENSING
//
// Based on Cargo's [`config` module](https://github.com/rust-lang/cargo/tree/master/src/cargo/util/config)
// with substantial modifications.

use std::fmt;

/// The prefix shared by every configuration environment variable.
pub(crate) const ENV_PREFIX: &str = "TESSERA";

/// Key for a configuration variable.
///
/// Tracks both the dotted TOML name of a value and the environment variable that
/// overrides it. Pushing `canvas` and then `width` yields the TOML key `canvas.width`
/// and the environment variable `TESSERA_CANVAS_WIDTH`.
#[derive(Debug, Clone)]
pub(crate) struct ConfigKey {
    // The environment variable this key maps to. Updated on every `push`.
    env: String,
    // Each pushed sub-key, paired with the length of `env` before the push so that
    // `pop` can truncate `env` back to its previous state.
    parts: Vec<(String, usize)>,
}

impl ConfigKey {
    /// Creates a new blank configuration key.
    #[allow(clippy::new_without_default)]
    pub(crate) fn new() -> ConfigKey {
        ConfigKey {
            env: ENV_PREFIX.to_string(),
            parts: Vec::new(),
        }
    }

    /// Creates a [`ConfigKey`] from a period-separated TOML key.
    #[allow(clippy::should_implement_trait)]
    pub(crate) fn from_str(key: &str) -> ConfigKey {
        let mut cfg = ConfigKey::new();
        for part in key.split('.') {
            cfg.push(part);
        }
        cfg
    }

    /// Pushes a new sub-key, equivalent to accessing a sub-table in TOML.
    ///
    /// The environment variable is appended with `name` uppercased and with dashes
    /// converted to underscores.
    pub(crate) fn push(&mut self, name: &str) {
        let env = name.replace('-', "_").to_uppercase();
        self.parts.push((name.to_string(), self.env.len()));
        self.env.push('_');
        self.env.push_str(&env);
    }

    /// Rewinds this key to its state before the last `push`.
    #[cfg(test)]
    pub(crate) fn pop(&mut self) {
        if let Some((_part, env)) = self.parts.pop() {
            self.env.truncate(env);
        }
    }

    /// Returns the environment variable that overrides this key.
    pub(crate) fn as_env_key(&self) -> &str {
        &self.env
    }

    /// Returns an iterator of the key parts as strings.
    pub(crate) fn parts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.0.as_ref())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = self.parts().collect();
        parts.join(".").fmt(f)
    }
}
