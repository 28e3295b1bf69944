//! Locating the Tessera home directory.
//!
//! The home directory holds the user-wide `config.toml`. It is `$TESSERA_HOME`
//! when set, and `.tessera` inside the user's home directory otherwise.
//
// ## LICENSING
//
// Based on Cargo's [`home` crate](https://github.com/rust-lang/cargo/tree/master/crates/home)
// with substantial modifications.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The environment variable that overrides the Tessera home directory.
pub(crate) const HOME_VAR: &str = "TESSERA_HOME";

/// Returns the current user's home directory as recorded in `env`.
///
/// Uses `HOME` on Unix and `USERPROFILE` on Windows. Empty values are ignored.
pub(crate) fn home_dir_with_env(env: &HashMap<String, String>) -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    env.get(var).filter(|h| !h.is_empty()).map(PathBuf::from)
}

/// Returns the Tessera home directory given an environment snapshot and working directory.
///
/// Preference order:
///
/// - `$TESSERA_HOME`, if it is an absolute path.
/// - `cwd` joined with `$TESSERA_HOME`, if it is relative.
/// - `.tessera` in the user's home directory.
pub(crate) fn tessera_home_with_env(env: &HashMap<String, String>, cwd: &Path) -> Option<PathBuf> {
    match env.get(HOME_VAR).filter(|h| !h.is_empty()) {
        Some(home) => {
            let home = PathBuf::from(home);
            if home.is_absolute() {
                Some(home)
            } else {
                Some(cwd.join(&home))
            }
        }
        None => home_dir_with_env(env).map(|p| p.join(".tessera")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    #[cfg(unix)]
    fn home_falls_back_to_dot_tessera() {
        let cwd = Path::new("/work");
        assert_eq!(
            tessera_home_with_env(&env(&[("HOME", "/home/user")]), cwd),
            Some(PathBuf::from("/home/user/.tessera"))
        );
        assert_eq!(
            tessera_home_with_env(&env(&[("HOME", "/home/user"), (HOME_VAR, "/opt/t")]), cwd),
            Some(PathBuf::from("/opt/t"))
        );
        assert_eq!(
            tessera_home_with_env(&env(&[(HOME_VAR, "rel")]), cwd),
            Some(PathBuf::from("/work/rel"))
        );
        assert_eq!(tessera_home_with_env(&env(&[("HOME", "")]), cwd), None);
    }
}
