use std::path::Path;

use anyhow::{Context, Result};

/// Parses the contents of a configuration file.
pub(crate) fn parse_document(contents: &str, file: &Path) -> Result<toml::Table> {
    // At the moment, no compatibility checks are needed.
    contents
        .parse::<toml::Table>()
        .map_err(|e| anyhow::Error::from(e).context("could not parse input as TOML"))
        .with_context(|| format!("could not parse TOML configuration in `{}`", file.display()))
}
