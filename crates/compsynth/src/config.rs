//! Generation options shared by the whole command tree.

use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default for commands that don't say whether abbreviated long options are accepted.
    pub abbreviate_options: bool,
    /// Default for commands that don't say whether subcommands inherit their options.
    pub inherit_options: bool,
    /// Files whose contents are pasted right after the banner.
    pub include_files: Vec<PathBuf>,
    pub vim_modeline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            abbreviate_options: false,
            inherit_options: false,
            include_files: Vec::new(),
            vim_modeline: true,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Config> {
        toml::from_str(text).map_err(|err| Error::Config { msg: err.to_string() })
    }

    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .map_err(|err| Error::Config { msg: format!("can't read `{}`: {err}", path.display()) })?;
        Config::from_toml(&text)
    }

    pub(crate) fn included_files_content(&self) -> Result<Vec<String>> {
        self.include_files
            .iter()
            .map(|path| {
                fs::read_to_string(path)
                    .map(|it| it.trim_end().to_string())
                    .map_err(|source| Error::Include { path: path.clone(), source })
            })
            .collect()
    }
}
