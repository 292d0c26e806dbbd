//! `.url-hash.toml` discovery and loading.
//!
//! Up to three files are consulted, lowest precedence first: the one at the
//! enclosing git root, the one in the working directory, and an explicit
//! override. The last file that sets `hash.decode` wins; with no file the
//! built-in verbatim policy applies.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url_hash::{HashDecoding, HashReader};

pub const CONFIG_FILE_NAME: &str = ".url-hash.toml";

/// Resolved settings plus the layers that produced them.
#[derive(Clone, Debug)]
pub struct Config {
    pub hash: HashSettings,
    pub sources: ConfigSources,
}

/// The `[hash]` table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HashSettings {
    pub decode: HashDecoding,
}

impl HashSettings {
    pub fn reader(&self) -> HashReader {
        HashReader::new(self.decode)
    }
}

#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    /// Applied layers, built-in defaults first.
    pub layers: Vec<ConfigSource>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    /// `None` only for the built-in defaults.
    pub path: Option<PathBuf>,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({})", self.kind, path.display()),
            None => f.write_str("built-in defaults"),
        }
    }
}

/// Where a layer came from, in ascending precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "repository file",
            ConfigSourceKind::Local => "working-directory file",
            ConfigSourceKind::Override => "--config file",
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    override_path: Option<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl LoadOptions {
    /// Extra file applied last; relative paths resolve against the working dir.
    pub fn with_override_path(self, path: impl Into<PathBuf>) -> Self {
        LoadOptions {
            override_path: Some(path.into()),
            ..self
        }
    }

    /// Directory to search from instead of the process working directory.
    pub fn with_working_dir(self, path: impl Into<PathBuf>) -> Self {
        LoadOptions {
            working_dir: Some(path.into()),
            ..self
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot use {path} as working directory: {source}")]
    WorkingDirectory { path: PathBuf, source: io::Error },
    #[error("config file {path} passed with --config was not found")]
    OverrideNotFound { path: PathBuf },
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_directory = match options.working_dir {
            Some(dir) => fs::canonicalize(&dir).map_err(|source| ConfigError::WorkingDirectory {
                path: dir,
                source,
            })?,
            None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
                path: PathBuf::from("."),
                source,
            })?,
        };

        let layers = layer_candidates(&working_directory, options.override_path)?;
        let mut config = Config::default();
        config.sources.working_directory = working_directory;

        for (kind, path) in layers {
            if let Some(decode) = read_layer(&path)?.decode() {
                config.hash.decode = decode;
            }
            config.sources.layers.push(ConfigSource {
                kind,
                path: Some(path),
            });
        }

        Ok(config)
    }
}

impl Default for Config {
    /// Built-in defaults only; does not touch the filesystem.
    fn default() -> Self {
        Config {
            hash: HashSettings::default(),
            sources: ConfigSources {
                working_directory: PathBuf::from("."),
                layers: vec![ConfigSource {
                    kind: ConfigSourceKind::Default,
                    path: None,
                }],
            },
        }
    }
}

/// Existing config files in application order. A path reached through more
/// than one route is applied once, under its highest-precedence kind.
fn layer_candidates(
    working_dir: &Path,
    override_path: Option<PathBuf>,
) -> Result<Vec<(ConfigSourceKind, PathBuf)>, ConfigError> {
    let override_path = match override_path {
        Some(path) => {
            let path = working_dir.join(path);
            if !path.is_file() {
                return Err(ConfigError::OverrideNotFound { path });
            }
            Some(path)
        }
        None => None,
    };

    let git_root = working_dir
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(|root| root.join(CONFIG_FILE_NAME));
    let local = Some(working_dir.join(CONFIG_FILE_NAME));

    let discovered = [
        (ConfigSourceKind::GitRoot, git_root),
        (ConfigSourceKind::Local, local),
    ];

    let mut layers: Vec<(ConfigSourceKind, PathBuf)> = discovered
        .into_iter()
        .filter_map(|(kind, path)| path.filter(|p| p.is_file()).map(|p| (kind, p)))
        .collect();
    layers.extend(override_path.map(|p| (ConfigSourceKind::Override, p)));

    let mut unique: Vec<(ConfigSourceKind, PathBuf)> = Vec::with_capacity(layers.len());
    for (kind, path) in layers {
        unique.retain(|(_, seen)| seen != &path);
        unique.push((kind, path));
    }
    Ok(unique)
}

fn read_layer(path: &Path) -> Result<FileLayer, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// On-disk shape of one `.url-hash.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLayer {
    hash: Option<HashTable>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HashTable {
    decode: Option<HashDecoding>,
}

impl FileLayer {
    fn decode(&self) -> Option<HashDecoding> {
        self.hash.as_ref().and_then(|table| table.decode)
    }
}
