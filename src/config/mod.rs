//! Resource manifest: TOML schema, lookup and loading.
pub mod validation;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// The manifest compiled into the binary.
pub const BUNDLED_MANIFEST: &str = include_str!("../../conf/manifest.toml");

const DEFAULT_HOMEBREW_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";
const DEFAULT_HOMEBREW_UNINSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/uninstall.sh";
const DEFAULT_OH_MY_ZSH_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// Homebrew and the formulae it installs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Homebrew {
    /// URL of the upstream install script.
    pub install_url: String,
    /// Optional SHA-256 pin for the install script.
    pub install_sha256: Option<String>,
    /// URL of the upstream uninstall script.
    pub uninstall_url: String,
    /// Remove Homebrew itself on teardown.
    pub uninstall: bool,
    /// Formulae to install.
    pub packages: Vec<String>,
}

impl Default for Homebrew {
    fn default() -> Self {
        Self {
            install_url: DEFAULT_HOMEBREW_INSTALL_URL.to_string(),
            install_sha256: None,
            uninstall_url: DEFAULT_HOMEBREW_UNINSTALL_URL.to_string(),
            uninstall: false,
            packages: Vec::new(),
        }
    }
}

/// A Zsh plugin cloned into `$ZSH_CUSTOM/plugins/<name>`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Plugin {
    /// Directory name under the plugins directory.
    pub name: String,
    /// Git remote to clone.
    pub url: String,
}

/// Oh My Zsh and its custom plugins.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OhMyZsh {
    /// URL of the upstream install script.
    pub install_url: String,
    /// Optional SHA-256 pin for the install script.
    pub install_sha256: Option<String>,
    /// Installation directory, relative to the home directory.
    pub dir: String,
    /// Plugins to clone.
    pub plugins: Vec<Plugin>,
}

impl Default for OhMyZsh {
    fn default() -> Self {
        Self {
            install_url: DEFAULT_OH_MY_ZSH_INSTALL_URL.to_string(),
            install_sha256: None,
            dir: ".oh-my-zsh".to_string(),
            plugins: Vec::new(),
        }
    }
}

/// Python versions managed by pyenv.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Python {
    /// Versions to build with `pyenv install`.
    pub versions: Vec<String>,
    /// Version for `pyenv global`; `None` leaves it alone.
    pub global: Option<String>,
}

/// Tools installed with pipx.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Pipx {
    /// Packages to install.
    pub packages: Vec<String>,
}

/// Login shell settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Shell {
    /// Shell to make the login shell (e.g. `"zsh"`); `None` leaves it alone.
    pub default: Option<String>,
}

/// Where backups of pre-existing config files are kept.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Backup {
    /// Backup directory, relative to the home directory.
    pub dir: String,
}

impl Default for Backup {
    fn default() -> Self {
        Self {
            dir: ".macsetup_backup".to_string(),
        }
    }
}

/// A static configuration file written by setup.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ManagedFile {
    /// Path relative to the home directory.
    pub path: String,
    /// Exact file body.
    pub content: String,
}

/// The full resource manifest.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// `[homebrew]`
    pub homebrew: Homebrew,
    /// `[oh_my_zsh]`
    pub oh_my_zsh: OhMyZsh,
    /// `[python]`
    pub python: Python,
    /// `[pipx]`
    pub pipx: Pipx,
    /// `[shell]`
    pub shell: Shell,
    /// `[backup]`
    pub backup: Backup,
    /// `[[files]]`
    pub files: Vec<ManagedFile>,
}

impl Manifest {
    /// Parse a manifest from TOML text. `origin` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid manifest.
    pub fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// The manifest bundled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled manifest fails to parse.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::parse(BUNDLED_MANIFEST, "<bundled>")
    }
}

/// Where the loaded manifest came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Read from this file.
    File(PathBuf),
    /// [`BUNDLED_MANIFEST`].
    Bundled,
}

impl std::fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled => write!(f, "bundled manifest"),
        }
    }
}

/// Loaded configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed manifest.
    pub manifest: Manifest,
    /// Where it was read from.
    pub source: ManifestSource,
}

impl Config {
    /// Load the manifest.
    ///
    /// Lookup order: the explicit `path`, then
    /// `$XDG_CONFIG_HOME/macsetup/manifest.toml` (default
    /// `<home>/.config/macsetup/manifest.toml`) when it exists, then the
    /// bundled manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(path: Option<&Path>, home: &Path) -> Result<Self, ConfigError> {
        let candidate = path.map_or_else(|| user_manifest_path(home), Path::to_path_buf);
        if path.is_some() || candidate.exists() {
            return Self::load_file(&candidate);
        }
        Ok(Self {
            manifest: Manifest::bundled()?,
            source: ManifestSource::Bundled,
        })
    }

    /// Load a specific manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            manifest: Manifest::parse(&text, &path.display().to_string())?,
            source: ManifestSource::File(path.to_path_buf()),
        })
    }
}

/// Per-user manifest location.
fn user_manifest_path(home: &Path) -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map_or_else(|| home.join(".config"), PathBuf::from)
        .join("macsetup")
        .join("manifest.toml")
}
