//! Non-fatal manifest checks.
//!
//! Problems found here are reported as warnings before any task runs; they
//! never abort a command on their own.
use std::collections::HashSet;
use std::path::Path;

use super::Manifest;

/// A validation warning detected during manifest loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Manifest section (e.g. `"homebrew"`, `"files"`).
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// A warning about `item` from the `source` section.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.source, self.item, self.message)
    }
}

/// Validate every section of the manifest.
#[must_use]
pub fn validate(manifest: &Manifest) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    check_names("homebrew", &manifest.homebrew.packages, &mut warnings);
    check_url("homebrew", "install_url", &manifest.homebrew.install_url, &mut warnings);
    check_url(
        "homebrew",
        "uninstall_url",
        &manifest.homebrew.uninstall_url,
        &mut warnings,
    );
    check_sha256("homebrew", manifest.homebrew.install_sha256.as_deref(), &mut warnings);

    check_url("oh_my_zsh", "install_url", &manifest.oh_my_zsh.install_url, &mut warnings);
    check_sha256("oh_my_zsh", manifest.oh_my_zsh.install_sha256.as_deref(), &mut warnings);
    check_relative("oh_my_zsh", &manifest.oh_my_zsh.dir, &mut warnings);
    let plugin_names: Vec<String> = manifest
        .oh_my_zsh
        .plugins
        .iter()
        .map(|p| p.name.clone())
        .collect();
    check_names("oh_my_zsh.plugins", &plugin_names, &mut warnings);
    for plugin in &manifest.oh_my_zsh.plugins {
        if plugin.name.contains('/') {
            warnings.push(ValidationWarning::new(
                "oh_my_zsh.plugins",
                &plugin.name,
                "plugin name must not contain '/'",
            ));
        }
        if plugin.url.trim().is_empty() {
            warnings.push(ValidationWarning::new(
                "oh_my_zsh.plugins",
                &plugin.name,
                "plugin has no repository url",
            ));
        } else {
            check_url("oh_my_zsh.plugins", &plugin.name, &plugin.url, &mut warnings);
        }
    }

    check_names("python", &manifest.python.versions, &mut warnings);
    if let Some(global) = &manifest.python.global
        && !manifest.python.versions.contains(global)
    {
        warnings.push(ValidationWarning::new(
            "python",
            global,
            "global version is not in the versions list",
        ));
    }

    check_names("pipx", &manifest.pipx.packages, &mut warnings);

    if let Some(shell) = &manifest.shell.default
        && shell.trim().is_empty()
    {
        warnings.push(ValidationWarning::new("shell", "default", "empty shell name"));
    }

    check_relative("backup", &manifest.backup.dir, &mut warnings);

    let file_paths: Vec<String> = manifest.files.iter().map(|f| f.path.clone()).collect();
    check_names("files", &file_paths, &mut warnings);
    for path in &file_paths {
        check_relative("files", path, &mut warnings);
    }

    warnings
}

/// Flag empty and duplicate names in a list.
fn check_names(source: &str, names: &[String], warnings: &mut Vec<ValidationWarning>) {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            warnings.push(ValidationWarning::new(source, "<empty>", "empty name"));
        } else if !seen.insert(name.as_str()) {
            warnings.push(ValidationWarning::new(source, name, "duplicate entry"));
        }
    }
}

fn check_relative(source: &str, path: &str, warnings: &mut Vec<ValidationWarning>) {
    if Path::new(path).is_absolute() {
        warnings.push(ValidationWarning::new(
            source,
            path,
            "path should be relative to the home directory",
        ));
    }
    if Path::new(path)
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        warnings.push(ValidationWarning::new(
            source,
            path,
            "path must not contain '..'",
        ));
    }
}

fn check_url(source: &str, item: &str, url: &str, warnings: &mut Vec<ValidationWarning>) {
    if !url.starts_with("https://") {
        warnings.push(ValidationWarning::new(
            source,
            item,
            format!("url is not https: {url}"),
        ));
    }
}

fn check_sha256(source: &str, digest: Option<&str>, warnings: &mut Vec<ValidationWarning>) {
    if let Some(digest) = digest
        && (digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()))
    {
        warnings.push(ValidationWarning::new(
            source,
            "install_sha256",
            "expected 64 hex characters",
        ));
    }
}
