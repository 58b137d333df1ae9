//! Operating system detection.
use std::fmt;
use std::path::PathBuf;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// macOS.
    MacOs,
    /// Linux, used for development and CI.
    Linux,
    /// Anything else.
    Other,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
    /// Running on Apple Silicon (`aarch64`).
    pub is_arm: bool,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            is_arm: cfg!(target_arch = "aarch64"),
        }
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub const fn new(os: Os, is_arm: bool) -> Self {
        Self { os, is_arm }
    }

    /// Whether this is macOS.
    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Whether Homebrew (and therefore this installer) supports the platform.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self.os, Os::MacOs | Os::Linux)
    }

    /// Default Homebrew installation prefix.
    ///
    /// `/opt/homebrew` on Apple Silicon, `/usr/local` on Intel macs and
    /// `/home/linuxbrew/.linuxbrew` on Linux.
    #[must_use]
    pub fn homebrew_prefix(&self) -> Option<PathBuf> {
        match self.os {
            Os::MacOs if self.is_arm => Some(PathBuf::from("/opt/homebrew")),
            Os::MacOs => Some(PathBuf::from("/usr/local")),
            Os::Linux => Some(PathBuf::from("/home/linuxbrew/.linuxbrew")),
            Os::Other => None,
        }
    }

    /// Directories to search for tools before `PATH`.
    #[must_use]
    pub fn tool_search_paths(&self) -> Vec<PathBuf> {
        self.homebrew_prefix()
            .map(|prefix| vec![prefix.join("bin"), prefix.join("sbin")])
            .unwrap_or_default()
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "linux") {
            Os::Linux
        } else {
            Os::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_matches_target() {
        let p = Platform::detect();
        if cfg!(target_os = "macos") {
            assert!(p.is_macos());
        } else if cfg!(target_os = "linux") {
            assert_eq!(p.os, Os::Linux);
        }
    }

    #[test]
    fn homebrew_prefix_apple_silicon() {
        let p = Platform::new(Os::MacOs, true);
        assert_eq!(p.homebrew_prefix(), Some(PathBuf::from("/opt/homebrew")));
    }

    #[test]
    fn homebrew_prefix_intel_mac() {
        let p = Platform::new(Os::MacOs, false);
        assert_eq!(p.homebrew_prefix(), Some(PathBuf::from("/usr/local")));
    }

    #[test]
    fn homebrew_prefix_linux() {
        let p = Platform::new(Os::Linux, false);
        assert_eq!(
            p.homebrew_prefix(),
            Some(PathBuf::from("/home/linuxbrew/.linuxbrew"))
        );
    }

    #[test]
    fn other_os_is_unsupported() {
        let p = Platform::new(Os::Other, false);
        assert!(!p.is_supported());
        assert!(p.tool_search_paths().is_empty());
    }

    #[test]
    fn tool_search_paths_include_bin_and_sbin() {
        let p = Platform::new(Os::MacOs, true);
        assert_eq!(
            p.tool_search_paths(),
            vec![
                PathBuf::from("/opt/homebrew/bin"),
                PathBuf::from("/opt/homebrew/sbin")
            ]
        );
    }

    #[test]
    fn os_display() {
        assert_eq!(Os::MacOs.to_string(), "macos");
        assert_eq!(Os::Linux.to_string(), "linux");
    }
}
