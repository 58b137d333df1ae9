//! Log file location, ANSI stripping and timestamps.
use std::path::PathBuf;

/// Remove ANSI CSI sequences (`ESC [ ... final`) and bare two-byte escapes.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next_if_eq(&'[').is_some() {
            // Parameters and intermediates run until a final byte in `@..=~`.
            for p in chars.by_ref() {
                if ('@'..='~').contains(&p) {
                    break;
                }
            }
        } else {
            chars.next();
        }
    }
    out
}

/// `$XDG_CACHE_HOME/macsetup/<command>.log` (default `~/.cache/...`).
///
/// Creates the directory; returns `None` if that fails.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = match std::env::var_os("XDG_CACHE_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".cache"),
    };
    let dir = cache.join("macsetup");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// UTC `YYYY-MM-DD HH:MM:SS`, used in the run header.
pub(super) fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// UTC `HH:MM:SS`, used per line.
pub(super) fn clock() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
