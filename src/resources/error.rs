//! Errors raised while checking or changing a resource.
//!
//! Resource code returns these and lets `?` lift them into
//! [`anyhow::Error`]; tests downcast to match on the variant.

use thiserror::Error;

/// A resource operation that could not complete.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// An external program exited non-zero.
    #[error("{program} exited with status {exit_code}: {stderr}")]
    ExecutionFailed {
        /// Program name as invoked.
        program: String,
        /// Exit status, or -1 when killed by a signal.
        exit_code: i32,
        /// Trimmed stderr.
        stderr: String,
    },

    /// A tool or path the resource relies on does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// What was looked for.
        resource: String,
    },

    /// Fetching an installer script failed.
    #[error("could not download {url}: {reason}")]
    Download {
        /// Requested URL.
        url: String,
        /// Transport or HTTP status error.
        reason: String,
    },

    /// A downloaded installer's SHA-256 differs from the pinned digest.
    #[error("{url} has sha256 {actual}, expected {expected}")]
    ChecksumMismatch {
        /// Requested URL.
        url: String,
        /// Pinned digest, lowercase hex.
        expected: String,
        /// Digest of what arrived.
        actual: String,
    },

    /// libgit2 could not clone a plugin repository.
    #[error("could not clone {url}: {source}")]
    Clone {
        /// Remote URL.
        url: String,
        /// libgit2 error.
        source: git2::Error,
    },

    /// The resource is in a shape nothing can fix automatically.
    #[error("{resource}: {reason}")]
    InvalidState {
        /// Resource label.
        resource: String,
        /// What is wrong.
        reason: String,
    },
}
