// src/error.rs
// =============================================================================
// Typed errors for the two ways a run can fail before any result is produced.
//
// - ConfigError: the user pointed us at nothing, or at something that isn't
//   there. Detected before link checking starts.
// - ExtractionError: a markdown document could not be read. The whole run
//   stops and the file is named in the message.
//
// Dead links are NOT errors. They are ordinary results with ok = false.
//
// Rust concepts:
// - thiserror: derive macro that writes the Display and Error impls for us
// - #[source]: keeps the underlying error so `{:#}` prints the full chain
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the input paths, reported with exit code 1.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No files specified. Use --help for usage.")]
    NoPaths,

    #[error("Not found: {}", .0.display())]
    PathNotFound(PathBuf),
}

/// A document that could not be opened or decoded as UTF-8 text.
#[derive(Debug, Error)]
#[error("Could not read {}", .path.display())]
pub struct ExtractionError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = ConfigError::PathNotFound(PathBuf::from("docs/nope.md"));
        assert_eq!(err.to_string(), "Not found: docs/nope.md");

        let err = ExtractionError {
            path: PathBuf::from("README.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Could not read README.md");
        assert!(std::error::Error::source(&err).is_some());
    }
}
