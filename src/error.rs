//! Error types for the playground server.

use std::io;

use thiserror::Error;

/// Failures that stop the server from starting or keep it from running.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server terminated: {0}")]
    Serve(#[source] io::Error),

    #[error("failed to install tracing subscriber: {0}")]
    Logging(String),
}

/// A select value that names no known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
