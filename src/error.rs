use std::path::PathBuf;

use thiserror::Error;

use crate::model::NodeKind;

/// Why a node could not be written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidNodeReason {
    NoChildren,
    FirstChildNotText,
}

impl std::fmt::Display for InvalidNodeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidNodeReason::NoChildren => f.write_str("it has no children"),
            InvalidNodeReason::FirstChildNotText => f.write_str("its first child is not a text run"),
        }
    }
}

/// Errors from turning nodes back into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("cannot serialize {kind} node at index {index}: {reason}")]
    InvalidNode {
        index: usize,
        kind: NodeKind,
        reason: InvalidNodeReason,
    },
}

/// Reasons a boundary payload is refused.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("message is not an object")]
    NotAnObject,

    #[error("message is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("message field `{0}` is not a string")]
    NotAString(&'static str),

    #[error("unknown message type `{0}`")]
    UnknownType(String),

    #[error("message is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the host/surface channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("the other endpoint has disconnected")]
    Disconnected,
}

/// Errors loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Any error the crate can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid node tree: {0}")]
    Nodes(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
