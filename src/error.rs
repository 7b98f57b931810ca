//! Error types for viewstyle operations.

use thiserror::Error;

/// Errors that can occur while building style tables or host trees.
///
/// Style resolution itself never fails: a missing applier or a node without
/// style classes are ordinary outcomes, not errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Node kind hierarchy has a cycle through {0}")]
    KindCycle(&'static str),

    #[error("Unknown node: {0}")]
    UnknownNode(u32),

    #[error("Tree is full: node ids are limited to u32")]
    TreeFull,

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
