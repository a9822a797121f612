//! Error taxonomy for the command boundary.
//!
//! Internal plumbing uses `anyhow`; these variants exist so callers (the
//! control socket, the CLI) can distinguish rejected input from missing
//! references, store failures, and engine failures.

use thiserror::Error;

/// Error returned by command handling ([`crate::api`] and label
/// operations). Only the requesting caller sees these; they are never
/// broadcast.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed caller input, rejected before any state change.
    #[error("invalid magnet link: {0}")]
    InvalidMagnet(String),

    /// The torrent is already tracked past the PENDING phase.
    #[error("torrent {0} already added")]
    AlreadyAdded(String),

    #[error("torrent {0} not found")]
    TorrentNotFound(String),

    #[error("label {0} not found")]
    LabelNotFound(String),

    /// Labels require a non-empty name.
    #[error("label name must not be empty")]
    EmptyLabelName,

    /// The engine did not deliver torrent metadata within the configured
    /// deadline. The record stays PENDING and is retried at bootstrap.
    #[error("timed out fetching metadata for {0}")]
    MetadataTimeout(String),

    /// The execution engine rejected or dropped the torrent.
    #[error("engine: {0}")]
    Engine(String),

    /// Store I/O failure, propagated to the immediate caller.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
