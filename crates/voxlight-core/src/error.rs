use thiserror::Error;

/// Errors surfaced by the lighting core.
///
/// Out-of-range voxel samples and missing lightmaps are recovered locally
/// and never show up here.
#[derive(Debug, Error)]
pub enum LightingError {
    #[error("malformed chunk key '{key}': {reason}")]
    MalformedChunkKey { key: String, reason: String },

    #[error("failed to parse lighting config RON: {0}")]
    ConfigParse(String),

    #[error("invalid lighting config: {0}")]
    InvalidConfig(String),
}
