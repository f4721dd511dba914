/*
 * Error surface of the platform layer. Every failure is a recoverable value;
 * nothing here aborts the process. Backends translate their native error
 * codes into these variants at the boundary so callers only ever match on
 * platform-agnostic conditions.
 */

use crate::types::PlatformCapability;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The active backend does not provide the requested optional capability.
    /// Callers should treat this as "not available here" and take an
    /// alternate path, not as a fault.
    #[error("platform backend does not support {0:?}")]
    UnsupportedCapability(PlatformCapability),

    /// A native window handle was null, stale, or never referred to a window
    /// the backend knows about. Retrying cannot succeed until the caller
    /// re-obtains a valid handle.
    #[error("invalid native window handle: {0}")]
    InvalidHandle(String),

    #[error("platform operation failed: {0}")]
    OperationFailed(String),

    #[error("platform initialization failed: {0}")]
    InitializationFailed(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::OperationFailed(err.to_string())
    }
}
