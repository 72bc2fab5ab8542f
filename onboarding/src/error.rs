//! Error types for the flow engine.
//!
//! The flow itself never fails: malformed graphs and missing handlers degrade
//! to an early finish. Errors only describe an unreachable control task and
//! collaborator failures, which are logged and then treated as "ready".

use thiserror::Error;

/// Error returned by `FlowHandle` calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The control task has stopped (shut down, or every handle was dropped).
    #[error("onboarding controller is no longer running")]
    ControllerClosed,
}

/// Failure reported by an `AssetPrefetchService`.
///
/// Never surfaced to the host: the readiness gate logs it and proceeds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefetchError {
    #[error("asset prefetch failed for screen {screen_id}: {message}")]
    Screen { screen_id: String, message: String },

    #[error("asset prefetch failed: {0}")]
    Failed(String),
}
