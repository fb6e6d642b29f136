//! Configuration types for stream stages

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::StreamResult;

/// Worker pool size used when none (or 0) is configured
pub const DEFAULT_WORK_SIZE: usize = 10_000;

// Upper bound so the whole pool can be re-acquired in one `acquire_many(u32)`.
const MAX_WORK_SIZE: usize = 1 << 24;

/// Options for a single `walk` invocation and the stages built on it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Options {
    /// Maximum number of concurrently running workers; 0 means the default
    #[serde(default)]
    pub work_size: usize,
    /// Lets a consumer stop the driver from pulling further input
    #[serde(skip)]
    pub cancellation: Option<CancellationToken>,
}

impl Options {
    /// Create options with every setting at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker pool size
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.work_size = size;
        self
    }

    /// Attach a cancellation token checked by the stage driver
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Parse options from a JSON object such as `{"work_size": 16}`
    pub fn from_json(raw: &str) -> StreamResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Effective pool size, with the default applied
    pub fn work_size(&self) -> usize {
        if self.work_size == 0 {
            DEFAULT_WORK_SIZE
        } else {
            self.work_size.min(MAX_WORK_SIZE)
        }
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }
}
