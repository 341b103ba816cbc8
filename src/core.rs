use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Which flavor of media a request asks the resolver for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mode {
    Video,
    AudioOnly,
}

/// One resolution attempt against the remote resolver.
///
/// `seq` is a monotonically increasing token handed out by the orchestrator;
/// completions carrying a stale token are discarded rather than applied, so a
/// slow early request can never clobber a faster later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub seq: u64,
    pub source_url: String,
    pub mode: Mode,
}

/// A direct, time-limited download reference handed back by the resolver.
/// Never fetched by this crate; reachability is the download agent's problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub download_url: String,
    pub mode: Mode,
}

/// Seam between the orchestrator and whatever answers resolution requests.
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionResult>;
}
