use crate::core::{Mode, Resolver};
use crate::pipeline::{Orchestrator, PipelineState};
use crate::present::Presenter;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Clonable handle driving one resolution pipeline.
///
/// The orchestrator is stepped under a lock; the network call itself runs
/// with the lock released, so concurrent submits interleave freely and the
/// sequence-token rule decides which completion lands.
pub struct Session<P: Presenter> {
    orchestrator: Arc<Mutex<Orchestrator<P>>>,
    resolver: Arc<dyn Resolver>,
}

impl<P: Presenter> Clone for Session<P> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<P: Presenter> Session<P> {
    pub fn new(presenter: P, resolver: Arc<dyn Resolver>) -> Self {
        Self {
            orchestrator: Arc::new(Mutex::new(Orchestrator::new(presenter))),
            resolver,
        }
    }

    /// Submit intent: validate, then run the video resolution to completion.
    pub async fn submit(&self, raw: &str) {
        let request = self.orchestrator.lock().await.submit(raw);
        if let Some(request) = request {
            debug_assert_eq!(request.mode, Mode::Video);
            let outcome = self.resolver.resolve(&request).await;
            self.orchestrator
                .lock()
                .await
                .on_video_outcome(request.seq, outcome);
        }
    }

    /// Audio-request intent from the ready state; a no-op anywhere else.
    pub async fn request_audio(&self) {
        let request = self.orchestrator.lock().await.request_audio();
        if let Some(request) = request {
            debug_assert_eq!(request.mode, Mode::AudioOnly);
            let outcome = self.resolver.resolve(&request).await;
            self.orchestrator
                .lock()
                .await
                .on_audio_outcome(request.seq, outcome);
        }
    }

    pub async fn state(&self) -> PipelineState {
        self.orchestrator.lock().await.state().clone()
    }
}
