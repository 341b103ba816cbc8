use crate::core::{Mode, ResolutionRequest, ResolutionResult};
use crate::error::Result;
use crate::present::{AudioControlState, Presenter, ResultView};
use crate::validate::{extract_video_id, thumbnail_url, validate};

/// Remote internals are not leaked to the user; every video-slot failure
/// surfaces this message, whatever the precise cause was.
pub const VIDEO_FAILED_MESSAGE: &str =
    "Failed to fetch video. The link might be private or age-restricted.";
pub const AUDIO_FAILED_MESSAGE: &str = "Could not convert to audio.";

const RESULT_LABEL: &str = "YouTube Video Download";

/// An accepted video resolution. Kept around while the audio sub-flow runs;
/// audio augments it, never replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResult {
    pub source_url: String,
    pub video_id: Option<String>,
    pub download_url: String,
}

impl VideoResult {
    pub fn view(&self) -> ResultView {
        ResultView {
            thumbnail_url: self.video_id.as_deref().map(thumbnail_url),
            label: RESULT_LABEL.to_string(),
            video_download_url: self.download_url.clone(),
            audio_control: AudioControlState::Ready,
        }
    }
}

/// Lifecycle of the one request slot the UI drives. In-flight states carry
/// the sequence token of the only completion allowed to land in them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    RequestingVideo {
        seq: u64,
        source_url: String,
        video_id: Option<String>,
    },
    ReadyVideo {
        video: VideoResult,
    },
    RequestingAudio {
        seq: u64,
        video: VideoResult,
    },
    ReadyAudioAppended {
        video: VideoResult,
        audio_url: String,
    },
    Failed {
        message: String,
    },
}

/// Single owner of the pipeline state. Every transition is driven by a user
/// intent or a resolver completion; network work itself happens outside, via
/// the [`ResolutionRequest`] values this hands back.
pub struct Orchestrator<P: Presenter> {
    presenter: P,
    state: PipelineState,
    next_seq: u64,
}

impl<P: Presenter> Orchestrator<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            state: PipelineState::Idle,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn issue_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Submit intent. Accepted in every state: a submit while work is in
    /// flight supersedes it, and the superseded completion is discarded when
    /// it eventually arrives.
    ///
    /// Returns the request to dispatch, or `None` when validation failed.
    pub fn submit(&mut self, raw: &str) -> Option<ResolutionRequest> {
        // Superseding an in-flight audio request orphans its completion, so
        // its converting indicator has to be restored here, not there.
        if matches!(self.state, PipelineState::RequestingAudio { .. }) {
            self.presenter.set_audio_control(AudioControlState::Ready);
        }
        self.presenter.clear_output();
        self.state = PipelineState::Validating;

        match validate(raw) {
            Ok(source_url) => {
                let video_id = extract_video_id(&source_url);
                let seq = self.issue_seq();
                tracing::debug!(seq, url = %source_url, "video resolution dispatched");
                self.state = PipelineState::RequestingVideo {
                    seq,
                    source_url: source_url.clone(),
                    video_id,
                };
                self.presenter.busy_changed(true);
                Some(ResolutionRequest {
                    seq,
                    source_url,
                    mode: Mode::Video,
                })
            }
            Err(err) => {
                let message = err.to_string();
                self.presenter.show_error(&message);
                self.state = PipelineState::Failed { message };
                None
            }
        }
    }

    /// Completion signal for a video request. Applied only when `seq` matches
    /// the request the current state is waiting on.
    pub fn on_video_outcome(&mut self, seq: u64, outcome: Result<ResolutionResult>) {
        let PipelineState::RequestingVideo {
            seq: current,
            source_url,
            video_id,
        } = &self.state
        else {
            tracing::debug!(seq, "video completion without a matching request; discarded");
            return;
        };
        if *current != seq {
            tracing::debug!(seq, current = *current, "superseded video completion discarded");
            return;
        }
        let source_url = source_url.clone();
        let video_id = video_id.clone();

        self.presenter.busy_changed(false);
        match outcome {
            Ok(result) => {
                let video = VideoResult {
                    source_url,
                    video_id,
                    download_url: result.download_url,
                };
                self.presenter.show_result(&video.view());
                self.state = PipelineState::ReadyVideo { video };
            }
            Err(err) => {
                tracing::debug!(seq, error = %err, cause = ?err.cause(), "video resolution failed");
                self.presenter.show_error(VIDEO_FAILED_MESSAGE);
                self.state = PipelineState::Failed {
                    message: VIDEO_FAILED_MESSAGE.to_string(),
                };
            }
        }
    }

    /// Audio-request intent; only meaningful while a video result is showing.
    pub fn request_audio(&mut self) -> Option<ResolutionRequest> {
        let PipelineState::ReadyVideo { video } = &self.state else {
            tracing::debug!("audio requested with no video result showing; ignored");
            return None;
        };
        let video = video.clone();
        let seq = self.issue_seq();
        tracing::debug!(seq, url = %video.source_url, "audio resolution dispatched");

        let request = ResolutionRequest {
            seq,
            source_url: video.source_url.clone(),
            mode: Mode::AudioOnly,
        };
        self.presenter
            .set_audio_control(AudioControlState::Converting);
        self.state = PipelineState::RequestingAudio { seq, video };
        Some(request)
    }

    /// Completion signal for an audio request. Failure is non-fatal: the
    /// stored video result survives either way.
    pub fn on_audio_outcome(&mut self, seq: u64, outcome: Result<ResolutionResult>) {
        let PipelineState::RequestingAudio { seq: current, video } = &self.state else {
            tracing::debug!(seq, "audio completion without a matching request; discarded");
            return;
        };
        if *current != seq {
            tracing::debug!(seq, current = *current, "superseded audio completion discarded");
            return;
        }
        let video = video.clone();

        self.presenter.set_audio_control(AudioControlState::Ready);
        match outcome {
            Ok(result) => {
                self.presenter.deliver_audio(&result.download_url);
                self.state = PipelineState::ReadyAudioAppended {
                    video,
                    audio_url: result.download_url,
                };
            }
            Err(err) => {
                tracing::debug!(seq, error = %err, "audio resolution failed");
                self.presenter.notice(AUDIO_FAILED_MESSAGE);
                self.state = PipelineState::ReadyVideo { video };
            }
        }
    }
}
