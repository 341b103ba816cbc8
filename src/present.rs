//! Port between the orchestrator and whatever renders it. The orchestrator
//! only ever talks to this trait; no rendering concern leaks back in.

/// What the result panel shows after a successful video resolution. Every
/// render carries the audio-control state, so a panel refresh can never
/// strand the control in a stale indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Absent when no canonical id could be extracted from the input link.
    pub thumbnail_url: Option<String>,
    pub label: String,
    pub video_download_url: String,
    pub audio_control: AudioControlState,
}

/// The audio control is either idle or showing its transient converting
/// indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioControlState {
    Ready,
    Converting,
}

/// Rendering side of the pipeline. Implementations receive every UI-visible
/// state change; they never mutate pipeline state themselves.
pub trait Presenter: Send {
    fn busy_changed(&mut self, busy: bool);

    /// Clear any prior error banner and result panel before a new attempt.
    fn clear_output(&mut self);

    fn show_error(&mut self, message: &str);

    fn show_result(&mut self, view: &ResultView);

    fn set_audio_control(&mut self, state: AudioControlState);

    /// Hand a resolved audio reference to the user agent.
    fn deliver_audio(&mut self, download_url: &str);

    /// Lightweight, non-blocking notice; does not clear the result panel.
    fn notice(&mut self, message: &str);
}
