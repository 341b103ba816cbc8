pub mod cobalt;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod prefs;
pub mod present;
pub mod session;
pub mod validate;

pub use cobalt::CobaltClient;
pub use core::{Mode, ResolutionRequest, ResolutionResult, Resolver};
pub use error::{ErrorCause, Result, TubeGrabError};
pub use pipeline::{Orchestrator, PipelineState, VideoResult};
pub use present::{AudioControlState, Presenter, ResultView};
pub use session::Session;

/// One-shot: validate a link and resolve it to a direct video download URL
/// via the default cobalt instance.
pub async fn resolve_video(url: &str) -> Result<ResolutionResult> {
    resolve_with(&CobaltClient::new(), url, Mode::Video).await
}

/// One-shot: validate a link and resolve it to an audio-only download URL
/// via the default cobalt instance.
pub async fn resolve_audio(url: &str) -> Result<ResolutionResult> {
    resolve_with(&CobaltClient::new(), url, Mode::AudioOnly).await
}

/// One-shot against a caller-supplied resolver, e.g. a
/// [`CobaltClient::with_endpoint`] pointed at another instance.
pub async fn resolve_with(
    resolver: &dyn Resolver,
    url: &str,
    mode: Mode,
) -> Result<ResolutionResult> {
    let source_url = validate::validate(url)?;
    let request = ResolutionRequest {
        seq: 0,
        source_url,
        mode,
    };
    resolver.resolve(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCause;

    struct EchoResolver;

    #[async_trait::async_trait]
    impl Resolver for EchoResolver {
        async fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionResult> {
            Ok(ResolutionResult {
                download_url: format!("resolved:{}", request.source_url),
                mode: request.mode,
            })
        }
    }

    #[tokio::test]
    async fn one_shot_uses_the_supplied_resolver() {
        let result = resolve_with(&EchoResolver, " https://youtu.be/dQw4w9WgXcQ ", Mode::Video)
            .await
            .unwrap();
        assert_eq!(result.download_url, "resolved:https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(result.mode, Mode::Video);
    }

    #[tokio::test]
    async fn one_shot_rejects_bad_links_before_resolving() {
        let err = resolve_with(&EchoResolver, "not a url", Mode::Video)
            .await
            .unwrap_err();
        assert_eq!(err.cause(), ErrorCause::UserInput);
    }
}
