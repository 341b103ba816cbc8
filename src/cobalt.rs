use crate::core::{Mode, ResolutionRequest, ResolutionResult, Resolver};
use crate::error::{Result, TubeGrabError};
use reqwest::header::{ACCEPT, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public cobalt instance, no API key required.
pub const DEFAULT_ENDPOINT: &str = "https://api.cobalt.tools/api/json";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";
const FALLBACK_REJECTION: &str = "Could not fetch video. Try again.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoBody<'a> {
    url: &'a str,
    v_quality: &'a str,
    filename_pattern: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioBody<'a> {
    url: &'a str,
    is_audio_only: bool,
}

/// Loosely-typed reply body; every field is optional on the wire.
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// The reply, normalized into something the rest of the crate can match on
/// instead of scattering presence checks around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A direct download reference.
    Direct(String),
    /// The resolver explicitly refused, with its own text when it gave one.
    Rejected(Option<String>),
    /// Neither a link nor an explicit error. Includes the "pick a format"
    /// shape the service returns under load; no selection policy is guessed.
    Unrecognized,
}

fn classify(raw: RawReply) -> Reply {
    match raw.status.as_deref() {
        Some("error") | Some("rate-limit") => Reply::Rejected(raw.text),
        _ => match raw.url {
            Some(url) if !url.is_empty() => Reply::Direct(url),
            _ => Reply::Unrecognized,
        },
    }
}

/// HTTP client for a cobalt-compatible resolver endpoint.
pub struct CobaltClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CobaltClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// POST a request body and classify whatever comes back. cobalt reports
    /// refusals inside the JSON body, often with a non-2xx status line, so
    /// the body is parsed regardless of the HTTP status.
    async fn post<B: Serialize>(&self, body: &B, source_url: &str) -> Result<Reply> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TubeGrabError::RequestTimeout(source_url.to_string())
                } else {
                    TubeGrabError::Network(e)
                }
            })?;

        let text = response.text().await.map_err(TubeGrabError::Network)?;
        let raw: RawReply = serde_json::from_str(&text)?;
        Ok(classify(raw))
    }
}

impl Default for CobaltClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Resolver for CobaltClient {
    async fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionResult> {
        tracing::debug!(seq = request.seq, mode = ?request.mode, "dispatching resolver request");

        // Video and audio are independent requests; no shared ticket.
        let reply = match request.mode {
            Mode::Video => {
                let body = VideoBody {
                    url: &request.source_url,
                    v_quality: "1080",
                    filename_pattern: "basic",
                };
                self.post(&body, &request.source_url).await?
            }
            Mode::AudioOnly => {
                let body = AudioBody {
                    url: &request.source_url,
                    is_audio_only: true,
                };
                self.post(&body, &request.source_url).await?
            }
        };

        match reply {
            Reply::Direct(download_url) => Ok(ResolutionResult {
                download_url,
                mode: request.mode,
            }),
            Reply::Rejected(text) => Err(TubeGrabError::Rejected(
                text.unwrap_or_else(|| FALLBACK_REJECTION.to_string()),
            )),
            Reply::Unrecognized => {
                tracing::warn!(seq = request.seq, "resolver reply carried no download link");
                Err(TubeGrabError::UnrecognizedReply)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCause;

    fn classify_json(body: &str) -> Reply {
        classify(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn explicit_error_with_text_is_a_rejection() {
        assert_eq!(
            classify_json(r#"{"status":"error","text":"Private video"}"#),
            Reply::Rejected(Some("Private video".to_string()))
        );
    }

    #[test]
    fn explicit_error_without_text_still_rejects() {
        assert_eq!(classify_json(r#"{"status":"error"}"#), Reply::Rejected(None));
        assert_eq!(
            classify_json(r#"{"status":"rate-limit"}"#),
            Reply::Rejected(None)
        );
    }

    #[test]
    fn url_without_status_is_a_direct_link() {
        assert_eq!(
            classify_json(r#"{"url":"https://cdn.example/file.mp4"}"#),
            Reply::Direct("https://cdn.example/file.mp4".to_string())
        );
    }

    #[test]
    fn stream_status_with_url_is_a_direct_link() {
        assert_eq!(
            classify_json(r#"{"status":"stream","url":"https://cdn.example/a.mp4"}"#),
            Reply::Direct("https://cdn.example/a.mp4".to_string())
        );
    }

    #[test]
    fn picker_shape_is_unrecognized() {
        assert_eq!(
            classify_json(r#"{"status":"picker","picker":[{"url":"https://cdn.example/1.mp4"}]}"#),
            Reply::Unrecognized
        );
    }

    #[test]
    fn empty_body_is_unrecognized() {
        assert_eq!(classify_json("{}"), Reply::Unrecognized);
        assert_eq!(classify_json(r#"{"url":""}"#), Reply::Unrecognized);
    }

    #[test]
    fn video_body_uses_the_wire_field_names() {
        let body = VideoBody {
            url: "https://youtu.be/dQw4w9WgXcQ",
            v_quality: "1080",
            filename_pattern: "basic",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["url"], "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(value["vQuality"], "1080");
        assert_eq!(value["filenamePattern"], "basic");
    }

    #[test]
    fn audio_body_uses_the_wire_field_names() {
        let body = AudioBody {
            url: "https://youtu.be/dQw4w9WgXcQ",
            is_audio_only: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["isAudioOnly"], true);
    }

    #[test]
    fn rejection_text_survives_into_the_error() {
        // The client keeps remote text verbatim; the orchestrator decides
        // what the user actually sees.
        let err = match classify_json(r#"{"status":"error","text":"Private video"}"#) {
            Reply::Rejected(text) => {
                TubeGrabError::Rejected(text.unwrap_or_else(|| FALLBACK_REJECTION.to_string()))
            }
            other => panic!("unexpected reply: {other:?}"),
        };
        assert_eq!(err.to_string(), "Private video");
        assert_eq!(err.cause(), ErrorCause::RemoteRejection);
    }
}
