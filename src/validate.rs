use crate::error::{Result, TubeGrabError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Known watch-page / short-link / embed / legacy user-video shapes. The
/// capture is the candidate video id; it only counts if it is exactly 11
/// characters.
static ID_SHAPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|/v/|/u/\w/|embed/|watch\?)\??v?=?([^#&?/]*)")
        .expect("id shape pattern is valid")
});

/// Check the trimmed input and hand back the URL to forward to the resolver.
///
/// Path and query are forwarded verbatim; only the domain is judged here.
pub fn validate(raw: &str) -> Result<String> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(TubeGrabError::EmptyInput);
    }
    if !is_supported_url(url) {
        tracing::debug!(input = url, "rejected unsupported link");
        return Err(TubeGrabError::UnsupportedUrl);
    }
    Ok(url.to_string())
}

/// Check if URL points at YouTube using strict domain validation.
/// Scheme is optional and defaults to https.
pub fn is_supported_url(url: &str) -> bool {
    let normalized = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    let Ok(parsed) = Url::parse(&normalized) else {
        return false;
    };
    let Some(domain) = parsed.domain() else {
        return false;
    };

    let domain_ok = domain == "youtube.com"
        || domain.ends_with(".youtube.com")
        || domain == "youtu.be"
        || domain.ends_with(".youtu.be");

    // A bare domain with nothing after it is not a video link.
    let has_target = parsed.path() != "/" && !parsed.path().is_empty() || parsed.query().is_some();

    domain_ok && has_target
}

/// Best-effort canonical-id extraction, for the thumbnail only. Any capture
/// that is not exactly 11 characters yields `None`; that is not an error and
/// never blocks resolution.
pub fn extract_video_id(url: &str) -> Option<String> {
    let captured = ID_SHAPES.captures(url)?.get(1)?.as_str();
    (captured.len() == 11).then(|| captured.to_string())
}

/// Construct thumbnail URL from a canonical video id.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/mqdefault.jpg", video_id)
}
