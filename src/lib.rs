pub mod config;
pub mod error;
pub mod formats;
pub mod matrix;
pub mod output;
pub mod timestamp;
pub mod youtube;

use std::sync::LazyLock;

use log::info;
use regex::Regex;
use serde::Serialize;

pub use error::{Error, Result};
use formats::CaptionFormat;
use matrix::RetrievalAttempt;
use youtube::VideoHost;

/// Language reported when no caption track was found
pub const UNKNOWN_LANGUAGE: &str = "unknown";

const NO_CAPTIONS_INFO: &str = "No public or auto-generated captions are available for this video.";

/// URL shapes tried in order; each captures the 11-character id
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"youtube\.com/watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtu\.be/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtube(?:-nocookie)?\.com/embed/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtube\.com/shorts/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"^([A-Za-z0-9_-]{11})$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid id pattern"))
    .collect()
});

/// A single captioned utterance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    /// Offset from the start of the video, in seconds
    pub start: f64,
    pub text: String,
}

/// Canonical YouTube video id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cues chosen by the caption resolver, tagged with where they came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptResult {
    pub language: String,
    pub format: Option<CaptionFormat>,
    pub cues: Vec<Cue>,
}

impl TranscriptResult {
    /// Outcome of a matrix scan in which every attempt missed
    pub fn not_found() -> Self {
        Self {
            language: UNKNOWN_LANGUAGE.to_string(),
            format: None,
            cues: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// One `[MM:SS] text` line per cue
    pub fn lines(&self) -> Vec<String> {
        self.cues.iter().map(output::render_cue).collect()
    }
}

/// Everything handed back to the caller for one video
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTranscript {
    pub video_id: VideoId,
    pub video_title: String,
    pub transcript: String,
    pub language: String,
    pub format: Option<CaptionFormat>,
    pub no_captions_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    let input = input.trim();
    ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .map(|caps| VideoId(caps[1].to_string()))
        .ok_or_else(|| Error::InvalidIdentifier(input.to_string()))
}

/// Resolve the title and transcript for a video URL or id.
///
/// Title and caption lookups run concurrently; a failed title lookup only
/// degrades the title. Dropping the returned future cancels in-flight requests.
pub async fn fetch_transcript<H: VideoHost>(
    host: &H,
    input: &str,
    matrix: &[RetrievalAttempt],
) -> Result<VideoTranscript> {
    let video_id = extract_video_id(input)?;
    info!("Resolving transcript for {video_id}");

    let (video_title, captions) = tokio::join!(
        youtube::resolve_title(host, &video_id),
        youtube::resolve_captions(host, &video_id, matrix),
    );
    let captions = captions?;

    let transcript = output::render_lines(&captions.cues);
    let no_captions_found = output::is_blank(&transcript);

    Ok(VideoTranscript {
        video_id,
        video_title,
        transcript,
        language: captions.language,
        format: captions.format,
        no_captions_found,
        info: no_captions_found.then(|| NO_CAPTIONS_INFO.to_string()),
    })
}
