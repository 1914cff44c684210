use eyre::Result;

use crate::{Cue, VideoTranscript, timestamp};

/// Render a cue as `[MM:SS] text`
pub fn render_cue(cue: &Cue) -> String {
    format!("[{}] {}", timestamp::format_offset(cue.start), cue.text)
}

/// Render cues in source order, one line each
pub fn render_lines(cues: &[Cue]) -> String {
    cues.iter().map(render_cue).collect::<Vec<_>>().join("\n")
}

/// True when an assembled transcript carries no captions at all
pub fn is_blank(transcript: &str) -> bool {
    transcript.trim().is_empty()
}

/// Render as plain text: the transcript lines, nothing else
pub fn render_text(transcript: &VideoTranscript) -> String {
    transcript.transcript.clone()
}

pub fn render_json(transcript: &VideoTranscript) -> Result<String> {
    Ok(serde_json::to_string_pretty(transcript)?)
}

/// Title, a blank line, then the transcript
pub fn render_document(transcript: &VideoTranscript) -> String {
    format!("{}\n\n{}", transcript.video_title, transcript.transcript)
}

/// `transc-<slug>.txt`, where the slug keeps only lowercase ASCII letters and digits
pub fn document_filename(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect();
    format!("transc-{slug}.txt")
}
