//! Caption payload parsers.
//!
//! Each format turns a raw payload into an ordered list of [`Cue`]s, or `None`
//! when nothing usable was found. A payload that looks like a format but holds
//! zero cues is a miss, never an empty success.

mod srt;
mod vtt;
mod xml;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{Cue, timestamp};

pub use srt::SrtParser;
pub use vtt::VttParser;
pub use xml::XmlParser;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Turns a raw caption payload into cues
pub trait CueParser {
    fn parse(&self, raw: &str) -> Option<Vec<Cue>>;
}

/// Serialization a caption payload arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionFormat {
    Xml,
    Vtt,
    #[serde(rename = "srt")]
    SrtLike,
}

impl CaptionFormat {
    /// Guess the format of a payload from its signature.
    ///
    /// Anything that is neither WebVTT nor timed-text XML is handed to the
    /// SubRip-shaped parser as a last resort.
    pub fn sniff(body: &str) -> Self {
        let body = body.trim_start_matches('\u{feff}').trim_start();
        if body.starts_with("WEBVTT") {
            CaptionFormat::Vtt
        } else if body.contains("<transcript") {
            CaptionFormat::Xml
        } else {
            CaptionFormat::SrtLike
        }
    }

    pub fn parser(&self) -> &'static dyn CueParser {
        match self {
            CaptionFormat::Xml => &XmlParser,
            CaptionFormat::Vtt => &VttParser,
            CaptionFormat::SrtLike => &SrtParser,
        }
    }

    pub fn parse(&self, raw: &str) -> Option<Vec<Cue>> {
        self.parser().parse(raw)
    }
}

impl std::fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptionFormat::Xml => write!(f, "xml"),
            CaptionFormat::Vtt => write!(f, "vtt"),
            CaptionFormat::SrtLike => write!(f, "srt"),
        }
    }
}

/// Remove inline markup such as `<c>`, `<i>` or `<font color="...">`
pub(crate) fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Collapse runs of whitespace (newlines included) into single spaces
pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Line-oriented cue scanner shared by WebVTT and SubRip.
///
/// A line containing `-->` flushes the buffered cue and opens a new one timed by
/// the left-hand clock. Pure integer lines are cue indices and are skipped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineScanner {
    /// A blank line ends the current cue
    pub flush_on_blank: bool,
    pub decode_entities: bool,
}

impl LineScanner {
    pub fn scan(&self, raw: &str) -> Option<Vec<Cue>> {
        let mut cues = Vec::new();
        let mut start: Option<f64> = None;
        let mut buffer: Vec<String> = Vec::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                if self.flush_on_blank {
                    flush(&mut cues, &mut start, &mut buffer);
                }
                continue;
            }

            if let Some((left, _)) = line.split_once("-->") {
                flush(&mut cues, &mut start, &mut buffer);
                start = timestamp::parse_clock(left);
                continue;
            }

            if is_cue_index(line) {
                continue;
            }

            let text = if self.decode_entities {
                html_escape::decode_html_entities(&strip_tags(line)).into_owned()
            } else {
                strip_tags(line)
            };
            buffer.push(text);
        }
        flush(&mut cues, &mut start, &mut buffer);

        if cues.is_empty() { None } else { Some(cues) }
    }
}

fn flush(cues: &mut Vec<Cue>, start: &mut Option<f64>, buffer: &mut Vec<String>) {
    let text = squash_whitespace(&buffer.join(" "));
    buffer.clear();
    match start.take() {
        Some(start) if !text.is_empty() => cues.push(Cue { start, text }),
        _ => {}
    }
}

fn is_cue_index(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_digit())
}
