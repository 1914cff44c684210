use log::debug;
use quick_xml::Reader;
use quick_xml::events::Event;

use super::{CueParser, squash_whitespace, strip_tags};
use crate::Cue;

/// YouTube timed-text XML: `<transcript><text start=".." dur="..">..</text></transcript>`
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl CueParser for XmlParser {
    fn parse(&self, raw: &str) -> Option<Vec<Cue>> {
        let mut reader = Reader::from_str(raw);
        // Stray close tags outside <text> elements must not end the scan
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        let mut cues = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"text" => {
                    let start = e
                        .attributes()
                        .flatten()
                        .find(|attr| attr.key.as_ref() == b"start")
                        .and_then(|attr| String::from_utf8_lossy(&attr.value).trim().parse::<f64>().ok())
                        .filter(|s| s.is_finite() && *s >= 0.0);

                    // Body is read verbatim so nested markup survives for stripping below
                    let body = match reader.read_text(e.name()) {
                        Ok(body) => body,
                        Err(err) => {
                            debug!("Stopping timed-text scan: {err}");
                            break;
                        }
                    };

                    let text = clean_body(&body);
                    match start {
                        Some(start) if !text.is_empty() => cues.push(Cue { start, text }),
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(err) => {
                    debug!("Stopping timed-text scan: {err}");
                    break;
                }
                _ => {}
            }
        }

        if cues.is_empty() { None } else { Some(cues) }
    }
}

/// Bodies arrive escaped once by XML and often once more by YouTube (`&amp;#39;`)
fn clean_body(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let stripped = strip_tags(&decoded);
    let decoded = html_escape::decode_html_entities(&stripped);
    squash_whitespace(&decoded)
}
