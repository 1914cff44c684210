use super::{CueParser, LineScanner};
use crate::Cue;

const SCANNER: LineScanner = LineScanner {
    flush_on_blank: true,
    decode_entities: true,
};

/// WebVTT, including YouTube's auto-generated flavour with inline word timings
#[derive(Debug, Clone, Copy, Default)]
pub struct VttParser;

impl CueParser for VttParser {
    fn parse(&self, raw: &str) -> Option<Vec<Cue>> {
        SCANNER.scan(raw)
    }
}
