use super::{CueParser, LineScanner};
use crate::Cue;

const SCANNER: LineScanner = LineScanner {
    flush_on_blank: false,
    decode_entities: false,
};

/// SubRip-shaped text (`HH:MM:SS,mmm --> HH:MM:SS,mmm`), the last-resort format
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtParser;

impl CueParser for SrtParser {
    fn parse(&self, raw: &str) -> Option<Vec<Cue>> {
        SCANNER.scan(raw)
    }
}
