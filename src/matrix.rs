use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGES: [&str; 4] = ["pt", "pt-BR", "en", "es"];

pub const DEFAULT_VARIANTS: [Variant; 4] = [Variant::Plain, Variant::Asr, Variant::Vtt, Variant::AsrVtt];

/// Which flavour of caption track to request for a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "asr")]
    Asr,
    #[serde(rename = "vtt")]
    Vtt,
    #[serde(rename = "asr+vtt")]
    AsrVtt,
}

impl Variant {
    /// Value of the `kind` query parameter, if any
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Variant::Asr | Variant::AsrVtt => Some("asr"),
            Variant::Plain | Variant::Vtt => None,
        }
    }

    /// Value of the `fmt` query parameter; absent means the endpoint's XML default
    pub fn fmt(&self) -> Option<&'static str> {
        match self {
            Variant::Vtt | Variant::AsrVtt => Some("vtt"),
            Variant::Plain | Variant::Asr => None,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Plain => write!(f, "plain"),
            Variant::Asr => write!(f, "asr"),
            Variant::Vtt => write!(f, "vtt"),
            Variant::AsrVtt => write!(f, "asr+vtt"),
        }
    }
}

/// One entry of the retrieval matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievalAttempt {
    pub language: String,
    pub variant: Variant,
}

impl std::fmt::Display for RetrievalAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.language, self.variant)
    }
}

/// Build the priority-ordered matrix: every variant of the first language, then
/// every variant of the next one, and so on.
pub fn build<S: AsRef<str>>(languages: &[S], variants: &[Variant]) -> Vec<RetrievalAttempt> {
    languages
        .iter()
        .flat_map(|lang| {
            variants.iter().map(move |&variant| RetrievalAttempt {
                language: lang.as_ref().to_string(),
                variant,
            })
        })
        .collect()
}

pub fn default_matrix() -> Vec<RetrievalAttempt> {
    build(&DEFAULT_LANGUAGES, &DEFAULT_VARIANTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_order() {
        let matrix = default_matrix();
        assert_eq!(matrix.len(), 16);
        let labels: Vec<String> = matrix.iter().take(5).map(|a| a.to_string()).collect();
        assert_eq!(labels, ["pt/plain", "pt/asr", "pt/vtt", "pt/asr+vtt", "pt-BR/plain"]);
        assert_eq!(matrix.last().unwrap().to_string(), "es/asr+vtt");
    }

    #[test]
    fn test_variant_query_params() {
        assert_eq!((Variant::Plain.kind(), Variant::Plain.fmt()), (None, None));
        assert_eq!((Variant::Asr.kind(), Variant::Asr.fmt()), (Some("asr"), None));
        assert_eq!((Variant::Vtt.kind(), Variant::Vtt.fmt()), (None, Some("vtt")));
        assert_eq!((Variant::AsrVtt.kind(), Variant::AsrVtt.fmt()), (Some("asr"), Some("vtt")));
    }

    #[test]
    fn test_build_custom_matrix() {
        let matrix = build(&["en".to_string()], &[Variant::Vtt, Variant::Plain]);
        assert_eq!(
            matrix,
            vec![
                RetrievalAttempt {
                    language: "en".to_string(),
                    variant: Variant::Vtt
                },
                RetrievalAttempt {
                    language: "en".to_string(),
                    variant: Variant::Plain
                },
            ]
        );
    }

    #[test]
    fn test_empty_inputs_give_empty_matrix() {
        assert!(build::<&str>(&[], &DEFAULT_VARIANTS).is_empty());
        assert!(build(&DEFAULT_LANGUAGES, &[]).is_empty());
    }
}
