//! Meeting classification
//!
//! Two detectors run over the lower-cased full text of each document: a
//! first-match keyword scan for the meeting type and a fixed-order pair of
//! date patterns. Neither scores nor multi-labels; the first hit wins.

use std::sync::LazyLock;

use regex::Regex;

/// Classification when no type keyword matches
pub const UNKNOWN_TYPE: &str = "Desconhecido";

/// Classification when neither date pattern matches
pub const UNKNOWN_DATE: &str = "Data não identificada";

/// Investment-committee meeting label
pub const TYPE_COMITE: &str = "Comitê de Investimentos";

/// Council meeting label (administrative or fiscal)
pub const TYPE_CONSELHO: &str = "Conselho";

// Numeric dates like 12/04/2024, then written dates like "3 de março de 2025".
// Pattern order is fixed; the numeric form wins even when a written date
// appears earlier in the text.
static DATE_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").expect("valid numeric date pattern"),
        Regex::new(r"\b\d{1,2}\s+de\s+[a-zç]+\s+de\s+\d{4}\b").expect("valid written date pattern"),
    ]
});

/// Keyword phrases that identify each meeting type
#[derive(Debug, Clone)]
pub struct MeetingKeywords {
    /// Phrases marking an investment-committee meeting
    pub comite: Vec<String>,

    /// Phrases marking a council meeting
    pub conselho: Vec<String>,
}

impl Default for MeetingKeywords {
    fn default() -> Self {
        Self {
            comite: ["comitê de investimentos", "comite de investimentos"]
                .into_iter()
                .map(String::from)
                .collect(),
            conselho: [
                "conselho de administração",
                "conselho administrativo",
                "conselho fiscal",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Detect the meeting type. Committee phrases are checked before council
/// phrases; no match means [`UNKNOWN_TYPE`].
pub fn detect_meeting_type(text: &str, keywords: &MeetingKeywords) -> String {
    let text = text.to_lowercase();
    if keywords.comite.iter().any(|k| text.contains(k.as_str())) {
        return TYPE_COMITE.to_string();
    }
    if keywords.conselho.iter().any(|k| text.contains(k.as_str())) {
        return TYPE_CONSELHO.to_string();
    }
    UNKNOWN_TYPE.to_string()
}

/// Detect the meeting date: first match of the first pattern that matches
/// anywhere, falling back to [`UNKNOWN_DATE`].
pub fn detect_meeting_date(text: &str) -> String {
    let text = text.to_lowercase();
    for pattern in DATE_PATTERNS.iter() {
        if let Some(found) = pattern.find(&text) {
            return found.as_str().to_string();
        }
    }
    UNKNOWN_DATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committee_text_with_numeric_date() {
        let text = "Comitê de Investimentos reunido em 12/04/2024 deliberou sobre a carteira.";
        assert_eq!(
            detect_meeting_type(text, &MeetingKeywords::default()),
            TYPE_COMITE
        );
        assert_eq!(detect_meeting_date(text), "12/04/2024");
    }

    #[test]
    fn committee_wins_over_council_when_both_appear() {
        let text = "Ata do conselho fiscal com participação do comite de investimentos";
        assert_eq!(
            detect_meeting_type(text, &MeetingKeywords::default()),
            TYPE_COMITE
        );
    }

    #[test]
    fn council_variants_all_classify_as_conselho() {
        let kw = MeetingKeywords::default();
        for text in [
            "Reunião do Conselho de Administração",
            "ata do conselho administrativo",
            "CONSELHO FISCAL - deliberações",
        ] {
            assert_eq!(detect_meeting_type(text, &kw), TYPE_CONSELHO);
        }
    }

    #[test]
    fn unmatched_text_gets_defaults() {
        let text = "Documento sem qualquer marcação esperada.";
        assert_eq!(
            detect_meeting_type(text, &MeetingKeywords::default()),
            UNKNOWN_TYPE
        );
        assert_eq!(detect_meeting_date(text), UNKNOWN_DATE);
    }

    #[test]
    fn written_date_is_recognized() {
        assert_eq!(
            detect_meeting_date("Reunião realizada em 3 de março de 2025."),
            "3 de março de 2025"
        );
    }

    #[test]
    fn numeric_pattern_wins_even_when_written_date_comes_first() {
        let text = "em 5 de março de 2024, retificada em 01/02/2024";
        assert_eq!(detect_meeting_date(text), "01/02/2024");
    }

    #[test]
    fn detection_is_idempotent() {
        let text = "Comitê de Investimentos, 7/8/2023";
        let first = (
            detect_meeting_type(text, &MeetingKeywords::default()),
            detect_meeting_date(text),
        );
        let second = (
            detect_meeting_type(text, &MeetingKeywords::default()),
            detect_meeting_date(text),
        );
        assert_eq!(first, second);
    }
}
