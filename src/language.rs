//! Language codes shared by the store, the pipeline and the providers.
//!
//! Codes are ISO-639-1 (`"en"`, `"es"` …).  Statistical detectors speak
//! ISO-639-3, so [`from_639_3`] maps them through [`isolang`].

use isolang::Language;

/// Translation targets offered out of the box.
pub const SUPPORTED_TARGETS: &[&str] = &["en", "pt", "es", "ru", "tr", "fr"];

/// Source code sent to providers when detection came back `Unknown`.
pub const UNDETERMINED: &str = "und";

/// Normalize a provider-reported code: trimmed, lower case, region subtag
/// dropped (`"pt-BR"` → `"pt"`).  Returns `None` for empty or explicit
/// "unknown"/"und" answers.
pub fn normalize(code: &str) -> Option<String> {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match primary.as_str() {
        "" | "unknown" | UNDETERMINED => None,
        _ if primary.chars().all(|c| c.is_ascii_alphabetic()) => Some(primary),
        _ => None,
    }
}

/// `true` when `code` is a registered ISO-639-1 code.
pub fn is_known(code: &str) -> bool {
    Language::from_639_1(code).is_some()
}

/// Map an ISO-639-3 code (as returned by `whatlang`) to ISO-639-1.
pub fn from_639_3(code: &str) -> Option<&'static str> {
    Language::from_639_3(code).and_then(|lang| lang.to_639_1())
}

/// English display name for an ISO-639-1 code, falling back to the code.
///
/// ```
/// assert_eq!(text_annotator::language::display_name("es"), "Spanish");
/// assert_eq!(text_annotator::language::display_name("zz"), "zz");
/// ```
pub fn display_name(code: &str) -> String {
    Language::from_639_1(code)
        .map(|lang| lang.to_name().to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_region() {
        assert_eq!(normalize("EN"), Some("en".to_string()));
        assert_eq!(normalize(" pt-BR "), Some("pt".to_string()));
        assert_eq!(normalize("zh_Hant"), Some("zh".to_string()));
    }

    #[test]
    fn normalize_rejects_unknown_answers() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("Unknown"), None);
        assert_eq!(normalize("und"), None);
        assert_eq!(normalize("e1"), None);
    }

    #[test]
    fn known_codes() {
        assert!(is_known("en"));
        assert!(is_known("tr"));
        assert!(!is_known("xx"));
        assert!(!is_known("the"));
    }

    #[test]
    fn maps_639_3_codes() {
        assert_eq!(from_639_3("eng"), Some("en"));
        assert_eq!(from_639_3("spa"), Some("es"));
        assert_eq!(from_639_3("rus"), Some("ru"));
        assert_eq!(from_639_3("qqq"), None);
    }

    #[test]
    fn supported_targets_have_names() {
        for code in SUPPORTED_TARGETS {
            assert_ne!(display_name(code), *code, "no name for {code}");
        }
        assert_eq!(display_name("tr"), "Turkish");
    }
}
