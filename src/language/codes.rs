//! Language codes accepted from the recognition engine.
//!
//! Codes and names follow the Whisper tokenizer's language table, which is
//! what recognizers in front of this crate emit.

use crate::error::{CueError, Result};

#[rustfmt::skip]
const LANGUAGES: &[(&str, &str)] = &[
    ("af", "afrikaans"),  ("am", "amharic"),   ("ar", "arabic"),     ("as", "assamese"),
    ("az", "azerbaijani"), ("ba", "bashkir"),  ("be", "belarusian"), ("bg", "bulgarian"),
    ("bn", "bengali"),    ("bo", "tibetan"),   ("br", "breton"),     ("bs", "bosnian"),
    ("ca", "catalan"),    ("cs", "czech"),     ("cy", "welsh"),      ("da", "danish"),
    ("de", "german"),     ("el", "greek"),     ("en", "english"),    ("es", "spanish"),
    ("et", "estonian"),   ("eu", "basque"),    ("fa", "persian"),    ("fi", "finnish"),
    ("fo", "faroese"),    ("fr", "french"),    ("gl", "galician"),   ("gu", "gujarati"),
    ("ha", "hausa"),      ("haw", "hawaiian"), ("he", "hebrew"),     ("hi", "hindi"),
    ("hr", "croatian"),   ("ht", "haitian creole"), ("hu", "hungarian"), ("hy", "armenian"),
    ("id", "indonesian"), ("is", "icelandic"), ("it", "italian"),    ("ja", "japanese"),
    ("jw", "javanese"),   ("ka", "georgian"),  ("kk", "kazakh"),     ("km", "khmer"),
    ("kn", "kannada"),    ("ko", "korean"),    ("la", "latin"),      ("lb", "luxembourgish"),
    ("ln", "lingala"),    ("lo", "lao"),       ("lt", "lithuanian"), ("lv", "latvian"),
    ("mg", "malagasy"),   ("mi", "maori"),     ("mk", "macedonian"), ("ml", "malayalam"),
    ("mn", "mongolian"),  ("mr", "marathi"),   ("ms", "malay"),      ("mt", "maltese"),
    ("my", "myanmar"),    ("nb", "norwegian bokmål"), ("ne", "nepali"), ("nl", "dutch"),
    ("nn", "nynorsk"),    ("no", "norwegian"), ("oc", "occitan"),    ("pa", "punjabi"),
    ("pl", "polish"),     ("ps", "pashto"),    ("pt", "portuguese"), ("ro", "romanian"),
    ("ru", "russian"),    ("sa", "sanskrit"),  ("sd", "sindhi"),     ("si", "sinhala"),
    ("sk", "slovak"),     ("sl", "slovenian"), ("sn", "shona"),      ("so", "somali"),
    ("sq", "albanian"),   ("sr", "serbian"),   ("su", "sundanese"),  ("sv", "swedish"),
    ("sw", "swahili"),    ("ta", "tamil"),     ("te", "telugu"),     ("tg", "tajik"),
    ("th", "thai"),       ("tk", "turkmen"),   ("tl", "tagalog"),    ("tr", "turkish"),
    ("tt", "tatar"),      ("uk", "ukrainian"), ("ur", "urdu"),       ("uz", "uzbek"),
    ("vi", "vietnamese"), ("yi", "yiddish"),   ("yo", "yoruba"),     ("yue", "cantonese"),
    ("zh", "chinese"),
];

/// Check if a language code is one the recognizer can emit.
pub fn is_valid_language(code: &str) -> bool {
    LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Full language name for a code, or the code itself if unknown.
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, name)| name)
}

/// Validate a language code and return it.
pub fn validate_language(code: &str) -> Result<&str> {
    if is_valid_language(code) {
        Ok(code)
    } else {
        Err(CueError::invalid_value(
            "language",
            format!(
                "unsupported language '{}' ({} languages are known)",
                code,
                LANGUAGES.len()
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_are_valid() {
        for code in ["fr", "en", "de", "zh", "yue", "haw"] {
            assert!(is_valid_language(code), "{code} should be valid");
        }
    }

    #[test]
    fn unknown_codes_are_invalid() {
        assert!(!is_valid_language("xx"));
        assert!(!is_valid_language(""));
        assert!(!is_valid_language("FR"));
    }

    #[test]
    fn language_name_falls_back_to_code() {
        assert_eq!(language_name("fr"), "french");
        assert_eq!(language_name("qq"), "qq");
    }

    #[test]
    fn validate_language_reports_key() {
        assert_eq!(validate_language("it").unwrap(), "it");
        let err = validate_language("klingon").unwrap_err().to_string();
        assert!(err.contains("language"), "got: {err}");
        assert!(err.contains("klingon"), "got: {err}");
    }
}
