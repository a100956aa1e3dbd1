//! Cue text assembly with per-language spacing.

use crate::language::{LanguageRules, Spacing};
use crate::token::Token;

/// Join tokens into display text.
///
/// No space is inserted after a clitic (`qu'il`), before an enclitic
/// (`vas-tu`) or closing punctuation (`Marie.`), or after an opening bracket.
/// Languages with spaced guillemets keep a space inside `« »`.
/// Unspaced scripts only separate two ASCII alphanumeric neighbours.
pub fn join_text(tokens: &[Token], rules: &LanguageRules) -> String {
    let capacity = tokens.iter().map(|t| t.text.len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    let mut prev: Option<&str> = None;
    for token in tokens {
        if let Some(p) = prev
            && needs_space(p, &token.text, rules)
        {
            text.push(' ');
        }
        text.push_str(&token.text);
        prev = Some(&token.text);
    }
    text
}

/// Character count of `join_text(tokens, rules)` without building it.
pub fn joined_char_count(tokens: &[Token], rules: &LanguageRules) -> usize {
    let letters: usize = tokens.iter().map(Token::char_len).sum();
    let spaces = tokens
        .windows(2)
        .filter(|pair| needs_space(&pair[0].text, &pair[1].text, rules))
        .count();
    letters + spaces
}

pub(crate) fn needs_space(prev: &str, next: &str, rules: &LanguageRules) -> bool {
    let (Some(prev_last), Some(next_first)) = (prev.chars().next_back(), next.chars().next())
    else {
        return false;
    };

    if rules.spacing == Spacing::Unspaced {
        return prev_last.is_ascii_alphanumeric() && next_first.is_ascii_alphanumeric();
    }
    if rules.spaced_guillemets && (prev_last == '«' || next_first == '»') {
        return true;
    }
    if rules.is_clitic(prev) || LanguageRules::attaches_right(prev_last) {
        return false;
    }
    if rules.attaches_left(next_first) || rules.is_enclitic(next) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::test_support::stream;

    fn joined(language: &str, words: &[&str]) -> String {
        let s = stream(language, words);
        join_text(s.tokens(), s.rules())
    }

    #[test]
    fn plain_words_are_space_separated() {
        assert_eq!(joined("en", &["I", "am", "fine"]), "I am fine");
    }

    #[test]
    fn punctuation_and_enclitics_attach_left() {
        assert_eq!(
            joined("fr", &["Comment", "vas", "-tu", "?"]),
            "Comment vas-tu?"
        );
        assert_eq!(joined("fr", &["Bonjour", "Marie", "."]), "Bonjour Marie.");
        assert_eq!(joined("en", &["it", "'s", "fine", ","]), "it's fine,");
    }

    #[test]
    fn clitics_attach_right() {
        assert_eq!(joined("fr", &["qu'", "il", "part"]), "qu'il part");
        assert_eq!(joined("it", &["dell'", "anno"]), "dell'anno");
        assert_eq!(
            joined("en", &["rock", "'n'", "roll"]),
            "rock 'n' roll",
            "English has no clitic stems"
        );
    }

    #[test]
    fn brackets_hug_their_content() {
        assert_eq!(joined("en", &["(", "aside", ")"]), "(aside)");
        assert_eq!(joined("es", &["¿", "Qué", "?"]), "¿Qué?");
    }

    #[test]
    fn guillemets_follow_language_convention() {
        assert_eq!(
            joined("fr", &["Il", "dit", "«", "Bonjour", "»", "."]),
            "Il dit « Bonjour »."
        );
        assert_eq!(joined("es", &["«", "Hola", "»"]), "«Hola»");
    }

    #[test]
    fn quoted_words_and_dialogue_dashes_keep_their_space() {
        assert_eq!(
            joined("en", &["He", "said", "'hello", "there'", "to", "me"]),
            "He said 'hello there' to me"
        );
        assert_eq!(
            joined("fr", &["Tu", "viens?", "-Oui"]),
            "Tu viens? -Oui"
        );
    }

    #[test]
    fn unspaced_scripts_join_without_spaces() {
        assert_eq!(joined("zh", &["我们", "走", "吧", "。"]), "我们走吧。");
        assert_eq!(joined("ja", &["GPU", "4090", "です"]), "GPU 4090です");
    }

    #[test]
    fn char_count_matches_joined_text() {
        let cases: &[(&str, &[&str])] = &[
            ("fr", &["Comment", "vas", "-tu", "?"]),
            ("fr", &["qu'", "il", "part", "."]),
            ("fr", &["«", "Oui", "»", "."]),
            ("zh", &["我们", "走", "吧", "。"]),
            ("en", &["Hello"]),
        ];
        for (lang, words) in cases {
            let s = stream(lang, words);
            let text = join_text(s.tokens(), s.rules());
            assert_eq!(
                joined_char_count(s.tokens(), s.rules()),
                text.chars().count(),
                "mismatch for {text:?}"
            );
        }
    }

    #[test]
    fn empty_slice_joins_to_empty() {
        let rules = LanguageRules::for_language("en");
        assert_eq!(join_text(&[], rules), "");
        assert_eq!(joined_char_count(&[], rules), 0);
    }
}
