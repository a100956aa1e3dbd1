//! Segmentation rule tables, one plain-data record per language.
//!
//! A table answers four questions for the segmentation stages:
//! - which punctuation marks close a sentence or a clause,
//! - which grammatical categories must not dangle at the end of a cue,
//! - which apostrophe-ending fragments are clitics bound to the next word,
//! - which leading fragments (`-tu`, `'s`) are enclitics bound to the
//!   previous word.
//!
//! Adding a language is a new entry in `REGISTRY`, never new code.

use crate::token::GrammaticalCategory;

/// How tokens of a language are separated when joined into cue text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Words are separated by a single space.
    Spaced,
    /// Words are written without spaces (Chinese, Japanese).
    Unspaced,
}

/// Kind of punctuation that ends a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    /// `, ; :` and equivalents.
    Clause,
    /// `. ! ? …` and equivalents.
    Sentence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRules {
    /// ISO 639-1 code the table is registered under.
    pub code: &'static str,
    /// Other codes recognizers use for the same language.
    pub aliases: &'static [&'static str],
    /// Categories pushed forward when they end a cue.
    pub danglable: &'static [GrammaticalCategory],
    /// Elided stems that form a clitic when followed by an apostrophe
    /// (`qu` in `qu'`). Empty when the language has no apostrophe clitics.
    pub clitic_stems: &'static [&'static str],
    /// Prefixes marking a token as an enclitic (`-` in `-tu`). The prefix
    /// must be followed by a lowercase letter, so a dialogue dash (`-Oui`)
    /// is not one.
    pub enclitic_prefixes: &'static [&'static str],
    /// Whole-token enclitic forms (`n't`).
    pub enclitic_forms: &'static [&'static str],
    /// Sentence-ending marks beyond `. ! ? …`.
    pub sentence_marks: &'static [char],
    /// Clause-ending marks beyond `, ; :`.
    pub clause_marks: &'static [char],
    /// Lowercased abbreviations whose final period does not end a sentence.
    pub abbreviations: &'static [&'static str],
    pub spacing: Spacing,
    /// Guillemets are set off by a space (`« Bonjour »`).
    pub spaced_guillemets: bool,
}

const BASE_SENTENCE_MARKS: &[char] = &['.', '!', '?', '…'];
const BASE_CLAUSE_MARKS: &[char] = &[',', ';', ':'];

/// Quotes and brackets that may trail a terminal mark (`said."`).
const TRAILING_CLOSERS: &[char] = &[
    '"', '\'', '’', '”', '»', ')', ']', '}', '」', '』', '）',
];

const APOSTROPHES: &[char] = &['\'', '’', 'ʼ'];

const ALL_FUNCTION_WORDS: &[GrammaticalCategory] = &[
    GrammaticalCategory::Article,
    GrammaticalCategory::Preposition,
    GrammaticalCategory::Conjunction,
];

/// Postpositional languages: particles follow their head, so only
/// clause-opening conjunctions may not end a cue.
const CONJUNCTIONS_ONLY: &[GrammaticalCategory] = &[GrammaticalCategory::Conjunction];

const CJK_SENTENCE_MARKS: &[char] = &['。', '！', '？'];
const CJK_CLAUSE_MARKS: &[char] = &['，', '；', '：', '、'];

const BASE: LanguageRules = LanguageRules {
    code: "",
    aliases: &[],
    danglable: ALL_FUNCTION_WORDS,
    clitic_stems: &[],
    enclitic_prefixes: &[],
    enclitic_forms: &[],
    sentence_marks: &[],
    clause_marks: &[],
    abbreviations: &[],
    spacing: Spacing::Spaced,
    spaced_guillemets: false,
};

/// Punctuation and spacing for languages without a registered table.
static GENERIC: LanguageRules = BASE;

static REGISTRY: &[LanguageRules] = &[
    LanguageRules {
        code: "ca",
        clitic_stems: &["l", "d", "m", "t", "s", "n"],
        enclitic_prefixes: &["-"],
        abbreviations: &["sr.", "sra.", "dr.", "dra."],
        ..BASE
    },
    LanguageRules { code: "da", ..BASE },
    LanguageRules {
        code: "de",
        abbreviations: &["z.b.", "bzw.", "usw.", "dr.", "hr.", "fr.", "nr.", "ca.", "vgl."],
        ..BASE
    },
    LanguageRules {
        code: "el",
        sentence_marks: &['\u{037E}'],
        clause_marks: &['\u{0387}'],
        ..BASE
    },
    LanguageRules {
        code: "en",
        enclitic_forms: &[
            "'s", "'re", "'ve", "'ll", "'d", "'m", "n't", "’s", "’re", "’ve", "’ll", "’d", "’m",
            "n’t",
        ],
        abbreviations: &[
            "mr.", "mrs.", "ms.", "dr.", "prof.", "st.", "vs.", "e.g.", "i.e.", "jr.", "sr.",
        ],
        ..BASE
    },
    LanguageRules {
        code: "es",
        abbreviations: &["sr.", "sra.", "srta.", "dr.", "dra.", "ud.", "uds."],
        ..BASE
    },
    LanguageRules { code: "fi", ..BASE },
    LanguageRules {
        code: "fr",
        clitic_stems: &[
            "l", "d", "j", "m", "n", "s", "t", "c", "qu", "jusqu", "lorsqu", "puisqu", "quoiqu",
            "presqu", "quelqu",
        ],
        enclitic_prefixes: &["-"],
        abbreviations: &["m.", "mm.", "mme.", "mlle.", "dr.", "st.", "ste.", "p.ex."],
        spaced_guillemets: true,
        ..BASE
    },
    LanguageRules { code: "hr", ..BASE },
    LanguageRules {
        code: "it",
        clitic_stems: &[
            "l", "un", "d", "dell", "all", "dall", "nell", "sull", "coll", "c", "n", "m", "t",
            "s", "v", "quest", "quell", "bell", "sant", "tutt", "buon", "nessun",
        ],
        abbreviations: &["sig.", "dott.", "prof.", "ing."],
        ..BASE
    },
    LanguageRules {
        code: "ja",
        danglable: CONJUNCTIONS_ONLY,
        sentence_marks: CJK_SENTENCE_MARKS,
        clause_marks: CJK_CLAUSE_MARKS,
        spacing: Spacing::Unspaced,
        ..BASE
    },
    LanguageRules {
        code: "ko",
        danglable: CONJUNCTIONS_ONLY,
        ..BASE
    },
    LanguageRules { code: "lt", ..BASE },
    LanguageRules { code: "mk", ..BASE },
    LanguageRules {
        code: "nb",
        aliases: &["no"],
        ..BASE
    },
    LanguageRules {
        code: "nl",
        abbreviations: &["dhr.", "mevr.", "bijv.", "o.a."],
        ..BASE
    },
    LanguageRules { code: "pl", ..BASE },
    LanguageRules {
        code: "pt",
        clitic_stems: &["d"],
        enclitic_prefixes: &["-"],
        abbreviations: &["sr.", "sra.", "dr.", "dra."],
        ..BASE
    },
    LanguageRules {
        code: "ro",
        enclitic_prefixes: &["-"],
        ..BASE
    },
    LanguageRules { code: "ru", ..BASE },
    LanguageRules { code: "sl", ..BASE },
    LanguageRules { code: "sv", ..BASE },
    LanguageRules { code: "uk", ..BASE },
    LanguageRules {
        code: "zh",
        sentence_marks: CJK_SENTENCE_MARKS,
        clause_marks: CJK_CLAUSE_MARKS,
        spacing: Spacing::Unspaced,
        ..BASE
    },
];

impl LanguageRules {
    /// Registered table for a language code.
    ///
    /// Accepts region-qualified codes (`fr-CA`, `pt_BR`) and is
    /// case-insensitive. Returns `None` for languages without a table, which
    /// turns grammar-aware correction into a pass-through.
    pub fn lookup(code: &str) -> Option<&'static LanguageRules> {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if primary.is_empty() {
            return None;
        }
        REGISTRY
            .iter()
            .find(|rules| rules.code == primary || rules.aliases.contains(&primary.as_str()))
    }

    /// Registered table, or the generic punctuation/spacing table.
    pub fn for_language(code: &str) -> &'static LanguageRules {
        Self::lookup(code).unwrap_or(&GENERIC)
    }

    /// Table used for languages without a registration.
    pub fn generic() -> &'static LanguageRules {
        &GENERIC
    }

    /// All registered tables.
    pub fn registered() -> &'static [LanguageRules] {
        REGISTRY
    }

    /// Classify the punctuation a token ends with.
    ///
    /// Trailing quotes and brackets are skipped (`said."` is a sentence end).
    /// A period closing a known abbreviation is not terminal.
    pub fn terminal_mark(&self, text: &str) -> Option<Terminal> {
        let core = text.trim_end_matches(TRAILING_CLOSERS);
        let last = core.chars().next_back()?;

        if BASE_SENTENCE_MARKS.contains(&last) || self.sentence_marks.contains(&last) {
            if last == '.' && self.is_abbreviation(core) {
                return None;
            }
            return Some(Terminal::Sentence);
        }
        if BASE_CLAUSE_MARKS.contains(&last) || self.clause_marks.contains(&last) {
            return Some(Terminal::Clause);
        }
        None
    }

    fn is_abbreviation(&self, core: &str) -> bool {
        if self.abbreviations.is_empty() {
            return false;
        }
        let lower = core.to_lowercase();
        self.abbreviations.contains(&lower.as_str())
    }

    /// True when `text` is an elided form bound to the following word
    /// (`qu'`, `l’`, `dell'`).
    pub fn is_clitic(&self, text: &str) -> bool {
        if self.clitic_stems.is_empty() {
            return false;
        }
        let Some(stem) = text.strip_suffix(APOSTROPHES) else {
            return false;
        };
        if stem.is_empty() {
            return false;
        }
        let lower = stem.to_lowercase();
        self.clitic_stems.contains(&lower.as_str())
    }

    /// True when `text` is bound to the preceding word (`-tu`, `'s`, `n't`).
    pub fn is_enclitic(&self, text: &str) -> bool {
        if text.ends_with(APOSTROPHES) {
            return false;
        }
        let lower = text.to_lowercase();
        if self.enclitic_forms.contains(&lower.as_str()) {
            return true;
        }
        self.enclitic_prefixes.iter().any(|prefix| {
            text.strip_prefix(prefix)
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_lowercase)
        })
    }

    /// True when `category` may not end a cue that has a successor.
    pub fn is_danglable(&self, category: GrammaticalCategory) -> bool {
        self.danglable.contains(&category)
    }

    /// True for characters that attach to the preceding token without a space.
    pub(crate) fn attaches_left(&self, ch: char) -> bool {
        BASE_SENTENCE_MARKS.contains(&ch)
            || BASE_CLAUSE_MARKS.contains(&ch)
            || self.sentence_marks.contains(&ch)
            || self.clause_marks.contains(&ch)
            || matches!(ch, ')' | ']' | '}' | '»' | '”' | '%' | '」' | '』' | '）')
    }

    /// True for characters after which the next token attaches without a space.
    pub(crate) fn attaches_right(ch: char) -> bool {
        matches!(ch, '(' | '[' | '{' | '«' | '“' | '¿' | '¡' | '「' | '『' | '（')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_two_dozen_languages() {
        let codes: Vec<&str> = LanguageRules::registered().iter().map(|r| r.code).collect();
        assert_eq!(codes.len(), 24);
        for code in ["ca", "de", "en", "es", "fr", "it", "ja", "pt", "ru", "zh"] {
            assert!(codes.contains(&code), "missing {code}");
        }
    }

    #[test]
    fn registry_codes_are_unique_and_known() {
        let codes: Vec<&str> = LanguageRules::registered().iter().map(|r| r.code).collect();
        for (i, code) in codes.iter().enumerate() {
            assert!(!codes[i + 1..].contains(code), "duplicate {code}");
            assert!(crate::language::is_valid_language(code), "unknown {code}");
        }
    }

    #[test]
    fn lookup_normalizes_region_and_case() {
        assert_eq!(LanguageRules::lookup("fr-CA").map(|r| r.code), Some("fr"));
        assert_eq!(LanguageRules::lookup("PT_br").map(|r| r.code), Some("pt"));
        assert_eq!(LanguageRules::lookup("no").map(|r| r.code), Some("nb"));
        assert!(LanguageRules::lookup("tlh").is_none());
        assert!(LanguageRules::lookup("").is_none());
    }

    #[test]
    fn for_language_falls_back_to_generic() {
        let rules = LanguageRules::for_language("sw");
        assert_eq!(rules.code, "");
        assert!(rules.clitic_stems.is_empty());
    }

    #[test]
    fn terminal_marks_are_classified() {
        let rules = LanguageRules::for_language("en");
        assert_eq!(rules.terminal_mark("done."), Some(Terminal::Sentence));
        assert_eq!(rules.terminal_mark("really?"), Some(Terminal::Sentence));
        assert_eq!(rules.terminal_mark("wait..."), Some(Terminal::Sentence));
        assert_eq!(rules.terminal_mark("so,"), Some(Terminal::Clause));
        assert_eq!(rules.terminal_mark(":"), Some(Terminal::Clause));
        assert_eq!(rules.terminal_mark("word"), None);
    }

    #[test]
    fn closing_quotes_do_not_hide_terminal_marks() {
        let rules = LanguageRules::for_language("en");
        assert_eq!(rules.terminal_mark("said.\""), Some(Terminal::Sentence));
        assert_eq!(rules.terminal_mark("(maybe)"), None);
        assert_eq!(rules.terminal_mark("(maybe.)"), Some(Terminal::Sentence));
    }

    #[test]
    fn abbreviations_are_not_sentence_ends() {
        assert_eq!(LanguageRules::for_language("en").terminal_mark("Dr."), None);
        assert_eq!(LanguageRules::for_language("fr").terminal_mark("Mme."), None);
        assert_eq!(
            LanguageRules::for_language("de").terminal_mark("Dr."),
            None,
            "German registers Dr. too"
        );
        assert_eq!(
            LanguageRules::for_language("fi").terminal_mark("Dr."),
            Some(Terminal::Sentence)
        );
    }

    #[test]
    fn language_specific_marks() {
        let zh = LanguageRules::for_language("zh");
        assert_eq!(zh.terminal_mark("你好。"), Some(Terminal::Sentence));
        assert_eq!(zh.terminal_mark("但是，"), Some(Terminal::Clause));
        let el = LanguageRules::for_language("el");
        assert_eq!(el.terminal_mark("τι\u{037E}"), Some(Terminal::Sentence));
        let en = LanguageRules::for_language("en");
        assert_eq!(en.terminal_mark("你好。"), None);
    }

    #[test]
    fn french_clitics_need_a_known_stem() {
        let fr = LanguageRules::for_language("fr");
        assert!(fr.is_clitic("qu'"));
        assert!(fr.is_clitic("L'"));
        assert!(fr.is_clitic("jusqu’"));
        assert!(!fr.is_clitic("'"));
        assert!(!fr.is_clitic("aujourd'hui"));
        assert!(!fr.is_clitic("maison"));
    }

    #[test]
    fn italian_po_is_not_a_clitic() {
        let it = LanguageRules::for_language("it");
        assert!(it.is_clitic("dell'"));
        assert!(it.is_clitic("un'"));
        assert!(!it.is_clitic("po'"));
    }

    #[test]
    fn languages_without_stems_have_no_clitics() {
        assert!(!LanguageRules::for_language("en").is_clitic("goin'"));
        assert!(!LanguageRules::for_language("es").is_clitic("l'"));
    }

    #[test]
    fn enclitics_by_prefix_and_form() {
        let fr = LanguageRules::for_language("fr");
        assert!(fr.is_enclitic("-tu"));
        assert!(fr.is_enclitic("-t-il"));
        assert!(!fr.is_enclitic("-"));
        assert!(!fr.is_enclitic("-5"));
        assert!(!fr.is_enclitic("tu"));

        let en = LanguageRules::for_language("en");
        assert!(en.is_enclitic("'s"));
        assert!(en.is_enclitic("n't"));
        assert!(en.is_enclitic("’ll"));
        assert!(en.is_enclitic("'RE"));
        assert!(!en.is_enclitic("'"));
        assert!(!en.is_enclitic("-tu"));
    }

    #[test]
    fn quotes_and_dialogue_dashes_are_not_enclitics() {
        let en = LanguageRules::for_language("en");
        assert!(!en.is_enclitic("'Stop"));
        assert!(!en.is_enclitic("'hello"));
        assert!(!en.is_enclitic("'sup"));
        let fr = LanguageRules::for_language("fr");
        assert!(!fr.is_enclitic("-Oui"));
        assert!(!fr.is_enclitic("-Non,"));
    }

    #[test]
    fn postpositional_languages_only_guard_conjunctions() {
        let ja = LanguageRules::for_language("ja");
        assert!(ja.is_danglable(GrammaticalCategory::Conjunction));
        assert!(!ja.is_danglable(GrammaticalCategory::Preposition));
        let fr = LanguageRules::for_language("fr");
        assert!(fr.is_danglable(GrammaticalCategory::Article));
        assert!(!fr.is_danglable(GrammaticalCategory::Other));
        assert!(!fr.is_danglable(GrammaticalCategory::CliticParticle));
    }
}
