//! Function-word lexicon tagger.
//!
//! Tags tokens by exact, case-insensitive lookup in small per-language
//! closed-class word lists. Closed classes (articles, prepositions,
//! conjunctions) are short, so a lexicon catches most dangling function
//! words without a statistical model. Ambiguous forms (French `la` as
//! pronoun) are tagged by their most frequent reading.

use crate::error::{CueError, Result};
use crate::tagging::tagger::GrammarTagger;
use crate::token::{GrammaticalCategory, TokenStream};

struct Lexicon {
    code: &'static str,
    articles: &'static [&'static str],
    prepositions: &'static [&'static str],
    conjunctions: &'static [&'static str],
}

static LEXICONS: &[Lexicon] = &[
    Lexicon {
        code: "ca",
        articles: &["el", "la", "els", "les", "un", "una", "uns", "unes"],
        prepositions: &[
            "de", "a", "en", "amb", "per", "sense", "sobre", "entre", "fins", "cap", "des", "del",
            "al", "dels", "als", "pel",
        ],
        conjunctions: &["i", "o", "però", "que", "perquè", "si", "ni"],
    },
    Lexicon {
        code: "de",
        articles: &[
            "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem", "einer",
            "eines",
        ],
        prepositions: &[
            "in", "an", "auf", "aus", "bei", "mit", "nach", "von", "zu", "für", "über", "unter",
            "vor", "durch", "gegen", "ohne", "um", "zum", "zur", "im", "am", "vom", "beim",
        ],
        conjunctions: &["und", "oder", "aber", "denn", "sondern", "dass", "weil", "wenn", "ob"],
    },
    Lexicon {
        code: "en",
        articles: &["a", "an", "the"],
        prepositions: &[
            "of", "in", "to", "for", "with", "on", "at", "from", "by", "about", "into", "over",
            "after", "under", "between", "through", "during", "without", "before", "against",
            "among",
        ],
        conjunctions: &[
            "and", "or", "but", "nor", "so", "yet", "because", "although", "if", "while", "than",
        ],
    },
    Lexicon {
        code: "es",
        articles: &["el", "la", "los", "las", "un", "una", "unos", "unas"],
        prepositions: &[
            "de", "a", "en", "con", "por", "para", "sin", "sobre", "entre", "hasta", "desde",
            "hacia", "contra", "del", "al", "según",
        ],
        conjunctions: &["y", "e", "o", "u", "pero", "ni", "que", "porque", "aunque", "si"],
    },
    Lexicon {
        code: "fr",
        articles: &["le", "la", "les", "un", "une", "des"],
        prepositions: &[
            "de", "à", "en", "dans", "par", "pour", "sur", "sous", "avec", "sans", "chez", "vers",
            "entre", "contre", "depuis", "pendant", "du", "au", "aux",
        ],
        conjunctions: &[
            "et", "ou", "mais", "donc", "car", "ni", "que", "quand", "si", "comme", "parce",
        ],
    },
    Lexicon {
        code: "it",
        articles: &["il", "lo", "la", "i", "gli", "le", "un", "uno", "una"],
        prepositions: &[
            "di", "a", "da", "in", "con", "su", "per", "tra", "fra", "del", "della", "dei",
            "delle", "al", "alla", "ai", "alle", "dal", "dalla", "nel", "nella", "sul", "sulla",
        ],
        conjunctions: &["e", "ed", "o", "ma", "che", "perché", "se", "anche"],
    },
    Lexicon {
        code: "nl",
        articles: &["de", "het", "een"],
        prepositions: &[
            "van", "in", "op", "met", "voor", "naar", "aan", "bij", "door", "uit", "over", "tot",
            "om", "onder", "zonder",
        ],
        conjunctions: &["en", "of", "maar", "want", "dat", "omdat", "als"],
    },
    Lexicon {
        code: "pt",
        articles: &["o", "a", "os", "as", "um", "uma", "uns", "umas"],
        prepositions: &[
            "de", "em", "por", "para", "com", "sem", "sobre", "entre", "até", "do", "da", "dos",
            "das", "no", "na", "nos", "nas", "ao", "à", "pelo", "pela",
        ],
        conjunctions: &["e", "ou", "mas", "que", "porque", "se", "nem"],
    },
];

impl Lexicon {
    fn lookup(code: &str) -> Option<&'static Lexicon> {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        LEXICONS
            .iter()
            .find(|lexicon| lexicon.code.eq_ignore_ascii_case(primary))
    }

    fn category(&self, word: &str) -> GrammaticalCategory {
        let lower = word.to_lowercase();
        let word = lower.as_str();
        if self.articles.contains(&word) {
            GrammaticalCategory::Article
        } else if self.prepositions.contains(&word) {
            GrammaticalCategory::Preposition
        } else if self.conjunctions.contains(&word) {
            GrammaticalCategory::Conjunction
        } else {
            GrammaticalCategory::Other
        }
    }
}

/// Built-in tagger for languages with a function-word lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    /// Whether a lexicon exists for `language`.
    pub fn supports(language: &str) -> bool {
        Lexicon::lookup(language).is_some()
    }
}

impl GrammarTagger for LexiconTagger {
    fn tag(&self, stream: &TokenStream) -> Result<Vec<GrammaticalCategory>> {
        let lexicon =
            Lexicon::lookup(stream.language()).ok_or_else(|| CueError::UnsupportedLanguage {
                tagger: self.name().to_string(),
                language: stream.language().to_string(),
            })?;
        let rules = stream.rules();

        Ok(stream
            .tokens()
            .iter()
            .map(|token| {
                if rules.is_clitic(&token.text) {
                    GrammaticalCategory::CliticParticle
                } else {
                    lexicon.category(&token.text)
                }
            })
            .collect())
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
