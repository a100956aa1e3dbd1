//! Token stream: the recognizer's words with timing, validated once and
//! read-only afterwards.
//!
//! Segmentation stages never copy or mutate tokens. They refer to them by
//! index into the owning [`TokenStream`].

use crate::error::{CueError, Result};
use crate::language::{LanguageRules, Terminal};
use serde::{Deserialize, Serialize};

/// Closed set of grammatical categories the boundary corrector reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrammaticalCategory {
    Article,
    Preposition,
    Conjunction,
    /// Apostrophe-ending elided form bound to the next word (`qu'`, `l'`).
    CliticParticle,
    Other,
}

impl GrammaticalCategory {
    /// Map a Universal Dependencies POS tag to a category.
    ///
    /// Taggers built on UD tag sets (spaCy, Stanza, UDPipe) report `DET` for
    /// articles, `ADP` for adpositions and `CCONJ`/`SCONJ` for conjunctions.
    pub fn from_upos(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "DET" => Self::Article,
            "ADP" => Self::Preposition,
            "CCONJ" | "SCONJ" | "CONJ" => Self::Conjunction,
            _ => Self::Other,
        }
    }
}

/// One recognized word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    #[serde(skip)]
    terminal: Option<Terminal>,
}

impl Token {
    pub fn is_punctuation_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Punctuation class the token ends with, if any.
    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Word as delivered by a recognition engine.
///
/// Accepts both `word` (OpenAI/Groq verbose JSON) and `text` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    #[serde(alias = "word")]
    pub text: String,
    pub start: f64,
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl RecognizedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            language: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecognitionPayload {
    Words(Vec<RecognizedWord>),
    Verbose { words: Vec<RecognizedWord> },
}

/// Immutable, validated token sequence for one media item.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    language: String,
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Build a stream from recognized words, rejecting any contract violation.
    ///
    /// Fails with `MalformedTokenStream` on empty or whitespace-padded text,
    /// negative or non-finite timestamps, `start > end`, timestamps that go
    /// backwards, or a word tagged with a different language.
    pub fn new(language: &str, words: Vec<RecognizedWord>) -> Result<Self> {
        let rules = LanguageRules::for_language(language);
        let mut tokens: Vec<Token> = Vec::with_capacity(words.len());

        for (index, word) in words.into_iter().enumerate() {
            validate_word(index, &word, language, tokens.last())?;
            let terminal = rules.terminal_mark(&word.text);
            tokens.push(Token {
                text: word.text,
                start: word.start,
                end: word.end,
                terminal,
            });
        }

        Ok(Self {
            language: language.to_string(),
            tokens,
        })
    }

    /// Build a stream from raw recognizer output.
    ///
    /// Recognizers pad words with a leading space and occasionally emit
    /// blank words; those are trimmed and dropped before validation. A
    /// `MalformedTokenStream` index still refers to the recognizer's word
    /// list, blank words included.
    pub fn from_words(language: &str, words: Vec<RecognizedWord>) -> Result<Self> {
        let total = words.len();
        let (positions, cleaned): (Vec<usize>, Vec<RecognizedWord>) = words
            .into_iter()
            .enumerate()
            .filter_map(|(position, mut word)| {
                let trimmed = word.text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != word.text.len() {
                    word.text = trimmed.to_string();
                }
                Some((position, word))
            })
            .unzip();

        if cleaned.len() != total {
            tracing::debug!(
                language,
                dropped = total - cleaned.len(),
                "token stream: dropped blank recognizer words"
            );
        }

        Self::new(language, cleaned).map_err(|e| match e {
            CueError::MalformedTokenStream { index, reason } => CueError::MalformedTokenStream {
                index: positions.get(index).copied().unwrap_or(index),
                reason,
            },
            other => other,
        })
    }

    /// Decode recognizer JSON: a bare word array, or an object with `words`.
    pub fn from_json(language: &str, json: &str) -> Result<Self> {
        let words = match serde_json::from_str::<RecognitionPayload>(json)? {
            RecognitionPayload::Words(words) => words,
            RecognitionPayload::Verbose { words } => words,
        };
        Self::from_words(language, words)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Punctuation and spacing rules for this stream's language.
    pub fn rules(&self) -> &'static LanguageRules {
        LanguageRules::for_language(&self.language)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn validate_word(
    index: usize,
    word: &RecognizedWord,
    language: &str,
    previous: Option<&Token>,
) -> Result<()> {
    if word.text.is_empty() {
        return Err(CueError::malformed(index, "empty text"));
    }
    if word.text.trim().len() != word.text.len() {
        return Err(CueError::malformed(
            index,
            format!("text {:?} has surrounding whitespace", word.text),
        ));
    }
    if let Some(lang) = word.language.as_deref()
        && lang != language
    {
        return Err(CueError::malformed(
            index,
            format!("language {lang} differs from stream language {language}"),
        ));
    }
    if !word.start.is_finite() || !word.end.is_finite() {
        return Err(CueError::malformed(index, "non-finite timestamp"));
    }
    if word.start < 0.0 {
        return Err(CueError::malformed(
            index,
            format!("negative start {:.3}s", word.start),
        ));
    }
    if word.start > word.end {
        return Err(CueError::malformed(
            index,
            format!("start {:.3}s after end {:.3}s", word.start, word.end),
        ));
    }
    if let Some(prev) = previous {
        if word.start < prev.start {
            return Err(CueError::malformed(
                index,
                format!(
                    "start {:.3}s before previous start {:.3}s",
                    word.start, prev.start
                ),
            ));
        }
        if word.end < prev.end {
            return Err(CueError::malformed(
                index,
                format!("end {:.3}s before previous end {:.3}s", word.end, prev.end),
            ));
        }
    }
    Ok(())
}
