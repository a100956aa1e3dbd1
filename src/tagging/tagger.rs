//! Grammar tagger seam and the per-token category table it produces.

use crate::error::{CueError, Result};
use crate::token::{GrammaticalCategory, TokenStream};

/// Assigns a grammatical category to every token of a stream.
///
/// Implementations wrap a POS tagger for the stream's language. A tagger
/// that cannot serve a stream returns `UnsupportedLanguage` or
/// `TaggerUnavailable`; the pipeline then falls back to timing and
/// punctuation segmentation.
pub trait GrammarTagger: Send + Sync {
    /// One category per token, in stream order.
    fn tag(&self, stream: &TokenStream) -> Result<Vec<GrammaticalCategory>>;

    /// Return the name of this tagger for logging.
    fn name(&self) -> &str;
}

/// Tagger used when no grammar backend is configured.
pub struct NoTagger;

impl GrammarTagger for NoTagger {
    fn tag(&self, _stream: &TokenStream) -> Result<Vec<GrammaticalCategory>> {
        Err(CueError::TaggerUnavailable {
            tagger: self.name().to_string(),
            message: "no grammar tagger configured".to_string(),
        })
    }

    fn name(&self) -> &str {
        "none"
    }
}

type UposFn = dyn Fn(&TokenStream) -> Result<Vec<String>> + Send + Sync;

/// Adapter for external taggers that speak Universal POS tags.
///
/// The closure receives the stream and returns one UPOS tag (`DET`, `ADP`,
/// `CCONJ`...) per token.
pub struct UposTagger {
    name: String,
    tag_fn: Box<UposFn>,
}

impl UposTagger {
    pub fn new<F>(name: impl Into<String>, tag_fn: F) -> Self
    where
        F: Fn(&TokenStream) -> Result<Vec<String>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            tag_fn: Box::new(tag_fn),
        }
    }
}

impl std::fmt::Debug for UposTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UposTagger")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl GrammarTagger for UposTagger {
    fn tag(&self, stream: &TokenStream) -> Result<Vec<GrammaticalCategory>> {
        let tags = (self.tag_fn)(stream)?;
        Ok(tags
            .iter()
            .map(|tag| GrammaticalCategory::from_upos(tag))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Grammatical categories of one stream, indexed like its tokens.
///
/// Kept beside the stream rather than inside it so tokens stay immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagging {
    categories: Vec<GrammaticalCategory>,
}

impl Tagging {
    /// Attach tagger output to a stream, checking it covers every token.
    pub fn new(
        stream: &TokenStream,
        categories: Vec<GrammaticalCategory>,
        tagger: &str,
    ) -> Result<Self> {
        if categories.len() != stream.len() {
            return Err(CueError::TaggerOutput {
                tagger: tagger.to_string(),
                expected: stream.len(),
                actual: categories.len(),
            });
        }
        Ok(Self { categories })
    }

    /// Run `tagger` over `stream`.
    pub fn from_tagger(stream: &TokenStream, tagger: &dyn GrammarTagger) -> Result<Self> {
        let categories = tagger.tag(stream)?;
        Self::new(stream, categories, tagger.name())
    }

    pub fn get(&self, index: usize) -> Option<GrammaticalCategory> {
        self.categories.get(index).copied()
    }

    pub fn categories(&self) -> &[GrammaticalCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
