//! Cue pipeline for one or many media items.
//!
//! Runs the stages in order: segmenter, tagger, boundary corrector, cue
//! builder. Tagging is optional. When the tagger cannot serve a stream, the
//! run keeps the provisional boundaries and logs a warning.

use crate::config::{BatchConfig, Config};
use crate::error::Result;
use crate::segmentation::{BoundaryCorrector, Cue, CueBuilder, Segmenter, SegmenterConfig};
use crate::tagging::{GrammarTagger, Tagging};
use crate::token::{RecognizedWord, TokenStream};

/// Tagger used when none is supplied: the built-in lexicon.
#[cfg(feature = "lexicon")]
pub fn default_tagger() -> Box<dyn GrammarTagger> {
    Box::new(crate::tagging::LexiconTagger::new())
}

/// Tagger used when none is supplied. Without the lexicon, correction is off.
#[cfg(not(feature = "lexicon"))]
pub fn default_tagger() -> Box<dyn GrammarTagger> {
    Box::new(crate::tagging::NoTagger)
}

/// Token stream to cue records.
pub struct CuePipeline {
    language: String,
    segmenter: Segmenter,
    correction: bool,
    tagger: Box<dyn GrammarTagger>,
    batch: BatchConfig,
}

impl Default for CuePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CuePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuePipeline")
            .field("language", &self.language)
            .field("segmenter", &self.segmenter)
            .field("correction", &self.correction)
            .field("tagger", &self.tagger.name())
            .field("batch", &self.batch)
            .finish()
    }
}

impl CuePipeline {
    /// Pipeline with default thresholds and the default tagger.
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            language: config.language,
            segmenter: Segmenter::with_config(config.segmenter),
            correction: config.correction.enabled,
            tagger: default_tagger(),
            batch: config.batch,
        }
    }

    /// Pipeline from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            language: config.language.clone(),
            segmenter: Segmenter::with_config(config.segmenter.clone()),
            correction: config.correction.enabled,
            tagger: default_tagger(),
            batch: config.batch.clone(),
        })
    }

    pub fn with_tagger(mut self, tagger: Box<dyn GrammarTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_segmenter_config(mut self, config: SegmenterConfig) -> Self {
        self.segmenter = Segmenter::with_config(config);
        self
    }

    pub fn with_correction(mut self, enabled: bool) -> Self {
        self.correction = enabled;
        self
    }

    /// Language used by `run_words` and `run_json`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Worker threads for `run_batch`. 0 uses one per available CPU.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.batch.workers = workers;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn tagger_name(&self) -> &str {
        self.tagger.name()
    }

    /// Segment, correct and build cues for one stream.
    pub fn run(&self, stream: &TokenStream) -> Result<Vec<Cue>> {
        let provisional = self.segmenter.segment(stream);

        let corrector = BoundaryCorrector::for_language(stream.language());
        let spans = if self.correction && corrector.is_active() && provisional.len() > 1 {
            let tagging = self.tag(stream)?;
            corrector.correct(stream, provisional, tagging.as_ref())?
        } else {
            provisional
        };

        CueBuilder::build(stream, &spans)
    }

    /// Run over recognizer words in the pipeline's language.
    pub fn run_words(&self, words: Vec<RecognizedWord>) -> Result<Vec<Cue>> {
        let stream = TokenStream::from_words(&self.language, words)?;
        self.run(&stream)
    }

    /// Run over a recognizer JSON payload in the pipeline's language.
    pub fn run_json(&self, json: &str) -> Result<Vec<Cue>> {
        let stream = TokenStream::from_json(&self.language, json)?;
        self.run(&stream)
    }

    fn tag(&self, stream: &TokenStream) -> Result<Option<Tagging>> {
        match Tagging::from_tagger(stream, self.tagger.as_ref()) {
            Ok(tagging) => Ok(Some(tagging)),
            Err(e) if e.is_tagging_degradation() => {
                tracing::warn!(
                    tagger = self.tagger.name(),
                    language = stream.language(),
                    error = %e,
                    "pipeline: tagging unavailable, keeping provisional boundaries"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Run independent streams on a worker pool.
    ///
    /// Results come back in input order. A failing stream does not affect
    /// the others.
    #[cfg(feature = "batch")]
    pub fn run_batch(&self, streams: &[TokenStream]) -> Vec<Result<Vec<Cue>>> {
        use crossbeam_channel::bounded;

        let workers = self.batch.resolved_workers().min(streams.len());
        if workers <= 1 {
            return streams.iter().map(|stream| self.run(stream)).collect();
        }

        let (job_tx, job_rx) = bounded::<(usize, &TokenStream)>(workers * 2);
        let (result_tx, result_rx) = bounded(workers * 2);
        let mut results: Vec<Option<Result<Vec<Cue>>>> = streams.iter().map(|_| None).collect();

        std::thread::scope(|scope| {
            for worker in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for (index, stream) in job_rx {
                        let result = self.run(stream);
                        if let Err(e) = &result {
                            tracing::debug!(worker, index, error = %e, "pipeline: item failed");
                        }
                        if result_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(result_tx);

            scope.spawn(move || {
                for job in streams.iter().enumerate() {
                    if job_tx.send(job).is_err() {
                        break;
                    }
                }
            });

            for (index, result) in result_rx {
                results[index] = Some(result);
            }
        });

        tracing::debug!(items = streams.len(), workers, "pipeline: batch done");
        results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                result.unwrap_or_else(|| {
                    Err(crate::error::CueError::Other(format!(
                        "batch item {index} produced no result"
                    )))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CueError;
    use crate::tagging::{NoTagger, UposTagger};
    use crate::token::test_support::stream;

    fn texts(cues: &[Cue]) -> Vec<&str> {
        cues.iter().map(|c| c.text.as_str()).collect()
    }

    fn token_budget(n: usize) -> SegmenterConfig {
        SegmenterConfig {
            budget: crate::segmentation::LengthBudget::Tokens(n),
            ..SegmenterConfig::default()
        }
    }

    #[test]
    fn basic_split_on_sentence_marks() {
        let s = stream("fr", &["Bonjour", "Marie", ".", "Comment", "vas", "-tu", "?"]);
        let cues = CuePipeline::new().run(&s).unwrap();
        assert_eq!(texts(&cues), ["Bonjour Marie.", "Comment vas-tu?"]);
    }

    #[cfg(feature = "lexicon")]
    #[test]
    fn dangling_preposition_is_pulled_across() {
        let s = stream("fr", &["Il", "vient", "de", "Paris"]);
        let cues = CuePipeline::new()
            .with_segmenter_config(token_budget(3))
            .run(&s)
            .unwrap();
        assert_eq!(texts(&cues), ["Il vient", "de Paris"]);
    }

    #[test]
    fn correction_can_be_disabled() {
        let s = stream("fr", &["Il", "vient", "de", "Paris"]);
        let cues = CuePipeline::new()
            .with_segmenter_config(token_budget(3))
            .with_correction(false)
            .run(&s)
            .unwrap();
        assert_eq!(texts(&cues), ["Il vient de", "Paris"]);
    }

    #[test]
    fn unavailable_tagger_degrades_to_provisional_cues() {
        let s = stream("fr", &["Il", "vient", "de", "Paris"]);
        let cues = CuePipeline::new()
            .with_segmenter_config(token_budget(3))
            .with_tagger(Box::new(NoTagger))
            .run(&s)
            .unwrap();
        assert_eq!(texts(&cues), ["Il vient de", "Paris"]);
    }

    #[test]
    fn short_tagger_output_degrades() {
        let tagger = UposTagger::new("short", |_: &TokenStream| Ok(vec!["ADP".to_string()]));
        let s = stream("fr", &["Il", "vient", "de", "Paris"]);
        let cues = CuePipeline::new()
            .with_segmenter_config(token_budget(3))
            .with_tagger(Box::new(tagger))
            .run(&s)
            .unwrap();
        assert_eq!(cues.len(), 2);
    }

    #[test]
    fn other_tagger_errors_propagate() {
        let tagger = UposTagger::new("io", |_: &TokenStream| {
            Err(CueError::Other("tagger crashed".to_string()))
        });
        let s = stream("fr", &["Il", "vient", "de", "Paris"]);
        let err = CuePipeline::new()
            .with_segmenter_config(token_budget(3))
            .with_tagger(Box::new(tagger))
            .run(&s)
            .unwrap_err();
        assert!(matches!(err, CueError::Other(_)));
    }

    #[test]
    fn external_upos_tagger_drives_correction() {
        let tagger = UposTagger::new("fixed", |s: &TokenStream| {
            Ok(s.tokens()
                .iter()
                .map(|t| match t.text.as_str() {
                    "de" => "ADP".to_string(),
                    _ => "X".to_string(),
                })
                .collect())
        });
        let s = stream("fr", &["Il", "vient", "de", "Paris"]);
        let cues = CuePipeline::new()
            .with_segmenter_config(token_budget(3))
            .with_tagger(Box::new(tagger))
            .run(&s)
            .unwrap();
        assert_eq!(texts(&cues), ["Il vient", "de Paris"]);
    }

    #[test]
    fn unregistered_language_keeps_provisional_cues() {
        let s = stream("sw", &["habari", "ya", "asubuhi", "rafiki"]);
        let pipeline = CuePipeline::new().with_segmenter_config(token_budget(2));
        let cues = pipeline.run(&s).unwrap();
        assert_eq!(texts(&cues), ["habari ya", "asubuhi rafiki"]);
    }

    #[test]
    fn empty_stream_yields_no_cues() {
        let s = TokenStream::new("fr", Vec::new()).unwrap();
        assert!(CuePipeline::new().run(&s).unwrap().is_empty());
    }

    #[test]
    fn run_json_uses_pipeline_language() {
        let json = r#"[
            {"word": " Hello", "start": 0.0, "end": 0.4},
            {"word": " world.", "start": 0.5, "end": 0.9}
        ]"#;
        let cues = CuePipeline::new().with_language("en").run_json(json).unwrap();
        assert_eq!(texts(&cues), ["Hello world."]);
        assert_eq!(cues[0].start, 0.0);
        assert_eq!(cues[0].end, 0.9);
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let mut config = Config::default();
        config.segmenter.min_clause_tokens = 0;
        assert!(CuePipeline::from_config(&config).is_err());
    }

    #[test]
    fn from_config_applies_sections() {
        let mut config = Config::default();
        config.language = "en".to_string();
        config.correction.enabled = false;
        let pipeline = CuePipeline::from_config(&config).unwrap();
        assert_eq!(pipeline.language(), "en");
        assert!(!pipeline.correction);
    }

    #[cfg(feature = "batch")]
    #[test]
    fn batch_keeps_input_order() {
        let streams: Vec<TokenStream> = (0..12)
            .map(|i| {
                let word = format!("item{i}.");
                stream("en", &["Number", word.as_str()])
            })
            .collect();
        let results = CuePipeline::new().with_workers(4).run_batch(&streams);
        assert_eq!(results.len(), 12);
        for (i, result) in results.iter().enumerate() {
            let cues = result.as_ref().unwrap();
            assert_eq!(cues[0].text, format!("Number item{i}."));
        }
    }

    #[cfg(feature = "batch")]
    #[test]
    fn batch_isolates_failures() {
        let tagger = UposTagger::new("picky", |s: &TokenStream| {
            if s.tokens().iter().any(|t| t.text == "boom") {
                Err(CueError::Other("cannot tag".to_string()))
            } else {
                Ok(vec!["X".to_string(); s.len()])
            }
        });
        let streams = vec![
            stream("fr", &["un", "deux", "trois"]),
            stream("fr", &["boom", "deux", "trois"]),
            stream("fr", &["quatre", "cinq", "six"]),
        ];
        let results = CuePipeline::new()
            .with_segmenter_config(token_budget(2))
            .with_tagger(Box::new(tagger))
            .with_workers(2)
            .run_batch(&streams);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[cfg(feature = "batch")]
    #[test]
    fn batch_of_nothing_is_empty() {
        assert!(CuePipeline::new().run_batch(&[]).is_empty());
    }
}
