//! Batch creation of audio flashcards.
//!
//! A run goes through these steps:
//!
//! 1. **Probe**: list decks once to make sure AnkiConnect is there. Any
//!    failure aborts the run.
//! 2. **Load**: read the phrase file.
//! 3. **Iterate** over phrases in file order until the card limit is hit.
//!    For each phrase: look for an existing note with the same front in the
//!    deck, synthesize audio, store it, add the note. A failure in any step
//!    abandons that phrase only.
//!
//! A phrase counts as a duplicate when a note in the deck has a front field
//! equal to the front text, or equal to the front text followed by a sound
//! tag (the shape of notes created by earlier runs). Whitespace or case
//! differences from an existing note are not caught. Audio stored for a phrase whose note then fails to be added is
//! left in the media folder.
//!
//! # Example
//!
//! ```no_run
//! use voxdeck_engine::{Engine, GoogleTranslateSpeech, RunConfig, TracingSink};
//!
//! # async fn example() -> voxdeck_engine::Result<()> {
//! let config = RunConfig::default();
//! let engine = Engine::for_config(&config)?;
//! let speech = GoogleTranslateSpeech::new()?;
//!
//! let report = engine.batch(&config, &speech, &TracingSink).run().await?;
//! println!("Added: {}, duplicates: {}", report.cards_added, report.duplicates);
//! # Ok(())
//! # }
//! ```

use voxdeck_connect::{CardStoreClient, Note, NoteBuilder, QueryBuilder, sound_tag};

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::events::{EventSink, RunEvent, Stage};
use crate::media::{AudioArtifact, MediaNamer};
use crate::phrase::{PhraseLine, load_phrases};
use crate::speech::SpeechSynthesizer;

/// Why iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// Every phrase was looked at.
    #[default]
    Exhausted,
    /// The card limit was reached.
    LimitReached,
    /// AnkiConnect became unreachable; remaining phrases were not attempted.
    ConnectionLost,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Number of notes created.
    pub cards_added: usize,
    /// Number of phrases skipped because a matching note already existed.
    pub duplicates: usize,
    /// Phrases that were abandoned, in processing order.
    pub failures: Vec<ItemFailure>,
    /// Why the run stopped.
    pub stop: StopReason,
}

/// Details about an abandoned phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Line number in the phrase file.
    pub line: usize,
    /// Front text of the phrase.
    pub front: String,
    /// Step that failed.
    pub stage: Stage,
    /// Error message.
    pub error: String,
}

enum ItemOutcome {
    Added(i64),
    Duplicate,
}

struct StageError {
    stage: Stage,
    message: String,
    connectivity: bool,
}

impl StageError {
    fn client(stage: Stage) -> impl FnOnce(voxdeck_connect::Error) -> Self {
        move |err| Self {
            stage,
            connectivity: err.is_connectivity(),
            message: err.to_string(),
        }
    }

    fn synthesis(err: crate::speech::SynthesisError) -> Self {
        Self {
            stage: Stage::Synthesis,
            message: err.to_string(),
            connectivity: false,
        }
    }
}

/// Batch workflow engine.
///
/// Obtained via [`Engine::batch()`](crate::Engine::batch). Runs are
/// strictly sequential; running two batches against the same deck at the
/// same time can insert duplicates.
#[derive(Debug)]
pub struct BatchEngine<'a, S, K> {
    client: &'a CardStoreClient,
    config: &'a RunConfig,
    speech: &'a S,
    sink: &'a K,
}

impl<'a, S, K> BatchEngine<'a, S, K>
where
    S: SpeechSynthesizer,
    K: EventSink,
{
    pub(crate) fn new(
        client: &'a CardStoreClient,
        config: &'a RunConfig,
        speech: &'a S,
        sink: &'a K,
    ) -> Self {
        Self {
            client,
            config,
            speech,
            sink,
        }
    }

    /// Probe, load the phrase file and process it.
    ///
    /// Returns an error only when the run could not start; in that case no
    /// note was created. Otherwise the report carries the number of notes
    /// added, which may be zero.
    pub async fn run(&self) -> Result<RunReport> {
        self.sink.record(&RunEvent::Started {
            deck: self.config.deck_name.clone(),
            limit: self.config.card_limit.get(),
        });

        let phrases = match self.prepare().await {
            Ok(phrases) => phrases,
            Err(err) => {
                self.sink.record(&RunEvent::Aborted {
                    error: err.to_string(),
                });
                self.sink.record(&RunEvent::Finished { cards_added: 0 });
                return Err(err);
            }
        };

        let report = self.process(&phrases).await;
        self.sink.record(&RunEvent::Finished {
            cards_added: report.cards_added,
        });
        Ok(report)
    }

    async fn prepare(&self) -> Result<Vec<PhraseLine>> {
        self.probe().await?;

        let phrases = load_phrases(&self.config.input_file, self.config.separator)?;
        self.sink.record(&RunEvent::LinesLoaded {
            count: phrases.len(),
        });
        Ok(phrases)
    }

    /// Check that AnkiConnect responds, returning the number of decks.
    pub async fn probe(&self) -> Result<usize> {
        let decks = self.client.decks().names().await.map_err(|err| {
            if err.is_connectivity() {
                Error::Connectivity(err)
            } else {
                Error::Probe(err)
            }
        })?;

        self.sink.record(&RunEvent::Probed { decks: decks.len() });
        Ok(decks.len())
    }

    /// Process already-parsed phrases in order.
    ///
    /// Stops as soon as the card limit is reached, leaving later phrases
    /// untouched, or when AnkiConnect stops responding.
    pub async fn process(&self, phrases: &[PhraseLine]) -> RunReport {
        let limit = self.config.card_limit.get();
        let mut report = RunReport::default();
        let mut namer = MediaNamer::new();

        for phrase in phrases {
            if report.cards_added >= limit {
                break;
            }

            self.sink.record(&RunEvent::Processing {
                line: phrase.line,
                position: report.cards_added + 1,
                limit,
                front: phrase.front.clone(),
            });

            match self.add_phrase(phrase, &mut namer).await {
                Ok(ItemOutcome::Added(note_id)) => {
                    report.cards_added += 1;
                    self.sink.record(&RunEvent::NoteAdded {
                        front: phrase.front.clone(),
                        note_id,
                    });
                }
                Ok(ItemOutcome::Duplicate) => {
                    report.duplicates += 1;
                    self.sink.record(&RunEvent::DuplicateSkipped {
                        front: phrase.front.clone(),
                    });
                }
                Err(err) => {
                    self.sink.record(&RunEvent::ItemFailed {
                        front: phrase.front.clone(),
                        stage: err.stage,
                        error: err.message.clone(),
                    });
                    report.failures.push(ItemFailure {
                        line: phrase.line,
                        front: phrase.front.clone(),
                        stage: err.stage,
                        error: err.message.clone(),
                    });

                    if err.connectivity {
                        self.sink
                            .record(&RunEvent::ConnectionLost { error: err.message });
                        report.stop = StopReason::ConnectionLost;
                        return report;
                    }
                }
            }
        }

        if report.cards_added >= limit {
            report.stop = StopReason::LimitReached;
            self.sink.record(&RunEvent::LimitReached { limit });
        }
        report
    }

    async fn add_phrase(
        &self,
        phrase: &PhraseLine,
        namer: &mut MediaNamer,
    ) -> std::result::Result<ItemOutcome, StageError> {
        let query = self.duplicate_query(&phrase.front);
        let existing = self
            .client
            .notes()
            .find(&query)
            .await
            .map_err(StageError::client(Stage::DuplicateCheck))?;
        if !existing.is_empty() {
            return Ok(ItemOutcome::Duplicate);
        }

        let audio = self
            .speech
            .synthesize(&phrase.front, &self.config.audio_lang)
            .await
            .map_err(StageError::synthesis)?;
        let artifact = AudioArtifact::new(namer.next_filename(), audio);

        let filename = self
            .client
            .media()
            .store(artifact.into_upload())
            .await
            .map_err(StageError::client(Stage::Upload))?;
        self.sink.record(&RunEvent::AudioStored {
            front: phrase.front.clone(),
            filename: filename.clone(),
        });

        let note = self.build_note(phrase, &filename);
        let note_id = self
            .client
            .notes()
            .add(&note)
            .await
            .map_err(StageError::client(Stage::Submit))?;
        Ok(ItemOutcome::Added(note_id))
    }

    fn duplicate_query(&self, front: &str) -> String {
        let field = &self.config.front_field;
        let with_audio = format!("{} [sound:", front);
        QueryBuilder::new()
            .deck(&self.config.deck_name)
            .or(|q| q.field(field, front).field_starting_with(field, &with_audio))
            .build()
    }

    fn build_note(&self, phrase: &PhraseLine, audio_filename: &str) -> Note {
        NoteBuilder::new(&self.config.deck_name, &self.config.model_name)
            .field(
                &self.config.front_field,
                format!("{} {}", phrase.front, sound_tag(audio_filename)),
            )
            .field(&self.config.back_field, &phrase.back)
            .tag(&self.config.tag)
            .build()
    }
}
