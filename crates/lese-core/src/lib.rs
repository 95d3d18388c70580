pub mod adapters;
pub mod annotate;
pub mod classifier;
pub mod error;
pub mod language;
pub mod playback;
pub mod position;
pub mod preprocess;
pub mod sentences;
pub mod tooltip;

pub use adapters::{PronunciationAdapter, SpeakOutcome, SpeechBackend, VocabularyAdapter, WordInfoProvider};
pub use annotate::{AnnotatedSpan, AnnotatedText, AnnotationEngine, Segment, strip_markup};
pub use classifier::{LexicalClassifier, Verdict};
pub use error::{SpeechError, VocabularyError};
pub use language::{Lexicon, LexiconTables, Token};
pub use playback::{GuardedPronouncer, PlaybackSlot, PlaybackToken};
pub use position::{OverlayPositioner, Placement};
pub use sentences::SentenceIndex;
pub use tooltip::{
    ListenState, LoadState, TooltipHandle, TooltipInput, TooltipLayer, TooltipServices, TooltipState,
    TooltipTiming, Visibility,
};
