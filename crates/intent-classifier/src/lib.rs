//! intent-classifier: semantic matching of free text to a closed command set
//!
//! Each vocabulary entry's canonical phrase is embedded once at startup; an
//! incoming utterance is embedded with the same encoder and ranked by cosine
//! similarity, with a rejection threshold giving an explicit "no confident
//! match" outcome. A small, fixed, interpretable phrase set plus a reject
//! option is preferred here over a trained classifier.

mod vocabulary;
pub use vocabulary::RobotCommand;

mod error;
pub use error::{ClassifierError, Result};

mod encoder;
#[cfg(feature = "mock")]
pub use encoder::HashedBowEncoder;
pub use encoder::TextEncoder;

mod classifier;
pub use classifier::{cosine_similarity, Classification, IntentClassifier};

pub mod plugin;
