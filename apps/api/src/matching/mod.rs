// Resume matching engine: keyword normalization, variation scoring, item
// selection, section truncation, and final composition.
// Pure and synchronous; handlers is the only module that knows about HTTP.

pub mod composer;
pub mod handlers;
pub mod keywords;
pub mod scorer;
pub mod selector;
pub mod truncator;

pub use composer::{construct_final_resume, MatchOutcome, MatchReport, Matcher};
