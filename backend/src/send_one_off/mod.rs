//! The "send one message" wizard: which value to ask for next, and when
//! the draft is ready for review.

pub mod gate;
pub mod sequencer;
pub mod templates;

pub use sequencer::{AddressEntry, BackLink, Position, StepKind, StepSequencer};
pub use templates::TemplateCache;
