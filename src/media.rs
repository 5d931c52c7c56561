//! Media backend: the `MediaElement` contract consumed by the deck
//! controller, plus the rodio-backed `AudioElement` every mounted deck
//! drives.

mod audio;
mod element;
mod sink;
mod thread;
mod types;

pub use audio::AudioElement;
pub use element::{MediaElement, MediaError};
pub use types::MediaEvent;
