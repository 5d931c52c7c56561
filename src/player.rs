//! The deck core: `PlayerController` owns playback state for one playlist
//! and mediates between user intent, the media element and the UI
//! read-outs.

mod controller;
mod model;
mod view;

pub use controller::PlayerController;
pub use model::{PlayerState, format_time};
pub use view::{PlayerView, TransportGlyph};

#[cfg(test)]
mod tests;
