use crate::media::MediaElement;
use crate::mpris::MprisHandle;
use crate::player::PlayerController;

/// Publish the focused deck's current track and playback flag to MPRIS.
pub fn update_mpris<M: MediaElement>(mpris: &MprisHandle, deck: &PlayerController<M>) {
    mpris.set_title(Some(deck.current_track().title.clone()));
    mpris.set_playing(deck.state().is_playing);
}
