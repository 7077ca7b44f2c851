use serde::{Deserialize, Serialize};

use crate::utils::*;

/// Sound effects the game can request, backed by `<audio>` elements in the
/// host page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Sound {
    Flip,
    Match,
    NoMatch,
    Victory,
    Click,
}

impl Sound {
    pub(crate) const fn element_id(self) -> &'static str {
        use Sound::*;
        match self {
            Flip => "sound-flip",
            Match => "sound-match",
            NoMatch => "sound-no-match",
            Victory => "sound-victory",
            Click => "sound-click",
        }
    }
}

/// Plays named effects, honoring a persisted mute flag. Playback problems
/// are logged and swallowed; audio never breaks the game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct AudioPlayer {
    muted: bool,
}

impl AudioPlayer {
    pub(crate) const fn is_muted(self) -> bool {
        self.muted
    }

    pub(crate) fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.local_save();
    }

    pub(crate) fn play(&self, sound: Sound) {
        use wasm_bindgen::JsCast;

        if self.muted {
            return;
        }

        let id = sound.element_id();
        let Some(element) = gloo::utils::document().get_element_by_id(id) else {
            log::warn!("missing audio element: {}", id);
            return;
        };
        let Ok(audio) = element.dyn_into::<web_sys::HtmlAudioElement>() else {
            log::warn!("element {} is not an <audio> tag", id);
            return;
        };

        // Rewind so rapid retriggers restart the effect.
        audio.set_current_time(0.0);
        match audio.play() {
            Ok(_promise) => log::trace!("playing {}", id),
            Err(err) => log::warn!("failed to play {}: {:?}", id, err),
        }
    }
}

impl StorageKey for AudioPlayer {
    const KEY: &'static str = "memorito:muted";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sound_maps_to_a_distinct_element_id() {
        let sounds = [
            Sound::Flip,
            Sound::Match,
            Sound::NoMatch,
            Sound::Victory,
            Sound::Click,
        ];
        let mut ids: Vec<_> = sounds.iter().map(|s| s.element_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sounds.len());
        assert!(ids.iter().all(|id| id.starts_with("sound-")));
    }

    #[test]
    fn mute_defaults_off() {
        assert!(!AudioPlayer::default().is_muted());
    }
}
