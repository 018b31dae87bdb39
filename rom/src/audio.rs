//! The audio facade: fire-and-forget sound cues and background songs.
//!
//! Which cue applies to a state change is decided in the CountLife
//! handler; this module only names them. Nothing comes back from the
//! mixer — a cue either plays or it doesn't, the game never waits on it.

use crate::state::MAX_BACKGROUND_SONGS;

/// Sound effects, one per kind of counter event.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Cue {
    /// A player dropped to 0 life or hit lethal poison.
    Death,
    /// Life gained.
    Ding,
    /// Life lost, player still alive.
    Hit,
    Poison,
    Energy,
    Experience,
}

/// Sound output. Implemented by the platform, mocked in tests.
pub trait Mixer {
    fn play_cue(&mut self, cue: Cue);

    /// Stop whatever background song is playing and start `song`
    /// (the last index is "no music").
    fn play_song(&mut self, song: usize);
}

const SONG_NAMES: [&str; MAX_BACKGROUND_SONGS] = [
    "AI Renaissance",
    "Retrospective ",
    "No music      ",
];

/// Display name for a song index. Names are padded to equal width so a
/// shorter name overdraws a longer one in the settings rows.
pub fn song_name(song: usize) -> &'static str {
    SONG_NAMES.get(song).copied().unwrap_or("UNKNOWN SONG")
}
