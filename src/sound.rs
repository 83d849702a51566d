/// Sound effects as data.
///
/// The simulation never plays audio itself: it queues `SoundCue`s on the
/// session and the frontend drains them once per frame.

/// Sound effect ids, in the order the sample bank is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sfx {
    Boom,
    Exp1,
    Exp2,
    Hiss,
    Launch1,
    Launch2,
    Tone1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Play(Sfx),
    Stop(Sfx),
}

/// Highest volume step selectable in the options menu.
pub const VOLUME_MAX: u8 = 9;

/// Music and effect volume, both in `0..=VOLUME_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mixer {
    pub music: u8,
    pub sfx: u8,
}

impl Default for Mixer {
    fn default() -> Self {
        Self { music: 5, sfx: 5 }
    }
}

impl Mixer {
    pub fn set_music(&mut self, level: u8) {
        self.music = level.min(VOLUME_MAX);
    }

    pub fn set_sfx(&mut self, level: u8) {
        self.sfx = level.min(VOLUME_MAX);
    }

    /// Effect gain in `0.0..=1.0`.
    pub fn sfx_gain(&self) -> f32 {
        self.sfx as f32 / VOLUME_MAX as f32
    }

    /// Cues that should actually be heard at the current volume.
    pub fn audible<'a>(&self, cues: &'a [SoundCue]) -> impl Iterator<Item = &'a SoundCue> {
        let muted = self.sfx == 0;
        cues.iter()
            .filter(move |c| !muted && matches!(c, SoundCue::Play(_)))
    }
}
