/// State shared by every component during a frame.
///
/// Health, fuel, lives and score are read by the HUD and written by the
/// pools and the player.  Instead of a global, the orchestrator owns one
/// `Session` and lends it to each update stage in turn.

use tracing::info;

use crate::entities::GameMode;
use crate::sound::{Mixer, SoundCue};
use crate::tuning::{GameTuning, DIFFICULTY_MAX};

#[derive(Clone, Debug)]
pub struct Session {
    pub health: i32,
    pub fuel: i32,
    /// Goes negative on the final death.
    pub lives: i32,
    pub score: u32,
    pub difficulty: u8,
    pub mode: GameMode,
    pub mixer: Mixer,
    cues: Vec<SoundCue>,
    tuning: GameTuning,
}

impl Session {
    pub fn new(tuning: GameTuning) -> Self {
        Self {
            health: tuning.health_max,
            fuel: tuning.fuel_max,
            lives: tuning.start_lives,
            score: 0,
            difficulty: tuning.difficulty.min(DIFFICULTY_MAX),
            mode: GameMode::default(),
            mixer: Mixer::default(),
            cues: Vec::new(),
            tuning,
        }
    }

    pub fn health_max(&self) -> i32 {
        self.tuning.health_max
    }

    pub fn fuel_max(&self) -> i32 {
        self.tuning.fuel_max
    }

    /// +1 point; every `points_per_life` points also award a life.
    pub fn increment_score(&mut self) {
        self.score += 1;
        if self.score % self.tuning.points_per_life == 0 {
            self.lives += 1;
            info!(score = self.score, lives = self.lives, "bonus life");
        }
    }

    pub fn lose_life(&mut self) {
        self.lives -= 1;
        info!(lives = self.lives, "life lost");
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.tuning.health_max);
    }

    pub fn set_fuel(&mut self, fuel: i32) {
        self.fuel = fuel.clamp(0, self.tuning.fuel_max);
    }

    pub fn restore_health_and_fuel(&mut self) {
        self.health = self.tuning.health_max;
        self.fuel = self.tuning.fuel_max;
    }

    pub fn set_difficulty(&mut self, difficulty: i32) {
        self.difficulty = difficulty.clamp(0, DIFFICULTY_MAX as i32) as u8;
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            info!(from = ?self.mode, to = ?mode, "mode change");
            self.mode = mode;
        }
    }

    /// Back to a fresh run: score, lives, health and fuel.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.restore_health_and_fuel();
    }

    pub fn push_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}
