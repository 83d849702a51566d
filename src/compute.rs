/// The game orchestrator.
///
/// `Game` owns the session, the player and every pool.  Each frame the
/// frontend feeds it the held controls, then calls `update` with an RNG and
/// the current wall-clock time; both are injected so tests can drive the
/// simulation deterministically.

use rand::Rng;
use tracing::info;

use crate::background::Background;
use crate::enemies::EnemyPool;
use crate::entities::{Bounds, GameMode};
use crate::explosions::ExplosionPool;
use crate::menu::{Menu, MenuAction, MenuScreen};
use crate::pickups::PickupPool;
use crate::player::{MotionIntent, Player};
use crate::projectiles::{ProjectilePool, Targets};
use crate::session::Session;
use crate::sound::{Sfx, SoundCue};
use crate::throttle::Throttle;
use crate::tuning::Tuning;

// ── Update order ─────────────────────────────────────────────────────────────

/// One step of the per-frame simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Enemies,
    Projectiles,
    Pickups,
    Explosions,
    Player,
}

/// Stages run in this order and each sees the mutations of the ones before
/// it: an enemy shot down in `Projectiles` can no longer ram the player in
/// `Player`.
pub const UPDATE_ORDER: [Stage; 5] = [
    Stage::Enemies,
    Stage::Projectiles,
    Stage::Pickups,
    Stage::Explosions,
    Stage::Player,
];

// ── Input ────────────────────────────────────────────────────────────────────

/// Controls held during the current frame, already mapped from raw keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub fire: bool,
    pub confirm: bool,
    pub pause: bool,
    pub escape: bool,
    /// Debug key: drops the remaining lives to zero.
    pub cheat_last_life: bool,
}

/// Whether the frontend should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Game ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Game {
    pub session: Session,
    pub player: Player,
    pub enemies: EnemyPool,
    pub projectiles: ProjectilePool,
    pub pickups: PickupPool,
    pub explosions: ExplosionPool,
    pub background: Background,
    pub menu: Menu,
    pub bounds: Bounds,
    mode_toggle: Throttle,
    menu_toggle: Throttle,
}

impl Game {
    /// Build a fresh game sitting in the main menu.  Throttles start counting
    /// at `now_ms`.
    pub fn new(tuning: Tuning, rng: &mut impl Rng, now_ms: u64) -> Self {
        let bounds = Bounds {
            width: tuning.world.width,
            height: tuning.world.height,
        };
        let session = Session::new(tuning.game);
        Self {
            player: Player::new(tuning.player, bounds),
            enemies: EnemyPool::new(tuning.enemy, bounds, session.difficulty, now_ms),
            projectiles: ProjectilePool::new(tuning.projectile, bounds, now_ms),
            pickups: PickupPool::new(tuning.pickup, bounds),
            explosions: ExplosionPool::new(tuning.explosion, now_ms),
            background: Background::new(bounds, rng),
            menu: Menu::default(),
            bounds,
            mode_toggle: Throttle::new(tuning.game.mode_debounce_ms, now_ms),
            menu_toggle: Throttle::new(tuning.game.menu_debounce_ms, now_ms),
            session,
        }
    }

    /// Advance one frame.  Only `Play` runs the simulation; the menu keeps the
    /// clouds moving; pause and game over freeze everything.
    pub fn update(&mut self, rng: &mut impl Rng, now_ms: u64) {
        match self.session.mode {
            GameMode::Play => {
                self.background.update(rng);
                for stage in UPDATE_ORDER {
                    self.run_stage(stage, rng, now_ms);
                }
            }
            GameMode::Menu => self.background.update(rng),
            GameMode::Paused | GameMode::GameOver => {}
        }
    }

    pub fn run_stage(&mut self, stage: Stage, rng: &mut impl Rng, now_ms: u64) {
        match stage {
            Stage::Enemies => self.enemies.update(
                &mut self.projectiles,
                self.player.body.x,
                &self.session,
                rng,
                now_ms,
            ),
            Stage::Projectiles => self.projectiles.update(
                Targets {
                    enemies: &mut self.enemies,
                    pickups: &mut self.pickups,
                    explosions: &mut self.explosions,
                    player: &mut self.player,
                },
                &mut self.session,
                rng,
                now_ms,
            ),
            Stage::Pickups => self.pickups.update(&self.player, &mut self.session),
            Stage::Explosions => self.explosions.update(now_ms),
            Stage::Player => self.player.update(
                &mut self.enemies,
                &mut self.explosions,
                &mut self.session,
                now_ms,
            ),
        }
    }

    /// Apply this frame's controls.  Returns `Flow::Quit` when the player
    /// leaves through the menu.
    pub fn handle_controls(&mut self, controls: &Controls, now_ms: u64) -> Flow {
        if controls.escape && self.mode_toggle.try_fire(now_ms) {
            match self.session.mode {
                GameMode::Play | GameMode::Paused => self.session.set_mode(GameMode::Menu),
                GameMode::Menu => self.session.set_mode(GameMode::Play),
                GameMode::GameOver => {}
            }
        }
        if controls.pause && self.mode_toggle.try_fire(now_ms) {
            match self.session.mode {
                GameMode::Play => self.session.set_mode(GameMode::Paused),
                GameMode::Paused => self.session.set_mode(GameMode::Play),
                GameMode::Menu | GameMode::GameOver => {}
            }
        }
        if controls.cheat_last_life {
            self.session.lives = 0;
        }

        match self.session.mode {
            GameMode::Play => {
                self.player.intent = MotionIntent {
                    up: controls.up,
                    down: controls.down,
                    left: controls.left,
                    right: controls.right,
                };
                self.player.sprint = controls.sprint;
                if controls.fire {
                    self.fire(now_ms);
                }
            }
            GameMode::GameOver => {
                if controls.fire || controls.confirm {
                    self.reset();
                }
            }
            GameMode::Menu => return self.handle_menu(controls, now_ms),
            GameMode::Paused => {}
        }
        Flow::Continue
    }

    fn handle_menu(&mut self, controls: &Controls, now_ms: u64) -> Flow {
        let wants_input = controls.up
            || controls.down
            || controls.confirm
            || (self.menu.screen == MenuScreen::Options && (controls.left || controls.right));
        if !wants_input || !self.menu_toggle.try_fire(now_ms) {
            return Flow::Continue;
        }

        if controls.up {
            self.menu.select_previous();
            return Flow::Continue;
        }
        if controls.down {
            self.menu.select_next();
            return Flow::Continue;
        }
        let value_button = self.menu.screen == MenuScreen::Options && self.menu.selected < 3;
        let change = if controls.left { -1 } else { 1 };
        if controls.confirm || value_button {
            let action = self.menu.activate(change);
            return self.apply_menu_action(action);
        }
        Flow::Continue
    }

    fn apply_menu_action(&mut self, action: MenuAction) -> Flow {
        match action {
            MenuAction::NewGame => {
                self.session.set_mode(GameMode::Play);
                self.reset();
            }
            MenuAction::Continue => self.session.set_mode(GameMode::Play),
            MenuAction::Exit => return Flow::Quit,
            MenuAction::OpenOptions | MenuAction::Back => self.menu.selected = 0,
            MenuAction::MusicVolume(level) => self.session.mixer.set_music(level),
            MenuAction::SfxVolume(level) => self.session.mixer.set_sfx(level),
            MenuAction::Difficulty(change) => self
                .session
                .set_difficulty(self.session.difficulty as i32 + change),
        }
        Flow::Continue
    }

    /// Fire a player shot; the launch sound only plays if a shot left.
    pub fn fire(&mut self, now_ms: u64) -> Option<usize> {
        let slot = self.player.fire(&mut self.projectiles, now_ms)?;
        self.session.push_cue(SoundCue::Play(Sfx::Launch1));
        Some(slot)
    }

    /// Start a new run: score, lives, health and fuel back to their start
    /// values and every enemy removed.  Leaves game over for play.
    pub fn reset(&mut self) {
        self.session.reset();
        if self.session.mode == GameMode::GameOver {
            self.session.set_mode(GameMode::Play);
        }
        self.enemies.remove_all();
        info!(lives = self.session.lives, "game reset");
    }

    pub fn status_text(&self) -> &'static str {
        match self.session.mode {
            GameMode::Play => "PLAY",
            GameMode::Paused => "PAUSED",
            GameMode::Menu => "MENU",
            GameMode::GameOver => "GAME OVER",
        }
    }

    pub fn take_sound_cues(&mut self) -> Vec<SoundCue> {
        self.session.take_cues()
    }
}
