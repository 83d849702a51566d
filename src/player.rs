/// The player's airplane.
///
/// Health, fuel and lives belong to the `Session`; this record only holds
/// what is specific to the airplane itself (position, input intent and the
/// respawn countdown).

use tracing::{debug, info};

use crate::collider::intersects;
use crate::enemies::EnemyPool;
use crate::entities::{Body, Bounds, GameMode, Pose};
use crate::explosions::ExplosionPool;
use crate::projectiles::ProjectilePool;
use crate::session::Session;
use crate::throttle::Pulser;
use crate::tuning::PlayerTuning;

/// Movement requested by the input layer for the current tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MotionIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub intent: MotionIntent,
    pub sprint: bool,
    pub active: bool,
    /// Ticks left of post-death invulnerability.
    pub respawn_count: u32,
    pub pose: Pose,
    blink: Pulser,
    bounds: Bounds,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(tuning: PlayerTuning, bounds: Bounds) -> Self {
        let mut player = Self {
            body: Body::new(0, 0, tuning.size, tuning.size),
            intent: MotionIntent::default(),
            sprint: false,
            active: true,
            respawn_count: 0,
            pose: Pose::Level,
            blink: Pulser::new(tuning.blink_period),
            bounds,
            tuning,
        };
        player.set_position_bottom_middle();
        player
    }

    /// Where the airplane starts and respawns.
    pub fn start_position(&self) -> (i32, i32) {
        (
            self.bounds.width / 2 - self.tuning.size / 2,
            self.bounds.height - self.tuning.size,
        )
    }

    pub fn set_position_bottom_middle(&mut self) {
        let (x, y) = self.start_position();
        self.body.x = x;
        self.body.y = y;
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn_count > 0
    }

    /// Collisions only hurt once the respawn countdown is over.
    pub fn is_vulnerable(&self) -> bool {
        self.active && !self.is_respawning()
    }

    /// Whether to draw the sprite this frame; blinks while respawning.
    pub fn visible(&mut self, mode: GameMode) -> bool {
        if mode == GameMode::GameOver {
            return false;
        }
        !(self.is_respawning() && self.blink.next())
    }

    pub fn heal(&self, session: &mut Session, amount: i32) {
        session.set_health(session.health + amount);
    }

    pub fn refuel(&self, session: &mut Session, amount: i32) {
        session.set_fuel(session.fuel + amount);
    }

    pub fn take_damage(&mut self, session: &mut Session, amount: i32) {
        let health = session.health - amount;
        if health > 0 {
            session.health = health;
        } else {
            session.health = 0;
            self.die(session);
        }
    }

    /// Lose a life and start over at the bottom of the screen.  Running out
    /// of lives ends the game, but the airplane is still reset.
    pub fn die(&mut self, session: &mut Session) {
        self.respawn_count = self.tuning.respawn_ticks;
        session.lose_life();
        self.set_position_bottom_middle();
        session.restore_health_and_fuel();
        if session.lives < 0 {
            info!(score = session.score, "game over");
            session.set_mode(GameMode::GameOver);
        }
    }

    /// Ask for a shot from the nose of the airplane.
    pub fn fire(&self, projectiles: &mut ProjectilePool, now_ms: u64) -> Option<usize> {
        projectiles.add_player_projectile(self.body.x, self.body.y, now_ms)
    }

    pub fn update(
        &mut self,
        enemies: &mut EnemyPool,
        explosions: &mut ExplosionPool,
        session: &mut Session,
        now_ms: u64,
    ) {
        if session.mode == GameMode::Play {
            self.pose = self.pose_for_intent();
            self.apply_motion();
            self.collide_enemies(enemies, explosions, session, now_ms);
        } else {
            self.pose = Pose::Level;
        }

        // Intent has to be re-asserted by the input layer every tick.
        self.intent = MotionIntent::default();
        self.sprint = false;
        self.respawn_count = self.respawn_count.saturating_sub(1);
    }

    fn speed(&self) -> i32 {
        if self.sprint {
            self.tuning.speed + self.tuning.sprint_bonus
        } else {
            self.tuning.speed
        }
    }

    fn apply_motion(&mut self) {
        let speed = self.speed();
        self.body.vel_x = 0;
        self.body.vel_y = 0;
        if self.intent.up {
            self.body.vel_y = -speed;
        }
        if self.intent.down {
            self.body.vel_y = speed;
        }
        if self.intent.left {
            self.body.vel_x = -speed;
        }
        if self.intent.right {
            self.body.vel_x = speed;
        }

        let x_max = self.bounds.width - self.tuning.size;
        let y_max = self.bounds.height - self.tuning.size;
        self.body.x = (self.body.x + self.body.vel_x).clamp(0, x_max);
        self.body.y = (self.body.y + self.body.vel_y).clamp(0, y_max);
    }

    fn pose_for_intent(&self) -> Pose {
        let mut pose = Pose::Level;
        if self.intent.left {
            pose = if self.sprint { Pose::HardLeft } else { Pose::Left };
        }
        if self.intent.right {
            pose = if self.sprint { Pose::HardRight } else { Pose::Right };
        }
        pose
    }

    /// Ramming an enemy destroys it and costs health.  Only the first enemy
    /// in slot order is handled per tick.
    fn collide_enemies(
        &mut self,
        enemies: &mut EnemyPool,
        explosions: &mut ExplosionPool,
        session: &mut Session,
        now_ms: u64,
    ) {
        if !self.is_vulnerable() {
            return;
        }
        let hit = enemies
            .units()
            .slots()
            .iter()
            .position(|e| e.active && intersects(&self.body, &e.body));
        let Some(index) = hit else {
            return;
        };
        let Some(enemy) = enemies.units_mut().get_mut(index) else {
            return;
        };
        enemy.active = false;
        let wreck = *enemy;
        debug!(slot = index, kind = wreck.kind.0, "player rammed enemy");
        explosions.add(wreck.body.x, wreck.body.y, wreck.kind.explosion(), session, now_ms);
        session.increment_score();
        self.take_damage(session, self.tuning.enemy_collision_damage);
    }
}
