/// Enemy aircraft pool.
///
/// Enemies enter from above the screen, fly straight down (some kinds drift
/// toward the centre) and take a single shot at the player when they cross
/// the fire line.

use rand::Rng;
use tracing::{debug, trace};

use crate::entities::{Body, Bounds, EnemyKind, EnemyUnit};
use crate::pool::Pool;
use crate::projectiles::ProjectilePool;
use crate::session::Session;
use crate::throttle::Throttle;
use crate::tuning::{EnemyTuning, DIFFICULTY_MAX};

#[derive(Clone, Debug)]
pub struct EnemyPool {
    units: Pool<EnemyUnit>,
    spawn: Throttle,
    bounds: Bounds,
    tuning: EnemyTuning,
}

impl EnemyPool {
    pub fn new(tuning: EnemyTuning, bounds: Bounds, difficulty: u8, now_ms: u64) -> Self {
        let interval = spawn_interval(&tuning, difficulty, 0);
        Self {
            units: Pool::new(),
            spawn: Throttle::new(interval, now_ms),
            bounds,
            tuning,
        }
    }

    pub fn units(&self) -> &Pool<EnemyUnit> {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut Pool<EnemyUnit> {
        &mut self.units
    }

    /// Milliseconds that must pass after the last spawn before the next one.
    pub fn spawn_interval_ms(&self) -> u64 {
        self.spawn.interval_ms()
    }

    pub fn remove_all(&mut self) {
        self.units.clear();
    }

    /// Random kind at a random column, above the top of the screen.
    pub fn spawn_random(
        &mut self,
        difficulty: u8,
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Option<usize> {
        let kind = EnemyKind(rng.gen_range(0..self.tuning.kinds));
        let x = rng.gen_range(0..self.bounds.width - self.tuning.width);
        self.spawn(x, self.tuning.start_y, kind, difficulty, rng, now_ms)
    }

    /// Spawn one enemy if the spawn interval has elapsed and a slot is free.
    /// A successful spawn draws a fresh interval for the next one.
    pub fn spawn(
        &mut self,
        x: i32,
        y: i32,
        kind: EnemyKind,
        difficulty: u8,
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Option<usize> {
        if !self.spawn.ready(now_ms) {
            return None;
        }
        let (mut x, mut y) = (x, y);
        if kind.0 == 0 {
            x += self.tuning.kind0_offset_x;
            y += self.tuning.kind0_offset_y;
        }
        let steers = (self.tuning.steer_kinds_start..self.tuning.steer_kinds_end).contains(&kind.0);
        let vel_x = if steers {
            -self.bounds.third_of_screen(x)
        } else {
            0
        };
        let unit = EnemyUnit {
            body: Body::new(x, y, self.tuning.width, self.tuning.height)
                .with_velocity(vel_x, self.tuning.speed),
            kind,
            fired: false,
            active: true,
        };
        let Some(slot) = self.units.insert(unit) else {
            trace!(kind = kind.0, "enemy pool full");
            return None;
        };
        let jitter = if self.tuning.spawn_jitter_ms > 0 {
            rng.gen_range(0..self.tuning.spawn_jitter_ms)
        } else {
            0
        };
        self.spawn.set_interval(spawn_interval(&self.tuning, difficulty, jitter));
        self.spawn.mark(now_ms);
        debug!(slot, kind = kind.0, x, y, vel_x, "enemy spawned");
        Some(slot)
    }

    /// Cull, move and let enemies shoot, then try to spawn a new one.
    pub fn update(
        &mut self,
        projectiles: &mut ProjectilePool,
        player_x: i32,
        session: &Session,
        rng: &mut impl Rng,
        now_ms: u64,
    ) {
        let bounds = self.bounds;
        let tuning = self.tuning;
        for unit in self.units.slots_mut().iter_mut() {
            if !unit.active {
                continue;
            }
            if !bounds.contains(&unit.body, tuning.border) {
                unit.active = false;
                continue;
            }
            unit.body.advance();
            fire_projectile(&tuning, unit, projectiles, player_x, session.difficulty, rng);
        }
        self.spawn_random(session.difficulty, rng, now_ms);
    }
}

/// Higher difficulty shortens the wait between spawns.
fn spawn_interval(tuning: &EnemyTuning, difficulty: u8, jitter: u64) -> u64 {
    let steps = DIFFICULTY_MAX.saturating_sub(difficulty) as u64;
    tuning.spawn_interval_ms + steps * tuning.spawn_step_ms + jitter
}

/// Single aimed shot when the enemy crosses the fire line.  A failed roll
/// (more likely on low difficulty) uses up the shot; a full projectile pool
/// does not, so the enemy tries again next tick.
fn fire_projectile(
    tuning: &EnemyTuning,
    unit: &mut EnemyUnit,
    projectiles: &mut ProjectilePool,
    player_x: i32,
    difficulty: u8,
    rng: &mut impl Rng,
) {
    if unit.fired || tuning.fire_line_y - unit.body.y >= 3 {
        return;
    }
    let roll: u8 = rng.gen_range(0..DIFFICULTY_MAX);
    if roll > difficulty {
        unit.fired = true;
        return;
    }
    let y = unit.body.y + unit.body.height;
    let vel_y = unit.body.vel_y + 1;
    let dx = player_x - unit.body.x;
    let vel_x = if dx > tuning.aim_dead_zone {
        vel_y
    } else if dx < -tuning.aim_dead_zone {
        -vel_y
    } else {
        0
    };
    if projectiles
        .add_enemy_projectile(unit.body.x, y, vel_x, vel_y)
        .is_some()
    {
        unit.fired = true;
    }
}
