/// Player and enemy projectiles, kept in two parallel fixed pools.

use rand::Rng;
use tracing::{debug, trace};

use crate::collider::intersects;
use crate::enemies::EnemyPool;
use crate::entities::{Body, Bounds, ExplosionKind, ProjectileOwner, ProjectileUnit};
use crate::explosions::ExplosionPool;
use crate::pickups::PickupPool;
use crate::player::Player;
use crate::pool::{Pool, POOL_CAPACITY};
use crate::session::Session;
use crate::throttle::Throttle;
use crate::tuning::ProjectileTuning;

#[derive(Clone, Debug)]
pub struct ProjectilePool {
    player_units: Pool<ProjectileUnit>,
    enemy_units: Pool<ProjectileUnit>,
    player_fire: Throttle,
    bounds: Bounds,
    tuning: ProjectileTuning,
}

/// Everything a projectile hit can touch besides the projectiles themselves.
pub struct Targets<'a> {
    pub enemies: &'a mut EnemyPool,
    pub pickups: &'a mut PickupPool,
    pub explosions: &'a mut ExplosionPool,
    pub player: &'a mut Player,
}

impl ProjectilePool {
    pub fn new(tuning: ProjectileTuning, bounds: Bounds, now_ms: u64) -> Self {
        Self {
            player_units: Pool::new(),
            enemy_units: Pool::new(),
            player_fire: Throttle::new(tuning.min_interval_ms, now_ms),
            bounds,
            tuning,
        }
    }

    pub fn player_units(&self) -> &Pool<ProjectileUnit> {
        &self.player_units
    }

    pub fn player_units_mut(&mut self) -> &mut Pool<ProjectileUnit> {
        &mut self.player_units
    }

    pub fn enemy_units(&self) -> &Pool<ProjectileUnit> {
        &self.enemy_units
    }

    pub fn enemy_units_mut(&mut self) -> &mut Pool<ProjectileUnit> {
        &mut self.enemy_units
    }

    /// A player shot leaving from the muzzle offset of `(x, y)`.  At most one
    /// shot per `min_interval_ms`.
    pub fn add_player_projectile(&mut self, x: i32, y: i32, now_ms: u64) -> Option<usize> {
        if !self.player_fire.ready(now_ms) {
            return None;
        }
        let unit = self.make_unit(
            x + self.tuning.offset_x,
            y + self.tuning.offset_y,
            0,
            -self.tuning.speed,
            ProjectileOwner::Player,
        );
        let Some(slot) = self.player_units.insert(unit) else {
            trace!("player projectile pool full");
            return None;
        };
        self.player_fire.mark(now_ms);
        debug!(slot, "player fired");
        Some(slot)
    }

    /// An enemy shot.  Not throttled: each enemy only ever fires once.
    pub fn add_enemy_projectile(&mut self, x: i32, y: i32, vel_x: i32, vel_y: i32) -> Option<usize> {
        let unit = self.make_unit(x, y, vel_x, vel_y, ProjectileOwner::Enemy);
        let slot = self.enemy_units.insert(unit);
        match slot {
            Some(slot) => debug!(slot, vel_x, vel_y, "enemy fired"),
            None => trace!("enemy projectile pool full"),
        }
        slot
    }

    fn make_unit(&self, x: i32, y: i32, vel_x: i32, vel_y: i32, owner: ProjectileOwner) -> ProjectileUnit {
        ProjectileUnit {
            body: Body::new(x, y, self.tuning.width, self.tuning.height).with_velocity(vel_x, vel_y),
            owner,
            active: true,
        }
    }

    /// Move, cull and resolve hits.  Slots are walked in index order,
    /// player shot `i` before enemy shot `i`.
    pub fn update(
        &mut self,
        targets: Targets<'_>,
        session: &mut Session,
        rng: &mut impl Rng,
        now_ms: u64,
    ) {
        let Targets {
            enemies,
            pickups,
            explosions,
            player,
        } = targets;
        for i in 0..POOL_CAPACITY {
            if let Some(unit) = self.player_units.get_mut(i) {
                if unit.active {
                    if !self.bounds.contains(&unit.body, self.tuning.border) {
                        unit.active = false;
                    } else {
                        unit.body.advance();
                        hit_enemy(unit, enemies, pickups, explosions, session, rng, now_ms);
                    }
                }
            }
            if let Some(unit) = self.enemy_units.get_mut(i) {
                if unit.active {
                    if !self.bounds.contains(&unit.body, self.tuning.border) {
                        unit.active = false;
                    } else {
                        unit.body.advance();
                        hit_player(unit, player, explosions, self.tuning.player_damage, session, now_ms);
                    }
                }
            }
        }
    }
}

/// First active enemy overlapping the shot, in slot order, is destroyed.
fn hit_enemy(
    unit: &mut ProjectileUnit,
    enemies: &mut EnemyPool,
    pickups: &mut PickupPool,
    explosions: &mut ExplosionPool,
    session: &mut Session,
    rng: &mut impl Rng,
    now_ms: u64,
) {
    let hit = enemies
        .units()
        .slots()
        .iter()
        .position(|e| e.active && intersects(&unit.body, &e.body));
    let Some(index) = hit else {
        return;
    };
    let Some(enemy) = enemies.units_mut().get_mut(index) else {
        return;
    };
    enemy.active = false;
    let wreck = *enemy;
    unit.active = false;
    debug!(slot = index, kind = wreck.kind.0, "enemy shot down");
    pickups.drop_loot(&wreck, rng);
    explosions.add(wreck.body.x, wreck.body.y, wreck.kind.explosion(), session, now_ms);
    session.increment_score();
}

/// Enemy shots only hurt the player; they are ignored while the player is
/// respawning.  Being hit still scores a point.
fn hit_player(
    unit: &mut ProjectileUnit,
    player: &mut Player,
    explosions: &mut ExplosionPool,
    damage: i32,
    session: &mut Session,
    now_ms: u64,
) {
    if !player.is_vulnerable() || !intersects(&unit.body, &player.body) {
        return;
    }
    unit.active = false;
    debug!(damage, "player hit by enemy fire");
    player.take_damage(session, damage);
    explosions.add(player.body.x, player.body.y, ExplosionKind::Player, session, now_ms);
    session.increment_score();
}
