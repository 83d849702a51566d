/// Pickup pool: loot dropped by destroyed enemies.

use rand::Rng;
use tracing::{debug, trace};

use crate::collider::intersects;
use crate::entities::{Body, Bounds, EnemyUnit, PickupKind, PickupUnit};
use crate::player::Player;
use crate::pool::Pool;
use crate::session::Session;
use crate::tuning::PickupTuning;

#[derive(Clone, Debug)]
pub struct PickupPool {
    units: Pool<PickupUnit>,
    bounds: Bounds,
    tuning: PickupTuning,
}

impl PickupPool {
    pub fn new(tuning: PickupTuning, bounds: Bounds) -> Self {
        Self {
            units: Pool::new(),
            bounds,
            tuning,
        }
    }

    pub fn units(&self) -> &Pool<PickupUnit> {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut Pool<PickupUnit> {
        &mut self.units
    }

    /// Place a pickup of `kind` at `(x, y)` with a full lifetime.
    pub fn add(&mut self, x: i32, y: i32, kind: PickupKind) -> Option<usize> {
        let unit = PickupUnit {
            body: Body::new(x, y, self.tuning.width, self.tuning.height),
            kind,
            life: self.tuning.duration,
            active: true,
        };
        let slot = self.units.insert(unit);
        if slot.is_none() {
            trace!(?kind, "pickup pool full");
        }
        slot
    }

    /// Called for every kill.  One kill in `drop_chance` leaves a random
    /// pickup next to the wreck.
    pub fn drop_loot(&mut self, enemy: &EnemyUnit, rng: &mut impl Rng) -> Option<usize> {
        if rng.gen_range(0..self.tuning.drop_chance) != 0 {
            return None;
        }
        let kind = PickupKind::ALL[rng.gen_range(0..PickupKind::ALL.len())];
        let offset = self.tuning.drop_offset;
        let slot = self.add(enemy.body.x + offset, enemy.body.y + offset, kind)?;
        debug!(?kind, slot, "loot dropped");
        Some(slot)
    }

    /// Age every pickup, retire the expired or stray ones and hand the rest
    /// to the player if touched.
    pub fn update(&mut self, player: &Player, session: &mut Session) {
        let bounds = self.bounds;
        let border = self.tuning.border;
        for unit in self.units.slots_mut().iter_mut() {
            if !unit.active {
                continue;
            }
            if !bounds.contains(&unit.body, border) || unit.life <= 0 {
                unit.active = false;
                continue;
            }
            unit.life -= 1;
            if player.active && intersects(&unit.body, &player.body) {
                apply_pickup(&self.tuning, unit.kind, player, session);
                unit.active = false;
                session.increment_score();
                debug!(kind = ?unit.kind, "pickup collected");
            }
        }
    }
}

fn apply_pickup(tuning: &PickupTuning, kind: PickupKind, player: &Player, session: &mut Session) {
    match kind {
        PickupKind::HealthSmall => player.heal(session, tuning.heal_small),
        PickupKind::HealthLarge => player.heal(session, tuning.heal_large),
        PickupKind::FuelSmall => player.refuel(session, tuning.fuel_small),
        PickupKind::FuelLarge => player.refuel(session, tuning.fuel_large),
    }
}
