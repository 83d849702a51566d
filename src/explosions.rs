/// Explosion pool. Purely visual, never takes part in collisions.

use tracing::trace;

use crate::entities::{Body, ExplosionKind, ExplosionUnit};
use crate::pool::Pool;
use crate::session::Session;
use crate::sound::{Sfx, SoundCue};
use crate::throttle::Throttle;
use crate::tuning::ExplosionTuning;

#[derive(Clone, Debug)]
pub struct ExplosionPool {
    units: Pool<ExplosionUnit>,
    spawn: Throttle,
    frame: Throttle,
    tuning: ExplosionTuning,
}

impl ExplosionPool {
    pub fn new(tuning: ExplosionTuning, now_ms: u64) -> Self {
        Self {
            units: Pool::new(),
            spawn: Throttle::new(tuning.min_interval_ms, now_ms),
            frame: Throttle::new(tuning.frame_interval_ms, now_ms),
            tuning,
        }
    }

    pub fn units(&self) -> &Pool<ExplosionUnit> {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut Pool<ExplosionUnit> {
        &mut self.units
    }

    /// Start an explosion at `(x, y)`.  Rate-limited across all kinds; the
    /// request is dropped if the interval has not elapsed or the pool is full.
    pub fn add(&mut self, x: i32, y: i32, kind: ExplosionKind, session: &mut Session, now_ms: u64) {
        if !self.spawn.ready(now_ms) {
            trace!(?kind, "explosion throttled");
            return;
        }
        let unit = ExplosionUnit {
            body: Body::new(x, y, self.tuning.width, self.tuning.height),
            kind,
            frame: 0,
            active: true,
        };
        if self.units.insert(unit).is_none() {
            trace!(?kind, "explosion pool full");
            return;
        }
        self.spawn.mark(now_ms);
        session.push_cue(SoundCue::Play(kind.sfx()));
        session.push_cue(SoundCue::Stop(Sfx::Launch1));
    }

    pub fn update(&mut self, now_ms: u64) {
        let change_frame = self.frame.try_fire(now_ms);
        let frames_max = self.tuning.frames_max;
        for unit in self.units.slots_mut().iter_mut() {
            unit.body.advance();
            if change_frame && unit.active {
                if unit.frame < frames_max {
                    unit.frame += 1;
                } else {
                    unit.active = false;
                }
            }
        }
    }
}
