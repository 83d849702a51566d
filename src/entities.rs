/// Game entity types. Pure data, no game logic.

use crate::collider::{Collider, Rect};
use crate::pool::Slot;
use crate::sound::Sfx;

// ── Modes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GameMode {
    Play,
    Paused,
    #[default]
    Menu,
    GameOver,
}

// ── Shared geometry ───────────────────────────────────────────────────────────

/// Position, velocity and size of anything that moves through the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub vel_x: i32,
    pub vel_y: i32,
    pub width: i32,
    pub height: i32,
}

impl Body {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_velocity(mut self, vel_x: i32, vel_y: i32) -> Self {
        self.vel_x = vel_x;
        self.vel_y = vel_y;
        self
    }

    pub fn advance(&mut self) {
        self.x += self.vel_x;
        self.y += self.vel_y;
    }
}

impl Collider for Body {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The visible screen in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// True while the top-left corner stays within the screen grown by
    /// `border` on every side.
    pub fn contains(&self, body: &Body, border: i32) -> bool {
        !(body.x < -border
            || body.x > border + self.width
            || body.y < -border
            || body.y > border + self.height)
    }

    /// -1, 0 or 1 for the left, middle or right third of the screen.
    pub fn third_of_screen(&self, x: i32) -> i32 {
        let divider = self.width / 3;
        if x < divider {
            -1
        } else if x < divider * 2 {
            0
        } else {
            1
        }
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// Visual variant of an enemy aircraft (index into the sprite table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct EnemyKind(pub u8);

impl EnemyKind {
    /// Heavier airframes leave a bigger explosion.
    pub fn explosion(self) -> ExplosionKind {
        if self.0 > 7 {
            ExplosionKind::Large
        } else {
            ExplosionKind::Small
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProjectileOwner {
    #[default]
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PickupKind {
    #[default]
    HealthSmall,
    HealthLarge,
    FuelSmall,
    FuelLarge,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::HealthSmall,
        PickupKind::HealthLarge,
        PickupKind::FuelSmall,
        PickupKind::FuelLarge,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExplosionKind {
    /// Light enemy destroyed.
    #[default]
    Small,
    /// Heavy enemy destroyed.
    Large,
    /// Player hit.
    Player,
}

impl ExplosionKind {
    pub fn sfx(self) -> Sfx {
        match self {
            ExplosionKind::Small => Sfx::Boom,
            ExplosionKind::Large => Sfx::Exp1,
            ExplosionKind::Player => Sfx::Exp2,
        }
    }
}

/// Which way the player's airplane is banking, for the sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Pose {
    HardLeft,
    Left,
    #[default]
    Level,
    Right,
    HardRight,
}

// ── Pool units ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EnemyUnit {
    pub body: Body,
    pub kind: EnemyKind,
    /// Set once the enemy has taken (or passed on) its single shot.
    pub fired: bool,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProjectileUnit {
    pub body: Body,
    pub owner: ProjectileOwner,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PickupUnit {
    pub body: Body,
    pub kind: PickupKind,
    /// Ticks left before the pickup vanishes.
    pub life: i32,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ExplosionUnit {
    pub body: Body,
    pub kind: ExplosionKind,
    pub frame: u8,
    pub active: bool,
}

macro_rules! impl_unit {
    ($($unit:ty),*) => {$(
        impl Slot for $unit {
            fn is_active(&self) -> bool {
                self.active
            }

            fn deactivate(&mut self) {
                self.active = false;
            }
        }

        impl Collider for $unit {
            fn rect(&self) -> Rect {
                self.body.rect()
            }
        }
    )*};
}

impl_unit!(EnemyUnit, ProjectileUnit, PickupUnit, ExplosionUnit);
