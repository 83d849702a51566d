/// Gameplay tuning.
///
/// Every number the simulation uses lives here, grouped per component.  The
/// defaults reproduce the stock game; a TOML file can override any subset of
/// them (missing keys fall back to the default).

use std::fmt;
use std::path::Path;

use serde::Deserialize;

/// Highest selectable difficulty.  Difficulty doubles as the enemy fire roll
/// threshold, so 9 and above means every enemy shoots.
pub const DIFFICULTY_MAX: u8 = 9;

#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The TOML text did not match the tuning layout.
    Parse(toml::de::Error),
    /// A value parsed fine but is out of range.
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read tuning file: {e}"),
            Self::Parse(e) => write!(f, "malformed tuning file: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

/// Virtual screen the world is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: i32,
    pub height: i32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: i32,
    pub height: i32,
    /// Downward speed in world units per tick.
    pub speed: i32,
    /// Number of visual kinds; kinds in `steer_kinds` drift toward the centre.
    pub kinds: u8,
    pub steer_kinds_start: u8,
    pub steer_kinds_end: u8,
    /// Slack around the screen before an enemy is culled.
    pub border: i32,
    pub start_y: i32,
    /// Extra offset applied to kind 0 on spawn.
    pub kind0_offset_x: i32,
    pub kind0_offset_y: i32,
    pub spawn_interval_ms: u64,
    /// Added per difficulty step below the maximum.
    pub spawn_step_ms: u64,
    pub spawn_jitter_ms: u64,
    /// Enemies fire once when they reach this line.
    pub fire_line_y: i32,
    /// Horizontal distance to the player inside which shots fly straight.
    pub aim_dead_zone: i32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            speed: 2,
            kinds: 18,
            steer_kinds_start: 6,
            steer_kinds_end: 12,
            border: 300,
            start_y: -300,
            kind0_offset_x: 50,
            kind0_offset_y: 1,
            spawn_interval_ms: 2000,
            spawn_step_ms: 200,
            spawn_jitter_ms: 2000,
            fire_line_y: 100,
            aim_dead_zone: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub border: i32,
    /// Muzzle offset from the player's top-left corner.
    pub offset_x: i32,
    pub offset_y: i32,
    /// Minimum time between two player shots.
    pub min_interval_ms: u64,
    /// Damage an enemy shot deals to the player.
    pub player_damage: i32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: 8,
            height: 20,
            speed: 3,
            border: 100,
            offset_x: 50,
            offset_y: 1,
            min_interval_ms: 500,
            player_damage: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub width: i32,
    pub height: i32,
    pub border: i32,
    pub drop_offset: i32,
    /// Lifetime in ticks.
    pub duration: i32,
    /// One drop per `drop_chance` kills on average.
    pub drop_chance: u32,
    pub heal_small: i32,
    pub heal_large: i32,
    pub fuel_small: i32,
    pub fuel_large: i32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            border: 100,
            drop_offset: 50,
            duration: 500,
            drop_chance: 4,
            heal_small: 25,
            heal_large: 35,
            fuel_small: 25,
            fuel_large: 55,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    pub width: i32,
    pub height: i32,
    /// Last animation frame; the unit retires on the frame change after it.
    pub frames_max: u8,
    pub min_interval_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            frames_max: 5,
            min_interval_ms: 500,
            frame_interval_ms: 70,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: i32,
    pub speed: i32,
    pub sprint_bonus: i32,
    /// Damage taken when ramming an enemy.
    pub enemy_collision_damage: i32,
    /// Ticks of invulnerability after a death.
    pub respawn_ticks: u32,
    pub blink_period: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 100,
            speed: 3,
            sprint_bonus: 2,
            enemy_collision_damage: 30,
            respawn_ticks: 60,
            blink_period: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub health_max: i32,
    pub fuel_max: i32,
    pub start_lives: i32,
    pub points_per_life: u32,
    pub difficulty: u8,
    pub mode_debounce_ms: u64,
    pub menu_debounce_ms: u64,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            health_max: 100,
            fuel_max: 100,
            start_lives: 3,
            points_per_life: 30,
            difficulty: 5,
            mode_debounce_ms: 900,
            menu_debounce_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub pickup: PickupTuning,
    pub explosion: ExplosionTuning,
    pub player: PlayerTuning,
    pub game: GameTuning,
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason })
    }
}

impl Tuning {
    pub fn from_toml_str(text: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = toml::from_str(text).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path).map_err(TuningError::Io)?;
        Self::from_toml_str(&text)
    }

    /// Reject values the simulation cannot work with (empty ranges, zero
    /// sizes, a player bigger than the screen).
    pub fn validate(&self) -> Result<(), TuningError> {
        check(self.world.width > 0, "world.width", "must be positive")?;
        check(self.world.height > 0, "world.height", "must be positive")?;
        check(
            self.enemy.width > 0 && self.enemy.width < self.world.width,
            "enemy.width",
            "must be positive and narrower than the world",
        )?;
        check(self.enemy.height > 0, "enemy.height", "must be positive")?;
        check(self.enemy.kinds > 0, "enemy.kinds", "must be at least 1")?;
        check(
            self.enemy.steer_kinds_start <= self.enemy.steer_kinds_end,
            "enemy.steer_kinds_start",
            "must not exceed steer_kinds_end",
        )?;
        check(self.projectile.width > 0, "projectile.width", "must be positive")?;
        check(self.projectile.height > 0, "projectile.height", "must be positive")?;
        check(self.pickup.drop_chance > 0, "pickup.drop_chance", "must be at least 1")?;
        check(self.pickup.duration > 0, "pickup.duration", "must be positive")?;
        check(
            self.player.size > 0
                && self.player.size <= self.world.width
                && self.player.size <= self.world.height,
            "player.size",
            "must be positive and fit the world",
        )?;
        check(self.game.health_max > 0, "game.health_max", "must be positive")?;
        check(self.game.fuel_max > 0, "game.fuel_max", "must be positive")?;
        check(self.game.start_lives >= 0, "game.start_lives", "must not be negative")?;
        check(
            self.game.points_per_life > 0,
            "game.points_per_life",
            "must be at least 1",
        )?;
        check(
            self.game.difficulty <= DIFFICULTY_MAX,
            "game.difficulty",
            "must be between 0 and 9",
        )?;
        Ok(())
    }
}
