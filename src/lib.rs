//! Simulation core of a small top-down arcade shooter: an airplane over the
//! ocean against waves of enemy aircraft, with fixed-size pools for enemies,
//! projectiles, pickups and explosions.
//!
//! The library has no I/O.  `compute::Game` is driven by a frontend (the
//! terminal binary in `main.rs`) that supplies controls, time and randomness.

pub mod background;
pub mod collider;
pub mod compute;
pub mod enemies;
pub mod entities;
pub mod explosions;
pub mod menu;
pub mod pickups;
pub mod player;
pub mod pool;
pub mod projectiles;
pub mod session;
pub mod sound;
pub mod throttle;
pub mod tuning;
