/// Cloud layer drifting over the ocean.

use rand::Rng;

use crate::entities::Bounds;

pub const CLOUD_COUNT: usize = 7;

/// Clouds start and wrap this far outside the screen.
const SPAWN_BUFFER: f32 = 100.0;
const START_SPEEDS: [f32; 4] = [0.1, 0.2, 0.3, 0.4];
/// Cloud sizes in world units, one per sprite.
const CLOUD_SIZES: [(i32, i32); CLOUD_COUNT] = [
    (150, 150),
    (150, 150),
    (50, 50),
    (200, 150),
    (100, 100),
    (100, 100),
    (200, 100),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct Background {
    pub clouds: [Cloud; CLOUD_COUNT],
    bounds: Bounds,
}

impl Background {
    pub fn new(bounds: Bounds, rng: &mut impl Rng) -> Self {
        let clouds = CLOUD_SIZES.map(|(width, height)| Cloud {
            x: rng.gen_range(0..bounds.width) as f32,
            y: rng.gen_range(0..bounds.height) as f32,
            width,
            height,
            speed: START_SPEEDS[rng.gen_range(0..START_SPEEDS.len())],
        });
        Self { clouds, bounds }
    }

    /// Drift every cloud down; one that leaves the bottom comes back at the
    /// top at a new column and speed.
    pub fn update(&mut self, rng: &mut impl Rng) {
        let end_y = self.bounds.height as f32 + SPAWN_BUFFER;
        let wrap_width = (self.bounds.width - 100).max(1);
        for cloud in self.clouds.iter_mut() {
            if cloud.y > end_y {
                cloud.y = -SPAWN_BUFFER;
                cloud.x = rng.gen_range(0..wrap_width) as f32;
                cloud.speed = rng.gen::<f32>();
            } else {
                cloud.y += cloud.speed;
            }
        }
    }
}
