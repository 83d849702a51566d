use air_superiority::enemies::*;
use air_superiority::entities::*;
use air_superiority::projectiles::ProjectilePool;
use air_superiority::session::Session;
use air_superiority::tuning::*;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bounds() -> Bounds {
    Bounds {
        width: 640,
        height: 480,
    }
}

fn pool(difficulty: u8) -> EnemyPool {
    EnemyPool::new(EnemyTuning::default(), bounds(), difficulty, 0)
}

fn projectiles() -> ProjectilePool {
    ProjectilePool::new(ProjectileTuning::default(), bounds(), 0)
}

fn session(difficulty: u8) -> Session {
    let mut s = Session::new(GameTuning::default());
    s.set_difficulty(difficulty as i32);
    s
}

/// Every draw returns the bottom of its range.
fn low_rng() -> StepRng {
    StepRng::new(0, 0)
}

fn place(pool: &mut EnemyPool, x: i32, y: i32) -> usize {
    pool.units_mut()
        .insert(EnemyUnit {
            body: Body::new(x, y, 100, 100).with_velocity(0, 2),
            kind: EnemyKind(3),
            fired: false,
            active: true,
        })
        .unwrap()
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawn_interval_shrinks_with_difficulty() {
    assert_eq!(pool(9).spawn_interval_ms(), 2000);
    assert_eq!(pool(5).spawn_interval_ms(), 2800);
    assert_eq!(pool(0).spawn_interval_ms(), 3800);
}

#[test]
fn nothing_spawns_before_interval() {
    let mut enemies = pool(5);
    let mut rng = low_rng();
    assert_eq!(enemies.spawn_random(5, &mut rng, 2800), None);
    assert_eq!(enemies.units().active_count(), 0);
}

#[test]
fn second_spawn_inside_new_interval_is_noop() {
    let mut enemies = pool(5);
    let mut rng = StdRng::seed_from_u64(42);
    assert!(enemies.spawn_random(5, &mut rng, 10_000).is_some());
    assert!(enemies.spawn_interval_ms() >= 2800);
    assert_eq!(enemies.spawn_random(5, &mut rng, 10_100), None);
    assert_eq!(enemies.units().active_count(), 1);
}

#[test]
fn spawn_random_enters_above_the_screen() {
    let mut enemies = pool(5);
    let mut rng = StdRng::seed_from_u64(7);
    let slot = enemies.spawn_random(5, &mut rng, 10_000).unwrap();
    let unit = enemies.units().get(slot).unwrap();
    assert!(unit.active);
    assert!(!unit.fired);
    assert!(unit.kind.0 < 18);
    assert_eq!(unit.body.vel_y, 2);
    assert!(unit.body.y == -300 || unit.body.y == -299);
}

#[test]
fn kind_zero_is_nudged_on_spawn() {
    let mut enemies = pool(5);
    let mut rng = low_rng();
    let slot = enemies.spawn_random(5, &mut rng, 10_000).unwrap();
    let unit = enemies.units().get(slot).unwrap();
    assert_eq!(unit.kind, EnemyKind(0));
    assert_eq!((unit.body.x, unit.body.y), (50, -299));
    assert_eq!(unit.body.vel_x, 0);
}

#[test]
fn steering_kinds_drift_toward_the_centre() {
    let mut enemies = pool(9);
    let mut rng = low_rng();
    let left = enemies.spawn(0, -300, EnemyKind(6), 9, &mut rng, 10_000).unwrap();
    let middle = enemies.spawn(300, -300, EnemyKind(8), 9, &mut rng, 20_000).unwrap();
    let right = enemies.spawn(500, -300, EnemyKind(11), 9, &mut rng, 30_000).unwrap();
    let straight = enemies.spawn(500, -300, EnemyKind(12), 9, &mut rng, 40_000).unwrap();

    let vel_x = |slot: usize| enemies.units().get(slot).unwrap().body.vel_x;
    assert_eq!(vel_x(left), 1);
    assert_eq!(vel_x(middle), 0);
    assert_eq!(vel_x(right), -1);
    assert_eq!(vel_x(straight), 0);
}

#[test]
fn spawn_into_full_pool_is_dropped() {
    let mut enemies = pool(9);
    for i in 0..10 {
        place(&mut enemies, i * 10, 0);
    }
    let mut rng = low_rng();
    assert_eq!(enemies.spawn_random(9, &mut rng, 10_000), None);
    assert_eq!(enemies.units().active_count(), 10);
}

#[test]
fn remove_all_clears_the_pool() {
    let mut enemies = pool(5);
    place(&mut enemies, 0, 0);
    place(&mut enemies, 200, 0);
    enemies.remove_all();
    assert_eq!(enemies.units().active_count(), 0);
}

// ── Update ────────────────────────────────────────────────────────────────────

#[test]
fn update_moves_enemies_down() {
    let mut enemies = pool(5);
    let slot = place(&mut enemies, 100, -200);
    let mut shots = projectiles();
    enemies.update(&mut shots, 270, &session(5), &mut low_rng(), 0);
    assert_eq!(enemies.units().get(slot).unwrap().body.y, -198);
}

#[test]
fn enemies_past_the_border_are_culled() {
    let mut enemies = pool(5);
    let gone = place(&mut enemies, 100, 781);
    let kept = place(&mut enemies, 100, 780);
    let mut shots = projectiles();
    enemies.update(&mut shots, 270, &session(5), &mut low_rng(), 0);
    assert!(!enemies.units().get(gone).unwrap().active);
    assert!(enemies.units().get(kept).unwrap().active);
}

#[test]
fn enemy_fires_once_at_the_fire_line() {
    let mut enemies = pool(9);
    let slot = place(&mut enemies, 270, 98);
    let mut shots = projectiles();
    let s = session(9);
    let mut rng = low_rng();

    enemies.update(&mut shots, 270, &s, &mut rng, 0);
    assert!(enemies.units().get(slot).unwrap().fired);
    assert_eq!(shots.enemy_units().active_count(), 1);
    let shot = shots.enemy_units().get(0).unwrap();
    assert_eq!(shot.owner, ProjectileOwner::Enemy);
    assert_eq!((shot.body.x, shot.body.y), (270, 200));
    assert_eq!((shot.body.vel_x, shot.body.vel_y), (0, 3));

    enemies.update(&mut shots, 270, &s, &mut rng, 0);
    assert_eq!(shots.enemy_units().active_count(), 1);
}

#[test]
fn enemies_above_the_fire_line_hold_fire() {
    let mut enemies = pool(9);
    let slot = place(&mut enemies, 270, 0);
    let mut shots = projectiles();
    enemies.update(&mut shots, 270, &session(9), &mut low_rng(), 0);
    assert!(!enemies.units().get(slot).unwrap().fired);
    assert_eq!(shots.enemy_units().active_count(), 0);
}

#[test]
fn shots_are_aimed_outside_the_dead_zone() {
    let mut enemies = pool(9);
    let left_of_player = place(&mut enemies, 0, 98);
    let right_of_player = place(&mut enemies, 500, 98);
    let mut shots = projectiles();
    enemies.update(&mut shots, 270, &session(9), &mut low_rng(), 0);

    assert!(enemies.units().get(left_of_player).unwrap().fired);
    assert!(enemies.units().get(right_of_player).unwrap().fired);
    let vel_x: Vec<i32> = shots.enemy_units().iter_active().map(|u| u.body.vel_x).collect();
    assert_eq!(vel_x, vec![3, -3]);
}

#[test]
fn low_difficulty_wastes_most_shots() {
    let mut enemies = pool(0);
    for i in 0..10 {
        place(&mut enemies, i * 50, 98);
    }
    let mut shots = projectiles();
    let mut rng = StdRng::seed_from_u64(1234);
    enemies.update(&mut shots, 270, &session(0), &mut rng, 0);

    assert!(enemies.units().iter_active().all(|u| u.fired));
    assert!(shots.enemy_units().active_count() < 10);
}

#[test]
fn full_projectile_pool_keeps_the_shot_for_later() {
    let mut enemies = pool(9);
    let slot = place(&mut enemies, 270, 98);
    let mut shots = projectiles();
    for _ in 0..10 {
        shots.add_enemy_projectile(0, 0, 0, 3).unwrap();
    }
    enemies.update(&mut shots, 270, &session(9), &mut low_rng(), 0);
    assert!(!enemies.units().get(slot).unwrap().fired);
}

#[test]
fn update_spawns_once_interval_elapses() {
    let mut enemies = pool(5);
    let mut shots = projectiles();
    let mut rng = StdRng::seed_from_u64(3);
    enemies.update(&mut shots, 270, &session(5), &mut rng, 1000);
    assert_eq!(enemies.units().active_count(), 0);
    enemies.update(&mut shots, 270, &session(5), &mut rng, 10_000);
    assert_eq!(enemies.units().active_count(), 1);
}
