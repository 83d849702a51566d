use air_superiority::compute::*;
use air_superiority::entities::*;
use air_superiority::menu::MenuScreen;
use air_superiority::pool::POOL_CAPACITY;
use air_superiority::sound::{Sfx, SoundCue};
use air_superiority::tuning::Tuning;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn new_game() -> Game {
    Game::new(Tuning::default(), &mut seeded_rng(), 0)
}

fn playing_game() -> Game {
    let mut game = new_game();
    game.session.set_mode(GameMode::Play);
    game
}

fn press(controls: impl FnOnce(&mut Controls)) -> Controls {
    let mut c = Controls::default();
    controls(&mut c);
    c
}

fn place_enemy(game: &mut Game, x: i32, y: i32) -> usize {
    game.enemies
        .units_mut()
        .insert(EnemyUnit {
            body: Body::new(x, y, 100, 100).with_velocity(0, 2),
            kind: EnemyKind(3),
            fired: true,
            active: true,
        })
        .unwrap()
}

// ── Construction and status ───────────────────────────────────────────────────

#[test]
fn new_game_waits_in_the_menu() {
    let game = new_game();
    assert_eq!(game.session.mode, GameMode::Menu);
    assert_eq!(game.status_text(), "MENU");
    assert_eq!(game.enemies.units().active_count(), 0);
    assert_eq!((game.player.body.x, game.player.body.y), (270, 380));
}

#[test]
fn status_text_follows_the_mode() {
    let mut game = new_game();
    for (mode, text) in [
        (GameMode::Play, "PLAY"),
        (GameMode::Paused, "PAUSED"),
        (GameMode::GameOver, "GAME OVER"),
        (GameMode::Menu, "MENU"),
    ] {
        game.session.set_mode(mode);
        assert_eq!(game.status_text(), text);
    }
}

#[test]
fn update_order_is_fixed() {
    assert_eq!(
        UPDATE_ORDER,
        [
            Stage::Enemies,
            Stage::Projectiles,
            Stage::Pickups,
            Stage::Explosions,
            Stage::Player,
        ]
    );
}

// ── Update per mode ───────────────────────────────────────────────────────────

#[test]
fn menu_moves_clouds_but_spawns_nothing() {
    let mut game = new_game();
    let before = game.background.clouds;
    game.update(&mut seeded_rng(), 10_000);
    assert_ne!(game.background.clouds, before);
    assert_eq!(game.enemies.units().active_count(), 0);
}

#[test]
fn play_spawns_enemies() {
    let mut game = playing_game();
    game.update(&mut seeded_rng(), 10_000);
    assert_eq!(game.enemies.units().active_count(), 1);
}

#[test]
fn pause_and_game_over_freeze_the_world() {
    for mode in [GameMode::Paused, GameMode::GameOver] {
        let mut game = new_game();
        game.session.set_mode(mode);
        let slot = place_enemy(&mut game, 0, 0);
        let clouds = game.background.clouds;
        game.update(&mut seeded_rng(), 10_000);
        assert_eq!(game.enemies.units().get(slot).unwrap().body.y, 0);
        assert_eq!(game.background.clouds, clouds);
    }
}

#[test]
fn enemy_shot_down_cannot_ram_the_player_in_the_same_frame() {
    let mut rng = StepRng::new(0, 0);
    let mut game = Game::new(Tuning::default(), &mut rng, 0);
    game.session.set_mode(GameMode::Play);
    let enemy = place_enemy(&mut game, 280, 330);
    game.projectiles
        .player_units_mut()
        .insert(ProjectileUnit {
            body: Body::new(300, 360, 8, 20).with_velocity(0, -3),
            owner: ProjectileOwner::Player,
            active: true,
        })
        .unwrap();

    game.update(&mut rng, 10_000);

    assert!(!game.enemies.units().get(enemy).unwrap().active);
    assert_eq!(game.session.health, 100);
    // One point for the kill, one for the dropped pickup landing on the player.
    assert_eq!(game.session.score, 2);
}

#[test]
fn long_run_keeps_pools_and_session_in_range() {
    let mut game = playing_game();
    let mut rng = seeded_rng();
    let mut now = 0;
    for frame in 0..3000u64 {
        now += 16;
        let controls = press(|c| {
            c.fire = true;
            c.left = frame % 200 < 100;
            c.right = frame % 200 >= 100;
            c.sprint = frame % 3 == 0;
        });
        game.handle_controls(&controls, now);
        game.update(&mut rng, now);
        game.take_sound_cues();

        assert!(game.enemies.units().active_count() <= POOL_CAPACITY);
        assert!(game.projectiles.enemy_units().active_count() <= POOL_CAPACITY);
        assert!((0..=100).contains(&game.session.health));
        assert!((0..=100).contains(&game.session.fuel));
        assert!((0..=540).contains(&game.player.body.x));
        assert!(matches!(
            game.session.mode,
            GameMode::Play | GameMode::GameOver
        ));
    }
    assert!(game.session.score > 0);
}

// ── Controls ──────────────────────────────────────────────────────────────────

#[test]
fn escape_toggles_menu_with_debounce() {
    let mut game = new_game();
    let escape = press(|c| c.escape = true);

    game.handle_controls(&escape, 1000);
    assert_eq!(game.session.mode, GameMode::Play);
    game.handle_controls(&escape, 1500);
    assert_eq!(game.session.mode, GameMode::Play);
    game.handle_controls(&escape, 2000);
    assert_eq!(game.session.mode, GameMode::Menu);
}

#[test]
fn pause_toggles_only_from_play() {
    let mut game = playing_game();
    let pause = press(|c| c.pause = true);

    game.handle_controls(&pause, 1000);
    assert_eq!(game.session.mode, GameMode::Paused);
    game.handle_controls(&pause, 2000);
    assert_eq!(game.session.mode, GameMode::Play);

    game.session.set_mode(GameMode::Menu);
    game.handle_controls(&pause, 3000);
    assert_eq!(game.session.mode, GameMode::Menu);
}

#[test]
fn movement_controls_reach_the_player() {
    let mut game = playing_game();
    game.handle_controls(&press(|c| c.up = true), 1000);
    game.update(&mut seeded_rng(), 1000);
    assert_eq!(game.player.body.y, 377);
}

#[test]
fn fire_launches_a_shot_with_sound() {
    let mut game = playing_game();
    let fire = press(|c| c.fire = true);

    game.handle_controls(&fire, 1000);
    assert_eq!(game.projectiles.player_units().active_count(), 1);
    assert_eq!(game.take_sound_cues(), vec![SoundCue::Play(Sfx::Launch1)]);

    game.handle_controls(&fire, 1200);
    assert_eq!(game.projectiles.player_units().active_count(), 1);
    assert!(game.take_sound_cues().is_empty());
}

#[test]
fn fire_does_nothing_in_the_menu() {
    let mut game = new_game();
    game.handle_controls(&press(|c| c.fire = true), 1000);
    assert_eq!(game.projectiles.player_units().active_count(), 0);
}

#[test]
fn cheat_drops_to_last_life() {
    let mut game = playing_game();
    game.handle_controls(&press(|c| c.cheat_last_life = true), 1000);
    assert_eq!(game.session.lives, 0);
}

#[test]
fn fatal_hit_on_last_life_is_game_over() {
    let mut game = playing_game();
    game.session.lives = 0;
    game.player.take_damage(&mut game.session, 100);
    assert_eq!(game.session.lives, -1);
    assert_eq!(game.status_text(), "GAME OVER");
}

#[test]
fn fire_on_game_over_starts_a_new_run() {
    let mut game = playing_game();
    place_enemy(&mut game, 0, 0);
    game.session.score = 44;
    game.session.lives = -1;
    game.session.set_mode(GameMode::GameOver);

    game.handle_controls(&press(|c| c.fire = true), 1000);

    assert_eq!(game.session.mode, GameMode::Play);
    assert_eq!(game.session.score, 0);
    assert_eq!(game.session.lives, 3);
    assert_eq!(game.enemies.units().active_count(), 0);
}

// ── Menu flow ─────────────────────────────────────────────────────────────────

#[test]
fn menu_navigation_is_debounced() {
    let mut game = new_game();
    let down = press(|c| c.down = true);
    game.handle_controls(&down, 500);
    game.handle_controls(&down, 600);
    assert_eq!(game.menu.selected, 1);
    game.handle_controls(&down, 901);
    assert_eq!(game.menu.selected, 2);
}

#[test]
fn continue_returns_to_play() {
    let mut game = new_game();
    game.session.score = 9;
    game.menu.selected = 1;
    let flow = game.handle_controls(&press(|c| c.confirm = true), 500);
    assert_eq!(flow, Flow::Continue);
    assert_eq!(game.session.mode, GameMode::Play);
    assert_eq!(game.session.score, 9);
}

#[test]
fn new_game_resets_the_run() {
    let mut game = new_game();
    place_enemy(&mut game, 0, 0);
    game.session.score = 12;
    game.session.lives = 1;

    game.handle_controls(&press(|c| c.confirm = true), 500);

    assert_eq!(game.session.mode, GameMode::Play);
    assert_eq!(game.session.score, 0);
    assert_eq!(game.session.lives, 3);
    assert_eq!(game.enemies.units().active_count(), 0);
}

#[test]
fn exit_quits() {
    let mut game = new_game();
    game.menu.selected = 3;
    let flow = game.handle_controls(&press(|c| c.confirm = true), 500);
    assert_eq!(flow, Flow::Quit);
}

#[test]
fn options_change_volume_and_difficulty() {
    let mut game = new_game();
    let confirm = press(|c| c.confirm = true);
    let down = press(|c| c.down = true);
    let left = press(|c| c.left = true);
    let right = press(|c| c.right = true);

    game.menu.selected = 2;
    game.handle_controls(&confirm, 500);
    assert_eq!(game.menu.screen, MenuScreen::Options);
    assert_eq!(game.menu.selected, 0);

    game.handle_controls(&right, 1000);
    assert_eq!(game.session.mixer.music, 6);

    game.handle_controls(&down, 1500);
    game.handle_controls(&left, 2000);
    assert_eq!(game.session.mixer.sfx, 4);

    game.handle_controls(&down, 2500);
    game.handle_controls(&left, 3000);
    assert_eq!(game.session.difficulty, 4);

    game.handle_controls(&down, 3500);
    game.handle_controls(&confirm, 4000);
    assert_eq!(game.menu.screen, MenuScreen::Main);
    assert_eq!(game.session.mode, GameMode::Menu);
}
