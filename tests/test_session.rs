use air_superiority::entities::GameMode;
use air_superiority::menu::*;
use air_superiority::session::*;
use air_superiority::sound::*;
use air_superiority::tuning::GameTuning;

fn session() -> Session {
    Session::new(GameTuning::default())
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn new_session_starts_full() {
    let s = session();
    assert_eq!(s.health, 100);
    assert_eq!(s.fuel, 100);
    assert_eq!(s.lives, 3);
    assert_eq!(s.score, 0);
    assert_eq!(s.difficulty, 5);
    assert_eq!(s.mode, GameMode::Menu);
}

#[test]
fn every_thirty_points_award_a_life() {
    let mut s = session();
    for _ in 0..29 {
        s.increment_score();
    }
    assert_eq!(s.lives, 3);
    s.increment_score();
    assert_eq!(s.score, 30);
    assert_eq!(s.lives, 4);
    for _ in 0..30 {
        s.increment_score();
    }
    assert_eq!(s.lives, 5);
}

#[test]
fn health_and_fuel_are_clamped() {
    let mut s = session();
    s.set_health(150);
    s.set_fuel(-20);
    assert_eq!(s.health, 100);
    assert_eq!(s.fuel, 0);
    s.restore_health_and_fuel();
    assert_eq!(s.fuel, 100);
}

#[test]
fn difficulty_is_clamped() {
    let mut s = session();
    s.set_difficulty(12);
    assert_eq!(s.difficulty, 9);
    s.set_difficulty(-1);
    assert_eq!(s.difficulty, 0);
}

#[test]
fn reset_restores_run_state_only() {
    let mut s = session();
    s.score = 17;
    s.lives = -1;
    s.health = 3;
    s.set_difficulty(8);
    s.mixer.set_sfx(2);
    s.reset();
    assert_eq!((s.score, s.lives, s.health, s.fuel), (0, 3, 100, 100));
    assert_eq!(s.difficulty, 8);
    assert_eq!(s.mixer.sfx, 2);
}

#[test]
fn cues_are_drained_once() {
    let mut s = session();
    s.push_cue(SoundCue::Play(Sfx::Boom));
    s.push_cue(SoundCue::Stop(Sfx::Launch1));
    assert_eq!(s.take_cues().len(), 2);
    assert!(s.take_cues().is_empty());
}

// ── Mixer ─────────────────────────────────────────────────────────────────────

#[test]
fn mixer_levels_are_capped() {
    let mut m = Mixer::default();
    m.set_music(20);
    m.set_sfx(9);
    assert_eq!(m.music, VOLUME_MAX);
    assert_eq!(m.sfx_gain(), 1.0);
}

#[test]
fn muted_mixer_hears_nothing() {
    let cues = [SoundCue::Play(Sfx::Exp1), SoundCue::Stop(Sfx::Launch1)];
    let mut m = Mixer::default();
    assert_eq!(m.audible(&cues).count(), 1);
    m.set_sfx(0);
    assert_eq!(m.audible(&cues).count(), 0);
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn selection_stays_on_the_buttons() {
    let mut menu = Menu::default();
    menu.select_previous();
    assert_eq!(menu.selected, 0);
    for _ in 0..10 {
        menu.select_next();
    }
    assert_eq!(menu.selected, BUTTON_COUNT - 1);
}

#[test]
fn main_buttons() {
    let mut menu = Menu::default();
    assert_eq!(menu.labels(), &MAIN_LABELS);
    assert_eq!(menu.activate(1), MenuAction::NewGame);
    menu.selected = 1;
    assert_eq!(menu.activate(1), MenuAction::Continue);
    menu.selected = 3;
    assert_eq!(menu.activate(1), MenuAction::Exit);
    assert_eq!(menu.screen, MenuScreen::Main);
}

#[test]
fn options_round_trip() {
    let mut menu = Menu::default();
    menu.selected = 2;
    assert_eq!(menu.activate(1), MenuAction::OpenOptions);
    assert_eq!(menu.screen, MenuScreen::Options);
    assert_eq!(menu.labels(), &OPTION_LABELS);

    menu.selected = 3;
    assert_eq!(menu.activate(1), MenuAction::Back);
    assert_eq!(menu.screen, MenuScreen::Main);
}

#[test]
fn option_values_step_and_clamp() {
    let mut menu = Menu {
        screen: MenuScreen::Options,
        ..Menu::default()
    };
    assert_eq!(menu.activate(1), MenuAction::MusicVolume(6));
    for _ in 0..10 {
        menu.activate(1);
    }
    assert_eq!(menu.music, VOLUME_MAX);

    menu.selected = 1;
    for _ in 0..10 {
        menu.activate(-1);
    }
    assert_eq!(menu.activate(-1), MenuAction::SfxVolume(0));

    menu.selected = 2;
    assert_eq!(menu.activate(-1), MenuAction::Difficulty(-1));
}
