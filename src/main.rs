mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use air_superiority::compute::{Controls, Flow, Game};
use air_superiority::tuning::Tuning;

#[derive(Parser)]
#[command(name = "air_superiority")]
#[command(about = "Top-down arcade shooter in the terminal")]
struct Args {
    /// TOML file overriding gameplay tuning
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Starting difficulty (0-9), overrides the tuning file
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    difficulty: Option<u8>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(10..=240))]
    fps: u64,

    /// Write logs here (RUST_LOG sets the filter); nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames at 60 FPS (≈133 ms) is
/// refreshed before it expires.
const HOLD_WINDOW: u64 = 8;

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn controls_for(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Controls {
    let held = |keys: &[KeyCode]| is_held(key_frame, keys, frame);
    Controls {
        up: held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        down: held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        // Shift+D arrives as uppercase 'D' and is also a sprint.
        right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        sprint: held(&[KeyCode::Char(' ')])
            || held(&[
                KeyCode::Char('W'),
                KeyCode::Char('A'),
                KeyCode::Char('S'),
                KeyCode::Char('D'),
            ]),
        fire: held(&[KeyCode::Char('f'), KeyCode::Char('F')]),
        confirm: held(&[KeyCode::Enter]),
        pause: held(&[KeyCode::Char('p'), KeyCode::Char('P')]),
        escape: held(&[KeyCode::Esc]),
        cheat_last_life: held(&[KeyCode::Char(';')]),
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs only go to a file.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

fn load_tuning(args: &Args) -> anyhow::Result<Tuning> {
    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if let Some(difficulty) = args.difficulty {
        tuning.game.difficulty = difficulty;
    }
    Ok(tuning)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and hand them all to the game at once, so
/// moving, sprinting and firing combine freely.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
    clock: Instant,
    frame_time: Duration,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let now_ms = clock.elapsed().as_millis() as u64;
        let controls = controls_for(&key_frame, frame);
        if game.handle_controls(&controls, now_ms) == Flow::Quit {
            return Ok(());
        }
        game.update(rng, now_ms);

        let cues = game.take_sound_cues();
        if game.session.mixer.audible(&cues).next().is_some() {
            display::ring_bell(out)?;
        }

        let show_player = game.player.visible(game.session.mode);
        let (width, height) = terminal::size()?;
        display::render(out, game, show_player, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;
    let tuning = load_tuning(&args)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock = Instant::now();
    let mut game = Game::new(tuning, &mut rng, 0);
    info!(seed = ?args.seed, difficulty = game.session.difficulty, "starting");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let frame_time = Duration::from_millis(1000 / args.fps);
    let result = game_loop(&mut out, &mut game, &mut rng, &rx, clock, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        warn!(error = %e, "terminal error");
    }
    info!(score = game.session.score, "exiting");
    result.context("running the game loop")
}
