/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; this module only translates world
/// coordinates into terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use air_superiority::background::Cloud;
use air_superiority::compute::Game;
use air_superiority::entities::{
    EnemyUnit, ExplosionKind, ExplosionUnit, GameMode, PickupKind, PickupUnit, Pose,
    ProjectileOwner, ProjectileUnit,
};
use air_superiority::menu::MenuScreen;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_CLOUD: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_STATUS: Color = Color::White;
const C_HEALTH: Color = Color::Green;
const C_FUEL: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY_JET: Color = Color::Green;
const C_ENEMY_WHITE: Color = Color::Grey;
const C_ENEMY_MILITARY: Color = Color::DarkGreen;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_ENEMY: Color = Color::Magenta;
const C_PICKUP_HEALTH: Color = Color::Red;
const C_PICKUP_FUEL: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Rows above the play area: HUD line, bars line, top border.
const PLAY_TOP: u16 = 3;
const BAR_CELLS: usize = 20;

/// Maps world coordinates onto the terminal play area.
struct Viewport {
    world_w: i32,
    world_h: i32,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(game: &Game, width: u16, height: u16) -> Self {
        Self {
            world_w: game.bounds.width,
            world_h: game.bounds.height,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(PLAY_TOP + 2).max(1),
        }
    }

    /// Cell of a world point, or `None` if it falls outside the play area.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let col = x as i64 * self.cols as i64 / self.world_w as i64;
        let row = y as i64 * self.rows as i64 / self.world_h as i64;
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        Some((1 + col as u16, PLAY_TOP + row as u16))
    }

    /// Cell at the centre of a world box.
    fn centre(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(u16, u16)> {
        self.cell(x + w / 2, y + h / 2)
    }

    fn width_cells(&self, w: i32) -> usize {
        ((w as i64 * self.cols as i64 / self.world_w as i64).max(1)) as usize
    }

    fn height_cells(&self, h: i32) -> usize {
        ((h as i64 * self.rows as i64 / self.world_h as i64).max(1)) as usize
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    game: &Game,
    show_player: bool,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::new(game, width, height);
    draw_border(out, width, height)?;
    for cloud in &game.background.clouds {
        draw_cloud(out, &view, cloud)?;
    }

    if game.session.mode == GameMode::Menu {
        draw_menu(out, game, width, height)?;
    } else {
        draw_hud(out, game, width)?;
        for enemy in game.enemies.units().iter_active() {
            draw_enemy(out, &view, enemy)?;
        }
        for pickup in game.pickups.units().iter_active() {
            draw_pickup(out, &view, pickup)?;
        }
        for shot in game
            .projectiles
            .player_units()
            .iter_active()
            .chain(game.projectiles.enemy_units().iter_active())
        {
            draw_projectile(out, &view, shot)?;
        }
        for explosion in game.explosions.units().iter_active() {
            draw_explosion(out, &view, explosion)?;
        }
        if show_player {
            draw_player(out, &view, game)?;
        }
        match game.session.mode {
            GameMode::GameOver => draw_game_over(out, game, width, height)?,
            GameMode::Paused => draw_banner(out, "PAUSED", width, height)?,
            _ => {}
        }
    }
    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Audible cue: the terminal bell.
pub fn ring_bell<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(Print('\u{7}'))?;
    Ok(())
}

// ── Frame ─────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, PLAY_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in PLAY_TOP..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_cloud<W: Write>(out: &mut W, view: &Viewport, cloud: &Cloud) -> std::io::Result<()> {
    let cols = view.width_cells(cloud.width);
    let rows = view.height_cells(cloud.height).min(3);
    out.queue(style::SetForegroundColor(C_CLOUD))?;
    for r in 0..rows {
        let y = cloud.y as i32 + (r as i32 * cloud.height / rows as i32);
        if let Some((col, row)) = view.cell(cloud.x as i32, y) {
            let room = (view.cols + 1).saturating_sub(col) as usize;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("░".repeat(cols.min(room))))?;
        }
    }
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

fn bar(value: i32, max: i32) -> String {
    let filled = (value.max(0) as usize * BAR_CELLS / max.max(1) as usize).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_CELLS - filled))
}

fn draw_hud<W: Write>(out: &mut W, game: &Game, width: u16) -> std::io::Result<()> {
    let s = &game.session;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE {:>5}", s.score)))?;

    let status = game.status_text();
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(status.len() as u16 / 2),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD_STATUS))?;
    out.queue(Print(status))?;

    let lives = format!("LIVES {}", s.lives.max(0));
    out.queue(cursor::MoveTo(
        width.saturating_sub(lives.len() as u16 + 1),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(lives))?;

    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print(format!("HP   {}", bar(s.health, s.health_max()))))?;
    out.queue(Print("  "))?;
    out.queue(style::SetForegroundColor(C_FUEL))?;
    out.queue(Print(format!("FUEL {}", bar(s.fuel, s.fuel_max()))))?;
    Ok(())
}

// ── Units ─────────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, game: &Game) -> std::io::Result<()> {
    let p = &game.player;
    let (nose, wings) = match p.pose {
        Pose::HardLeft => ("◤", "<█/"),
        Pose::Left => ("▲", "<█\\"),
        Pose::Level => ("▲", "/█\\"),
        Pose::Right => ("▲", "/█>"),
        Pose::HardRight => ("◥", "\\█>"),
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    if let Some((col, row)) = view.centre(p.body.x, p.body.y, p.body.width, p.body.height) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(nose))?;
        if row + 1 < PLAY_TOP + view.rows {
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
            out.queue(Print(wings))?;
        }
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &EnemyUnit) -> std::io::Result<()> {
    // Three sprite sheets of six airframes each.
    let (top, bottom, color) = match enemy.kind.0 / 6 {
        0 => ("«▼»", "╚═╝", C_ENEMY_JET),
        1 => ("═╦═", " ▼ ", C_ENEMY_WHITE),
        _ => ("─╋─", " ▾ ", C_ENEMY_MILITARY),
    };
    let b = &enemy.body;
    if let Some((col, row)) = view.centre(b.x, b.y, b.width, b.height) {
        let lx = col.saturating_sub(1).max(1);
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(lx, row))?;
        out.queue(Print(top))?;
        if row + 1 < PLAY_TOP + view.rows {
            out.queue(cursor::MoveTo(lx, row + 1))?;
            out.queue(Print(bottom))?;
        }
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    view: &Viewport,
    shot: &ProjectileUnit,
) -> std::io::Result<()> {
    let b = &shot.body;
    let Some((col, row)) = view.centre(b.x, b.y, b.width, b.height) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    match shot.owner {
        ProjectileOwner::Player => {
            out.queue(style::SetForegroundColor(C_SHOT_PLAYER))?;
            out.queue(Print("║"))?;
        }
        ProjectileOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_SHOT_ENEMY))?;
            let glyph = match b.vel_x.signum() {
                -1 => "↙",
                1 => "↘",
                _ => "↓",
            };
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

/// Symbols:
///   ♥ / ♥♥  health, small and large
///   f / F   fuel, small and large
fn draw_pickup<W: Write>(out: &mut W, view: &Viewport, pickup: &PickupUnit) -> std::io::Result<()> {
    let b = &pickup.body;
    let Some((col, row)) = view.centre(b.x, b.y, b.width, b.height) else {
        return Ok(());
    };
    let (glyph, color) = match pickup.kind {
        PickupKind::HealthSmall => ("♥", C_PICKUP_HEALTH),
        PickupKind::HealthLarge => ("♥♥", C_PICKUP_HEALTH),
        PickupKind::FuelSmall => ("f", C_PICKUP_FUEL),
        PickupKind::FuelLarge => ("F", C_PICKUP_FUEL),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    view: &Viewport,
    explosion: &ExplosionUnit,
) -> std::io::Result<()> {
    const FRAMES: [&str; 6] = ["·", "*", "✶", "✹", "※", "·"];
    let b = &explosion.body;
    let Some((col, row)) = view.centre(b.x, b.y, b.width, b.height) else {
        return Ok(());
    };
    let color = match explosion.kind {
        ExplosionKind::Small => Color::Yellow,
        ExplosionKind::Large => Color::DarkYellow,
        ExplosionKind::Player => Color::Red,
    };
    let glyph = FRAMES[(explosion.frame as usize).min(FRAMES.len() - 1)];
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, game: &Game, width: u16, height: u16) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;
    let menu = &game.menu;

    let title = match menu.screen {
        MenuScreen::Main => "✈  AIR  SUPERIORITY  ✈",
        MenuScreen::Options => "OPTIONS",
    };
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    for (i, label) in menu.labels().iter().enumerate() {
        let value = match (menu.screen, i) {
            (MenuScreen::Options, 0) => format!("  ◀ {} ▶", menu.music),
            (MenuScreen::Options, 1) => format!("  ◀ {} ▶", menu.sfx),
            (MenuScreen::Options, 2) => format!("  ◀ {} ▶", game.session.difficulty),
            _ => String::new(),
        };
        let line = format!("{label}{value}");
        let row = cy.saturating_sub(3) + (i as u16) * 2;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2 + 2),
            row,
        ))?;
        if i == menu.selected {
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(Print(format!("▶ {line}")))?;
        } else {
            out.queue(style::SetForegroundColor(Color::White))?;
            out.queue(Print(format!("  {line}")))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD/Arrows: Move  Space/Shift: Sprint  F: Fire  P: Pause  Esc: Menu  Enter: Select  Q: Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, text: &str, width: u16, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(text.chars().count() as u16 / 2),
        height / 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, game: &Game, width: u16, height: u16) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", game.session.score);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Red),
        ("║     GAME  OVER     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("ENTER / F - Play Again   Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
