//! Rendering layer: all terminal I/O lives here.
//!
//! The renderer reads the live entities of the current level once per render
//! frame and scales world coordinates onto the terminal grid.  HUD values
//! arrive through the [`LevelView`] notifications collected in [`Hud`].

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use sky_battle::entities::{Arena, EntityKind, EntitySnapshot, ProjectileKind};
use sky_battle::view::LevelView;
use sky_battle::{Level, LevelDescriptor};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_KILLS: Color = Color::Yellow;
const C_HUD_HEARTS: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Red;
const C_SHIELD: Color = Color::Cyan;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_ENEMY: Color = Color::Magenta;
const C_SHOT_BOSS: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── HUD state ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Won,
    Lost,
}

/// Everything the HUD shows, kept up to date by the core's notifications.
#[derive(Clone, Debug, Default)]
pub struct Hud {
    pub level_name: String,
    pub health: u32,
    pub max_health: u32,
    pub kills: u32,
    pub score: u32,
    pub difficulty: f64,
    pub enemies: usize,
    pub shield: bool,
    pub banner: Option<Banner>,
}

impl LevelView for Hud {
    fn level_started(&mut self, level: &LevelDescriptor) {
        self.level_name = level.name.to_string();
        self.max_health = level.player_health;
        self.enemies = 0;
        self.shield = false;
        self.banner = None;
    }

    fn health_changed(&mut self, remaining: u32) {
        self.health = remaining;
        self.max_health = self.max_health.max(remaining);
    }

    fn kills_changed(&mut self, total: u32) {
        self.kills = total;
    }

    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn difficulty_changed(&mut self, factor: f64) {
        self.difficulty = factor;
    }

    fn enemy_count_changed(&mut self, count: usize) {
        self.enemies = count;
    }

    fn shield_changed(&mut self, shielded: bool) {
        self.shield = shielded;
    }

    fn game_won(&mut self) {
        self.banner = Some(Banner::Won);
    }

    fn game_lost(&mut self) {
        self.banner = Some(Banner::Lost);
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    screen: Screen,
    level: Option<&Level>,
    hud: &Hud,
    hint: &str,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, screen)?;
    draw_hud(out, screen, hud)?;

    if let Some(level) = level {
        for entity in level.entities() {
            draw_entity(out, screen, &level.arena, &entity)?;
        }
    }

    draw_controls_hint(out, screen, hint)?;

    if let Some(banner) = hud.banner {
        draw_banner(out, screen, banner, hud.score)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let w = screen.width as usize;
    let h = screen.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, screen: Screen, hud: &Hud) -> std::io::Result<()> {
    // Score, kills and difficulty, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_KILLS))?;
    out.queue(Print(format!(
        "Score:{:>4}  Kills:{:>3}  Foes:{:>2}  Diff:{:.1}",
        hud.score, hud.kills, hud.enemies, hud.difficulty
    )))?;

    // Level name, centre
    let level_str = format!("[ {} ]", hud.level_name);
    let lx = (screen.width / 2).saturating_sub(level_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Shield tag + hearts, right
    let shield_tag = if hud.shield { "[SHIELD] " } else { "" };
    let hearts: String = "♥".repeat(hud.health as usize);
    let lost: String = "·".repeat(hud.max_health.saturating_sub(hud.health) as usize);
    let right_len = shield_tag.chars().count() + hearts.chars().count() + lost.chars().count();
    let rx = screen.width.saturating_sub(right_len as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    if !shield_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_SHIELD))?;
        out.queue(Print(shield_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_HEARTS))?;
    out.queue(Print(&hearts))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&lost))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Maps a world point to a cell inside the border, or `None` if it falls
/// outside the play area.
fn to_cell(screen: Screen, arena: &Arena, x: f64, y: f64) -> Option<(u16, u16)> {
    let cols = f64::from(screen.width.saturating_sub(2));
    let rows = f64::from(screen.height.saturating_sub(4));
    if cols < 1.0 || rows < 1.0 {
        return None;
    }
    let cx = 1.0 + (x / arena.width * cols).floor();
    let cy = 2.0 + (y / arena.height * rows).floor();
    if cx < 1.0 || cx > cols || cy < 2.0 || cy > rows + 1.0 {
        return None;
    }
    Some((cx as u16, cy as u16))
}

fn sprite(entity: &EntitySnapshot) -> (&'static [&'static str], Color) {
    match entity.kind {
        // Planes face the direction they fly:
        //   player  ╞═▶     enemy  ◀═╡
        EntityKind::Player => (&["╞═▶"], C_PLAYER),
        EntityKind::Enemy => (&["◀═╡"], C_ENEMY),
        EntityKind::Boss if entity.shielded => (&["(╔══╗)", "(◀◀█║)", "(╚══╝)"], C_SHIELD),
        EntityKind::Boss => (&[" ╔══╗ ", " ◀◀█║ ", " ╚══╝ "], C_BOSS),
        EntityKind::Projectile(ProjectileKind::Player) => (&["»"], C_SHOT_PLAYER),
        EntityKind::Projectile(ProjectileKind::Enemy) => (&["•"], C_SHOT_ENEMY),
        EntityKind::Projectile(ProjectileKind::Boss) => (&["◉"], C_SHOT_BOSS),
    }
}

/// Draws the entity's sprite centred on its hitbox, clipping rows and
/// columns that would land on the border.
fn draw_entity<W: Write>(
    out: &mut W,
    screen: Screen,
    arena: &Arena,
    entity: &EntitySnapshot,
) -> std::io::Result<()> {
    let hitbox = entity.hitbox;
    let centre_x = hitbox.x + hitbox.width / 2.0;
    let centre_y = hitbox.y + hitbox.height / 2.0;
    let Some((cx, cy)) = to_cell(screen, arena, centre_x, centre_y) else {
        return Ok(());
    };

    let (rows, color) = sprite(entity);
    out.queue(style::SetForegroundColor(color))?;

    let top = i32::from(cy) - rows.len() as i32 / 2;
    let right_wall = i32::from(screen.width.saturating_sub(1));
    let bottom_wall = i32::from(screen.height.saturating_sub(2));
    for (i, row) in rows.iter().enumerate() {
        let y = top + i as i32;
        if y < 2 || y >= bottom_wall {
            continue;
        }
        let left = i32::from(cx) - row.chars().count() as i32 / 2;
        let visible: String = row
            .chars()
            .enumerate()
            .filter(|(j, _)| {
                let x = left + *j as i32;
                x >= 1 && x < right_wall
            })
            .map(|(_, c)| c)
            .collect();
        if visible.is_empty() {
            continue;
        }
        out.queue(cursor::MoveTo(left.max(1) as u16, y as u16))?;
        out.queue(Print(visible))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: Screen, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Win / game-over overlay ───────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    screen: Screen,
    banner: Banner,
    score: u32,
) -> std::io::Result<()> {
    let (lines, color): (&[&str], Color) = match banner {
        Banner::Won => (
            &[
                "╔════════════════════╗",
                "║     YOU  WIN!      ║",
                "╚════════════════════╝",
            ],
            Color::Green,
        ),
        Banner::Lost => (
            &[
                "╔════════════════════╗",
                "║    GAME  OVER      ║",
                "╚════════════════════╝",
            ],
            Color::Red,
        ),
    };
    let kills_line = format!("Final score: {:>4}", score);
    let hint = "R - Play Again  Q - Quit";

    let cx = screen.width / 2;
    let total_rows = lines.len() + 2;
    let start_row = (screen.height / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let kills_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(kills_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, kills_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&kills_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, kills_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_corners_map_inside_the_border() {
        let screen = Screen { width: 80, height: 24 };
        let arena = Arena::default();
        assert_eq!(to_cell(screen, &arena, 0.0, 0.0), Some((1, 2)));
        assert!(to_cell(screen, &arena, arena.width - 1.0, arena.height - 1.0).is_some());
        assert_eq!(to_cell(screen, &arena, -10.0, 100.0), None);
        assert_eq!(to_cell(screen, &arena, arena.width, 100.0), None);
    }

    #[test]
    fn hud_tracks_notifications() {
        let mut hud = Hud::default();
        hud.level_started(&sky_battle::levels::level_one());
        hud.health_changed(4);
        hud.kills_changed(3);
        hud.score_changed(13);
        hud.difficulty_changed(1.1);
        hud.shield_changed(true);
        hud.game_lost();
        assert_eq!(hud.level_name, "Level 1");
        assert_eq!(hud.max_health, 5);
        assert_eq!(hud.health, 4);
        assert_eq!((hud.kills, hud.score), (3, 13));
        assert_eq!(hud.difficulty, 1.1);
        assert!(hud.shield);
        assert_eq!(hud.banner, Some(Banner::Lost));
    }
}
