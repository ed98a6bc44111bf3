//! Terminal backend on crossterm
//!
//! The 960x540 logical screen is scaled onto the terminal's cell grid. Each
//! frame is composed into a cell buffer and `present` only emits the cells
//! that changed since the previous frame, batched with `queue!`.

use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};
use glam::IVec2;

use super::{AssetProvider, Canvas, Clock, Fill, ImageId, InputEvent, InputSource, Key};
use crate::audio::{AudioPlayer, SoundEffect, Track};
use crate::consts::{BALL_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::sim::Rect;
use crate::ui::{Color, FontId, TextStyle};

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg,
            bold: false,
        }
    }

    /// Never produced by drawing; forces a full repaint
    const INVALID: Cell = Cell {
        ch: '\0',
        fg: Color::BLACK,
        bg: Color::BLACK,
        bold: false,
    };
}

/// Size of one terminal cell in logical pixels
fn cell_size(cols: u16, rows: u16) -> IVec2 {
    IVec2::new(
        (WINDOW_WIDTH / i32::from(cols.max(1))).max(1),
        (WINDOW_HEIGHT / i32::from(rows.max(1))).max(1),
    )
}

/// Cell size shared by the canvas and the asset provider
///
/// The canvas updates it on resize, so text measured afterwards matches the
/// grid it is drawn on.
#[derive(Debug, Clone)]
pub struct CellMetrics(Rc<std::cell::Cell<IVec2>>);

impl CellMetrics {
    fn new(cols: u16, rows: u16) -> Self {
        Self(Rc::new(std::cell::Cell::new(cell_size(cols, rows))))
    }

    pub fn get(&self) -> IVec2 {
        self.0.get()
    }

    fn update(&self, cols: u16, rows: u16) {
        self.0.set(cell_size(cols, rows));
    }
}

/// Canvas that renders into a cell grid and diffs it onto `out`
pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    metrics: CellMetrics,
    front: Vec<Cell>,
    back: Vec<Cell>,
    /// Re-query the terminal size every frame
    follow_terminal: bool,
}

impl TerminalCanvas<io::Stdout> {
    /// Canvas over stdout, sized to the current terminal
    pub fn stdout() -> Result<Self> {
        let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
        let mut canvas = Self::with_size(io::stdout(), cols, rows);
        canvas.follow_terminal = true;
        Ok(canvas)
    }
}

impl<W: Write> TerminalCanvas<W> {
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        let len = usize::from(cols) * usize::from(rows);
        Self {
            out,
            cols,
            rows,
            metrics: CellMetrics::new(cols, rows),
            front: vec![Cell::blank(Color::BLACK); len],
            back: vec![Cell::INVALID; len],
            follow_terminal: false,
        }
    }

    pub fn cell_size(&self) -> IVec2 {
        self.metrics.get()
    }

    /// Handle for asset providers that measure text on this grid
    pub fn metrics(&self) -> CellMetrics {
        self.metrics.clone()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        if cols == self.cols && rows == self.rows {
            return Ok(());
        }
        log::debug!("Terminal resized to {}x{}", cols, rows);
        let len = usize::from(cols) * usize::from(rows);
        self.cols = cols;
        self.rows = rows;
        self.metrics.update(cols, rows);
        self.front = vec![Cell::blank(Color::BLACK); len];
        self.back = vec![Cell::INVALID; len];
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Logical pixel to cell coordinate (may be off-grid)
    fn to_cell(&self, p: IVec2) -> IVec2 {
        let cell = self.cell_size();
        IVec2::new(p.x.div_euclid(cell.x), p.y.div_euclid(cell.y))
    }

    fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        let idx = row as usize * usize::from(self.cols) + col as usize;
        self.front[idx] = cell;
    }

    /// Cell span covered by `rect`, always at least one cell for a
    /// non-empty rect
    fn span(&self, rect: Rect) -> (IVec2, IVec2) {
        let rect = rect.normalized();
        let cell = self.cell_size();
        let min = self.to_cell(rect.position());
        let end = IVec2::new(
            (rect.right() + cell.x - 1).div_euclid(cell.x),
            (rect.bottom() + cell.y - 1).div_euclid(cell.y),
        );
        (min, end.max(min + IVec2::ONE))
    }

    #[cfg(test)]
    fn cell(&self, col: u16, row: u16) -> Cell {
        self.front[usize::from(row) * usize::from(self.cols) + usize::from(col)]
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let cols = usize::from(self.cols);
        let mut written = 0usize;
        for (idx, (new, old)) in self.front.iter().zip(&self.back).enumerate() {
            if new == old {
                continue;
            }
            let col = (idx % cols) as u16;
            let row = (idx / cols) as u16;
            let weight = if new.bold { Attribute::Bold } else { Attribute::NormalIntensity };
            queue!(
                self.out,
                cursor::MoveTo(col, row),
                SetAttribute(weight),
                SetForegroundColor(term_color(new.fg)),
                SetBackgroundColor(term_color(new.bg)),
                Print(new.ch)
            )?;
            written += 1;
        }
        if written > 0 {
            queue!(self.out, ResetColor)?;
        }
        self.out.flush()?;
        log::trace!("Presented {} changed cells", written);
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Color) -> Result<()> {
        if self.follow_terminal {
            let (cols, rows) = terminal::size()?;
            self.resize(cols, rows)?;
        }
        self.front.fill(Cell::blank(color));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, fill: Fill) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let (min, end) = self.span(rect);
        for row in min.y..end.y {
            for col in min.x..end.x {
                let edge = row == min.y || row == end.y - 1 || col == min.x || col == end.x - 1;
                if fill == Fill::Solid || edge {
                    self.set(col, row, Cell::blank(color));
                }
            }
        }
        Ok(())
    }

    fn draw_image(&mut self, image: ImageId, at: IVec2) -> Result<()> {
        match image {
            ImageId::Ball => {
                let center = self.to_cell(at + IVec2::splat(BALL_SIZE / 2));
                let bg = self.front_bg(center);
                self.set(
                    center.x,
                    center.y,
                    Cell {
                        ch: '●',
                        fg: Color::WHITE,
                        bg,
                        bold: false,
                    },
                );
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, at: IVec2) -> Result<()> {
        let start = self.to_cell(at);
        for (i, ch) in text.chars().enumerate() {
            let col = start.x + i as i32;
            let bg = self.front_bg(IVec2::new(col, start.y));
            self.set(
                col,
                start.y,
                Cell {
                    ch,
                    fg: style.color,
                    bg,
                    bold: style.font == FontId::Title,
                },
            );
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.flush_diff().context("Failed to write frame to terminal")?;
        self.back.copy_from_slice(&self.front);
        Ok(())
    }
}

impl<W: Write> TerminalCanvas<W> {
    /// Background already under a cell, so glyphs keep the fill they land on
    fn front_bg(&self, at: IVec2) -> Color {
        if at.x < 0 || at.y < 0 || at.x >= i32::from(self.cols) || at.y >= i32::from(self.rows) {
            return Color::BLACK;
        }
        self.front[at.y as usize * usize::from(self.cols) + at.x as usize].bg
    }
}

/// Text measured in whole cells, one column per character
#[derive(Debug, Clone)]
pub struct TerminalAssets {
    metrics: CellMetrics,
}

impl TerminalAssets {
    pub fn new(metrics: CellMetrics) -> Self {
        Self { metrics }
    }
}

impl AssetProvider for TerminalAssets {
    fn text_size(&mut self, text: &str, _style: &TextStyle) -> Result<IVec2> {
        let cell = self.metrics.get();
        Ok(IVec2::new(text.chars().count() as i32 * cell.x, cell.y))
    }

    fn image_size(&mut self, image: ImageId) -> Result<IVec2> {
        match image {
            ImageId::Ball => Ok(IVec2::splat(BALL_SIZE)),
        }
    }
}

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}

/// Translate one crossterm key event
pub fn translate_key(key: KeyEvent) -> InputEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }
    let mapped = map_key(key.code);
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => InputEvent::KeyDown(mapped),
        KeyEventKind::Release => InputEvent::KeyUp(mapped),
    }
}

/// Non-blocking reader over crossterm's event queue
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_event(&mut self) -> Result<Option<InputEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => return Ok(Some(translate_key(key))),
                other => log::trace!("Ignoring terminal event {:?}", other),
            }
        }
        Ok(None)
    }
}

/// Wall clock measured from construction
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { start: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Terminals have no mixer; audio requests are only logged
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioPlayer for LogAudio {
    fn play_track(&mut self, track: Track, volume: f32) {
        log::debug!("Music {} at {:.2}", track.resource(), volume);
    }

    fn stop_track(&mut self) {
        log::debug!("Music stopped");
    }

    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Effect {} at {:.2}", effect.resource(), volume);
    }
}

/// Raw mode and alternate screen for the guard's lifetime
pub struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )
        .context("Failed to enter alternate screen")?;

        // Key releases are only reported with the enhancement protocol
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release events")?;
        } else {
            log::warn!("Terminal does not report key releases; paddles keep moving until the next key");
        }
        Ok(Self { enhanced })
    }

    /// Grid size at startup
    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size().context("Failed to query terminal size")
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
