//! Terminal frontend using crossterm
//!
//! The playfield is scaled onto the terminal's cell grid; the bottom row is a
//! status line. Left mouse button drives the gesture, `q`/`Esc`/`Ctrl-C` quit.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::{cursor, execute, queue, style, terminal};
use glam::Vec2;

use super::{Platform, PlatformError};
use crate::renderer::{Color, DrawCommand, DrawList};
use crate::sim::{InputEvent, Rect};

/// Glyph used for line primitives
const LINE_GLYPH: char = '*';

/// Mapping between world units and terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Playfield columns
    pub cols: u16,
    /// Playfield rows (status row excluded)
    pub rows: u16,
    /// World size shown in the playfield
    pub world: Vec2,
}

impl Viewport {
    /// Viewport for a terminal of `cols` x `term_rows`, reserving one status row
    pub fn for_terminal(cols: u16, term_rows: u16, world: Vec2) -> Self {
        Self {
            cols: cols.max(1),
            rows: term_rows.saturating_sub(1).max(1),
            world,
        }
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / self.world.x,
            self.rows as f32 / self.world.y,
        )
    }

    /// World point at the centre of a cell
    pub fn cell_to_world(&self, col: u16, row: u16) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + 0.5) / self.scale()
    }

    /// Fractional cell coordinates of a world point
    pub fn world_to_cell(&self, point: Vec2) -> Vec2 {
        point * self.scale()
    }
}

/// One rasterized terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub bg: Color,
    pub fg: Color,
    pub glyph: char,
}

/// Paint a draw list onto a `cols * rows` cell grid (row-major)
pub fn rasterize(frame: &DrawList, viewport: &Viewport) -> Vec<Cell> {
    let blank = Cell {
        bg: frame.background,
        fg: frame.background,
        glyph: ' ',
    };
    let mut cells = vec![blank; viewport.cols as usize * viewport.rows as usize];

    let mut segments = Vec::new();
    for command in &frame.commands {
        match command {
            DrawCommand::FillRect { rect, color } => fill_rect(&mut cells, viewport, rect, *color),
            DrawCommand::Line { from, to, color } => segments.push((*from, *to, *color)),
            DrawCommand::Polyline { points, color } => {
                segments.extend(points.windows(2).map(|pair| (pair[0], pair[1], *color)));
            }
        }
    }

    // Lines go on top of every fill
    for (from, to, color) in segments {
        draw_segment(&mut cells, viewport, from, to, color);
    }

    cells
}

fn fill_rect(cells: &mut [Cell], viewport: &Viewport, rect: &Rect, color: Color) {
    let cols = viewport.cols as usize;
    let rows = viewport.rows as usize;
    let min = viewport.world_to_cell(rect.min());
    let max = viewport.world_to_cell(Vec2::new(rect.right(), rect.bottom()));

    let c0 = min.x.floor().max(0.0) as usize;
    let r0 = min.y.floor().max(0.0) as usize;
    // Bodies smaller than a cell still cover one
    let c1 = (max.x.ceil() as usize).max(c0 + 1).min(cols);
    let r1 = (max.y.ceil() as usize).max(r0 + 1).min(rows);

    for row in r0..r1 {
        for col in c0..c1 {
            cells[row * cols + col].bg = color;
        }
    }
}

fn draw_segment(cells: &mut [Cell], viewport: &Viewport, from: Vec2, to: Vec2, color: Color) {
    let cols = viewport.cols as i64;
    let rows = viewport.rows as i64;
    let a = viewport.world_to_cell(from);
    let b = viewport.world_to_cell(to);
    let steps = (b - a).abs().max_element().ceil().max(1.0) as i64;

    for i in 0..=steps {
        let p = a.lerp(b, i as f32 / steps as f32);
        let (col, row) = (p.x.floor() as i64, p.y.floor() as i64);
        if (0..cols).contains(&col) && (0..rows).contains(&row) {
            let cell = &mut cells[(row * cols + col) as usize];
            cell.fg = color;
            cell.glyph = LINE_GLYPH;
        }
    }
}

/// Convert a crossterm event to a game input event
pub fn translate_event(event: &Event, viewport: &Viewport) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            _ => None,
        },
        Event::Mouse(mouse) => {
            let point = viewport.cell_to_world(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Press(point)),
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    Some(InputEvent::Motion(point))
                }
                MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::Release),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Crossterm-backed platform: raw mode, alternate screen, mouse capture
pub struct TerminalPlatform {
    stdout: Stdout,
    viewport: Viewport,
}

impl TerminalPlatform {
    /// Take over the terminal; it is restored when the platform is dropped
    pub fn new(world: Vec2) -> Result<Self, PlatformError> {
        let (cols, rows) = terminal::size().map_err(PlatformError::Init)?;
        terminal::enable_raw_mode().map_err(PlatformError::Init)?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )
        .map_err(PlatformError::Init)?;

        let viewport = Viewport::for_terminal(cols, rows, world);
        log::info!("Terminal {}x{} cells, playfield {:?}", cols, rows, world);
        Ok(Self { stdout, viewport })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), PlatformError> {
        while event::poll(Duration::ZERO).map_err(PlatformError::Input)? {
            let event = event::read().map_err(PlatformError::Input)?;
            if let Event::Resize(cols, rows) = event {
                self.viewport = Viewport::for_terminal(cols, rows, self.viewport.world);
                continue;
            }
            out.extend(translate_event(&event, &self.viewport));
        }
        Ok(())
    }

    fn present(&mut self, frame: &DrawList) -> Result<(), PlatformError> {
        let viewport = Viewport {
            world: frame.size,
            ..self.viewport
        };
        let cells = rasterize(frame, &viewport);
        let cols = viewport.cols as usize;
        let rgb = |c: Color| style::Color::Rgb {
            r: c[0],
            g: c[1],
            b: c[2],
        };

        let out = &mut self.stdout;
        for (row, line) in cells.chunks(cols).enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16)).map_err(PlatformError::Present)?;
            for cell in line {
                queue!(
                    out,
                    style::SetBackgroundColor(rgb(cell.bg)),
                    style::SetForegroundColor(rgb(cell.fg)),
                    style::Print(cell.glyph),
                )
                .map_err(PlatformError::Present)?;
            }
        }

        queue!(
            out,
            cursor::MoveTo(0, viewport.rows),
            style::ResetColor,
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(&frame.status),
        )
        .map_err(PlatformError::Present)?;
        out.flush().map_err(PlatformError::Present)
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
