use crate::config::CellSize;
use crate::error::RenderError;
use crate::grid::{GridState, Orientation};
use crate::visual::VisualState;
use crossterm::{
    cursor::{Hide, MoveTo},
    queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{stdout, Stdout, Write};

/// What playback needs from whatever shows the ant.
pub trait Renderer: Send {
    /// Draws one frame.
    fn render(&mut self, visual: &VisualState, grid: &GridState) -> Result<(), RenderError>;

    /// Size of the drawing surface in pixels. `(0, 0)` means unbounded or unknown.
    fn surface_size(&self) -> (u32, u32);

    /// Called whenever the cell size changes, before the next frame.
    #[allow(unused_variables)]
    fn set_cell_size(&mut self, cell_size: CellSize) {}
}

/// Draws nothing. For headless playback.
pub struct NoOpRenderer;

impl Renderer for NoOpRenderer {
    fn render(&mut self, _visual: &VisualState, _grid: &GridState) -> Result<(), RenderError> {
        Ok(())
    }

    fn surface_size(&self) -> (u32, u32) {
        (0, 0)
    }
}

/// Draws the grid in the terminal, one character per cell.
///
/// The ant is drawn on the cell its pixel position currently falls in, as an
/// arrow for the direction it is closest to facing, so both sliding and
/// turning show up while a transition is animated.
pub struct TerminalRenderer {
    out: Stdout,
    cell_size: i32,
}

/// Lines above the grid used for the status display.
const HEADER_LINES: u16 = 2;

impl Default for TerminalRenderer {
    fn default() -> Self {
        TerminalRenderer::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> TerminalRenderer {
        TerminalRenderer {
            out: stdout(),
            cell_size: CellSize::default().pixels(),
        }
    }

    fn ant_cell(&self, visual: &VisualState, grid: &GridState) -> (usize, usize) {
        let col = visual.px.div_euclid(self.cell_size).rem_euclid(grid.width() as i32);
        let row = visual.py.div_euclid(self.cell_size).rem_euclid(grid.height() as i32);
        (col as usize, row as usize)
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, visual: &VisualState, grid: &GridState) -> Result<(), RenderError> {
        let (ant_col, ant_row) = self.ant_cell(visual, grid);
        let (x, y) = grid.position();

        queue!(
            self.out,
            Hide,
            MoveTo(0, 0),
            Clear(ClearType::FromCursorDown),
            Print(format!(
                "Ant at ({x},{y}) facing {:?}, food left: {}\n",
                grid.orientation(),
                grid.food().len()
            )),
            Print(format!(
                "Pixels ({},{}), angle {:.2} rad\n",
                visual.px, visual.py, visual.angle
            ))
        )?;

        // Row zero on screen is the top of the grid, i.e. the highest logical y
        for row in 0..grid.height() {
            let logical_y = grid.height() - row - 1;
            for col in 0..grid.width() {
                let (glyph, color) = if (col, row) == (ant_col, ant_row) {
                    (arrow(visual.facing()), Color::Red)
                } else if grid.has_food(col, logical_y) {
                    ('*', Color::Grey)
                } else {
                    ('.', Color::Reset)
                };
                queue!(
                    self.out,
                    SetForegroundColor(color),
                    Print(glyph),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            queue!(self.out, Print("\n"))?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn surface_size(&self) -> (u32, u32) {
        match terminal::size() {
            Ok((cols, rows)) => {
                let cell = self.cell_size as u32;
                (
                    u32::from(cols) * cell,
                    u32::from(rows.saturating_sub(HEADER_LINES)) * cell,
                )
            }
            Err(e) => {
                log::debug!("terminal size unavailable: {e}");
                (0, 0)
            }
        }
    }

    fn set_cell_size(&mut self, cell_size: CellSize) {
        self.cell_size = cell_size.pixels();
    }
}

fn arrow(orientation: Orientation) -> char {
    match orientation {
        Orientation::North => '^',
        Orientation::East => '>',
        Orientation::South => 'v',
        Orientation::West => '<',
    }
}
