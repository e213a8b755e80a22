use std::{fmt, io::Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::{Coord, Direction, Maze, VisitedMatrix};

/// What to draw in one slot of the rendered frame. A maze of `w x h` cells renders
/// as `(2w + 1) x (2h + 1)` slots: cells at odd coordinates, walls between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Empty,
    Visited,
    Route,
    Start,
    Goal,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Empty => "  ".with(Color::Reset),
            Glyph::Visited => "* ".with(Color::Blue),
            Glyph::Route => "🟨".with(Color::Yellow),
            Glyph::Start => "🟩".with(Color::Green),
            Glyph::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::CELL_WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Number of terminal rows reserved below the maze for the status line.
pub const STATUS_ROWS: u16 = 1;

/// Terminal columns and rows needed to draw `maze` plus the status line.
pub fn frame_size(maze: &Maze) -> (usize, usize) {
    (
        (maze.width() * 2 + 1) * Glyph::CELL_WIDTH as usize,
        maze.height() * 2 + 1 + STATUS_ROWS as usize,
    )
}

/// Lay out walls, the entrance and exit, the visited set and the path.
pub fn compose(maze: &Maze, path: &[Coord], visited: Option<&VisitedMatrix>) -> Vec<Vec<Glyph>> {
    let frame_width = maze.width() * 2 + 1;
    let frame_height = maze.height() * 2 + 1;
    let mut frame = vec![vec![Glyph::Wall; frame_width]; frame_height];

    for (x, y) in maze.coords() {
        let (fx, fy) = (x * 2 + 1, y * 2 + 1);
        frame[fy][fx] = match visited {
            Some(visited) if visited.is_visited((x, y)) => Glyph::Visited,
            _ => Glyph::Empty,
        };
        for direction in Direction::ALL {
            let open = match maze.neighbor((x, y), direction) {
                Some(_) => maze.has_passage((x, y), direction),
                // Outer boundary, open only at the entrance and exit
                None => maze[(x, y)].is_open(direction),
            };
            if !open {
                continue;
            }
            let (wx, wy) = match direction {
                Direction::Up => (fx, fy - 1),
                Direction::Down => (fx, fy + 1),
                Direction::Left => (fx - 1, fy),
                Direction::Right => (fx + 1, fy),
            };
            frame[wy][wx] = Glyph::Empty;
        }
    }

    for &(x, y) in path {
        frame[y * 2 + 1][x * 2 + 1] = Glyph::Route;
    }
    for pair in path.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        // Midpoint between two adjacent cells in frame coordinates
        frame[y1 + y2 + 1][x1 + x2 + 1] = Glyph::Route;
    }

    let (gx, gy) = maze.exit();
    frame[gy * 2 + 1][gx * 2 + 1] = Glyph::Goal;
    let (sx, sy) = maze.entrance();
    frame[sy * 2 + 1][sx * 2 + 1] = Glyph::Start;
    frame
}

/// Draw a composed frame at the top of the terminal with a status line under it.
pub fn draw<W: Write>(out: &mut W, frame: &[Vec<Glyph>], status: &str) -> std::io::Result<()> {
    for (row, glyphs) in frame.iter().enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        for glyph in glyphs {
            out.queue(style::Print(glyph))?;
        }
    }
    queue!(
        out,
        cursor::MoveTo(0, frame.len() as u16),
        terminal::Clear(ClearType::CurrentLine),
        style::PrintStyledContent(status.with(Color::Yellow)),
    )?;
    out.flush()
}

/// Write a composed frame line by line, for output that is not a terminal screen.
pub fn print_plain<W: Write>(out: &mut W, frame: &[Vec<Glyph>]) -> std::io::Result<()> {
    for glyphs in frame {
        for glyph in glyphs {
            write!(out, "{}", glyph)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
