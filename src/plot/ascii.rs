//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks when no TUI is wanted (pipes, CI logs)
//! - deterministic output (helpful for golden tests)
//!
//! Each trace gets its own glyph (`*`, `+`, then `o`); where lines cross, the
//! trace drawn first wins.

use crate::chart::{ChartSpec, fmt_x_month};

const GLYPHS: [char; 3] = ['*', '+', 'o'];

/// Render every trace of a chart spec into a `width` x `height` grid.
pub fn render_ascii_plot(spec: &ChartSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = spec.x_range();
    let (y_min, y_max) = spec.y_range();

    let mut grid = vec![vec![' '; width]; height];

    for (idx, trace) in spec.traces.iter().enumerate() {
        let glyph = GLYPHS[idx.min(GLYPHS.len() - 1)];
        for run in trace.finite_runs() {
            draw_polyline(&mut grid, &run, (x_min, x_max), (y_min, y_max), glyph);
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: dates=[{}, {}] | y=[{y_min:.2}, {y_max:.2}]%\n",
        fmt_x_month(x_min),
        fmt_x_month(x_max)
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = spec
        .traces
        .iter()
        .enumerate()
        .map(|(idx, t)| format!("{} {}", GLYPHS[idx.min(GLYPHS.len() - 1)], t.name))
        .collect();
    out.push_str(&legend.join("   "));
    out.push('\n');

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
    ch: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
