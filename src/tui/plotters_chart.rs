//! Plotters-powered inflation chart widget for Ratatui.
//!
//! Plotters output is drawn into the Ratatui buffer through
//! `plotters-ratatui-backend`, so the TUI and the SVG export share the same
//! drawing model.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One line series in chart coordinates (x = `chart::date_to_x`), split into
/// runs of finite points.
pub struct LineTrace<'a> {
    pub runs: &'a [Vec<(f64, f64)>],
    pub color: RGBColor,
}

/// A render-only chart description; all series and bounds are computed
/// outside the render call.
pub struct InflationPlottersChart<'a> {
    pub traces: &'a [LineTrace<'a>],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for InflationPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for trace in self.traces {
                for run in trace.runs {
                    chart.draw_series(LineSeries::new(run.iter().copied(), &trace.color))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Lift the BCB palette for a dark terminal background.
///
/// The page colors are deep blues that vanish on black, so each channel is
/// pushed halfway toward white while keeping the hue.
pub fn terminal_color((r, g, b): (u8, u8, u8)) -> RGBColor {
    let lift = |c: u8| c + (255 - c) / 2;
    RGBColor(lift(r), lift(g), lift(b))
}
