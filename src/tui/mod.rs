//! Ratatui-based terminal UI.
//!
//! A header with the menu icon, an optional navigation panel, and a body that
//! shows the chart, a month table, or the data sources. The chart pane is the
//! only place the chart is drawn; a failed refresh leaves it empty.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{self, InflationRun};
use crate::chart::{ChartSpec, fmt_x_month};
use crate::config::Sources;
use crate::data::BcbClient;
use crate::domain::Indicator;
use crate::error::AppError;

pub mod menu;
mod plotters_chart;

use menu::{NavMenu, View};
use plotters_chart::{InflationPlottersChart, LineTrace, terminal_color};

/// Start the TUI.
pub fn run(sources: Sources) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(sources);
    terminal
        .draw(|f| app.draw(f))
        .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
    app.refresh();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    sources: Sources,
    client: BcbClient,
    menu: NavMenu,
    view: View,
    status: String,
    run: Option<InflationRun>,
    spec: Option<ChartSpec>,
}

impl App {
    fn new(sources: Sources) -> Self {
        Self {
            sources,
            client: BcbClient::new(),
            menu: NavMenu::new(),
            view: View::Chart,
            status: "Fetching BCB data...".to_string(),
            run: None,
            spec: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('m') => self.menu.toggle(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Up if self.menu.is_active() => self.menu.select_prev(),
            KeyCode::Down if self.menu.is_active() => self.menu.select_next(),
            KeyCode::Enter if self.menu.is_active() => {
                self.view = self.menu.selected();
                self.status = format!("view: {}", self.view.label());
            }
            _ => {}
        }
        false
    }

    /// Re-run the whole pipeline. Failures are logged by the pipeline and
    /// leave the chart pane empty.
    fn refresh(&mut self) {
        self.status = "Fetching BCB data...".to_string();
        match pipeline::run(&self.client, &self.sources) {
            Ok(run) => {
                self.spec = Some(ChartSpec::from_run(&run));
                self.status = format!(
                    "IPCA: {} obs | IGP-M: {} obs",
                    run.ipca.len(),
                    run.igpm.len()
                );
                self.run = Some(run);
            }
            Err(err) => {
                self.run = None;
                self.spec = None;
                self.status = format!("Refresh failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);

        if self.menu.is_active() {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(18), Constraint::Min(0)])
                .split(chunks[1]);
            self.draw_nav(frame, body[0]);
            self.draw_view(frame, body[1]);
        } else {
            self.draw_view(frame, chunks[1]);
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!("{} ", self.menu.icon()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("infl", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {} | {}", crate::chart::CHART_TITLE, crate::chart::CHART_SUBTITLE)),
        ];
        if let Some(run) = &self.run {
            for ind in Indicator::ALL {
                if let Some((d, v)) = run.accumulated(ind).latest() {
                    spans.push(Span::styled(
                        format!(" | {} {}: {v:.2}%", ind.display_name(), d.format("%Y-%m")),
                        Style::default().fg(Color::Gray),
                    ));
                }
            }
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_nav(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = View::ALL
            .iter()
            .map(|v| {
                let marker = if *v == self.view { "•" } else { " " };
                ListItem::new(format!("{marker} {}", v.label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Menu").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.menu.cursor()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_view(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        match self.view {
            View::Chart => self.draw_chart(frame, area),
            View::Table => self.draw_table(frame, area),
            View::About => self.draw_about(frame, area),
        }
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(legend_line()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(spec) = &self.spec else {
            let msg = Paragraph::new("No chart (see status line).")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let series: Vec<(Indicator, Vec<Vec<(f64, f64)>>)> =
            spec.traces.iter().map(|t| (t.indicator, t.finite_runs())).collect();
        let traces: Vec<LineTrace<'_>> = series
            .iter()
            .map(|(ind, runs)| LineTrace {
                runs,
                color: terminal_color(ind.color_rgb()),
            })
            .collect();

        let (x0, x1) = spec.x_range();
        let (y0, y1) = spec.y_range();
        let x_bounds = [x0, x1];
        let y_bounds = [y0, y1];

        let (chart_rect, insets) = chart_layout(inner);
        let widget = InflationPlottersChart {
            traces: &traces,
            x_bounds,
            y_bounds,
            x_label: &spec.layout.xaxis.title,
            y_label: &spec.layout.yaxis.title,
            fmt_x: fmt_x_month,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds, spec);
        }
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("12-month accumulated").borders(Borders::ALL);
        let text = match &self.run {
            Some(run) => {
                let rows = area.height.saturating_sub(4) as usize;
                crate::report::format_recent_table(run, rows)
            }
            None => "No data (see status line).".to_string(),
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn draw_about(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Trailing 12-month compounded inflation",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for ind in Indicator::ALL {
            lines.push(Line::from(format!(
                "{} (SGS {}): {}",
                ind.display_name(),
                ind.sgs_code(),
                self.sources.get(ind).describe()
            )));
        }
        if let Some(run) = &self.run {
            lines.push(Line::from(""));
            for l in crate::report::format_summary(run).lines() {
                lines.push(Line::from(l.to_string()));
            }
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().title("About").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.menu.is_active() {
            "m close menu  ↑/↓ select  Enter open  r refresh  q quit"
        } else {
            "m menu  r refresh  q quit"
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn legend_line() -> Line<'static> {
    let mut spans = Vec::new();
    for ind in Indicator::ALL {
        let c = terminal_color(ind.color_rgb());
        spans.push(Span::styled(" ── ", Style::default().fg(Color::Rgb(c.0, c.1, c.2))));
        spans.push(Span::raw(ind.display_name()));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    spec: &ChartSpec,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_x_month(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_y(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(spec.layout.xaxis.title.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(spec.layout.yaxis.title.as_str())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.min(insets.left + 8),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
