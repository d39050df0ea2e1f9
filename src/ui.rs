use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph,
    },
    Frame, Terminal,
};

use crate::app::{App, SeriesView, ViewMode};
use crate::constants::TICK_RATE_MS;
use crate::util::{format_count, format_ns};

pub fn run(app: App) -> io::Result<()> {
    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_loop(&mut terminal, app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app_loop<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(TICK_RATE_MS);

    while !app.should_quit {
        terminal.draw(|f| draw(f, &app))?;

        let timeout = tick_rate.checked_sub(app.last_tick.elapsed()).unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Err(err) = app.on_key(key.code) {
                        tracing::warn!(%err, "key ignored");
                    }
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.on_tick();
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame, app: &App) {
    // ============= whole screen layout ============
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Chart
            Constraint::Length(7), // Stats panel
            Constraint::Length(1), // Status bar
        ].as_ref())
        .split(f.size());

    match app.mode {
        ViewMode::Histogram => draw_histogram(f, app, main_chunks[0]),
        ViewMode::Timeline => draw_timeline(f, app, main_chunks[0]),
    }
    draw_stats(f, app, main_chunks[1]);
    draw_status_bar(f, app, main_chunks[2]);
}

fn legend(app: &App) -> Line<'static> {
    let mut spans = vec![Span::raw(" Latency distribution: ")];
    for (i, view) in app.views.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" vs "));
        }
        spans.push(Span::styled(
            view.primitive.label(),
            Style::default().fg(view.primitive.color()).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

fn draw_histogram(f: &mut Frame, app: &App, area: Rect) {
    let bin_count = app.config.bin_count;
    let label_every = (bin_count / 10).max(1);

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .title(legend(app)),
        )
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1)
        .max(app.config.y_max);

    for i in 0..bin_count {
        let bars: Vec<Bar> = app
            .views
            .iter()
            .map(|view| {
                let count = view.histogram.bins.get(i).copied().unwrap_or(0);
                Bar::default()
                    .value(count.min(app.config.y_max))
                    .text_value(String::new())
                    .style(Style::default().fg(view.primitive.color()))
            })
            .collect();

        // Bin lower edge in ns, shown on every few groups
        let lower_edge = app.views.first().map(|v| v.histogram.bin_range(i).0);
        let label = match lower_edge {
            Some(edge) if i % label_every == 0 => format_count(edge as u64),
            _ => String::new(),
        };
        chart = chart.data(BarGroup::default().label(Line::from(label)).bars(&bars));
    }

    f.render_widget(chart, area);
}

fn draw_timeline(f: &mut Frame, app: &App, area: Rect) {
    if app.views.is_empty() {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, app.views.len() as u32); app.views.len()])
        .split(area);

    let y_limit = app.config.latency_max as f64;
    for (view, row) in app.views.iter().zip(rows.iter()) {
        let color = view.primitive.color();
        let x_limit = view.chunked.last_index().max(1.0);

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!(
                        " {} | {} points, {} samples each | peak {} ",
                        view.primitive.label(),
                        view.chunked.len(),
                        view.chunked.chunk_size,
                        format_ns(view.chunked.peak_latency()),
                    ))
                    .title_style(Style::default().fg(color)),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, x_limit])
            .y_bounds([0.0, y_limit])
            .paint(|ctx| {
                for (x, y) in view.chunked.pairs() {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: y.min(y_limit),
                        color,
                    });
                }
            });
        f.render_widget(canvas, *row);
    }
}

fn stats_text(view: &SeriesView) -> Vec<Line<'static>> {
    let s = &view.summary;
    let dim = Style::default().fg(Color::DarkGray);
    vec![
        Line::from(vec![
            Span::raw("■ "),
            Span::styled(
                view.primitive.label(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {} samples", s.count), dim),
        ]),
        Line::from(vec![Span::styled("  Min:  ", dim), Span::raw(format!("{} ns", s.min))]),
        Line::from(vec![Span::styled("  Max:  ", dim), Span::raw(format!("{} ns", s.max))]),
        Line::from(vec![Span::styled("  Mean: ", dim), Span::raw(format!("{:.1} ns", s.mean))]),
        Line::from(vec![Span::styled("  Std:  ", dim), Span::raw(format!("{:.1} ns", s.stddev))]),
    ]
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    if app.views.is_empty() {
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, app.views.len() as u32); app.views.len()])
        .split(area);

    for (view, column) in app.views.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(view.primitive.color()));
        f.render_widget(Paragraph::new(stats_text(view)).block(block), *column);
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let outside: u64 = app
        .views
        .iter()
        .map(|v| v.histogram.underflow + v.histogram.overflow)
        .sum();

    let status_content = Line::from(vec![
        Span::styled(" SYNC LATENCY ", Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled("VIEW: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(app.mode.title()),
        Span::raw(" | "),
        Span::styled("CHUNK: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(app.config.chunk_size.to_string()),
        Span::raw(" | "),
        Span::raw(format!("{} off-range", outside)),
        Span::styled(format!(" (@{})", app.loaded_at.format("%H:%M:%S")), Style::default().fg(Color::DarkGray)),
        Span::raw(" | h/t/Tab view, +/- chunk, q quit"),
    ]);

    let status_bar = Paragraph::new(status_content).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::series::{MeasurementSeries, Primitive};
    use ratatui::backend::TestBackend;

    fn app(mode: ViewMode) -> App {
        let mutex: MeasurementSeries = (1..=500).map(|i| (i, 800 + i % 50)).collect();
        let sem: MeasurementSeries = (1..=500).map(|i| (i, 1500 + i % 70)).collect();
        App::new(
            vec![(Primitive::Mutex, mutex), (Primitive::Semaphore, sem)],
            PlotConfig::default(),
            mode,
        )
        .unwrap()
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_histogram_view_renders_legend_and_stats() {
        let screen = render(&app(ViewMode::Histogram));
        assert!(screen.contains("Latency distribution"));
        assert!(screen.contains("Mutex"));
        assert!(screen.contains("Semaphore"));
        assert!(screen.contains("500 samples"));
        assert!(screen.contains("VIEW: Histogram"));
    }

    #[test]
    fn test_timeline_view_renders_chunk_titles() {
        let screen = render(&app(ViewMode::Timeline));
        assert!(screen.contains("5 points, 100 samples each"));
        assert!(screen.contains("VIEW: Timeline"));
        assert!(screen.contains("CHUNK: 100"));
    }

    #[test]
    fn test_histogram_labels_with_huge_latency_range() {
        let config = crate::config::PlotConfig::resolve(
            None,
            crate::config::Overrides {
                latency_max: Some(1_000_000_000_000_000_000),
                ..Default::default()
            },
        )
        .unwrap();
        let series: MeasurementSeries = (1..=10).map(|i| (i, i * 100)).collect();
        let app = App::new(vec![(Primitive::Mutex, series)], config, ViewMode::Histogram).unwrap();

        let screen = render(&app);
        assert!(screen.contains("VIEW: Histogram"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = app(ViewMode::Timeline);
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
