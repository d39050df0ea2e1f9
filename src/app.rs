use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::KeyCode;

use crate::chunk::ChunkedSeries;
use crate::config::PlotConfig;
use crate::error::Result;
use crate::histogram::Histogram;
use crate::series::{MeasurementSeries, Primitive};
use crate::stats::StatisticsSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Histogram,
    Timeline,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Histogram => ViewMode::Timeline,
            ViewMode::Timeline => ViewMode::Histogram,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Histogram => "Histogram",
            ViewMode::Timeline => "Timeline",
        }
    }
}

// One loaded primitive with everything the renderer needs
pub struct SeriesView {
    pub primitive: Primitive,
    pub series: MeasurementSeries,
    pub summary: StatisticsSummary,
    pub chunked: ChunkedSeries,
    pub histogram: Histogram,
}

impl SeriesView {
    pub fn new(primitive: Primitive, series: MeasurementSeries, config: &PlotConfig) -> Result<Self> {
        let summary = series.summarize()?;
        let chunked = series.chunked(config.chunk_size)?;
        let histogram = Histogram::build(
            series.latencies(),
            config.bin_count,
            0.0,
            config.latency_max as f64,
        )?;
        Ok(Self {
            primitive,
            series,
            summary,
            chunked,
            histogram,
        })
    }
}

// Main application state
pub struct App {
    pub views: Vec<SeriesView>,
    pub config: PlotConfig,
    pub mode: ViewMode,
    pub loaded_at: DateTime<Local>,
    pub last_tick: Instant,
    pub should_quit: bool,
}

impl App {
    /// Fails with `EmptyInput` if any series has no samples.
    pub fn new(
        series: Vec<(Primitive, MeasurementSeries)>,
        config: PlotConfig,
        mode: ViewMode,
    ) -> Result<App> {
        let views = series
            .into_iter()
            .map(|(primitive, data)| SeriesView::new(primitive, data, &config))
            .collect::<Result<Vec<_>>>()?;

        Ok(App {
            views,
            config,
            mode,
            loaded_at: Local::now(),
            last_tick: Instant::now(),
            should_quit: false,
        })
    }

    pub fn on_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('c') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('h') => self.mode = ViewMode::Histogram,
            KeyCode::Char('t') => self.mode = ViewMode::Timeline,
            KeyCode::Tab => self.mode = self.mode.toggle(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_chunk_size(self.config.chunk_size.saturating_mul(2))?
            }
            KeyCode::Char('-') => self.set_chunk_size((self.config.chunk_size / 2).max(1))?,
            _ => {}
        }
        Ok(())
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<()> {
        if chunk_size == self.config.chunk_size {
            return Ok(());
        }
        // Compute everything first so a failure leaves the old state intact
        let rebuilt = self
            .views
            .iter()
            .map(|v| v.series.chunked(chunk_size))
            .collect::<Result<Vec<_>>>()?;

        for (view, chunked) in self.views.iter_mut().zip(rebuilt) {
            view.chunked = chunked;
        }
        self.config.chunk_size = chunk_size;
        tracing::debug!(chunk_size, "timeline re-chunked");
        Ok(())
    }

    pub fn on_tick(&mut self) {
        self.last_tick = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn series(n: i64) -> MeasurementSeries {
        (1..=n).map(|i| (i, 1000 + i)).collect()
    }

    fn app() -> App {
        let config = PlotConfig {
            chunk_size: 4,
            ..PlotConfig::default()
        };
        App::new(
            vec![(Primitive::Mutex, series(10)), (Primitive::Semaphore, series(7))],
            config,
            ViewMode::Histogram,
        )
        .unwrap()
    }

    #[test]
    fn test_new_derives_all_views() {
        let app = app();
        assert_eq!(app.views.len(), 2);
        assert_eq!(app.views[0].chunked.len(), 3);
        assert_eq!(app.views[1].chunked.len(), 2);
        assert_eq!(app.views[0].histogram.bins.len(), 50);
        assert_eq!(app.views[0].summary.count, 10);
    }

    #[test]
    fn test_new_rejects_empty_series() {
        let err = App::new(
            vec![(Primitive::Mutex, MeasurementSeries::new())],
            PlotConfig::default(),
            ViewMode::Timeline,
        )
        .err()
        .unwrap();
        assert!(matches!(err, AnalysisError::EmptyInput));
    }

    #[test]
    fn test_view_keys() {
        let mut app = app();
        app.on_key(KeyCode::Char('t')).unwrap();
        assert_eq!(app.mode, ViewMode::Timeline);
        app.on_key(KeyCode::Tab).unwrap();
        assert_eq!(app.mode, ViewMode::Histogram);
        app.on_key(KeyCode::Char('x')).unwrap();
        assert_eq!(app.mode, ViewMode::Histogram);
        assert!(!app.should_quit);
        app.on_key(KeyCode::Char('q')).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_chunk_keys_rechunk_series() {
        let mut app = app();
        app.on_key(KeyCode::Char('+')).unwrap();
        assert_eq!(app.config.chunk_size, 8);
        assert_eq!(app.views[0].chunked.len(), 2);
        assert_eq!(app.views[1].chunked.len(), 1);

        for _ in 0..5 {
            app.on_key(KeyCode::Char('-')).unwrap();
        }
        assert_eq!(app.config.chunk_size, 1);
        assert_eq!(app.views[0].chunked.len(), 10);
    }
}
