//! TUI application state and event loop.
//!
//! Design: every view selection lives in one immutable `SelectionState`
//! and the only mutation path is its reducer — key handlers translate
//! keystrokes into `SelectionEvent`s. The district fetch runs on a
//! background thread so the UI never blocks; it publishes into a shared
//! `LoadState` and a failed refetch keeps the previous dataset.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use urbanlens_core::fixtures;
use urbanlens_core::hotspot::HotspotRecord;
use urbanlens_core::indicator::Indicator;
use urbanlens_core::provider::{DistrictProvider, LoadState};
use urbanlens_core::scenario::{self, ScenarioImpact, ScenarioInput, SliderRange};
use urbanlens_core::selection::{SelectionEvent, SelectionState};
use urbanlens_core::series::SeriesPoint;

/// Panel width change per keypress, percent.
pub const PANEL_STEP: f64 = 5.0;

/// Refresh cadence for the idle event poll.
const TICK: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// ActiveSlider
// ---------------------------------------------------------------------------

/// Which scenario slider the +/- keys currently adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveSlider {
    #[default]
    Vegetation,
    Heat,
    Air,
    Population,
}

impl ActiveSlider {
    /// All sliders in panel order.
    pub const ALL: [ActiveSlider; 4] = [
        Self::Vegetation,
        Self::Heat,
        Self::Air,
        Self::Population,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Vegetation => Self::Heat,
            Self::Heat => Self::Air,
            Self::Air => Self::Population,
            Self::Population => Self::Vegetation,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetation => "Increase NDVI by",
            Self::Heat => "Reduce LST by",
            Self::Air => "Reduce PM2.5 by",
            Self::Population => "Population change",
        }
    }

    pub fn range(self) -> SliderRange {
        match self {
            Self::Vegetation => scenario::VEGETATION_INCREASE,
            Self::Heat => scenario::HEAT_REDUCTION,
            Self::Air => scenario::AIR_QUALITY_REDUCTION,
            Self::Population => scenario::POPULATION_CHANGE,
        }
    }

    pub fn value(self, input: &ScenarioInput) -> f64 {
        match self {
            Self::Vegetation => input.vegetation_increase_pct,
            Self::Heat => input.heat_reduction_c,
            Self::Air => input.air_quality_reduction_ug,
            Self::Population => input.population_change_pct,
        }
    }

    /// Slider value with its input unit (input temperatures stay °C).
    pub fn format_value(self, input: &ScenarioInput) -> String {
        let v = self.value(input);
        match self {
            Self::Vegetation => format!("{v:.0}%"),
            Self::Heat => format!("{v:.1}°C"),
            Self::Air => format!("{v:.0} µg/m³"),
            Self::Population => format!("{v:+.0}%"),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared state — written by the fetch thread
// ---------------------------------------------------------------------------

struct Shared {
    data: LoadState<Vec<HotspotRecord>>,
    /// City label from the provider, consumed once by the UI thread.
    city: Option<String>,
    /// Last fetch error, kept visible even when stale data still renders.
    last_error: Option<String>,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    provider: Arc<dyn DistrictProvider + Send + Sync>,
    selection: SelectionState,
    scenario: ScenarioInput,
    active_slider: ActiveSlider,
    /// Cursor in the indicator list.
    cursor: usize,
    /// Cursor in the district cycle (tab).
    district_cursor: Option<usize>,
    /// Monthly series for the active layer, converted to the active unit.
    /// Regenerated on layer/unit change, not per frame.
    series: Vec<SeriesPoint>,
    shared: Arc<Mutex<Shared>>,
    fetching: Arc<AtomicBool>,
    running: bool,
}

impl App {
    pub fn new(provider: Box<dyn DistrictProvider + Send + Sync>) -> Self {
        Self {
            provider: Arc::from(provider),
            selection: SelectionState::default(),
            scenario: ScenarioInput::default(),
            active_slider: ActiveSlider::default(),
            cursor: 0,
            district_cursor: None,
            series: Vec::new(),
            shared: Arc::new(Mutex::new(Shared {
                data: LoadState::Loading,
                city: None,
                last_error: None,
            })),
            fetching: Arc::new(AtomicBool::new(false)),
            running: true,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores the terminal before printing
        // the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore the terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        self.kick_fetch();
        let mut last_tick = Instant::now();

        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if last_tick.elapsed() >= TICK {
                self.sync_city();
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < Indicator::ALL.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.apply(SelectionEvent::SelectLayer(Indicator::ALL[self.cursor]));
            }
            KeyCode::Tab => self.cycle_district(1),
            KeyCode::BackTab => self.cycle_district(-1),
            KeyCode::Char('m') => {
                let next = (self.selection.month_index + 1) % 12;
                self.apply(SelectionEvent::SelectMonth(next));
            }
            KeyCode::Char('M') => {
                let prev = (self.selection.month_index + 11) % 12;
                self.apply(SelectionEvent::SelectMonth(prev));
            }
            KeyCode::Char('u') => {
                self.apply(SelectionEvent::SetUnit(self.selection.unit.next()));
            }
            KeyCode::Char('s') => self.active_slider = self.active_slider.next(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_slider(1.0),
            KeyCode::Char('-') => self.adjust_slider(-1.0),
            KeyCode::Char(']') => self.resize_panel(PANEL_STEP),
            KeyCode::Char('[') => self.resize_panel(-PANEL_STEP),
            KeyCode::Char('r') => {
                self.apply(SelectionEvent::Reset);
                self.district_cursor = None;
            }
            KeyCode::Char('l') => self.kick_fetch(),
            _ => {}
        }
    }

    /// Route an event through the reducer; regenerate the cached series
    /// when the layer or unit changed.
    fn apply(&mut self, event: SelectionEvent) {
        let refresh = matches!(
            event,
            SelectionEvent::SelectLayer(_) | SelectionEvent::SetUnit(_) | SelectionEvent::Reset
        );
        self.selection = self.selection.apply(event);
        if refresh {
            self.refresh_series();
        }
    }

    fn refresh_series(&mut self) {
        self.series = match self.selection.layer {
            Some(layer) => urbanlens_core::monthly_series(
                layer,
                &fixtures::monthly_values(layer),
                self.selection.unit,
            ),
            None => Vec::new(),
        };
    }

    fn cycle_district(&mut self, step: isize) {
        if self.selection.layer.is_none() {
            return;
        }
        let names = self.district_names();
        if names.is_empty() {
            return;
        }
        let len = names.len() as isize;
        let next = match self.district_cursor {
            Some(i) => (i as isize + step).rem_euclid(len) as usize,
            None if step < 0 => (len - 1) as usize,
            None => 0,
        };
        self.district_cursor = Some(next);
        let name = names[next].clone();
        self.apply(SelectionEvent::SelectArea(name));
    }

    fn adjust_slider(&mut self, direction: f64) {
        let mut input = self.scenario;
        let step = self.active_slider.range().step * direction;
        match self.active_slider {
            ActiveSlider::Vegetation => input.vegetation_increase_pct += step,
            ActiveSlider::Heat => input.heat_reduction_c += step,
            ActiveSlider::Air => input.air_quality_reduction_ug += step,
            ActiveSlider::Population => input.population_change_pct += step,
        }
        self.scenario = input.clamped();
    }

    fn resize_panel(&mut self, delta: f64) {
        let width = self.selection.panel_width_pct + delta;
        self.apply(SelectionEvent::SetPanelWidth(width));
    }

    /// Adopt the provider's city label once a fetch has reported it.
    fn sync_city(&mut self) {
        let pending = self.shared.lock().unwrap().city.take();
        if let Some(city) = pending {
            if city != self.selection.city {
                self.apply(SelectionEvent::SelectCity(city));
            }
        }
    }

    fn kick_fetch(&self) {
        if self.fetching.swap(true, Ordering::Relaxed) {
            return;
        }
        let provider = Arc::clone(&self.provider);
        let shared = Arc::clone(&self.shared);
        let flag = Arc::clone(&self.fetching);

        thread::spawn(move || {
            fetch_into(&*provider, &shared);
            flag.store(false, Ordering::Relaxed);
        });
    }

    // --- Accessors for rendering ---

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn scenario(&self) -> &ScenarioInput {
        &self.scenario
    }

    pub fn active_slider(&self) -> ActiveSlider {
        self.active_slider
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn series(&self) -> &[SeriesPoint] {
        &self.series
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Relaxed)
    }

    /// Snapshot of the shared fetch state for one frame.
    pub fn data_snapshot(&self) -> (LoadState<Vec<HotspotRecord>>, Option<String>) {
        let s = match self.shared.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        (s.data.clone(), s.last_error.clone())
    }

    /// The current scenario projection. Slider input is kept clamped, so
    /// projection cannot fail.
    pub fn impact(&self) -> ScenarioImpact {
        urbanlens_core::project(&self.scenario).expect("slider input is kept in range")
    }

    /// Display value for an indicator row: the selected district's reading
    /// when one is selected, otherwise the city-level value for the
    /// current month.
    pub fn indicator_value(&self, indicator: Indicator) -> f64 {
        if let Some(area) = &self.selection.area {
            let shared = self.shared.lock().unwrap();
            if let Some(hotspots) = shared.data.ready() {
                if let Some(h) = hotspots.iter().find(|h| h.reading.district == *area) {
                    return h.reading.value(indicator);
                }
            }
        }
        fixtures::monthly_values(indicator)[self.selection.month_index]
    }

    /// Hotspot record for the selected district, if any.
    pub fn selected_record(&self) -> Option<HotspotRecord> {
        let area = self.selection.area.clone()?;
        let shared = self.shared.lock().unwrap();
        shared
            .data
            .ready()
            .and_then(|hotspots| hotspots.iter().find(|h| h.reading.district == area))
            .cloned()
    }

    fn district_names(&self) -> Vec<String> {
        let shared = self.shared.lock().unwrap();
        shared
            .data
            .ready()
            .map(|hotspots| {
                hotspots
                    .iter()
                    .map(|h| h.reading.district.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One fetch round: city label + hotspot records into the shared slot.
/// A failed refetch keeps previously loaded data (stale-but-consistent)
/// but records the error for display.
fn fetch_into(provider: &(dyn DistrictProvider + Send + Sync), shared: &Mutex<Shared>) {
    let city = provider.city();
    let result = provider.fetch_hotspots();

    let mut s = match shared.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match result {
        Ok(hotspots) => {
            s.city = Some(city);
            s.last_error = None;
            s.data = LoadState::Ready(hotspots);
        }
        Err(err) => {
            log::warn!("district fetch failed: {err}");
            s.last_error = Some(err.to_string());
            if !s.data.is_ready() {
                s.data = LoadState::Failed(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urbanlens_core::provider::FixtureProvider;
    use urbanlens_core::selection::SelectionPhase;
    use urbanlens_core::units::TemperatureUnit;

    fn loaded_app() -> App {
        let app = App::new(Box::new(FixtureProvider));
        fetch_into(&FixtureProvider, &app.shared);
        app
    }

    // -----------------------------------------------------------------------
    // Slider handling
    // -----------------------------------------------------------------------

    #[test]
    fn active_slider_cycles_through_all() {
        let mut slider = ActiveSlider::Vegetation;
        for expected in [
            ActiveSlider::Heat,
            ActiveSlider::Air,
            ActiveSlider::Population,
            ActiveSlider::Vegetation,
        ] {
            slider = slider.next();
            assert_eq!(slider, expected);
        }
    }

    #[test]
    fn adjust_slider_steps_and_clamps() {
        let mut app = loaded_app();
        // Default vegetation 10, step 5.
        app.adjust_slider(1.0);
        assert_eq!(app.scenario.vegetation_increase_pct, 15.0);
        for _ in 0..20 {
            app.adjust_slider(1.0);
        }
        assert_eq!(app.scenario.vegetation_increase_pct, 50.0);
        for _ in 0..40 {
            app.adjust_slider(-1.0);
        }
        assert_eq!(app.scenario.vegetation_increase_pct, 5.0);
        assert!(app.scenario.validate().is_ok());
    }

    #[test]
    fn impact_never_panics_on_clamped_input() {
        let mut app = loaded_app();
        app.active_slider = ActiveSlider::Population;
        for _ in 0..50 {
            app.adjust_slider(-1.0);
        }
        let impact = app.impact();
        assert_eq!(impact.per_capita_green_space_m2, 15.625);
    }

    // -----------------------------------------------------------------------
    // Key-driven selection flow
    // -----------------------------------------------------------------------

    #[test]
    fn space_selects_layer_under_cursor() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.selection.layer, Some(Indicator::HeatIsland));
        assert_eq!(app.selection.phase(), SelectionPhase::LayerOnly);
        assert_eq!(app.series.len(), 12);
    }

    #[test]
    fn tab_cycles_districts_once_layer_active() {
        let mut app = loaded_app();
        // No layer yet: tab is a no-op.
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selection.area, None);

        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selection.area.as_deref(), Some("Industrial East"));
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selection.area.as_deref(), Some("Downtown Core"));
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.selection.area.as_deref(), Some("Industrial East"));
    }

    #[test]
    fn unit_toggle_regenerates_series() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Down); // heat island
        app.handle_key(KeyCode::Char(' '));
        let celsius_jan = app.series[0].value;
        app.handle_key(KeyCode::Char('u'));
        assert_eq!(app.selection.unit, TemperatureUnit::Fahrenheit);
        let fahrenheit_jan = app.series[0].value;
        assert!((fahrenheit_jan - (celsius_jan * 9.0 / 5.0 + 32.0)).abs() < 1e-9);
    }

    #[test]
    fn reset_key_clears_selection_and_cursor() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.selection.phase(), SelectionPhase::NoLayer);
        assert_eq!(app.district_cursor, None);
        assert!(app.series.is_empty());
    }

    #[test]
    fn panel_keys_step_within_bounds() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Char(']'));
        assert_eq!(app.selection.panel_width_pct, 25.0);
        for _ in 0..30 {
            app.handle_key(KeyCode::Char(']'));
        }
        assert_eq!(app.selection.panel_width_pct, 78.0);
        for _ in 0..30 {
            app.handle_key(KeyCode::Char('['));
        }
        assert_eq!(app.selection.panel_width_pct, 20.0);
    }

    #[test]
    fn month_keys_wrap() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Char('M'));
        assert_eq!(app.selection.month_index, 11);
        app.handle_key(KeyCode::Char('m'));
        assert_eq!(app.selection.month_index, 0);
    }

    // -----------------------------------------------------------------------
    // Fetch lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn fetch_publishes_ready_data() {
        let app = loaded_app();
        let (data, error) = app.data_snapshot();
        assert!(data.is_ready());
        assert_eq!(error, None);
        assert_eq!(data.ready().unwrap().len(), 10);
    }

    #[test]
    fn indicator_value_prefers_selected_district() {
        let mut app = loaded_app();
        // City-level fixture value for January.
        assert_eq!(
            app.indicator_value(Indicator::Vegetation),
            fixtures::monthly_values(Indicator::Vegetation)[0]
        );
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Tab);
        // Industrial East reading.
        assert_eq!(app.indicator_value(Indicator::Vegetation), 0.24);
        assert!(app.selected_record().is_some());
    }
}
