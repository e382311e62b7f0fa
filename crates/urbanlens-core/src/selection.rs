//! Selection state machine for the analysis view.
//!
//! One immutable [`SelectionState`] value holds everything the view
//! selects — city, month, active layer, selected district, temperature
//! unit, panel width — and the only way to change it is the reducer
//! [`SelectionState::apply`], one transition per event. Components read
//! the slice they need and request transitions; there is no ambient
//! mutable state.
//!
//! Phases: no layer → layer only → layer and area. Selecting an area
//! requires an active layer. Changing the layer keeps the area selection;
//! the displayed value is re-read from the district's reading for the new
//! layer. Reset is a full reset: both layer and area are cleared.

use serde::{Deserialize, Serialize};

use crate::district::{self, DistrictReading};
use crate::indicator::Indicator;
use crate::units::TemperatureUnit;

/// Minimum right-panel width, percent of the viewport.
pub const MIN_PANEL_WIDTH: f64 = 20.0;
/// Maximum right-panel width, percent of the viewport.
pub const MAX_PANEL_WIDTH: f64 = 78.0;
/// Initial right-panel width, percent of the viewport.
pub const DEFAULT_PANEL_WIDTH: f64 = 20.0;

/// Where the machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No layer active; area display is meaningless.
    NoLayer,
    /// A layer is active, no district selected.
    LayerOnly,
    /// A layer is active and a district is selected.
    LayerAndArea,
}

/// The full selection state of the analysis view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub city: String,
    /// Current month, 0-based index into [`crate::series::MONTHS`].
    pub month_index: usize,
    /// Active data layer; `None` means nothing selected.
    pub layer: Option<Indicator>,
    /// Selected district name; only meaningful with an active layer.
    pub area: Option<String>,
    pub unit: TemperatureUnit,
    /// Right-panel width, percent, clamped to [20, 78].
    pub panel_width_pct: f64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            city: "San Francisco".into(),
            month_index: 0,
            layer: None,
            area: None,
            unit: TemperatureUnit::default(),
            panel_width_pct: DEFAULT_PANEL_WIDTH,
        }
    }
}

/// Every way the selection can change.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Activate a data layer.
    SelectLayer(Indicator),
    /// Select a district. Ignored when no layer is active.
    SelectArea(String),
    SelectCity(String),
    /// Change the current month (0-based; out-of-range clamps to Dec).
    SelectMonth(usize),
    SetUnit(TemperatureUnit),
    /// Resize the right panel (clamped to [20, 78]).
    SetPanelWidth(f64),
    /// Full reset: clears both layer and area. City, month, unit, and
    /// panel width are preserved.
    Reset,
}

impl SelectionState {
    /// Current phase of the machine.
    pub fn phase(&self) -> SelectionPhase {
        match (&self.layer, &self.area) {
            (None, _) => SelectionPhase::NoLayer,
            (Some(_), None) => SelectionPhase::LayerOnly,
            (Some(_), Some(_)) => SelectionPhase::LayerAndArea,
        }
    }

    /// Pure transition: apply one event and return the next state.
    pub fn apply(&self, event: SelectionEvent) -> SelectionState {
        let mut next = self.clone();
        match event {
            SelectionEvent::SelectLayer(layer) => {
                // Keep the area — its displayed value is re-read for the
                // new layer by `area_value`.
                next.layer = Some(layer);
            }
            SelectionEvent::SelectArea(district) => {
                if next.layer.is_some() {
                    next.area = Some(district);
                }
            }
            SelectionEvent::SelectCity(city) => {
                next.city = city;
                next.area = None;
            }
            SelectionEvent::SelectMonth(index) => {
                next.month_index = index.min(11);
            }
            SelectionEvent::SetUnit(unit) => {
                next.unit = unit;
            }
            SelectionEvent::SetPanelWidth(width) => {
                next.panel_width_pct = width.clamp(MIN_PANEL_WIDTH, MAX_PANEL_WIDTH);
            }
            SelectionEvent::Reset => {
                next.layer = None;
                next.area = None;
            }
        }
        next
    }

    /// The selected district's value for the active layer, read from the
    /// current readings. `None` unless both a layer and an area are
    /// selected and the district exists in the dataset.
    pub fn area_value(&self, readings: &[DistrictReading]) -> Option<f64> {
        let layer = self.layer?;
        let area = self.area.as_deref()?;
        district::find_reading(readings, area).map(|r| r.value(layer))
    }
}
