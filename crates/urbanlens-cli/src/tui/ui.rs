//! TUI rendering — analysis dashboard layout.
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │  🌇 Urbanlens    San Francisco   Oct   °C                │
//! ├──────────────┬───────────────────────────┬───────────────┤
//! │  Layers      │  Analysis: Port District  │  Scenario     │
//! │  ▸ NDVI   ●  │  0.19  ▼ vs prev month    │  NDVI    10%  │
//! │    UHI       │  high-concern             │  LST    2.0°C │
//! │    AOD       │  ╭ monthly ─────────────╮ │  PM2.5   15   │
//! │    Pop       │  │   ~~~/\~~~           │ │  Pop     +5%  │
//! │  Legend      │  ╰──────────────────────╯ │  Impacts…     │
//! │  low ── high │  ▂▃▅▆▇ trend (6 mo)       │               │
//! ├──────────────┴───────────────────────────┴───────────────┤
//! │  ↑↓ layer  space: activate  tab: district  q: quit       │
//! └──────────────────────────────────────────────────────────┘
//!
//! The right panel width follows `SelectionState::panel_width_pct`
//! ([ and ] resize it), mirroring the drag-to-resize panel of the
//! original layout.

use ratatui::{prelude::*, widgets::*};

use urbanlens_core::indicator::Indicator;
use urbanlens_core::provider::LoadState;
use urbanlens_core::selection::SelectionPhase;
use urbanlens_core::series::{self, MONTHS};
use urbanlens_core::severity::{self, Severity};
use urbanlens_core::units;

use super::app::{ActiveSlider, App};

/// Fixed width of the layer sidebar, percent.
const SIDEBAR_WIDTH: u16 = 22;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // main
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_main(f, rows[1], app);
    draw_keys(f, rows[2]);
}

fn severity_color(s: Severity) -> Color {
    match s {
        Severity::Low => Color::Green,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::Red,
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let sel = app.selection();
    let spin = if app.is_fetching() { " ⟳" } else { "" };
    let layer_label = sel.layer.map(|l| l.label()).unwrap_or("no layer");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(Line::from(vec![
            Span::styled(" 🌇 Urbanlens ", Style::default().bold().fg(Color::Green)),
            Span::raw(format!(" {} ", sel.city)),
            Span::styled(
                format!(" {} ", MONTHS[sel.month_index]),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!(" {} ", sel.unit.suffix()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!(" {layer_label}{spin} "),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let panel = app.selection().panel_width_pct.round() as u16;
    let center = 100u16.saturating_sub(SIDEBAR_WIDTH + panel);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(SIDEBAR_WIDTH),
            Constraint::Percentage(center),
            Constraint::Percentage(panel),
        ])
        .split(area);

    draw_layers(f, cols[0], app);
    draw_analysis(f, cols[1], app);
    draw_scenario(f, cols[2], app);
}

// ---------------------------------------------------------------------------
// Left: layer list + legend
// ---------------------------------------------------------------------------

fn draw_layers(f: &mut Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(4)])
        .split(area);

    let sel = app.selection();
    let rows: Vec<Row> = Indicator::ALL
        .iter()
        .enumerate()
        .map(|(i, &ind)| {
            let is_cursor = i == app.cursor();
            let is_active = sel.layer == Some(ind);

            let pointer = if is_cursor { "▸" } else { " " };
            let marker = if is_active { "●" } else { " " };

            let value = app.indicator_value(ind);
            let value_str = format_indicator_value(ind, value, sel.unit);
            let bucket = severity::classify(ind, value);

            let style = if is_cursor {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else if is_active {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(severity_color(bucket))
            };

            Row::new(vec![
                pointer.to_string(),
                marker.to_string(),
                ind.label().to_string(),
                value_str,
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // pointer
            Constraint::Length(2),  // active marker
            Constraint::Length(28), // label
            Constraint::Length(10), // value
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Data Layers (space to select) "),
    );

    f.render_widget(table, parts[0]);

    // Legend for the active (or hovered) layer.
    let ind = sel.layer.unwrap_or(Indicator::ALL[app.cursor()]);
    let (lo, hi) = ind.legend(sel.unit);
    let legend = Paragraph::new(vec![
        Line::from(Span::styled(ind.label(), Style::default().fg(Color::Cyan))),
        Line::from(format!("low {lo}  ⟶  high {hi}")),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Legend "));
    f.render_widget(legend, parts[1]);
}

fn format_indicator_value(ind: Indicator, value: f64, unit: units::TemperatureUnit) -> String {
    match ind {
        Indicator::Vegetation => format!("{value:.2}"),
        Indicator::HeatIsland => units::format_temperature(value, unit),
        Indicator::AerosolDepth => format!("{value:.0}"),
        Indicator::Population => {
            if value >= 1000.0 {
                format!("{:.1}k", value / 1000.0)
            } else {
                format!("{value:.1}k")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Center: analysis card + monthly chart + sparkline
// ---------------------------------------------------------------------------

fn draw_analysis(f: &mut Frame, area: Rect, app: &App) {
    let (data, last_error) = app.data_snapshot();

    match &data {
        LoadState::Loading => {
            let msg = Paragraph::new("⟳ Loading district data…")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Analysis "));
            f.render_widget(msg, area);
            return;
        }
        LoadState::Failed(err) => {
            let msg = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Failed to load district data",
                    Style::default().fg(Color::Red).bold(),
                )),
                Line::from(err.as_str()),
                Line::from(""),
                Line::from("press l to retry"),
            ])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Analysis "));
            f.render_widget(msg, area);
            return;
        }
        LoadState::Ready(_) => {}
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // card
            Constraint::Min(8),    // monthly chart
            Constraint::Length(4), // sparkline
        ])
        .split(area);

    draw_card(f, parts[0], app, last_error.as_deref());
    draw_chart(f, parts[1], app);
    draw_sparkline(f, parts[2], app);
}

fn draw_card(f: &mut Frame, area: Rect, app: &App, stale_error: Option<&str>) {
    let sel = app.selection();
    let mut lines: Vec<Line> = Vec::new();

    match sel.phase() {
        SelectionPhase::NoLayer => {
            lines.push(Line::from(
                "Select a data layer, then pick a district to see insights.",
            ));
        }
        SelectionPhase::LayerOnly => {
            lines.push(Line::from(
                "Press tab to select a district on the active layer.",
            ));
        }
        SelectionPhase::LayerAndArea => {
            if let (Some(layer), Some(record)) = (sel.layer, app.selected_record()) {
                let value = record.reading.value(layer);
                let value_str = format_indicator_value(layer, value, sel.unit);
                let bucket = severity::classify(layer, value);
                let (arrow, word) = match series::trend(app.series(), sel.month_index) {
                    series::Trend::Rising => ("▲", "increased vs previous month"),
                    series::Trend::Falling => ("▼", "decreased vs previous month"),
                    series::Trend::Flat => ("→", "unchanged vs previous month"),
                };

                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{value_str}  "),
                        Style::default().bold().fg(severity_color(bucket)),
                    ),
                    Span::raw(format!("{arrow} {word}")),
                ]));
                lines.push(Line::from(vec![
                    Span::styled(bucket.to_string(), Style::default().fg(severity_color(bucket))),
                    Span::raw(format!("  ·  {} — {}", layer.label(), MONTHS[sel.month_index])),
                ]));
                lines.push(Line::from(record.recommendation.clone()));
            }
        }
    }

    if let Some(err) = stale_error {
        lines.push(Line::from(Span::styled(
            format!("showing last loaded data — refetch failed: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let title = match &sel.area {
        Some(area) => format!(" Analysis: {area} "),
        None => " Analysis ".to_string(),
    };
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(card, area);
}

fn draw_chart(f: &mut Frame, area: Rect, app: &App) {
    let sel = app.selection();
    let series = app.series();

    if series.is_empty() {
        let empty = Paragraph::new("no active layer")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Monthly "));
        f.render_widget(empty, area);
        return;
    }

    let points: Vec<(f64, f64)> = series.iter().map(|p| (p.index as f64, p.value)).collect();
    let current: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, _)| *x as usize == sel.month_index)
        .collect();

    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.1).max(0.1);
    let (lo, hi) = (min - pad, max + pad);

    let color = match sel.layer {
        Some(Indicator::Vegetation) => Color::Green,
        Some(Indicator::HeatIsland) => Color::Red,
        Some(Indicator::AerosolDepth) => Color::Blue,
        _ => Color::Magenta,
    };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(Color::White))
            .data(&current),
    ];

    let unit_label = sel
        .layer
        .map(|l| l.unit(sel.unit))
        .filter(|u| !u.is_empty())
        .map(|u| format!(" ({u})"))
        .unwrap_or_default();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Monthly{unit_label} ")),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, 11.0])
                .labels(["Jan", "Jun", "Dec"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels([format!("{lo:.1}"), format!("{hi:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(chart, area);
}

fn draw_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let sel = app.selection();
    let window = series::sparkline_window(app.series(), sel.month_index);

    if window.is_empty() {
        f.render_widget(
            Block::default().borders(Borders::ALL).title(" Trend "),
            area,
        );
        return;
    }

    // Scale the window into sparkline bars; a flat window renders mid-height.
    let min = window.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = window
        .iter()
        .map(|p| p.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let bars: Vec<u64> = window
        .iter()
        .map(|p| {
            if span.abs() < 1e-12 {
                50
            } else {
                ((p.value - min) / span * 100.0) as u64
            }
        })
        .collect();

    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Trend — last {} month{} ",
            window.len(),
            if window.len() == 1 { "" } else { "s" }
        )))
        .style(Style::default().fg(Color::Cyan))
        .data(bars);

    f.render_widget(sparkline, area);
}

// ---------------------------------------------------------------------------
// Right: scenario planning panel
// ---------------------------------------------------------------------------

fn draw_scenario(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Scenario Planning ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // slider 1
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1), // spacer
            Constraint::Min(5),    // impacts
        ])
        .split(inner);

    let input = app.scenario();
    for (i, slider) in ActiveSlider::ALL.iter().enumerate() {
        draw_slider(f, parts[i], app, *slider, input);
    }

    draw_impacts(f, parts[5], app);
}

fn draw_slider(
    f: &mut Frame,
    area: Rect,
    app: &App,
    slider: ActiveSlider,
    input: &urbanlens_core::scenario::ScenarioInput,
) {
    if area.height < 2 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let is_active = app.active_slider() == slider;
    let label_style = if is_active {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if is_active { "▸ " } else { "  " };

    let label = Paragraph::new(Line::from(vec![
        Span::styled(format!("{marker}{}", slider.label()), label_style),
        Span::styled(
            format!("  {}", slider.format_value(input)),
            Style::default().fg(Color::Green).bold(),
        ),
    ]));
    f.render_widget(label, rows[0]);

    let range = slider.range();
    let ratio = ((slider.value(input) - range.min) / (range.max - range.min)).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .ratio(ratio)
        .label("");
    f.render_widget(gauge, rows[1]);
}

fn draw_impacts(f: &mut Frame, area: Rect, app: &App) {
    let unit = app.selection().unit;
    let impact = app.impact();

    let lines = vec![
        Line::from(Span::styled("Projected impact", Style::default().bold())),
        Line::from(format!(
            "Temperature   -{:.1}{}",
            impact.temperature_reduction_in(unit),
            unit.suffix()
        )),
        Line::from(format!("PM2.5 / AOD   -{:.1}%", impact.pm25_reduction_pct)),
        Line::from(format!("Comfort       +{:.0} pts", impact.comfort_gain_points)),
        Line::from(format!(
            "Health risk   -{:.1}%",
            impact.health_risk_reduction_pct
        )),
        Line::from(format!(
            "Green space    {:.1} m²/person",
            impact.per_capita_green_space_m2
        )),
    ];

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

// ---------------------------------------------------------------------------
// Bottom: key bar
// ---------------------------------------------------------------------------

fn draw_keys(f: &mut Frame, area: Rect) {
    let keys = Paragraph::new(
        " ↑↓ layer  space: activate  tab: district  m: month  u: unit  s/+/-: sliders  [ ]: panel  r: reset  l: reload  q: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(keys, area);
}
