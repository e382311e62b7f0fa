use anyhow::{Context, Result};

use urbanlens_core::indicator::Indicator;
use urbanlens_core::severity::{self, Severity};
use urbanlens_core::units;

pub fn run(api: Option<&str>, offline: bool, unit: &str, output: Option<&str>) -> Result<()> {
    let unit = super::parse_unit(unit);
    let provider = super::make_provider(api, offline);
    let hotspots = provider
        .fetch_hotspots()
        .context("failed to fetch hotspots")?;

    if let Some(path) = output {
        return super::write_json(path, &hotspots);
    }

    println!("\n{}", "=".repeat(86));
    println!("DISTRICT HOTSPOTS — {}", provider.city());
    println!("{}", "=".repeat(86));
    println!(
        "{:<20} {:>6} {:>9} {:>6} {:>9} {:>8}  {}",
        "District", "NDVI", "UHI", "Air", "Pop", "Concern", "Recommendation"
    );
    println!("{}", "-".repeat(86));

    for record in &hotspots {
        let r = &record.reading;
        let concern = worst_concern(record);
        println!(
            "{:<20} {:>6.2} {:>9} {:>6.0} {:>9.0} {:>8}  {}",
            r.district,
            r.vegetation,
            units::format_temperature(r.heat_island_c, unit),
            r.air_quality,
            r.population,
            badge(concern),
            record.recommendation,
        );
    }
    println!();
    Ok(())
}

/// The worst severity bucket across the three classified indicators.
fn worst_concern(record: &urbanlens_core::hotspot::HotspotRecord) -> Severity {
    let r = &record.reading;
    [
        severity::classify(Indicator::Vegetation, r.vegetation),
        severity::classify(Indicator::HeatIsland, r.heat_island_c),
        severity::classify(Indicator::AerosolDepth, r.air_quality),
    ]
    .into_iter()
    .max_by_key(|s| match s {
        Severity::Low => 0,
        Severity::Medium => 1,
        Severity::High => 2,
    })
    .unwrap_or(Severity::Low)
}

fn badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "HIGH",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urbanlens_core::compute_hotspots;
    use urbanlens_core::fixtures;

    #[test]
    fn worst_concern_takes_the_maximum() {
        let records = compute_hotspots(&fixtures::sample_readings());
        let port = records
            .iter()
            .find(|r| r.reading.district == "Port District")
            .unwrap();
        assert_eq!(worst_concern(port), Severity::High);
        let strip = records
            .iter()
            .find(|r| r.reading.district == "Commercial Strip")
            .unwrap();
        assert_eq!(worst_concern(strip), Severity::Medium);
    }
}
