use anyhow::{Context, Result};

use urbanlens_core::scenario::ScenarioInput;

pub fn run(vegetation: f64, heat: f64, air: f64, population: f64, unit: &str) -> Result<()> {
    let unit = super::parse_unit(unit);
    let input = ScenarioInput {
        vegetation_increase_pct: vegetation,
        heat_reduction_c: heat,
        air_quality_reduction_ug: air,
        population_change_pct: population,
    };
    let impact = urbanlens_core::project(&input).context("scenario rejected")?;

    println!("\nScenario impact");
    println!("{}", "-".repeat(48));
    println!(
        "Temperature reduction     -{:.1}{}",
        impact.temperature_reduction_in(unit),
        unit.suffix()
    );
    println!(
        "PM2.5 / AOD reduction     -{:.1}%",
        impact.pm25_reduction_pct
    );
    println!(
        "Comfort index gain        +{:.0} points",
        impact.comfort_gain_points
    );
    println!(
        "Health risk reduction     -{:.1}%",
        impact.health_risk_reduction_pct
    );
    println!(
        "Per-capita green space     {:.1} m²",
        impact.per_capita_green_space_m2
    );
    println!();
    Ok(())
}
