use anyhow::{Context, Result};

use urbanlens_core::fixtures;
use urbanlens_core::predict::NdviEffect;

use crate::api::ApiClient;

pub fn run(district: &str, ndvi_delta_pct: f64, api: Option<&str>, offline: bool) -> Result<()> {
    let effect: NdviEffect = if offline {
        urbanlens_core::predict_for(&fixtures::sample_readings(), district, ndvi_delta_pct)
            .context("prediction failed")?
    } else {
        ApiClient::new(api)
            .predict(district, ndvi_delta_pct)
            .context("prediction request failed")?
    };

    println!("\nNDVI effect — {}", effect.district);
    println!("{}", "-".repeat(48));
    println!(
        "NDVI       {:.3} → {:.3}  ({:+.1}%)",
        effect.ndvi_from, effect.ndvi_to, effect.ndvi_delta_pct
    );
    println!(
        "Heat (UHI) {:.2}°C → {:.2}°C  ({:+.2}%)",
        effect.baseline_heat_c, effect.scenario_heat_c, effect.d_lst_pct
    );
    println!(
        "Air        {:.1} → {:.1}  ({:+.2}%)",
        effect.baseline_air, effect.scenario_air, effect.d_aod_pct
    );
    println!("\n{}", effect.explanation);
    Ok(())
}
