use anyhow::{Context, Result};

use urbanlens_core::fixtures;

pub fn run(host: &str, port: u16) -> Result<()> {
    let readings = fixtures::sample_readings();
    let city = fixtures::SAMPLE_CITY.to_string();
    let base = format!("http://{host}:{port}");

    println!("🌇 Urbanlens Server v{}", urbanlens_core::VERSION);
    println!("   {base}");
    println!("   {} districts — {}", readings.len(), city);
    println!();
    println!("   Endpoints:");
    println!("     GET  /                             API index (try: curl {base})");
    println!("     GET  /api/hotspots                 District hotspot records");
    println!("     GET  /api/priority_auto            Priority ranking");
    println!("     GET  /geojson                      Boundary features with metrics");
    println!("     POST /predict/ndvi_effect_formula  Per-district NDVI-effect prediction");
    println!("     GET  /predict/all                  Predictions for every district");
    println!("     GET  /health                       Dataset health check");
    println!();
    println!("   Examples:");
    println!("     curl {base}/api/hotspots");
    println!(
        "     curl -X POST -H 'Content-Type: application/json' \\\n          -d '{{\"district\":\"Downtown Core\",\"ndvi_delta_pct\":10}}' {base}/predict/ndvi_effect_formula"
    );
    println!();

    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    rt.block_on(urbanlens_server::run_server(city, readings, host, port));
    Ok(())
}
