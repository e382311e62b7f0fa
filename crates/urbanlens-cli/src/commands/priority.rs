use anyhow::{Context, Result};

pub fn run(api: Option<&str>, offline: bool, output: Option<&str>) -> Result<()> {
    let provider = super::make_provider(api, offline);
    let report = provider
        .fetch_priority()
        .context("failed to fetch priority ranking")?;

    if let Some(path) = output {
        return super::write_json(path, &report);
    }

    let w = report.weights.combined;
    println!("\n{}", "=".repeat(60));
    println!("INTERVENTION PRIORITY — {}", report.city);
    println!("{}", "=".repeat(60));
    println!(
        "Weights: lack-of-tree {:.3} | air {:.3} | heat {:.3}",
        w.lack_tree, w.air, w.heat
    );
    println!("City mean priority: {:.3}", report.mean_priority);
    println!("\n{:<6} {:<22} {:>9}", "Rank", "District", "Priority");
    println!("{}", "-".repeat(40));
    for d in &report.districts {
        println!("{:<6} {:<22} {:>9.3}", d.rank, d.district, d.priority);
    }
    println!();
    Ok(())
}
