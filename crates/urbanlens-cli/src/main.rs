//! CLI for urbanlens — urban environmental analytics from the terminal.

mod api;
mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "urbanlens")]
#[command(about = "urbanlens — urban environmental indicator analytics")]
#[command(version = urbanlens_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive analysis dashboard (TUI)
    Dashboard {
        /// API base URL (overrides $URBANLENS_API_URL)
        #[arg(long)]
        api: Option<String>,

        /// Use the embedded sample dataset instead of a server
        #[arg(long)]
        offline: bool,
    },

    /// District hotspot table: readings, severity, recommendations
    Hotspots {
        /// API base URL (overrides $URBANLENS_API_URL)
        #[arg(long)]
        api: Option<String>,

        /// Use the embedded sample dataset instead of a server
        #[arg(long)]
        offline: bool,

        /// Temperature unit for displayed values
        #[arg(long, default_value = "c", value_parser = ["c", "f", "k"])]
        unit: String,

        /// Write records as JSON to a path
        #[arg(long)]
        output: Option<String>,
    },

    /// Priority ranking with hybrid entropy+PCA weights
    Priority {
        /// API base URL (overrides $URBANLENS_API_URL)
        #[arg(long)]
        api: Option<String>,

        /// Use the embedded sample dataset instead of a server
        #[arg(long)]
        offline: bool,

        /// Write the report as JSON to a path
        #[arg(long)]
        output: Option<String>,
    },

    /// Predict LST/AOD change for one district from an NDVI change
    Predict {
        /// District name
        #[arg(long)]
        district: String,

        /// NDVI change, percent
        #[arg(long, default_value = "10.0")]
        ndvi_delta_pct: f64,

        /// API base URL (overrides $URBANLENS_API_URL)
        #[arg(long)]
        api: Option<String>,

        /// Compute locally on the embedded sample dataset
        #[arg(long)]
        offline: bool,
    },

    /// Project scenario impacts from the what-if sliders
    Scenario {
        /// Vegetation (NDVI) increase, percent (5-50)
        #[arg(long, default_value = "10.0")]
        vegetation: f64,

        /// Heat reduction, °C (0.5-10)
        #[arg(long, default_value = "2.0")]
        heat: f64,

        /// PM2.5 reduction, µg/m³ (5-50)
        #[arg(long, default_value = "15.0")]
        air: f64,

        /// Population change, percent (-20 to 30)
        #[arg(long, default_value = "5.0")]
        population: f64,

        /// Temperature unit for the displayed reduction
        #[arg(long, default_value = "c", value_parser = ["c", "f", "k"])]
        unit: String,
    },

    /// Start the HTTP district data server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8040")]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dashboard { api, offline } => commands::dashboard::run(api.as_deref(), offline),
        Commands::Hotspots {
            api,
            offline,
            unit,
            output,
        } => commands::hotspots::run(api.as_deref(), offline, &unit, output.as_deref()),
        Commands::Priority {
            api,
            offline,
            output,
        } => commands::priority::run(api.as_deref(), offline, output.as_deref()),
        Commands::Predict {
            district,
            ndvi_delta_pct,
            api,
            offline,
        } => commands::predict::run(&district, ndvi_delta_pct, api.as_deref(), offline),
        Commands::Scenario {
            vegetation,
            heat,
            air,
            population,
            unit,
        } => commands::scenario::run(vegetation, heat, air, population, &unit),
        Commands::Serve { port, host } => commands::serve::run(&host, port),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
