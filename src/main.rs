//! Demo harness for the engine: CLI wiring and config-driven dataset build.
//!
//! The library's interface is the plain data returned by
//! [`DashboardEngine`]; this binary and its text, JSON and CSV output are
//! one consumer of it, not part of that contract.

use std::path::{Path, PathBuf};
use std::process;

use city_demand_sim::aggregate::BucketKey;
use city_demand_sim::config::DashboardConfig;
use city_demand_sim::dashboard::{CityDataset, DashboardEngine};
use city_demand_sim::forecast::ForecastModel;
use city_demand_sim::io::export::{export_demand_csv, export_forecast_csv, export_weather_csv};
use city_demand_sim::telemetry;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    city: Option<String>,
    model: Option<String>,
    seed_override: Option<u64>,
    export_dir: Option<String>,
    json: bool,
}

fn print_help() {
    eprintln!("city-demand-sim: synthetic city electricity analytics");
    eprintln!();
    eprintln!("Usage: city-demand-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load configuration from a TOML file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        DashboardConfig::PRESETS.join(", ")
    );
    eprintln!("  --city <id>              Override the selected city (e.g. nyc, chi, la)");
    eprintln!("  --model <name>           Override the reported forecast model");
    eprintln!("  --seed <u64>             Override the master random seed");
    eprintln!("  --export-dir <path>      Write demand, weather and forecast CSVs here");
    eprintln!("  --json                   Print the dataset and summaries as JSON");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the default preset is used.");
}

fn required_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        city: None,
        model: None,
        seed_override: None,
        export_dir: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(required_value(&args, i, "--scenario", "a path argument"));
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(required_value(&args, i, "--preset", "a name argument"));
            }
            "--city" => {
                i += 1;
                cli.city = Some(required_value(&args, i, "--city", "a city id"));
            }
            "--model" => {
                i += 1;
                cli.model = Some(required_value(&args, i, "--model", "a model name"));
            }
            "--seed" => {
                i += 1;
                let raw = required_value(&args, i, "--seed", "a u64 argument");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--export-dir" => {
                i += 1;
                cli.export_dir = Some(required_value(&args, i, "--export-dir", "a path argument"));
            }
            "--json" => {
                cli.json = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Loads the configuration: `--scenario` takes priority, then `--preset`,
/// then the default preset. CLI overrides are applied last.
fn load_config(cli: &CliArgs) -> DashboardConfig {
    let loaded = if let Some(ref path) = cli.scenario_path {
        DashboardConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        DashboardConfig::from_preset(name)
    } else {
        Ok(DashboardConfig::default_preset())
    };

    let mut cfg = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(ref city) = cli.city {
        cfg.dashboard.city = city.clone();
    }
    if let Some(ref model) = cli.model {
        cfg.forecast.model = model.clone();
    }
    if let Some(seed) = cli.seed_override {
        cfg.dashboard.seed = Some(seed);
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

fn print_report(data: &CityDataset, model: ForecastModel) {
    println!("City: {} ({})", data.city.display_name(), data.city.id);

    println!("\nDaily demand (kWh):");
    for p in data.daily_demand() {
        if let BucketKey::Day(ref day) = p.bucket_key {
            println!("  {day:<12} {:>9.2}", p.mean_value);
        }
    }

    println!("\nHourly demand profile (kWh):");
    for p in data.hourly_demand() {
        if let BucketKey::Hour(hour) = p.bucket_key {
            println!("  {hour:02}:00 {:>9.2}", p.mean_value);
        }
    }

    println!("\nForecast metrics ({}): {}", model.label(), data.metrics(model));

    println!("\nModel comparison:");
    for row in data.comparison() {
        println!("  {:<22} {}", row.model.label(), row.metrics);
    }

    println!("\nClusters:");
    for s in data.cluster_stats() {
        println!(
            "  #{} points={} demand={:.2} kWh temp={:.1} F humidity={:.1}%",
            s.label, s.count, s.mean_demand_kwh, s.mean_temperature_f, s.mean_humidity_pct
        );
    }
}

fn print_json(data: &CityDataset, model: ForecastModel) {
    let report = serde_json::json!({
        "dataset": data,
        "dailyDemand": data.daily_demand(),
        "hourlyDemand": data.hourly_demand(),
        "model": model,
        "metrics": data.metrics(model),
        "comparison": data.comparison(),
        "errorSeries": data.error_series(model),
        "clusterStats": data.cluster_stats(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("error: failed to serialize report: {e}");
            process::exit(1);
        }
    }
}

fn export_all(data: &CityDataset, dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file = |kind: &str| -> PathBuf { dir.join(format!("{}_{kind}.csv", data.city.id)) };
    export_demand_csv(&data.demand, &file("demand"))?;
    export_weather_csv(&data.weather, &file("weather"))?;
    export_forecast_csv(&data.forecasts, &file("forecast"))?;
    Ok(())
}

fn main() {
    let cli = parse_args();
    let cfg = load_config(&cli);
    telemetry::init_tracing(cfg.logging.json);

    let model = cfg.model().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let data = DashboardEngine::from_config(&cfg)
        .load(&cfg.dashboard.city)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });

    if cli.json {
        print_json(&data, model);
    } else {
        print_report(&data, model);
    }

    if let Some(ref dir) = cli.export_dir {
        if let Err(e) = export_all(&data, Path::new(dir)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("CSV files written to {dir}");
    }
}
