// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use eink_specs::{displays, DisplaySpec, Orientation};
use school_menu::{DeviceConfig, SchoolMenuPlugin, Settings};

#[derive(Parser, Debug)]
#[command(name = "menu-preview")]
#[command(about = "Render the school lunch menu to a PNG", long_about = None)]
#[command(version)]
struct Cli {
    /// Panel model key, see --list-displays
    #[arg(long, default_value = "inky_impression_7_3")]
    display: String,
    /// Settings form as a JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Override one settings key, e.g. --set numDays=1 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
    /// Render date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Render time (HH:MM); defaults to now
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,
    /// Panel mounted in portrait
    #[arg(long)]
    vertical: bool,
    /// Output PNG path
    #[arg(long, short, default_value = "menu.png")]
    output: PathBuf,
    /// Print the known panels and exit
    #[arg(long)]
    list_displays: bool,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM: {e}"))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.list_displays {
        print_displays();
        return Ok(());
    }
    run(&cli)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_displays() {
    println!("{:<24} {:>10}  {:<14} name", "model", "resolution", "colour");
    for spec in displays::ALL {
        println!(
            "{:<24} {:>10}  {:<14} {}",
            spec.model,
            format!("{}x{}", spec.width, spec.height),
            if spec.supports_color() { "colour" } else { "monochrome" },
            spec.name
        );
    }
}

fn run(cli: &Cli) -> Result<()> {
    let spec = lookup_display(&cli.display)?;
    let settings = load_settings(cli.settings.as_deref(), &cli.overrides)?;
    let now = render_time(cli.date, cli.time);
    let orientation = if cli.vertical {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let device = DeviceConfig::from_spec(spec, orientation);

    tracing::info!(display = spec.model, %now, ?orientation, "rendering preview");
    let image = SchoolMenuPlugin::new()
        .generate_image(&settings, &device, now)
        .context("failed to generate menu image")?;
    image
        .save_png(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!(
        "Wrote {}x{} preview to {}",
        image.width(),
        image.height(),
        cli.output.display()
    );
    Ok(())
}

fn lookup_display(model: &str) -> Result<&'static DisplaySpec> {
    match displays::by_model(model) {
        Some(spec) => Ok(spec),
        None => bail!("unknown display '{model}', run with --list-displays"),
    }
}

fn load_settings(path: Option<&Path>, overrides: &[String]) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Settings::from_json(&json)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => Settings::default(),
    };
    for entry in overrides {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("override '{entry}' is not KEY=VALUE");
        };
        if !settings.set(key.trim(), value) {
            bail!("unknown settings key '{}'", key.trim());
        }
    }
    Ok(settings)
}

fn render_time(date: Option<NaiveDate>, time: Option<NaiveTime>) -> NaiveDateTime {
    let local = Local::now().naive_local();
    NaiveDateTime::new(date.unwrap_or(local.date()), time.unwrap_or(local.time()))
}
