//! BattleBit TTK - Entry Point
//!
//! Sweeps a preset arsenal across a distance range and prints time-to-kill
//! tables, one per damage type.

use battlebit_ttk::analysis::{linspace, sweep, ttk_title, WeaponCurve};
use battlebit_ttk::arsenal::{default_roster, ArsenalPreset, Roster};
use battlebit_ttk::core::error::{Result, TtkError};
use battlebit_ttk::core::types::DamageType;
use battlebit_ttk::core::AnalysisConfig;
use battlebit_ttk::falloff::{BezierCache, ModelKind};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Time-to-kill tables for BattleBit weapons
#[derive(Parser, Debug)]
#[command(name = "battlebit-ttk")]
#[command(about = "Generate time-to-kill tables for the given weapons and damage types")]
struct Args {
    /// Arsenal to draw weapons from: naked, ttk_dat, hb_lb_dat or barrel_compare
    preset: ArsenalPreset,

    /// Weapon or category names (e.g. AK74 SMG)
    #[arg(required = true)]
    weapons: Vec<String>,

    /// Damage type to tabulate; repeat for several (body, armor)
    #[arg(long = "damage-type")]
    damage_types: Vec<DamageType>,

    /// Distance range in metres
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    range: Option<Vec<f64>>,

    /// Number of distances sampled across the range
    #[arg(long)]
    num_points: Option<usize>,

    /// Add aim-down-sight time to every TTK
    #[arg(long)]
    include_aim_time: bool,

    /// Falloff model: linear, cubic or bezier
    #[arg(long)]
    model: Option<ModelKind>,

    /// Bezier control point offset
    #[arg(long)]
    offset: Option<f64>,

    /// Target health
    #[arg(long)]
    health: Option<f64>,

    /// TOML analysis config; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Weapon roster TOML (defaults to the built-in roster)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Directory to write the tables to instead of stdout
    #[arg(long)]
    save: Option<PathBuf>,

    /// Custom table name used in place of the weapon list
    #[arg(long)]
    fig_name: Option<String>,
}

impl Args {
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };
        if !self.damage_types.is_empty() {
            config.damage_types = self.damage_types.clone();
        }
        if let Some(range) = &self.range {
            config.range = (range[0], range[1]);
        }
        if let Some(n) = self.num_points {
            config.num_points = n;
        }
        if self.include_aim_time {
            config.include_aim_time = true;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(offset) = self.offset {
            config.bezier_offset = offset;
        }
        if let Some(health) = self.health {
            config.health = health;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("battlebit_ttk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.format != "text" && args.format != "json" {
        return Err(TtkError::InvalidConfig(format!(
            "unknown output format '{}' (expected text or json)",
            args.format
        )));
    }

    let config = args.analysis_config()?;
    let roster = match &args.roster {
        Some(path) => Roster::load(path)?,
        None => default_roster()?,
    };
    let arsenal = args.preset.build(&roster)?;
    let (weapons, names) = arsenal.select(&args.weapons);
    if weapons.is_empty() {
        return Err(TtkError::UnknownWeapon(args.weapons.join(" ")));
    }

    let cache = Arc::new(BezierCache::new());
    let engine = config.engine(&cache)?;
    let distances = linspace(config.range.0, config.range.1, config.num_points);
    tracing::info!(
        "{} weapons, {} model, {} distances from {} m to {} m",
        weapons.len(),
        config.model,
        distances.len(),
        config.range.0,
        config.range.1
    );

    for &damage_type in &config.damage_types {
        let curves = sweep(&engine, &weapons, damage_type, &distances)?;
        let title = ttk_title(&names, damage_type, args.fig_name.as_deref(), config.include_aim_time);
        let body = match args.format.as_str() {
            "json" => serde_json::to_string_pretty(&curves)?,
            _ => render_table(&title, &distances, &curves),
        };

        match &args.save {
            Some(dir) => save(dir, &title, &args.format, &body)?,
            None => println!("{}", body),
        }
    }

    Ok(())
}

fn render_table(title: &str, distances: &[f64], curves: &[WeaponCurve]) -> String {
    let mut out = format!("{}\n", title);
    out.push_str(&format!("{:>10}", "dist (m)"));
    for curve in curves {
        out.push_str(&format!(" {:>14}", curve.weapon));
    }
    out.push('\n');

    for (i, d) in distances.iter().enumerate() {
        out.push_str(&format!("{:>10.1}", d));
        for curve in curves {
            let sample = &curve.samples[i];
            out.push_str(&format!(" {:>9.1} ({:>2})", sample.ttk_ms, sample.btk));
        }
        out.push('\n');
    }
    out
}

fn save(dir: &Path, title: &str, format: &str, body: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let extension = if format == "json" { "json" } else { "txt" };
    let path = dir.join(format!("{}.{}", title, extension));
    std::fs::write(&path, body)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
