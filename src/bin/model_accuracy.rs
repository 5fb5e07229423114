//! Model accuracy report
//!
//! Compares a falloff model's body damage against the measured samples for
//! every matching weapon in the `ttk_dat` arsenal.

use battlebit_ttk::analysis::{compare, measured_samples, validated};
use battlebit_ttk::arsenal::{default_roster, ArsenalPreset};
use battlebit_ttk::core::error::Result;
use battlebit_ttk::damage::DamageEngine;
use battlebit_ttk::falloff::{BezierCache, FalloffModel, ModelKind, DEFAULT_OFFSET};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "model_accuracy")]
#[command(about = "Report how closely a falloff model matches measured damage")]
struct Args {
    /// Falloff model: linear, cubic or bezier
    #[arg(long, default_value = "cubic")]
    model: ModelKind,

    /// Bezier control point offset
    #[arg(long, default_value_t = DEFAULT_OFFSET)]
    offset: f64,

    /// Print every distance, not just the worst error
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("battlebit_ttk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let model = FalloffModel::from_kind(args.model, args.offset, Arc::new(BezierCache::new()))?;
    let engine = DamageEngine::new(model);
    let arsenal = ArsenalPreset::TtkDat.build(&default_roster()?)?;
    let samples = validated(measured_samples())?;

    for accuracy in compare(&engine, &samples, arsenal.weapons())? {
        println!(
            "{:<10} max error {:>6.2}%",
            accuracy.weapon,
            accuracy.max_percent_error()
        );
        if args.verbose {
            let errors = accuracy.percent_errors();
            for (i, d) in accuracy.distances.iter().enumerate() {
                println!(
                    "  {:>5.0} m  measured {:>6.2}  model {:>6.2}  ({:.2}%)",
                    d, accuracy.measured[i], accuracy.modelled[i], errors[i]
                );
            }
        }
    }
    Ok(())
}
