//! Kill-change report
//!
//! Prints, for every weapon in the naked arsenal, whether fitting the given
//! barrel changes the number of body shots needed at point blank. Choosing
//! HeavyBarrel fits a Ranger on the rifles that don't take a heavy barrel.

use battlebit_ttk::analysis::{btk_changes, BarrelUpgrade};
use battlebit_ttk::arsenal::{default_roster, ArsenalPreset};
use battlebit_ttk::core::error::Result;
use battlebit_ttk::damage::DamageEngine;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kill_change")]
#[command(about = "Determine if an attachment changes the bullets needed to kill a target")]
struct Args {
    /// HeavyBarrel or LongBarrel
    attachment: BarrelUpgrade,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("battlebit_ttk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let arsenal = ArsenalPreset::Naked.build(&default_roster()?)?;
    let report = btk_changes(&DamageEngine::default(), args.attachment, arsenal.weapons())?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
