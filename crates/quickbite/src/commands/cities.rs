use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quickbite_loader::{restaurants_from_path, RESTAURANTS_FILE};

#[derive(Args, Debug, Default)]
pub struct CitiesArgs {
    /// Directory holding the input CSV tables
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

pub fn run(args: CitiesArgs) -> Result<()> {
    let path = args.data_dir.join(RESTAURANTS_FILE);
    let restaurants = restaurants_from_path(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let column = restaurants.column("city")?.str()?;
    let cities: BTreeSet<&str> = column.into_iter().flatten().collect();

    for city in cities {
        println!("{city}");
    }
    Ok(())
}
