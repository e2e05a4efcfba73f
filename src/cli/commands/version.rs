use anyhow::Result;
use clap::Args;

use crate::{PKG_DESCRIPTION, PKG_NAME, VERSION};

#[derive(Args)]
pub struct VersionArgs {
    /// Show detailed version information
    #[arg(long = "detailed")]
    pub detailed: bool,
}

pub async fn execute(args: VersionArgs) -> Result<()> {
    println!("{PKG_NAME} {VERSION}");

    if args.detailed {
        println!("Rust Edition: 2024");
        println!("Description: {PKG_DESCRIPTION}");
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Worker threads available: {}", num_cpus::get());
        println!(
            "Profile: {}",
            if cfg!(debug_assertions) { "debug" } else { "release" }
        );
    }
    Ok(())
}
