//! List command

use crate::config::NoiseConfig;
use crate::ListArgs;
use anyhow::Result;
use grain_core::{NoiseType, PRESET_NAMES};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ListArgs, verbose: u8) -> Result<()> {
    trace!(template = ?args.template, "list::run");

    if let Some(noise_type) = args.template {
        print!("{}", NoiseConfig::complete(noise_type).to_yaml()?);
        return Ok(());
    }

    for name in PRESET_NAMES {
        if verbose > 0 {
            let noise_type: NoiseType = name.parse()?;
            println!("{name:<28} {noise_type}");
        } else {
            println!("{name}");
        }
    }
    Ok(())
}
