//! Uwg command: adjust a rural EPW file for an urban neighbourhood.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use canopy_uwg::Uwg;

use crate::cli::UwgArgs;
use crate::config::{self, UwgToml};
use crate::convert;

/// Run the generate → simulate → write pipeline.
pub fn run(args: UwgArgs) -> Result<()> {
    let _cmd = info_span!("uwg").entered();

    // 1. Supplemental parameters from the optional TOML file
    let uwg_toml = match args.config {
        Some(ref path) => config::load(path)?,
        None => UwgToml::default(),
    };

    // 2. Build and validate the simulation config
    let cfg = convert::build_uwg_config(&args, &uwg_toml.parameters)
        .context("invalid urban weather parameters")?;
    let uwg = Uwg::new(cfg).context("invalid urban weather parameters")?;

    // 3. Run the phases
    let generated = uwg.generate().with_context(|| {
        format!("failed to generate model from {}", args.epw_path.display())
    })?;
    let simulated = generated
        .simulate()
        .context("failed to simulate urban weather")?;
    let output = simulated.config().output_path();
    let written = simulated
        .write()
        .with_context(|| format!("failed to write urban EPW: {}", output.display()))?;

    info!(path = %written.output_path().display(), "done");
    println!("{}", written.output_path().display());
    Ok(())
}
