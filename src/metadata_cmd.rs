//! Metadata command: print the location header of an EPW file.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use canopy_epw::{MetadataValue, read_metadata};

use crate::cli::{MetadataArgs, OutputFormat};

/// Read the metadata and print it in the requested layout.
pub fn run(args: MetadataArgs) -> Result<()> {
    let _cmd = info_span!("metadata").entered();

    let meta = read_metadata(&args.epw_path).with_context(|| {
        format!("failed to read EPW metadata: {}", args.epw_path.display())
    })?;
    debug!(city = %meta.city, wmo = %meta.wmo_code, "metadata parsed");

    println!("{}", render(&meta.to_map(), args.format)?);
    Ok(())
}

/// Formats the metadata mapping as a `key: value` table or pretty JSON.
fn render(map: &BTreeMap<String, MetadataValue>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(map
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(map).context("failed to serialise metadata")
        }
    }
}
