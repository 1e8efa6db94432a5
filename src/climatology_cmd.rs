use anyhow::{Context, Result};
use tracing::info;

use dedi_index::{NetcdfFluxSource, export_climatology, run_climatology};

use crate::cli::ClimatologyArgs;
use crate::config::DediConfig;
use crate::convert;

/// Compute the reference climatology and write it to a single file.
pub fn run(args: ClimatologyArgs) -> Result<()> {
    let config = DediConfig::load(&args.config)?;

    let years = convert::build_year_range(&config.years, None, None)?;
    let mut layout = convert::build_layout(&config.paths, None)?;
    if let Some(ref file) = args.output {
        layout = convert::with_climatology_target(layout, file)?;
    }
    let reader_cfg = convert::build_reader_config(&config.variables);
    let writer_cfg = convert::build_writer_config(&config.output)?;

    std::fs::create_dir_all(layout.output_dir()).with_context(|| {
        format!(
            "failed to create output directory: {}",
            layout.output_dir().display()
        )
    })?;

    let source = NetcdfFluxSource::new(layout.clone(), reader_cfg);
    let grid = source
        .read_grid(years.start())
        .context("failed to read grid coordinates")?;
    info!(%years, "building climatology");

    let clim = run_climatology(years, &source, &grid).context("climatology failed")?;
    export_climatology(&clim, &layout, &grid, &writer_cfg).with_context(|| {
        format!(
            "failed to write climatology: {}",
            layout.climatology_path().display()
        )
    })?;

    info!(path = %layout.climatology_path().display(), "done");
    Ok(())
}
