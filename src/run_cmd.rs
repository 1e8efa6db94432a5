use anyhow::{Context, Result};
use tracing::info;

use dedi_index::{NetcdfFluxSource, NetcdfIndexSink, run_index};

use crate::cli::RunArgs;
use crate::config::DediConfig;
use crate::convert;

/// Run the full index pipeline over the configured years.
pub fn run(args: RunArgs) -> Result<()> {
    let config = DediConfig::load(&args.config)?;

    let years = convert::build_year_range(&config.years, args.start_year, args.end_year)?;
    let layout = convert::build_layout(&config.paths, args.output.as_deref())?;
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
    info!(
        %years,
        n_lat = grid.n_lat(),
        n_lon = grid.n_lon(),
        output = %layout.output_dir().display(),
        "starting index run"
    );

    let mut sink = NetcdfIndexSink::new(layout, grid.clone(), writer_cfg);
    let summary = run_index(years, &source, &grid, &mut sink).context("index run failed")?;

    info!(
        years = %summary.years,
        reference = %summary.reference,
        n_leap = summary.n_leap,
        "done"
    );
    Ok(())
}
