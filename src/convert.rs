//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use dedi_calendar::YearRange;
use dedi_index::REFERENCE_YEARS;
use dedi_io::{FileLayout, ReaderConfig, WriterConfig};

use crate::config::{OutputToml, PathsToml, VariablesToml, YearsToml};

/// Builds the study period, applying CLI overrides.
///
/// The range must cover at least the reference window.
pub fn build_year_range(
    years: &YearsToml,
    start: Option<i32>,
    end: Option<i32>,
) -> Result<YearRange> {
    let range = YearRange::new(start.unwrap_or(years.start), end.unwrap_or(years.end))
        .context("invalid year range")?;
    range
        .reference_window(REFERENCE_YEARS)
        .with_context(|| format!("year range {range} is shorter than the reference window"))?;
    Ok(range)
}

/// Builds a [`FileLayout`] from the TOML paths, with an optional output
/// directory override.
pub fn build_layout(paths: &PathsToml, output_dir: Option<&Path>) -> Result<FileLayout> {
    let dir = output_dir.map_or_else(|| paths.output_dir.clone(), Path::to_path_buf);
    let mut layout = FileLayout::new(&paths.aet_dir, &paths.pet_dir, dir);
    if let Some(ref t) = paths.aet_template {
        layout = layout.with_aet_template(t);
    }
    if let Some(ref t) = paths.pet_template {
        layout = layout.with_pet_template(t);
    }
    if let Some(ref t) = paths.output_template {
        layout = layout.with_output_template(t);
    }
    if let Some(ref f) = paths.climatology_file {
        layout = layout.with_climatology_file(f);
    }
    layout.validate().context("invalid [paths] configuration")?;
    Ok(layout)
}

/// Points the layout's climatology path at `file`.
pub fn with_climatology_target(layout: FileLayout, file: &Path) -> Result<FileLayout> {
    let Some(name) = file.file_name() else {
        bail!("climatology output must name a file: {}", file.display());
    };
    let dir = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(layout
        .with_output_dir(dir)
        .with_climatology_file(name.to_string_lossy()))
}

/// Builds a [`ReaderConfig`] from the TOML variable names.
pub fn build_reader_config(vars: &VariablesToml) -> ReaderConfig {
    ReaderConfig::default()
        .with_aet_var(&vars.aet)
        .with_pet_var(&vars.pet)
}

/// Builds a [`WriterConfig`] from the TOML output settings.
pub fn build_writer_config(output: &OutputToml) -> Result<WriterConfig> {
    let mut cfg = WriterConfig::default()
        .with_deflate_level(output.compress.then_some(output.deflate_level));
    if let Some(ref title) = output.title {
        cfg = cfg.with_title(title);
    }
    cfg.validate().context("invalid [output] configuration")?;
    Ok(cfg)
}
