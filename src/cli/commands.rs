//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::OutputFormat;
use crate::config::ModelingConfig;
use crate::error::Result;
use crate::reflectivity::ReflectivityMethod;
use crate::request::{ModelRequest, ModelResponse};
use crate::synth::{Slice, TuningAnalysis};

/// Load the configuration file if given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<ModelingConfig> {
    match path {
        Some(path) => {
            info!("Loading config: {}", path.display());
            ModelingConfig::from_file(path)
        }
        None => Ok(ModelingConfig::default()),
    }
}

/// Run a request file and write the slice.
pub fn run(
    config: &ModelingConfig,
    request_path: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    info!("Running request: {}", request_path.display());

    let request = ModelRequest::from_file(request_path)?;
    let response = request.run(config)?;

    let mut writer = open_output(output)?;
    match format {
        OutputFormat::Json => write_json(&mut writer, &response)?,
        OutputFormat::Csv => write_slice_csv(&mut writer, &response.slice)?,
    }
    writer.flush()?;

    if let Some(path) = output {
        let (rows, cols) = response.slice.data().dim();
        println!(
            "Wrote {} slice ({} samples x {} columns) to {}",
            response.slice.axis(),
            rows,
            cols,
            path.display()
        );
    }

    Ok(())
}

/// List available reflectivity methods.
pub fn list_methods() -> Result<()> {
    println!("Reflectivity methods:");
    println!("{:-<60}", "");
    for method in ReflectivityMethod::ALL {
        let limit = method
            .validity_limit_deg()
            .map(|deg| format!("< {} deg", deg))
            .unwrap_or_else(|| "all angles".to_string());
        println!("  {:<12} {:<40} {}", method.name(), method.description(), limit);
    }
    Ok(())
}

/// Run a request file and write its tuning curves as CSV.
pub fn tuning(config: &ModelingConfig, request_path: &Path, output: Option<&Path>) -> Result<()> {
    info!("Running tuning analysis: {}", request_path.display());

    let request = ModelRequest::from_file(request_path)?;
    let analysis = request.tuning(config)?;

    let mut writer = open_output(output)?;
    write_tuning_csv(&mut writer, &analysis)?;
    writer.flush()?;

    if let Some(thickness) = analysis.tuning_thickness_ms() {
        info!("Tuning thickness: {:.1} ms", thickness);
    }

    Ok(())
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_json(writer: &mut dyn Write, response: &ModelResponse) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, response)?;
    writeln!(writer)?;
    Ok(())
}

/// Header row of axis values, then one row per sample led by its time in ms.
pub fn write_slice_csv(writer: &mut dyn Write, slice: &Slice) -> Result<()> {
    write!(writer, "time_ms")?;
    for value in slice.axis_values() {
        write!(writer, ",{}", value)?;
    }
    writeln!(writer)?;

    for (time, row) in slice.time_axis_ms().iter().zip(slice.data().rows()) {
        write!(writer, "{}", time)?;
        for value in row {
            write!(writer, ",{}", value)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// One row per trace.
pub fn write_tuning_csv(writer: &mut dyn Write, analysis: &TuningAnalysis) -> Result<()> {
    writeln!(
        writer,
        "trace,actual_thickness_ms,apparent_thickness_ms,peak_amplitude,peak_sample,trough_sample"
    )?;
    for i in 0..analysis.len() {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            i,
            analysis.actual_thickness_ms[i],
            analysis.apparent_thickness_ms[i],
            analysis.peak_amplitude[i],
            analysis.peak_sample[i],
            analysis.trough_sample[i]
        )?;
    }
    Ok(())
}
