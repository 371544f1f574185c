use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;

const DT: f64 = 1e-4;
const DURATION: f64 = 0.5;
const V_REST: f64 = -65.0;
const NOISE_MV: f64 = 0.2;

/// Write a synthetic voltage-trace file for trying out the viewer.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    /// Output file; `.parquet`/`.pq` writes Parquet, anything else writes text columns
    #[arg(value_name = "OUT", default_value = "sample_traces.dat")]
    out: PathBuf,
}

/// A recording site: name, spike period (s), first spike (s), attenuation.
struct Site {
    name: &'static str,
    period: f64,
    onset: f64,
    gain: f64,
}

const SITES: [Site; 4] = [
    Site { name: "soma", period: 0.050, onset: 0.020, gain: 1.0 },
    Site { name: "axon", period: 0.050, onset: 0.021, gain: 1.1 },
    Site { name: "dend_prox", period: 0.050, onset: 0.023, gain: 0.6 },
    Site { name: "dend_dist", period: 0.080, onset: 0.030, gain: 0.3 },
];

/// Membrane potential at time `since` after a spike: fast rise, decay and an
/// after-hyperpolarisation.
fn spike_shape(since: f64) -> f64 {
    if since < 0.0 {
        return 0.0;
    }
    let tau_up = 0.0003;
    let tau_down = 0.0008;
    let peak = 95.0 * ((-since / tau_down).exp() - (-since / tau_up).exp());
    let ahp = -8.0 * (since / 0.004) * (1.0 - since / 0.004).exp();
    peak + ahp
}

fn site_voltage(site: &Site, t: f64) -> f64 {
    let since = if t < site.onset {
        -1.0
    } else {
        (t - site.onset) % site.period
    };
    V_REST + site.gain * spike_shape(since)
}

fn write_text(path: &Path, time: &[f64], traces: &[Vec<f64>]) -> Result<()> {
    let file = File::create(path).context("creating output file")?;
    let mut out = BufWriter::new(file);

    write!(out, "t")?;
    for site in &SITES {
        write!(out, " {}", site.name)?;
    }
    writeln!(out)?;

    for (i, t) in time.iter().enumerate() {
        write!(out, "{t:.4}")?;
        for trace in traces {
            write!(out, " {:.3}", trace[i])?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, time: Vec<f64>, traces: Vec<Vec<f64>>) -> Result<()> {
    let mut fields = vec![Field::new("t", DataType::Float64, false)];
    fields.extend(
        SITES
            .iter()
            .map(|s| Field::new(s.name, DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![Arc::new(Float64Array::from(time))];
    columns.extend(
        traces
            .into_iter()
            .map(|v| Arc::new(Float64Array::from(v)) as ArrayRef),
    );
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let mut rng = Pcg64::seed_from_u64(42);
    let noise = Normal::new(0.0, NOISE_MV).context("noise distribution")?;

    let n = (DURATION / DT).round() as usize;
    let time: Vec<f64> = (0..n).map(|i| i as f64 * DT).collect();
    let traces: Vec<Vec<f64>> = SITES
        .iter()
        .map(|site| {
            time.iter()
                .map(|&t| site_voltage(site, t) + noise.sample(&mut rng))
                .collect()
        })
        .collect();

    let parquet = matches!(
        args.out
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref(),
        Some("parquet" | "pq")
    );
    if parquet {
        write_parquet(&args.out, time, traces)?;
    } else {
        write_text(&args.out, &time, &traces)?;
    }

    println!(
        "Wrote {} traces ({n} samples each) to {}",
        SITES.len(),
        args.out.display()
    );
    Ok(())
}
