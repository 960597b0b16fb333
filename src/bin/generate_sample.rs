use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

#[derive(Debug, Parser)]
#[command(about)]
/// Write a seeded random measurement table as Parquet.
struct Args {
    #[arg(default_value = "sample_data.parquet")]
    /// Output path.
    output: PathBuf,

    #[arg(long, default_value_t = 120)]
    /// Number of rows to write.
    rows: usize,

    #[arg(long, default_value_t = 42)]
    /// RNG seed; the same seed writes the same table.
    seed: u64,
}

const SAMPLES: [&str; 3] = ["Sample_A", "Sample_B", "Sample_C"];
const CONCENTRATIONS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 5.0];
const OPERATORS: [&str; 2] = ["Alice", "Bob"];
/// Days since the Unix epoch of the first measurement.
const FIRST_DAY: i32 = 19_700;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let batch = measurements(args.rows, args.seed)?;

    let file = std::fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {} measurements to {}", args.rows, args.output.display());
    Ok(())
}

/// `rows` random measurements; equal seeds give equal tables.
fn measurements(rows: usize, seed: u64) -> Result<RecordBatch> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let mut sample_col = Vec::with_capacity(rows);
    let mut conc_col = Vec::with_capacity(rows);
    let mut operator_col = Vec::with_capacity(rows);
    let mut absorbance_col = Vec::with_capacity(rows);
    let mut valid_col = Vec::with_capacity(rows);
    let mut day_col = Vec::with_capacity(rows);

    for row in 0..rows {
        let conc = CONCENTRATIONS[rng.gen_range(0..CONCENTRATIONS.len())];
        // Roughly linear in concentration, with multiplicative noise.
        let absorbance = conc * 0.2 * rng.gen_range(0.9..1.1);

        sample_col.push(SAMPLES[rng.gen_range(0..SAMPLES.len())]);
        conc_col.push(conc);
        operator_col.push(OPERATORS[rng.gen_range(0..OPERATORS.len())]);
        absorbance_col.push(absorbance);
        valid_col.push(rng.gen_bool(0.95));
        day_col.push(FIRST_DAY + (row / 10) as i32);
    }
    let ids: Vec<i64> = (0..rows as i64).collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("measurement_id", DataType::Int64, false),
        Field::new("sample", DataType::Utf8, false),
        Field::new("concentration", DataType::Float64, false),
        Field::new("operator", DataType::Utf8, false),
        Field::new("absorbance", DataType::Float64, false),
        Field::new("valid", DataType::Boolean, false),
        Field::new("measured_on", DataType::Date32, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(StringArray::from(sample_col)),
            Arc::new(Float64Array::from(conc_col)),
            Arc::new(StringArray::from(operator_col)),
            Arc::new(Float64Array::from(absorbance_col)),
            Arc::new(BooleanArray::from(valid_col)),
            Arc::new(Date32Array::from(day_col)),
        ],
    )
    .context("building record batch")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fixes_the_table() {
        let a = measurements(50, 7).unwrap();
        assert_eq!(a.num_rows(), 50);
        assert_eq!(a.num_columns(), 7);
        assert_eq!(a, measurements(50, 7).unwrap());
        assert_ne!(a, measurements(50, 8).unwrap());
    }
}
