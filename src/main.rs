use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use panda_frames::data::factory::sample_container;
use panda_frames::data::filter::{filter_view, sort_view, FilterState, SortOrder};
use panda_frames::data::loader::load_file;
use panda_frames::{AnyDataContainer, CellValue, DataContainer, IndexedDataContainer, SharedRowOptions};

#[derive(Debug, Parser)]
#[command(version, about)]
/// Print a filtered, sorted, or sampled view of a tabular file.
///
/// Each option adds one view on top of the previous one; the file's cells are
/// never copied until they are printed.
struct Args {
    /// Input file (.csv, .json, .parquet).
    file: PathBuf,

    #[arg(long, value_delimiter = ',')]
    /// Only show these rows of the file, in this order. Rows may repeat.
    rows: Option<Vec<usize>>,

    #[arg(long = "filter", value_name = "COLUMN=VALUE")]
    /// Keep rows whose COLUMN equals VALUE. Repeat to select several values
    /// or to filter on several columns.
    filters: Vec<String>,

    #[arg(long, value_name = "COLUMN")]
    /// Sort by this column.
    sort: Option<String>,

    #[arg(long, requires = "sort")]
    /// Sort in descending order.
    desc: bool,

    #[arg(long, value_name = "N")]
    /// Keep an evenly spaced sample of about N rows.
    sample: Option<usize>,

    #[arg(long)]
    /// Print the rows as a JSON array of arrays.
    json: bool,

    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    /// Log filter, e.g. `debug` or `panda_frames=trace`.
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    let base = Arc::new(load_file(&args.file).with_context(|| format!("loading {}", args.file.display()))?);
    let sort = match &args.sort {
        Some(name) => {
            let order = if args.desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            Some((column_index(&base, name)?, order))
        }
        None => None,
    };
    let pipeline = Pipeline {
        filters: parse_filters(&base, &args.filters)?,
        sort,
        sample: args.sample,
    };
    let mut printer = Printer {
        fields: base.fields(),
        total_rows: base.num_rows(),
        json: args.json,
    };

    match &args.rows {
        Some(rows) => {
            let selected = IndexedDataContainer::new(base, rows.clone()).context("--rows")?;
            pipeline.filter(Arc::new(selected), &mut printer)
        }
        None => pipeline.filter(base, &mut printer),
    }
}

// ---------------------------------------------------------------------------
// Pipeline: each stage wraps the previous container only when its option is set
// ---------------------------------------------------------------------------

/// Receives the container produced by the last stage.
trait Sink {
    fn accept<C: DataContainer>(&mut self, view: &C) -> Result<()>;
}

struct Pipeline {
    filters: FilterState,
    sort: Option<(usize, SortOrder)>,
    sample: Option<usize>,
}

impl Pipeline {
    fn filter<C: DataContainer, S: Sink>(&self, data: Arc<C>, sink: &mut S) -> Result<()> {
        if self.filters.is_empty() {
            return self.sort(data, sink);
        }
        self.sort(Arc::new(filter_view(data, &self.filters)?), sink)
    }

    fn sort<C: DataContainer, S: Sink>(&self, data: Arc<C>, sink: &mut S) -> Result<()> {
        match self.sort {
            Some((column, order)) => self.sample(Arc::new(sort_view(data, column, order)?), sink),
            None => self.sample(data, sink),
        }
    }

    fn sample<C: DataContainer, S: Sink>(&self, data: Arc<C>, sink: &mut S) -> Result<()> {
        match self.sample {
            Some(n) => sink.accept(&sample_container(data, n)),
            None => sink.accept(data.as_ref()),
        }
    }
}

struct Printer {
    fields: Vec<String>,
    total_rows: usize,
    json: bool,
}

impl Sink for Printer {
    fn accept<C: DataContainer>(&mut self, view: &C) -> Result<()> {
        log::info!("showing {} of {} rows", view.num_rows(), self.total_rows);

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        if self.json {
            serde_json::to_writer_pretty(&mut out, &view.flatten_data()?)?;
            writeln!(out)?;
        } else {
            print_table(&mut out, &self.fields, view)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn column_index(data: &AnyDataContainer, name: &str) -> Result<usize> {
    data.column_index(name)
        .with_context(|| format!("unknown column '{name}'"))
}

/// `COLUMN=VALUE` pairs into a filter selection.
fn parse_filters(data: &AnyDataContainer, raw: &[String]) -> Result<FilterState> {
    let mut filters = FilterState::new();
    for spec in raw {
        let Some((name, value)) = spec.split_once('=') else {
            bail!("filter '{spec}' is not of the form COLUMN=VALUE");
        };
        filters
            .entry(column_index(data, name)?)
            .or_default()
            .insert(CellValue::guess(value));
    }
    Ok(filters)
}

fn print_table<W: Write, C: DataContainer>(out: &mut W, fields: &[String], view: &C) -> Result<()> {
    writeln!(out, "{}", fields.join("\t"))?;
    let mut rows = view.rows(SharedRowOptions::SHARED);
    while let Some(row) = rows.next_row() {
        let row = row?;
        let cells: Vec<String> = row.as_slice().iter().map(ToString::to_string).collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}
