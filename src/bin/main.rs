//! swot command line interface
//!
//! Inspect data sets stored in their dictionary (JSON) representation, export
//! them as delimited text, import delimited text, print their nominal
//! encoding and summarise classifier snapshots.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use swot::core::{ColumnType, DataSet, Result, SwotError, TrainableDataSet, TrainingInstructions};
use swot::data::{CsvOptions, DataTable};
use swot::persistence::ClassifierSnapshot;
use swot::transform::{DataSetTransformer, NominalTransformer, DEFAULT_MISSING_VALUE};

#[derive(Parser)]
#[command(name = "swot")]
#[command(about = "Tabular data sets, nominal encoding and decision forest snapshots")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display data set information
    Info(InfoArgs),
    /// Export a data set as delimited text
    Csv(CsvArgs),
    /// Import delimited text as a data set
    Import(ImportArgs),
    /// Print the nominal encoding of every datum
    Encode(EncodeArgs),
    /// Display a classifier snapshot
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Data set file (dictionary representation)
    data: PathBuf,
}

#[derive(Args)]
struct CsvArgs {
    /// Data set file (dictionary representation)
    data: PathBuf,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: String,

    /// Wrap string values in single quotes
    #[arg(long)]
    quote: bool,

    /// Write a header line with the column names
    #[arg(long)]
    header: bool,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ImportArgs {
    /// Delimited text file
    input: PathBuf,

    /// Column types, in column order
    #[arg(long, value_delimiter = ',', required = true)]
    types: Vec<CliColumnType>,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: String,

    /// String values are wrapped in single quotes
    #[arg(long)]
    quote: bool,

    /// The first line holds the column names
    #[arg(long)]
    header: bool,

    /// Index of the class label column
    #[arg(long)]
    label: Option<usize>,

    /// Output data set file
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliColumnType {
    #[value(name = "categorical")]
    Categorical,
    #[value(name = "integral")]
    Integral,
    #[value(name = "float")]
    FloatingPoint,
    #[value(name = "binary")]
    Binary,
}

impl From<CliColumnType> for ColumnType {
    fn from(cli_type: CliColumnType) -> Self {
        match cli_type {
            CliColumnType::Categorical => ColumnType::Categorical,
            CliColumnType::Integral => ColumnType::Integral,
            CliColumnType::FloatingPoint => ColumnType::FloatingPoint,
            CliColumnType::Binary => ColumnType::Binary,
        }
    }
}

#[derive(Args)]
struct EncodeArgs {
    /// Data set file (dictionary representation)
    data: PathBuf,

    /// Append the label identifier, skipping datums without a label
    #[arg(long)]
    include_label: bool,

    /// Value written for missing entries
    #[arg(long, default_value_t = DEFAULT_MISSING_VALUE)]
    missing_value: f64,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Snapshot file
    snapshot: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Info(args) => info_command(args),
        Commands::Csv(args) => csv_command(args),
        Commands::Import(args) => import_command(args),
        Commands::Encode(args) => encode_command(args),
        Commands::Snapshot(args) => snapshot_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_data_set(path: &Path) -> Result<DataTable> {
    info!("Loading data set from: {path:?}");
    let table = DataTable::from_file(path)?;
    info!(
        "Loaded {} datums with {} columns",
        table.datum_count(),
        table.column_count()
    );
    Ok(table)
}

fn info_command(args: InfoArgs) -> Result<()> {
    let table = load_data_set(&args.data)?;

    println!("=== Data Set Information ===");
    println!("Datums: {}", table.datum_count());
    println!("Columns: {}", table.column_count());
    for (i, column_type) in table.column_types().iter().enumerate() {
        let name = table.name_for_column(i).unwrap_or("-");
        let category = match table.category_name_for_column_at_index(i) {
            Ok(category) => format!(" [{category}]"),
            Err(_) => String::new(),
        };
        let label = if table.label_column_index() == Some(i) {
            " (label)"
        } else {
            ""
        };
        println!("  {i}: {name} {column_type:?}{category}{label}");
    }

    match table.label_column_index() {
        Some(_) => {
            println!("Labels: {}", table.label_values().join(", "));
            println!("Labelled: {}", table.is_labelled());
        }
        None => println!("Labels: none"),
    }
    println!("Features: {}", table.feature_count());

    match table.check_ready_for_classification() {
        Ok(()) => {
            let transformer = NominalTransformer::new(Arc::new(table))?;
            println!("Encoded width: {}", transformer.encoded_width(false));
        }
        Err(e) => println!("Not ready for classification: {e}"),
    }

    Ok(())
}

fn csv_command(args: CsvArgs) -> Result<()> {
    let table = load_data_set(&args.data)?;
    let text = table.csv_representation_with_delimiter(&args.delimiter, args.quote, args.header)?;

    if let Some(output_path) = args.output {
        let file = File::create(&output_path).map_err(SwotError::IoError)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(text.as_bytes())
            .map_err(SwotError::IoError)?;
        writer.flush().map_err(SwotError::IoError)?;
        info!("Delimited text saved to: {output_path:?}");
    } else {
        print!("{text}");
    }

    Ok(())
}

fn import_command(args: ImportArgs) -> Result<()> {
    info!("Importing delimited text from: {:?}", args.input);
    let mut options = CsvOptions::default()
        .with_delimiter(args.delimiter)
        .with_quoted_strings(args.quote)
        .with_header(args.header);
    if let Some(label) = args.label {
        options = options.with_label_column(label);
    }

    let column_types = args.types.into_iter().map(ColumnType::from).collect();
    let mut table = DataTable::from_csv_file(&args.input, &options, column_types)?;
    table.add_observed_categories()?;

    table.save_to_file(&args.output)?;
    info!(
        "Saved {} datums with {} columns to: {:?}",
        table.datum_count(),
        table.column_count(),
        args.output
    );
    Ok(())
}

fn encode_command(args: EncodeArgs) -> Result<()> {
    let table = load_data_set(&args.data)?;
    let transformer =
        NominalTransformer::new(Arc::new(table))?.with_missing_value(args.missing_value);

    let rows = transformer.transform_data_set(args.include_label)?;
    info!(
        "Encoded {} datums into {} values each",
        rows.len(),
        transformer.encoded_width(args.include_label)
    );

    for row in rows {
        let fields: Vec<String> = row.iter().map(|x| x.to_string()).collect();
        println!("{}", fields.join(","));
    }

    Ok(())
}

fn snapshot_command(args: SnapshotArgs) -> Result<()> {
    info!("Loading snapshot from: {:?}", args.snapshot);
    let snapshot = ClassifierSnapshot::load_from_file(&args.snapshot)?;
    print!("{}", snapshot.summary());
    Ok(())
}
