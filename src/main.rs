//! tabkit - transformations for delimited text tables

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};

use tabkit::config::{parse_separator, Config, OutputFormat};
use tabkit::logging::init_logging;
use tabkit::model::{ColumnRef, Table};
use tabkit::output::{render_to_file, render_to_stdout, OutputFormatter, TerminalOutput};
use tabkit::parser::{separator_for_path, ParserFactory};
use tabkit::pipeline::{PipelineRunner, Recipe};
use tabkit::transform::{CellPredicate, CellProcessor};

/// Transform delimited text tables (CSV, TSV)
#[derive(Parser, Debug)]
#[command(name = "tabkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input separator (a character, or tab/comma/semicolon/pipe)
    #[arg(short, long, global = true, value_parser = parse_separator)]
    sep: Option<char>,

    /// Output separator, defaults to the input separator
    #[arg(long, global = true, value_parser = parse_separator)]
    out_sep: Option<char>,

    /// Separator between values inside one cell, used by `split`
    #[arg(long, global = true, value_parser = parse_separator)]
    secondary_sep: Option<char>,

    /// Output format (delimited, json, terminal)
    #[arg(short, long, global = true, default_value = "delimited")]
    format: OutputFormat,

    /// Read input as quoted CSV
    #[arg(long, global = true)]
    quoted: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Io {
    /// Input table file
    input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-delimit a table, fixing every row to the header width
    Format {
        #[command(flatten)]
        io: Io,
    },

    /// Keep only the given columns, dropping repeated rows
    Extract {
        #[command(flatten)]
        io: Io,
        /// Columns to keep, by index or header name (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<ColumnRef>,
    },

    /// Insert a column with constant content
    AddColumn {
        #[command(flatten)]
        io: Io,
        /// Position of the new column
        #[arg(long)]
        index: usize,
        /// Header of the new column
        #[arg(long)]
        header: String,
        /// Value for every data row
        #[arg(long, default_value = "")]
        content: String,
    },

    /// Copy one column into another
    Copy {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        from: ColumnRef,
        #[arg(long)]
        to: ColumnRef,
        /// Also replace non-empty target cells
        #[arg(long)]
        overwrite: bool,
    },

    /// Collapse rows sharing key columns, aggregating other columns
    Shrink {
        #[command(flatten)]
        io: Io,
        /// Key columns (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        key: Vec<ColumnRef>,
        /// Columns whose distinct values are joined with ';' (comma-separated)
        #[arg(long, value_delimiter = ',')]
        compress: Vec<ColumnRef>,
    },

    /// Merge columns of another table by key header names
    Merge {
        #[command(flatten)]
        io: Io,
        /// Table providing the new columns
        #[arg(long)]
        content: PathBuf,
        /// Key header names (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        key: Vec<String>,
    },

    /// Add a prefix and/or postfix to every cell of a column
    Prefix {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        column: ColumnRef,
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        postfix: Option<String>,
    },

    /// Remove one row (0 is the header)
    RemoveRow {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        index: usize,
    },

    /// Remove one column
    RemoveColumn {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        column: ColumnRef,
    },

    /// Remove columns that are empty in every data row
    RemoveEmpty {
        #[command(flatten)]
        io: Io,
    },

    /// Swap two columns
    Swap {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        first: ColumnRef,
        #[arg(long)]
        second: ColumnRef,
    },

    /// Rename a column
    Rename {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        column: ColumnRef,
        #[arg(long)]
        name: String,
    },

    /// Split a multi-value column into numbered columns
    Split {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        column: ColumnRef,
        /// Separator between the values inside a cell (overrides --secondary-sep)
        #[arg(long, value_parser = parse_separator)]
        by: Option<char>,
    },

    /// Find and replace text in a column, dropping repeated rows
    Replace {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        column: ColumnRef,
        #[arg(long)]
        find: String,
        #[arg(long, default_value = "")]
        replace: String,
    },

    /// Remove rows whose cell matches a test
    #[command(group(
        ArgGroup::new("test")
            .required(true)
            .args(["equals", "contains", "starts_with", "ends_with", "empty"])
    ))]
    Filter {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        column: ColumnRef,
        #[arg(long)]
        equals: Option<String>,
        #[arg(long)]
        contains: Option<String>,
        #[arg(long)]
        starts_with: Option<String>,
        #[arg(long)]
        ends_with: Option<String>,
        #[arg(long)]
        empty: bool,
        /// Remove rows that do NOT match instead
        #[arg(long)]
        invert: bool,
    },

    /// Print the index of a header name (-1 when absent)
    Index {
        /// Input table file
        input: PathBuf,
        #[arg(long)]
        name: String,
    },

    /// Preview a table in the terminal
    Show {
        /// Input table file
        input: PathBuf,
        /// Maximum number of data rows to show
        #[arg(long, default_value_t = 20)]
        rows: usize,
    },

    /// Run a JSON recipe of chained operations
    Run {
        /// Recipe file
        recipe: PathBuf,
        #[command(flatten)]
        io: Io,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // Column not found
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut config = Config::default()
        .with_output_format(cli.format)
        .with_quoted(cli.quoted)
        .with_verbose(cli.verbose);
    config.separator = cli.sep;
    config.output_separator = cli.out_sep;
    if let Some(sep) = cli.secondary_sep {
        config = config.with_secondary_separator(sep);
    }

    init_logging(&config);

    let factory = ParserFactory::new();

    let (io, table) = match cli.command {
        Command::Index { input, name } => {
            let table = load(&factory, &input, &config)?;
            return match table.column_index(&name) {
                Some(index) => {
                    println!("{}", index);
                    Ok(true)
                }
                None => {
                    println!("-1");
                    Ok(false)
                }
            };
        }
        Command::Show { input, rows } => {
            let table = load(&factory, &input, &config)?;
            let mut stdout = std::io::stdout().lock();
            TerminalOutput::with_max_rows(rows).render(&table, &mut stdout)?;
            return Ok(true);
        }
        Command::Run { recipe, io } => {
            let mut recipe_doc = Recipe::load(&recipe)
                .with_context(|| format!("Failed to load recipe: {}", recipe.display()))?;
            if let Some(sep) = config.separator {
                recipe_doc.separator = sep.to_string();
            }
            let base_dir = recipe.parent().map(Path::to_path_buf).unwrap_or_default();
            // the input is named relative to the caller, not the recipe
            let input = std::env::current_dir()
                .context("Failed to read the working directory")?
                .join(&io.input);
            let result = PipelineRunner::new(base_dir)
                .run_file(&recipe_doc, &input)
                .with_context(|| format!("Failed to run recipe: {}", recipe.display()))?;
            if config.output_separator.is_none() {
                config.output_separator = Some(result.separator);
            }
            (io, result.table)
        }
        Command::Format { io } => {
            let table = load(&factory, &io.input, &config)?;
            (io, table)
        }
        Command::Extract { io, columns } => {
            let table = load(&factory, &io.input, &config)?;
            let indices = columns
                .iter()
                .map(|c| table.resolve(c))
                .collect::<Result<Vec<_>, _>>()?;
            let table = table.extract_columns(&indices)?;
            (io, table)
        }
        Command::AddColumn {
            io,
            index,
            header,
            content,
        } => {
            let table = load(&factory, &io.input, &config)?.add_column(index, &content, &header)?;
            (io, table)
        }
        Command::Copy {
            io,
            from,
            to,
            overwrite,
        } => {
            let table = load(&factory, &io.input, &config)?;
            let table = table.copy_content(table.resolve(&from)?, table.resolve(&to)?, overwrite)?;
            (io, table)
        }
        Command::Shrink { io, key, compress } => {
            let table = load(&factory, &io.input, &config)?;
            let key = key
                .iter()
                .map(|c| table.resolve(c))
                .collect::<Result<Vec<_>, _>>()?;
            let compress = compress
                .iter()
                .map(|c| table.resolve(c))
                .collect::<Result<Vec<_>, _>>()?;
            let table = table.shrink(&key, &compress)?;
            (io, table)
        }
        Command::Merge { io, content, key } => {
            let table = load(&factory, &io.input, &config)?;
            let content = load(&factory, &content, &config)?;
            let keys: Vec<&str> = key.iter().map(String::as_str).collect();
            let table = table.merge(&content, &keys)?;
            (io, table)
        }
        Command::Prefix {
            io,
            column,
            prefix,
            postfix,
        } => {
            let table = load(&factory, &io.input, &config)?;
            let table = table.prefix_column(
                table.resolve(&column)?,
                prefix.as_deref(),
                postfix.as_deref(),
            )?;
            (io, table)
        }
        Command::RemoveRow { io, index } => {
            let table = load(&factory, &io.input, &config)?.remove_row(index);
            (io, table)
        }
        Command::RemoveColumn { io, column } => {
            let table = load(&factory, &io.input, &config)?;
            let table = table.remove_column(table.resolve(&column)?)?;
            (io, table)
        }
        Command::RemoveEmpty { io } => {
            let table = load(&factory, &io.input, &config)?.remove_empty_columns();
            (io, table)
        }
        Command::Swap { io, first, second } => {
            let table = load(&factory, &io.input, &config)?;
            let table = table.swap_columns(table.resolve(&first)?, table.resolve(&second)?)?;
            (io, table)
        }
        Command::Rename { io, column, name } => {
            let table = load(&factory, &io.input, &config)?;
            let table = table.rename_column(table.resolve(&column)?, &name)?;
            (io, table)
        }
        Command::Split { io, column, by } => {
            let table = load(&factory, &io.input, &config)?;
            let by = by.unwrap_or(config.secondary_separator);
            let table = table.split_column(table.resolve(&column)?, by)?;
            (io, table)
        }
        Command::Replace {
            io,
            column,
            find,
            replace,
        } => {
            let table = load(&factory, &io.input, &config)?;
            let processor = CellProcessor::Replace { find, replace };
            let table = table.process(table.resolve(&column)?, |cell| processor.apply(cell))?;
            (io, table)
        }
        Command::Filter {
            io,
            column,
            equals,
            contains,
            starts_with,
            ends_with,
            empty,
            invert,
        } => {
            let table = load(&factory, &io.input, &config)?;
            let predicate = match (equals, contains, starts_with, ends_with) {
                (Some(value), ..) => CellPredicate::Equals { value },
                (_, Some(value), ..) => CellPredicate::Contains { value },
                (_, _, Some(value), _) => CellPredicate::StartsWith { value },
                (_, _, _, Some(value)) => CellPredicate::EndsWith { value },
                _ if empty => CellPredicate::Empty,
                _ => anyhow::bail!("No filter test given"),
            };
            let predicate = if invert { predicate.negate() } else { predicate };
            let table = table.filter(table.resolve(&column)?, |cell| predicate.matches(cell))?;
            (io, table)
        }
    };

    let input_sep = config.input_separator_or(separator_for_path(&io.input));
    let output_sep = config.output_separator_or(input_sep);

    match io.output {
        Some(path) => render_to_file(&table, &path, config.output_format, output_sep)?,
        None => render_to_stdout(&table, config.output_format, output_sep)?,
    }

    Ok(true)
}

fn load(factory: &ParserFactory, path: &Path, config: &Config) -> Result<Table> {
    factory
        .parse(path, config)
        .with_context(|| format!("Failed to parse file: {}", path.display()))
}
