// trellis CLI - headless data-grid operations

mod input;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use trellis_core::{FixedSide, SortDirection};
use trellis_engine::{GridState, SortUpdate};

use input::{FileSource, Format};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Data-grid state engine (CLI mode, headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load records and print the flat or grouped view
    #[command(after_help = "\
Examples:
  trellis view customers.json --sort balance:desc
  trellis view customers.json --group country --group status --expand-all
  trellis view data.csv -f csv --sort name --sort date:desc --hide company
  trellis view customers.json --fix-right balance --catalog columns.toml")]
    View {
        /// Input file (JSON array, service payload, or CSV)
        file: PathBuf,

        /// Input format
        #[arg(long, short = 'f', value_enum, default_value = "json")]
        from: Format,

        /// Sort by column, `field` or `field:desc`; repeat to extend the chain
        #[arg(long)]
        sort: Vec<String>,

        /// Group by column; repeat to nest (applied before --sort)
        #[arg(long)]
        group: Vec<String>,

        /// Expand every group in the output
        #[arg(long)]
        expand_all: bool,

        /// Hide a column (repeatable)
        #[arg(long)]
        hide: Vec<String>,

        /// Pin a column to the left edge (repeatable)
        #[arg(long)]
        fix_left: Vec<String>,

        /// Pin a column to the right edge (repeatable)
        #[arg(long)]
        fix_right: Vec<String>,

        /// Column catalog TOML override
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the effective column catalog
    Columns {
        /// Column catalog TOML override
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Columns { catalog } => {
            let columns =
                trellis_config::load_or_default(catalog.as_deref()).map_err(|e| e.to_string())?;
            render::print_catalog(&columns);
            Ok(())
        }
        Commands::View {
            file,
            from,
            sort,
            group,
            expand_all,
            hide,
            fix_left,
            fix_right,
            catalog,
        } => {
            let columns =
                trellis_config::load_or_default(catalog.as_deref()).map_err(|e| e.to_string())?;
            let mut grid = GridState::new(columns);

            let source = FileSource { path: file, format: from };
            grid.load_from(&source).map_err(|e| e.to_string())?;

            for field in &hide {
                grid.hide_column(field);
            }
            for field in &fix_left {
                grid.fix_column(field, FixedSide::Left);
            }
            for field in &fix_right {
                grid.fix_column(field, FixedSide::Right);
            }
            for field in &group {
                grid.add_grouping(field);
            }
            for flag in &sort {
                let (field, direction) = parse_sort_flag(flag)?;
                grid.apply_sort(field, direction, SortUpdate::Add);
            }
            if expand_all {
                grid.expand_all();
            }

            if grid.is_grouped() {
                render::print_tree(&grid);
            } else {
                render::print_flat(&grid);
            }
            Ok(())
        }
    }
}

/// Parse `field`, `field:asc` or `field:desc`.
fn parse_sort_flag(flag: &str) -> Result<(&str, SortDirection), String> {
    match flag.split_once(':') {
        None => Ok((flag, SortDirection::Asc)),
        Some((field, "asc")) => Ok((field, SortDirection::Asc)),
        Some((field, "desc")) => Ok((field, SortDirection::Desc)),
        Some((_, other)) => Err(format!(
            "invalid sort direction '{other}' (expected 'asc' or 'desc')"
        )),
    }
}
