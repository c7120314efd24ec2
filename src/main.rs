use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::error;
use stintlab::{
    AnalysisConfig, JsonLinesSource, SessionSource, SortKey, StintlabError, analyze_session,
    config::check_precision, driver_standings, ordering::SortDirection, report, writer,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute per-stint tire metrics for a session file
    Analyze {
        #[arg(short, long)]
        input: PathBuf,

        /// Column to sort by, instead of race order
        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,

        #[arg(short, long)]
        descending: bool,

        /// Order by finishing position even if a sort column is configured
        #[arg(short, long, conflicts_with = "sort")]
        race_order: bool,

        #[arg(short, long)]
        precision: Option<usize>,

        /// Also write the records to a JSON Lines file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Persist the effective sort and precision settings
        #[arg(long)]
        save_config: bool,
    },
    /// List the session's drivers in race order
    Drivers {
        #[arg(short, long)]
        input: PathBuf,
    },
}

struct AnalyzeArgs<'a> {
    input: &'a Path,
    sort: Option<SortKey>,
    descending: bool,
    race_order: bool,
    precision: Option<usize>,
    output: Option<&'a Path>,
    save_config: bool,
}

fn effective_config(args: &AnalyzeArgs) -> Result<AnalysisConfig, StintlabError> {
    let mut config = AnalysisConfig::from_local_file()
        .unwrap_or_else(|e| {
            error!("Ignoring unreadable config file: {}", e);
            None
        })
        .unwrap_or_default();

    if let Some(sort) = args.sort {
        config.sort_key = sort;
        config.race_order = false;
    }
    if args.race_order {
        config.race_order = true;
    }
    if args.descending {
        config.sort_direction = SortDirection::Descending;
    } else if args.sort.is_some() {
        config.sort_direction = SortDirection::Ascending;
    }
    if let Some(precision) = args.precision {
        config.precision = check_precision(precision)?;
    }
    Ok(config)
}

fn analyze(args: AnalyzeArgs) -> Result<(), StintlabError> {
    let config = effective_config(&args)?;
    if args.save_config {
        config.save()?;
    }

    let mut source = JsonLinesSource::new(args.input);
    let session = source.load()?;
    let options = config.analysis_options();
    let rows = analyze_session(&session, &options);

    if let Some(info) = &session.info {
        println!("{}", info.name);
    }
    println!(
        "{}",
        report::render_ordered_table(&rows, config.precision, options.order)
    );

    if let Some(output) = args.output {
        writer::write_records(output, &rows)?;
    }
    Ok(())
}

fn drivers(input: &Path) -> Result<(), StintlabError> {
    let mut source = JsonLinesSource::new(input);
    let session = source.load()?;
    println!("{}", report::render_standings(&driver_standings(&session)));
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    let result = match &cli.command {
        Commands::Analyze {
            input,
            sort,
            descending,
            race_order,
            precision,
            output,
            save_config,
        } => analyze(AnalyzeArgs {
            input,
            sort: *sort,
            descending: *descending,
            race_order: *race_order,
            precision: *precision,
            output: output.as_deref(),
            save_config: *save_config,
        }),
        Commands::Drivers { input } => drivers(input),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
