mod commands;
mod output;

use clap::{Parser, Subcommand};
use keskus_core::store::MAX_PAGE_ROWS;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "keskus",
    version,
    about = "Summarize device listings extracted from electrical diagrams"
)]
struct Cli {
    /// Enable verbose logging (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file (default: ./keskus.json when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// State directory (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an extraction service response into the store
    Ingest {
        /// Path to the service's JSON response
        response_file: PathBuf,

        /// The PDF the response was extracted from, kept alongside the data
        #[arg(long, value_name = "FILE")]
        pdf: Option<PathBuf>,

        /// Keep symbols the catalog cannot resolve instead of dropping them
        #[arg(long)]
        retain_unmapped: bool,
    },
    /// Inspect or edit stored rows
    Rows {
        #[command(subcommand)]
        action: RowsAction,
    },
    /// Print the aggregated device summary
    Summary {
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also show totals per protection value
        #[arg(long)]
        by_protection: bool,

        /// Also list every device
        #[arg(long)]
        devices: bool,
    },
    /// Write the summary report spreadsheet
    Export {
        /// Output file (default: device-summary-<date>.xlsx)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Leave out the cable type columns
        #[arg(long)]
        no_cable: bool,

        /// Split "input/output" protection values into two columns
        #[arg(long)]
        split_protection: bool,
    },
    /// List the symbols in the catalog
    Symbols,
    /// Remove all stored data
    Clear,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum RowsAction {
    /// Show a page, or a single row of it
    Get {
        /// Page number (1-based)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,

        /// Row number (1-based)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        row: Option<u64>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Create or update a row; unspecified fields keep their value
    Set {
        /// Page number (1-based)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,

        /// Row number (1-based)
        #[arg(value_parser = clap::value_parser!(u64).range(1..=MAX_PAGE_ROWS as u64))]
        row: u64,

        /// Comma-separated symbol ids (empty string clears)
        #[arg(long)]
        icons: Option<String>,

        #[arg(long)]
        nro: Option<String>,

        /// Description
        #[arg(long)]
        kuvateksti: Option<String>,

        /// Protection rating
        #[arg(long)]
        suoja: Option<String>,

        /// Cable type
        #[arg(long)]
        kaapeli: Option<String>,
    },
    /// Remove every row from a page
    ClearPage {
        /// Page number (1-based)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {e}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::Context::load(cli.config, cli.store).and_then(|ctx| match cli.command {
        Commands::Ingest {
            response_file,
            pdf,
            retain_unmapped,
        } => commands::ingest::run(&ctx, response_file, pdf, retain_unmapped),
        Commands::Rows { action } => match action {
            RowsAction::Get { page, row, output } => {
                commands::rows::get(&ctx, page as usize, row.map(|r| r as usize), &output)
            }
            RowsAction::Set {
                page,
                row,
                icons,
                nro,
                kuvateksti,
                suoja,
                kaapeli,
            } => commands::rows::set(
                &ctx,
                page as usize,
                row as usize,
                commands::rows::RowEdit {
                    icons,
                    nro,
                    kuvateksti,
                    suoja,
                    kaapeli,
                },
            ),
            RowsAction::ClearPage { page } => commands::rows::clear_page(&ctx, page as usize),
        },
        Commands::Summary {
            output,
            by_protection,
            devices,
        } => commands::summary::run(&ctx, &output, by_protection, devices),
        Commands::Export {
            out,
            no_cable,
            split_protection,
        } => commands::export::run(&ctx, out, no_cable, split_protection),
        Commands::Symbols => commands::symbols::list(&ctx),
        Commands::Clear => commands::clear(&ctx),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&ctx),
            ConfigAction::Init { force } => commands::config::init(&ctx, force),
        },
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
