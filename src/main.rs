use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use idf_size_delta::cmd::{self, ExtractArgs, RenderArgs, ReportFormat};
use std::path::PathBuf;
use std::process;

/// ESP-IDF firmware size delta reporter
///
/// idf-size-delta normalizes ESP-IDF size reports into one canonical record
/// and renders a base vs PR comparison for pull-request comments.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect a size record from an ESP-IDF build directory
    Collect {
        /// Build directory containing project_description.json
        #[arg(short, long)]
        build_dir: Option<PathBuf>,

        /// Project directory to run idf.py in (default: parent of the build directory)
        #[arg(long)]
        app_dir: Option<PathBuf>,

        /// Output path for the size record (default: size.json)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Flash capacity in bytes to record instead of the reported total
        #[arg(long)]
        flash_total_override: Option<u64>,
    },

    /// Normalize an existing size report into a size record
    Extract {
        /// Size report JSON file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: String,

        /// Application .bin whose size is used when the report has no FLASH usage
        #[arg(long)]
        artifact: Option<PathBuf>,

        /// Output path (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Flash capacity in bytes to record instead of the reported total
        #[arg(long)]
        flash_total_override: Option<u64>,

        /// Pretty-print the record
        #[arg(long)]
        pretty: bool,
    },

    /// Render the base vs PR delta report
    Render {
        /// Size record of the base branch
        #[arg(long)]
        base: PathBuf,

        /// Size record of the pull request
        #[arg(long)]
        head: PathBuf,

        /// Application name shown in the heading and comment marker
        #[arg(short, long)]
        app_name: Option<String>,

        /// Flash capacity in bytes applied to both records
        #[arg(long)]
        flash_total_override: Option<u64>,

        /// Decimal places for percentages
        #[arg(short, long)]
        precision: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,

        /// Output path (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Initialize idf-size-delta configuration
    Init {
        /// Application name to store in the config file
        #[arg(short, long)]
        app_name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Collect {
            build_dir,
            app_dir,
            out,
            flash_total_override,
        }) => cmd::cmd_collect(
            build_dir.as_deref(),
            app_dir.as_deref(),
            out.as_deref(),
            *flash_total_override,
        ),
        Some(Commands::Extract {
            input,
            artifact,
            out,
            flash_total_override,
            pretty,
        }) => cmd::cmd_extract(&ExtractArgs {
            input,
            artifact: artifact.as_deref(),
            out: out.as_deref(),
            flash_total_override: *flash_total_override,
            pretty: *pretty,
        }),
        Some(Commands::Render {
            base,
            head,
            app_name,
            flash_total_override,
            precision,
            format,
            out,
        }) => cmd::cmd_render(&RenderArgs {
            base,
            head,
            app_name: app_name.as_deref(),
            flash_total_override: *flash_total_override,
            precision: *precision,
            format: *format,
            out: out.as_deref(),
        }),
        Some(Commands::Init { app_name }) => cmd::cmd_init(app_name.as_deref()),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("idf-size-delta v{}", env!("CARGO_PKG_VERSION"));
            println!("ESP-IDF firmware size delta reporter\n");
            println!("Usage: idf-size-delta <COMMAND>\n");
            println!("Commands:");
            println!("  collect      Collect a size record from a build directory");
            println!("  extract      Normalize an existing size report");
            println!("  render       Render the base vs PR delta report");
            println!("  init         Initialize idf-size-delta configuration");
            println!("  completions  Generate shell completions");
            println!("\nRun 'idf-size-delta <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use idf_size_delta::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
