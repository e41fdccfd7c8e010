use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use shotdiff::cmd;
use shotdiff::config::ConfigOverrides;
use shotdiff::report::CommentContext;
use std::path::PathBuf;
use std::process;

/// Visual regression diff-and-report engine
///
/// shotdiff compares full-page screenshots against approved baselines,
/// writes diff images, and builds a self-contained HTML report plus a
/// machine-readable summary for CI.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    /// Project root holding baselines/, artifacts/ and reports/
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags that override `.shotdiff.toml` for the comparison stage
#[derive(Args, Clone)]
struct DiffArgs {
    /// Viewport widths to compare, comma-separated (e.g. 375,1400)
    #[arg(long, value_delimiter = ',')]
    widths: Option<Vec<u32>>,

    /// Per-pixel color distance threshold, 0 to 1
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare current screenshots against baselines
    Diff {
        #[command(flatten)]
        diff: DiffArgs,
    },

    /// Build the HTML report and summary from the last comparison
    Report {
        /// Timestamped reports to keep (0 keeps all)
        #[arg(long)]
        keep_last: Option<usize>,

        /// Print the summary document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare and report in one pass (CI entry point)
    Run {
        #[command(flatten)]
        diff: DiffArgs,

        /// Timestamped reports to keep (0 keeps all)
        #[arg(long)]
        keep_last: Option<usize>,

        /// Print the summary document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the pull-request status comment as Markdown
    Comment {
        /// Project name shown in the headline
        #[arg(long, default_value = "project")]
        project: String,

        /// Environment under test
        #[arg(long)]
        environment_url: Option<String>,

        /// Environment the baselines were captured from
        #[arg(long)]
        baseline_url: Option<String>,

        /// CI run holding the full report
        #[arg(long)]
        run_url: Option<String>,

        /// Write the comment to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize shotdiff configuration
    Init {
        /// Overwrite an existing .shotdiff.toml
        #[arg(long)]
        force: bool,
    },

    /// Print the path of the latest HTML report
    Latest,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn overrides(diff: Option<&DiffArgs>, keep_last: Option<usize>) -> ConfigOverrides {
    ConfigOverrides {
        widths: diff.and_then(|d| d.widths.clone()),
        threshold: diff.and_then(|d| d.threshold),
        keep_last,
    }
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let root = cli.root.as_path();
    let result = match &cli.command {
        Some(Commands::Diff { diff }) => cmd::cmd_diff(root, &overrides(Some(diff), None)),
        Some(Commands::Report { keep_last, json }) => {
            cmd::cmd_report(root, &overrides(None, *keep_last), *json)
        }
        Some(Commands::Run {
            diff,
            keep_last,
            json,
        }) => cmd::cmd_run(root, &overrides(Some(diff), *keep_last), *json),
        Some(Commands::Comment {
            project,
            environment_url,
            baseline_url,
            run_url,
            output,
        }) => {
            let ctx = CommentContext {
                project: project.clone(),
                environment_url: environment_url.clone(),
                baseline_url: baseline_url.clone(),
                run_url: run_url.clone(),
            };
            cmd::cmd_comment(root, &ConfigOverrides::default(), &ctx, output.as_deref())
        }
        Some(Commands::Init { force }) => cmd::cmd_init(root, *force),
        Some(Commands::Latest) => cmd::cmd_latest(root, &ConfigOverrides::default()),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            let _ = Cli::command().print_help();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        use shotdiff::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
