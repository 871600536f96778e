use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use eofmark::{
    find_config_file, generate_init_file, load_config, merge_repair_policy, output,
    should_use_colors, CliRepairOptions, CommentTable, Config, EofmarkToml, Interrupt,
    OutputContext,
};

const EXIT_USAGE: u8 = 1;

#[derive(Parser)]
#[command(name = "eofmark")]
#[command(
    version,
    about = "Checks for Vim EOF comments in all matching files in specific directories"
)]
struct Cli {
    /// The target directories to be checked
    #[arg(value_name = "/path/to/directory", required_unless_present = "init")]
    directories: Vec<String>,

    /// A comma-separated list of file extensions (e.g. "lua,c,cpp,cc,c++")
    #[arg(
        short = 'e',
        long = "file-extensions",
        value_name = "EXT1[,EXT2[,EXT3[,...]]]",
        value_delimiter = ',',
        value_parser = parse_extension,
        required_unless_present = "init"
    )]
    extensions: Vec<String>,

    /// Insert a blank line before a repaired comment
    #[arg(long, conflicts_with = "no_blank_line_before_repair")]
    blank_line_before_repair: bool,

    /// Never insert a blank line before a repaired comment
    #[arg(long)]
    no_blank_line_before_repair: bool,

    /// Report every checked file and a summary on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Generate a template eofmark.toml configuration file
    #[arg(long, conflicts_with_all = ["directories", "extensions"])]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn parse_extension(raw: &str) -> Result<String, String> {
    let ext = raw.trim();
    if CommentTable::builtin().contains(ext) {
        return Ok(ext.to_string());
    }
    let supported: Vec<_> = CommentTable::builtin().extensions().collect();
    Err(format!(
        "unsupported extension `{ext}` (supported: {})",
        supported.join(",")
    ))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e),
    };

    let use_colors = should_use_colors(cli.color, cli.no_color);
    let show_progress = !cli.verbose && std::io::stderr().is_terminal();
    let ctx = OutputContext::new(use_colors, cli.verbose, show_progress);

    // Handle --init command
    if cli.init {
        return handle_init(&ctx);
    }

    let interrupt = match Interrupt::install() {
        Ok(interrupt) => interrupt,
        Err(e) => {
            output::print_warning(&format!("Could not install interrupt handler: {e}"), &ctx);
            Interrupt::default()
        }
    };

    let toml_config = load_configuration(&cli.config, &ctx);

    let cli_options = CliRepairOptions {
        blank_line_before: if cli.blank_line_before_repair {
            Some(true)
        } else if cli.no_blank_line_before_repair {
            Some(false)
        } else {
            None
        },
    };

    let config = Config {
        extensions: cli.extensions,
        repair: merge_repair_policy(&cli_options, toml_config.as_ref().map(|c| &c.repair)),
    };

    match eofmark::run(&cli.directories, &config, &interrupt, &ctx) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string(), &ctx);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Help and version go to stdout with status 0; any other parse failure
/// prints the error on stderr, usage on stdout, and exits 1.
fn handle_parse_error(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{e}");
            ExitCode::SUCCESS
        }
        _ => {
            eprint!("{}", e.render());
            if Cli::command().print_help().is_ok() {
                println!();
            }
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn handle_init(ctx: &OutputContext) -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::print_error(&e.to_string(), ctx);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>, ctx: &OutputContext) -> Option<EofmarkToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            if ctx.verbose {
                eprintln!("Using config: {}", p.display());
            }
            Some(config)
        }
        Err(e) => {
            output::print_warning(&format!("Failed to load {}: {e}", p.display()), ctx);
            None
        }
    })
}
