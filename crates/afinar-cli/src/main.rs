//! afinar - command-line client for the afinar fine-tuning server

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod error;
mod http;
mod style;

use style::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Plain,
}

#[derive(Debug, Parser)]
#[command(
    name = "afinar",
    about = "Client for the afinar model fine-tuning server",
    version = env!("CARGO_PKG_VERSION"),
    help_template = style::HELP_TEMPLATE
)]
struct Cli {
    /// Server base URL
    #[arg(
        long,
        global = true,
        env = "AFINAR_SERVER",
        default_value = "http://localhost:8080"
    )]
    server: String,

    /// Output format for listing commands
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List available recipes and their configs
    Recipes,
    /// Show entrypoint signatures for a recipe
    Signatures {
        /// Recipe name
        recipe: String,
    },
    /// Download a model from the Hugging Face Hub
    Download {
        /// Hub repository id, e.g. meta-llama/Llama-3.2-1B-Instruct
        model_id: String,
        /// Directory to download into
        #[arg(long)]
        output_dir: Option<String>,
        /// Token for gated repositories
        #[arg(long)]
        hf_token: Option<String>,
        /// Comma-separated glob patterns of files to skip
        #[arg(long)]
        ignore_patterns: Option<String>,
    },
    /// Copy a builtin recipe or config to a local path
    Cp {
        /// Builtin recipe or config name
        file: String,
        /// Destination path
        destination: String,
        /// Do not overwrite an existing destination
        #[arg(short = 'n', long)]
        no_clobber: bool,
        /// Create missing parent directories
        #[arg(long)]
        make_parents: bool,
    },
    /// Run a recipe with a config
    Run {
        /// Recipe name or path to a custom recipe script
        recipe: String,
        /// Config name or path to a custom config
        config: String,
        /// Launch across multiple processes
        #[arg(long)]
        distributed: bool,
        /// Number of processes for a distributed run
        #[arg(long, default_value_t = 1)]
        num_processes: u32,
        /// key=value overrides forwarded to the recipe
        #[arg(last = true)]
        overrides: Vec<String>,
    },
    /// Validate a config file
    Validate {
        /// Path to the config file
        config: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let theme = if cli.no_color {
        Theme::no_color()
    } else {
        Theme::default()
    };

    let result = match cli.command {
        Commands::Recipes => commands::recipes::execute(&cli.server, cli.format).await,
        Commands::Signatures { recipe } => {
            commands::signatures::execute(&recipe, &cli.server, cli.format).await
        }
        Commands::Download {
            model_id,
            output_dir,
            hf_token,
            ignore_patterns,
        } => {
            commands::download::execute(
                model_id,
                output_dir,
                hf_token,
                ignore_patterns,
                &cli.server,
                &theme,
            )
            .await
        }
        Commands::Cp {
            file,
            destination,
            no_clobber,
            make_parents,
        } => {
            commands::cp::execute(
                file,
                destination,
                no_clobber,
                make_parents,
                &cli.server,
                &theme,
            )
            .await
        }
        Commands::Run {
            recipe,
            config,
            distributed,
            num_processes,
            overrides,
        } => {
            commands::run::execute(
                recipe,
                config,
                distributed,
                num_processes,
                overrides,
                &cli.server,
                &theme,
            )
            .await
        }
        Commands::Validate { config } => {
            commands::validate::execute(config, &cli.server, &theme).await
        }
    };

    if let Err(err) = result {
        theme.error(&err.to_string());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_command_parses_overrides() {
        let cli = Cli::try_parse_from([
            "afinar",
            "run",
            "lora_finetune_single_device",
            "llama3_2/1B_lora_single_device",
            "--num-processes",
            "2",
            "--",
            "batch_size=8",
        ])
        .expect("arguments should parse");

        match cli.command {
            Commands::Run {
                num_processes,
                overrides,
                ..
            } => {
                assert_eq!(num_processes, 2);
                assert_eq!(overrides, vec!["batch_size=8"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn server_flag_is_global() {
        let cli = Cli::try_parse_from(["afinar", "recipes", "--server", "http://host:9000"])
            .expect("arguments should parse");
        assert_eq!(cli.server, "http://host:9000");
    }
}
