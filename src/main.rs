use clap::{Parser, Subcommand};
use device_lists::app::check_use_case::check_device;
use device_lists::app::update_use_case::{report, update_arcore, update_ligar};
use device_lists::config::Config;
use device_lists::constants::{self, ARCORE_SOURCE, LIGAR_SOURCE};
use device_lists::logging;
use device_lists::sources::ModelPolicy;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "device_lists")]
#[command(about = "Builds normalized AR device-support lists")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (default: config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the ARCore device list and write it as JSON
    Arcore {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Convert the LiGAR adaptation export to JSON
    Ligar {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Which model columns become records
        #[arg(long, value_enum)]
        policy: Option<ModelPolicy>,
    },
    /// Run every source in turn
    All,
    /// Look up a device in a generated list
    Check {
        #[arg(long)]
        list: PathBuf,
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        model: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();

    let cli = Cli::parse();

    let mut config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            println!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ok = match cli.command {
        Commands::Arcore { url, output } => {
            if let Some(url) = url {
                config.arcore.url = url;
            }
            if let Some(output) = output {
                config.arcore.output = output;
            }
            report(&update_arcore(&config.arcore).await)
        }
        Commands::Ligar {
            input,
            output,
            policy,
        } => {
            if let Some(input) = input {
                config.ligar.input = input;
            }
            if let Some(output) = output {
                config.ligar.output = output;
            }
            if let Some(policy) = policy {
                config.ligar.model_policy = policy;
            }
            report(&update_ligar(&config.ligar).await)
        }
        Commands::All => {
            let mut all_ok = true;
            for source in constants::get_supported_sources() {
                println!("\n== {source} ==");
                let outcome = match source {
                    ARCORE_SOURCE => update_arcore(&config.arcore).await,
                    LIGAR_SOURCE => update_ligar(&config.ligar).await,
                    _ => continue,
                };
                all_ok &= report(&outcome);
            }
            all_ok
        }
        Commands::Check {
            list,
            vendor,
            model,
        } => match check_device(&list, &vendor, &model) {
            Ok(message) => {
                println!("{message}");
                true
            }
            Err(e) => {
                error!("Support check failed: {}", e);
                println!("Error: {e}");
                false
            }
        },
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
