use device_lists::app::update_use_case::{report, update_arcore};
use device_lists::config::Config;
use device_lists::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();

    let outcome = match Config::load_or_default(None) {
        Ok(config) => update_arcore(&config.arcore).await,
        Err(e) => Err(e),
    };

    if report(&outcome) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
