mod api;
mod config;
mod dashboard;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::Result;
use log::info;

use config::Config;
use logging::LogTarget;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if run::print_info(&args)? {
        return Ok(());
    }
    let (config, args) = Config::from_env(&args)?;
    let interactive = args.len() <= 1;

    if interactive {
        let filter = config.log_filter.as_deref().unwrap_or("info");
        logging::init(LogTarget::File(config::data_dir()?), filter)?;
    } else {
        let filter = config.log_filter.as_deref().unwrap_or("warn");
        logging::init(LogTarget::Stderr, filter)?;
    }
    let backend = api::HttpBackend::new(&config.api_base_url);
    info!("Using backend at {}", backend.base_url());
    let mut dashboard = dashboard::Dashboard::new(Box::new(backend));

    if interactive {
        run::as_tui(&mut dashboard)
    } else {
        run::as_cli(&args, &mut dashboard)
    }
}
