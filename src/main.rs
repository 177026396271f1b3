use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;

use number_classifier::config::DEFAULT_CONFIG_PATH;
use number_classifier::{logger, server, AppState, Config, ServerError};

#[derive(Parser, Debug)]
#[command(name = "number_classifier", version, about = "Classify integers over HTTP")]
struct Cli {
    /// Config file path, extension optional
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Listening port, overrides the config file and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("[ERROR] {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ServerError> {
    let cfg = Config::load_from(&cli.config, cli.port)?;
    logger::init(&cfg.logging)?;

    // Worker thread count follows the config, defaulting to CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    let bound = listener.local_addr()?;
    let state = Arc::new(AppState::new(cfg)?);

    logger::log_server_start(&bound, &state.config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    server::start_signal_handler(shutdown_tx);

    server::serve(listener, state, shutdown_rx).await
}
