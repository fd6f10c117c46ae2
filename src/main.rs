use clap::Parser;
use std::sync::Arc;

use spa_rewrite::cli::{self, Args, Command};
use spa_rewrite::config::{AppState, Config};
use spa_rewrite::routing::RewriteRules;
use spa_rewrite::{edge, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cfg = Config::load_from(&args.config)?;

    match args.command {
        Command::Rewrite { uris, json } => {
            let rules = RewriteRules::try_from(&cfg.rewrite)?;
            println!("{}", cli::render_rewrites(&uris, &rules, json)?);
        }
        Command::Event { file } => {
            let rules = RewriteRules::try_from(&cfg.rewrite)?;
            let input = cli::read_input(file.as_deref())?;
            println!("{}", edge::handle_event_json(&input, &rules)?);
        }
        Command::Config => print!("{}", cfg.to_toml()?),
        Command::Serve => serve(cfg)?,
    }

    Ok(())
}

fn serve(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    // Tokio runtime sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(&cfg)?);
    let listener = server::bind_listener(addr)?;

    logger::log_server_start(&addr, &cfg, &state.rules);

    // LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    let still_open = local
        .run_until(server::run(listener, state, server::shutdown_signal()))
        .await;

    if still_open > 0 {
        logger::log_warning(&format!(
            "Exiting with {still_open} connection(s) still open"
        ));
    }
    Ok(())
}
