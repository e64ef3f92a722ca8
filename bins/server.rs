use common::utils::logging::{init_logging, LogFormat, DEFAULT_FILTER};
use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and DATABASE_URL are visible
    dotenv().ok();

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "user-server", event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let format = cfg.logging.format.parse::<LogFormat>().unwrap_or_default();
    init_logging(format, cfg.logging.filter.as_deref().unwrap_or(DEFAULT_FILTER));

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "user-server", event = "panic", pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "user-server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "user-server",
        event = "start",
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "user server starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "user-server", event = "stop", pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "user-server", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
