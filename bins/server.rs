use std::process::ExitCode;

use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

const SERVICE: &str = "academic_records";

/// `server.worker_threads` from config, else `TOKIO_WORKER_THREADS`.
fn worker_threads() -> Option<usize> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok()),
    }
}

fn main() -> ExitCode {
    // .env first so RUST_LOG and LOG_FORMAT apply
    dotenv().ok();
    init_logging(LogFormat::from_env());

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();

    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, %instance_id, pid, message = %info, "panic");
    }));

    let threads = worker_threads();
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = threads {
        builder.worker_threads(n);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        %instance_id,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = threads.unwrap_or_default(),
        "starting"
    );

    // run() returns once a shutdown signal has drained open requests
    match rt.block_on(server::run()) {
        Ok(()) => {
            info!(service = SERVICE, %instance_id, "stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = SERVICE, %instance_id, error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
