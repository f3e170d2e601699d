use coi_serve::{logger, Config, DocumentRoot, ServeError, Server};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServeError> {
    let cfg = Config::load()?;

    // Request paths resolve against the working directory from here on
    std::env::set_current_dir(&cfg.root).map_err(|e| ServeError::document_root(&cfg.root, e))?;
    let root = DocumentRoot::open(".")?;

    // One request at a time: a single-threaded runtime and a sequential accept loop
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ServeError::Runtime)?;

    runtime.block_on(async {
        let server = Server::bind(&cfg, root)?;
        logger::log_server_start(&server.local_addr());

        server.run_until(ctrl_c()).await;
        logger::log_shutdown();
        Ok(())
    })
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        std::future::pending::<()>().await;
    }
}
