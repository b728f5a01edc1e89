// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use pdfq_server::config::{Cli, Config};
use pdfq_server::{Listener, ServerContext};
use tracing::error;

fn setup_logging(root: &std::path::Path) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = root.join(".pdfq");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "server.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_cli(cli);

    let _guard = match setup_logging(&config.root) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("failed to set up logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = Arc::new(ServerContext::new(config.root.clone(), config.token.clone(), config.bind.clone(), config.port));
    if let Err(e) = ctx.queue.init() {
        error!(error = %e, "failed to initialize queue directories");
        return ExitCode::FAILURE;
    }

    let listener = match Listener::bind(ctx).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(bind = %config.bind, port = config.port, "pdfq-server listening");
    listener.run().await;
    ExitCode::SUCCESS
}
