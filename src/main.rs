use std::future::{self, Future};
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

mod args;
use args::{Args, Command};

mod backend;
use backend::Backend;

mod login;
mod password;
mod routes;
mod user;
mod verifier;
use verifier::Verifier;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    match args.command() {
        Some(Command::HashPassword) => hash_password(),
        None => serve(&args).await,
    }
}

fn init_logging() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "credcheck=info".into());

    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

async fn serve(args: &Args) -> ExitCode {
    let addr = match args.addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("invalid address: {e}");
            return ExitCode::FAILURE;
        }
    };

    let backend = match Backend::new(args.data_dir()).await {
        Ok(backend) => backend,
        Err(e) => {
            error!("couldn't open user store in {:?}: {e}", args.data_dir());
            return ExitCode::FAILURE;
        }
    };

    let verifier = Arc::new(Verifier::new(backend));

    let server = warp::serve(routes::routes(Arc::clone(&verifier)))
        .try_bind_with_graceful_shutdown(addr, shutdown(tokio::signal::ctrl_c()));

    let (addr, server) = match server {
        Ok(s) => s,
        Err(e) => {
            error!("couldn't listen on {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Server running on http://{addr}");
    server.await;

    verifier.close().await;

    ExitCode::SUCCESS
}

/// Resolves once `signal` fires. If the signal can't be listened for,
/// never resolves: the server keeps running rather than stopping at once.
async fn shutdown(signal: impl Future<Output = io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            error!("couldn't listen for ctrl-c, graceful shutdown disabled: {e}");
            future::pending::<()>().await;
        }
    }
}

fn hash_password() -> ExitCode {
    let mut password = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut password) {
        error!("couldn't read password: {e}");
        return ExitCode::FAILURE;
    }

    let password = password.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        error!("empty password");
        return ExitCode::FAILURE;
    }

    match password::hash_password(password) {
        Ok(hash) => {
            println!("{hash}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("couldn't hash password: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::time::Duration;

    use tokio::time::timeout;

    #[tokio::test]
    async fn shutdown_on_signal() {
        let done = timeout(Duration::from_secs(1), shutdown(async { Ok::<(), io::Error>(()) })).await;

        assert!(done.is_ok());
    }

    #[tokio::test]
    async fn no_shutdown_without_signal_handler() {
        let failed = async { Err::<(), _>(io::Error::new(io::ErrorKind::Other, "no signal driver")) };

        let done = timeout(Duration::from_millis(100), shutdown(failed)).await;

        assert!(done.is_err());
    }
}
