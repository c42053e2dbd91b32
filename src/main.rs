use clap::Parser;

use paceline::cli::command::Cli;
use paceline::error::{Error, StoreError};

/// Map a failure kind to the process exit status: validation problems are 2,
/// missing records 3, concurrency conflicts 4, everything else 1.
fn exit_code(error: &Error) -> i32 {
    match error {
        Error::Domain(_) | Error::InvalidArgument { .. } | Error::Store(StoreError::Invalid(_)) => {
            2
        }
        Error::Store(StoreError::NotFound { .. }) => 3,
        Error::Store(StoreError::Conflict { .. }) => 4,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = paceline::cli::run::execute(cli).await {
        eprintln!("error: {e}");
        std::process::exit(exit_code(&e));
    }
}
