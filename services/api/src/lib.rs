mod cli;
mod demo;
mod export;
mod infra;
mod intake;
mod routes;
mod server;

use resume_ranker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
