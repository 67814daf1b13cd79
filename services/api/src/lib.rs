mod cli;
mod infra;
mod reports;
mod routes;
mod server;

use studio_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
