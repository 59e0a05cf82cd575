mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use ability_quiz::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
