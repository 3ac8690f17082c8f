//! Schema CLI for the social database.
//!
//! `DATABASE_URL=postgres://... cargo run -p migration -- up` applies pending
//! migrations; `status`, `down` and `fresh` work as in `sea-orm-cli migrate`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
