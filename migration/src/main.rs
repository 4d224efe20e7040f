use sea_orm_migration::prelude::*;

/// Schema CLI for the air-quality tables.
///
/// The URL comes from `-u/--database-url` or `DATABASE_URL`; the backfill's
/// own `DB_URL` can be passed through with `migration -u "$DB_URL" up`.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
