use anyhow::Context;
use loumo_admin::db::{create_orm_conn, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL is required to run migrations")?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm, "migrations").await?;
    tracing::info!("migrations applied");
    Ok(())
}
