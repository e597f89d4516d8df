//! Load the demo dataset into the database named by `DATABASE_URL`.

use anyhow::Context;
use clientdesk_api::seed::{seed_demo_data, SeedOutcome, ADMIN_PASSWORD, ADMIN_USERNAME, CLIENT_PASSWORD};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clientdesk_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = clientdesk_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    clientdesk_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match seed_demo_data(&pool).await.context("Seeding failed")? {
        SeedOutcome::Seeded {
            clients,
            users,
            projects,
        } => {
            tracing::info!(clients, users, projects, "Database seeded");
            tracing::info!("Admin login: {ADMIN_USERNAME} / {ADMIN_PASSWORD}");
            tracing::info!("Client logins: acme_user, techstart_user / {CLIENT_PASSWORD}");
        }
        SeedOutcome::AlreadySeeded => {
            tracing::info!("Database already seeded, nothing to do");
        }
    }

    Ok(())
}
