//! Demo data for local development, loaded by the `clientdesk-seed` binary.
//!
//! Creates the `admin` account, three clients, one login per the first two
//! clients, and eight projects spread over every status. Running it again is
//! a no-op once `admin` exists.

use clientdesk_core::error::CoreError;
use clientdesk_core::roles::UserRole;
use clientdesk_core::status::ProjectStatus;
use clientdesk_core::types::DbId;
use clientdesk_core::validation::validate_input;
use clientdesk_db::models::client::CreateClient;
use clientdesk_db::models::project::CreateProject;
use clientdesk_db::models::user::CreateUser;
use clientdesk_db::repositories::{ClientRepo, ProjectRepo, UserRepo};
use clientdesk_db::DbPool;
use sqlx::PgConnection;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CLIENT_PASSWORD: &str = "client123";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// What [`seed_demo_data`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded {
        clients: usize,
        users: usize,
        projects: usize,
    },
    AlreadySeeded,
}

struct SeedClient {
    name: &'static str,
    email: &'static str,
    notes: &'static str,
    /// Login created for this client, if any.
    login: Option<(&'static str, &'static str)>,
}

const CLIENTS: [SeedClient; 3] = [
    SeedClient {
        name: "Acme Corporation",
        email: "contact@acme.com",
        notes: "Large enterprise client with multiple ongoing projects",
        login: Some(("acme_user", "user@acme.com")),
    },
    SeedClient {
        name: "TechStart Inc",
        email: "hello@techstart.io",
        notes: "Startup focused on AI solutions",
        login: Some(("techstart_user", "user@techstart.io")),
    },
    SeedClient {
        name: "Global Solutions Ltd",
        email: "info@globalsolutions.com",
        notes: "International consulting firm",
        login: None,
    },
];

/// `(client index into CLIENTS, title, status, description)`
const PROJECTS: [(usize, &str, ProjectStatus, &str); 8] = [
    (
        0,
        "Website Redesign",
        ProjectStatus::InProgress,
        "Complete overhaul of corporate website with modern design",
    ),
    (
        0,
        "Mobile App Development",
        ProjectStatus::Planning,
        "iOS and Android app for customer engagement",
    ),
    (
        0,
        "Cloud Migration",
        ProjectStatus::Completed,
        "Migrate on-premise infrastructure to AWS",
    ),
    (
        1,
        "AI Chatbot Integration",
        ProjectStatus::InProgress,
        "Implement GPT-powered customer support chatbot",
    ),
    (
        1,
        "Data Analytics Platform",
        ProjectStatus::Blocked,
        "Build real-time analytics dashboard - waiting for API access",
    ),
    (
        2,
        "Security Audit",
        ProjectStatus::Completed,
        "Comprehensive security assessment and penetration testing",
    ),
    (
        2,
        "CRM Implementation",
        ProjectStatus::Planning,
        "Deploy and customize Salesforce CRM",
    ),
    (
        2,
        "E-commerce Platform",
        ProjectStatus::InProgress,
        "Build custom e-commerce solution with payment integration",
    ),
];

/// Populate an empty database with the demo dataset.
///
/// Runs in a single transaction: a failure part-way leaves the database
/// untouched, so the next run starts from scratch.
pub async fn seed_demo_data(pool: &DbPool) -> Result<SeedOutcome, SeedError> {
    let mut tx = pool.begin().await?;

    if UserRepo::find_by_username(&mut *tx, ADMIN_USERNAME)
        .await?
        .is_some()
    {
        tracing::info!("Admin user already present, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let outcome = insert_dataset(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!(?outcome, "Demo data seeded");
    Ok(outcome)
}

async fn insert_dataset(conn: &mut PgConnection) -> Result<SeedOutcome, SeedError> {
    create_user(
        conn,
        ADMIN_USERNAME,
        "admin@dashboard.com",
        ADMIN_PASSWORD,
        UserRole::Admin,
        None,
    )
    .await?;
    let mut users = 1;

    let mut client_ids: Vec<DbId> = Vec::with_capacity(CLIENTS.len());
    for seed in &CLIENTS {
        let input = CreateClient {
            name: seed.name.to_string(),
            email: Some(seed.email.to_string()),
            notes: Some(seed.notes.to_string()),
        };
        validate_input(&input)?;
        let client = ClientRepo::create(&mut *conn, &input).await?;
        tracing::debug!(client_id = client.id, name = %client.name, "Seeded client");

        if let Some((username, email)) = seed.login {
            create_user(
                conn,
                username,
                email,
                CLIENT_PASSWORD,
                UserRole::Client,
                Some(client.id),
            )
            .await?;
            users += 1;
        }
        client_ids.push(client.id);
    }

    for (client_index, title, status, description) in PROJECTS {
        let input = CreateProject {
            title: title.to_string(),
            client_id: client_ids[client_index],
            status,
            description: Some(description.to_string()),
        };
        validate_input(&input)?;
        ProjectRepo::create(&mut *conn, &input).await?;
    }

    Ok(SeedOutcome::Seeded {
        clients: client_ids.len(),
        users,
        projects: PROJECTS.len(),
    })
}

async fn create_user(
    conn: &mut PgConnection,
    username: &str,
    email: &str,
    password: &str,
    role: UserRole,
    client_id: Option<DbId>,
) -> Result<(), SeedError> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| SeedError::Invalid(CoreError::Validation(msg)))?;
    let password_hash = hash_password(password).map_err(|e| SeedError::Hash(e.to_string()))?;

    let input = CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        role,
        client_id,
    };
    validate_input(&input)?;
    let user = UserRepo::create(conn, &input).await?;
    tracing::debug!(user_id = user.id, username = %user.username, role = %user.role, "Seeded user");
    Ok(())
}
