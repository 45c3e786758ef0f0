use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::AppError,
    service::{
        mail::{LogMailer, SharedMailer, SmtpMailer},
        user::UserService,
    },
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions live in the same Sqlite database as the application data and expire after
/// seven days of inactivity.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Session table migrated, layer ready to be applied
/// - `Err(AppError::DbErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let session_store = SqliteStore::new(db.get_sqlite_connection_pool().clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7))))
}

/// Selects the mail transport.
///
/// Uses the SMTP relay when it is fully configured. Otherwise mail is written to the log
/// so password resets and reminders still work in development.
pub fn build_mailer(config: &Config) -> Result<SharedMailer, AppError> {
    match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, "Sending mail through SMTP relay");
            Ok(Arc::new(SmtpMailer::new(smtp)?))
        }
        None => {
            tracing::warn!("SMTP not configured, outgoing mail will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Creates the configured administrator when the database has none.
///
/// Without bootstrap credentials and without an administrator nobody can manage users,
/// which is logged as a warning.
pub async fn check_for_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let Some(admin) = &config.bootstrap_admin else {
        if !UserRepository::new(db).admin_exists().await? {
            tracing::warn!(
                "No administrator exists; set ADMIN_EMPLOYEE_NUMBER, ADMIN_EMAIL and ADMIN_PASSWORD to create one"
            );
        }
        return Ok(());
    };

    if let Some(user) = UserService::new(db).ensure_bootstrap_admin(admin).await? {
        tracing::info!(
            employee_number = %user.employee_number,
            "Created bootstrap administrator"
        );
    }

    Ok(())
}
