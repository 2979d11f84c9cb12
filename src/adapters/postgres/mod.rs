//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCallSessionRepository` - Call session persistence
//! - `PostgresTurnRepository` - Append-only conversation log
//! - `PostgresCallSessionReader` - Dashboard analytics
//!
//! Schema lives in `migrations/` and is applied by [`run_migrations`].

mod call_session_reader;
mod call_session_repository;
mod turn_repository;

pub use call_session_reader::PostgresCallSessionReader;
pub use call_session_repository::PostgresCallSessionRepository;
pub use turn_repository::PostgresTurnRepository;

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Applies the bundled migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}
