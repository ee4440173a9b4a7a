//! Create-admin command - Seeds a dashboard account.

use std::sync::Arc;

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{AuthService, Authenticator};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let uow = Arc::new(Persistence::new(db.get_connection()));
    let auth = Authenticator::new(uow, config);

    let user = auth
        .create_admin(args.username, args.password, args.role)
        .await?;

    tracing::info!(user_id = user.id, role = %user.role, "Account created");
    println!("Created {} account '{}' (id {})", user.role, user.username, user.id);

    Ok(())
}
