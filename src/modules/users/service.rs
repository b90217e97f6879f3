use coursehub_core::AppError;
use coursehub_models::User;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, role, created_at FROM users ORDER BY created_at DESC",
        )
        .fetch_all(db)
        .await?;

        debug!(returned = users.len(), "Users fetched");
        Ok(users)
    }

    /// Deletes a user together with everything they own. Tokens already issued
    /// to that user stop working on their next request.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "users"))]
    pub async fn delete_user(db: &PgPool, requester_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if requester_id == id {
            warn!(user.id = %id, "Admin attempted to delete own account");
            return Err(AppError::bad_request(anyhow::anyhow!(
                "You cannot delete your own account"
            )));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        info!(user.id = %id, deleted_by = %requester_id, "User deleted");
        Ok(())
    }
}
