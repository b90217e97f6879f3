use coursehub_auth::create_access_token;
use coursehub_config::JwtConfig;
use coursehub_core::{AppError, hash_password, verify_password};
use coursehub_models::{AuthPayload, LoginRequest, RegisterRequest, User, UserRole};
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::metrics::{track_user_login, track_user_registered};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email, user.role = %dto.role, db.table = "users"))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthPayload, AppError> {
        debug!(user.username = %dto.username, "Registering new user");

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR username = $2)",
        )
        .bind(&dto.email)
        .bind(&dto.username)
        .fetch_one(db)
        .await?;

        if exists {
            warn!(user.email = %dto.email, "Registration with existing email or username");
            return Err(duplicate_user());
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, role, created_at",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            // A concurrent registration can win the race past the EXISTS check
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(user.email = %dto.email, "Unique violation registering user");
                return duplicate_user();
            }
            error!(error = %e, user.email = %dto.email, "Database error creating user");
            AppError::from(e)
        })?;

        let issued = create_access_token(user.id, user.role, jwt_config)?;
        track_user_registered(user.role.as_str());

        info!(user.id = %user.id, user.role = %user.role, "User registered successfully");
        Ok(AuthPayload::new(user, issued))
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email, db.table = "users"))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthPayload, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            username: String,
            email: String,
            #[sqlx(try_from = "String")]
            role: UserRole,
            password_hash: String,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let Some(row) = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, email, role, password_hash, created_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        else {
            warn!(user.email = %dto.email, "Login attempt for unknown email");
            track_user_login(false);
            return Err(invalid_login());
        };

        if !verify_password(&dto.password, &row.password_hash)? {
            warn!(user.id = %row.id, "Login attempt with wrong password");
            track_user_login(false);
            return Err(invalid_login());
        }

        let issued = create_access_token(row.id, row.role, jwt_config)?;
        track_user_login(true);

        info!(user.id = %row.id, user.role = %row.role, "User logged in");

        let user = User {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
        };
        Ok(AuthPayload::new(user, issued))
    }
}

fn duplicate_user() -> AppError {
    AppError::bad_request(anyhow::anyhow!(
        "User with this email or username already exists"
    ))
}

fn invalid_login() -> AppError {
    AppError::unauthorized(anyhow::anyhow!("Invalid email or password"))
}
