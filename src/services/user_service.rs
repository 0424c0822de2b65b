use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, SqlErr,
};

use crate::auth::password;
use crate::entities::user;
use crate::revision::timestamp;

/// How a login attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(user::Model),
    UnknownUser,
    WrongPassword,
}

pub struct UserService;

impl UserService {
    pub async fn find_by_username<C: ConnectionTrait>(
        conn: &C,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
    }

    /// Create an account. Returns `None` when the username is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the insert fails.
    pub async fn register(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> anyhow::Result<Option<user::Model>> {
        if Self::find_by_username(db, username).await?.is_some() {
            return Ok(None);
        }

        let account = user::ActiveModel {
            username: Set(username.to_string()),
            pw_hash: Set(password::hash_password(password)?),
            created: Set(timestamp()),
            ..Default::default()
        };

        match account.insert(db).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username, "Account created");
                Ok(Some(user))
            }
            // Lost a race with another registration for the same name
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username and password pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or the stored hash is malformed.
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> anyhow::Result<LoginOutcome> {
        let Some(user) = Self::find_by_username(db, username).await? else {
            return Ok(LoginOutcome::UnknownUser);
        };

        if password::verify_password(password, &user.pw_hash)? {
            Ok(LoginOutcome::Success(user))
        } else {
            Ok(LoginOutcome::WrongPassword)
        }
    }
}
