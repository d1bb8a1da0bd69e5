//! PostgreSQL user repository implementation.

use crate::error::{Error, Result};
use crate::providers::UserRepository;
use crate::state::{Address, PersonName, User, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const SELECT_USER: &str = r"
    SELECT id, first_name, middle_name, last_name, phone, email, password_hash,
           state, country, city, street, house_number, zip, is_admin, created_at
    FROM users
";

/// Row shape for the `users` table.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    phone: String,
    email: String,
    password_hash: String,
    state: String,
    country: String,
    city: String,
    street: String,
    house_number: i32,
    zip: i32,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            name: PersonName {
                first: row.first_name,
                middle: row.middle_name,
                last: row.last_name,
            },
            phone: row.phone,
            email: row.email,
            password_hash: row.password_hash,
            address: Address {
                state: row.state,
                country: row.country,
                city: row.city,
                street: row.street,
                house_number: row.house_number,
                zip: row.zip,
            },
            is_admin: row.is_admin,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new PostgreSQL user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn find(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to get user: {e}")))?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to get user by email: {e}")))?;

        Ok(row.map(User::from))
    }

    async fn create(&self, user: &User) -> Result<User> {
        sqlx::query(
            r"
            INSERT INTO users
                (id, first_name, middle_name, last_name, phone, email, password_hash,
                 state, country, city, street, house_number, zip, is_admin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(user.id.0)
        .bind(&user.name.first)
        .bind(&user.name.middle)
        .bind(&user.name.last)
        .bind(&user.phone)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.address.state)
        .bind(&user.address.country)
        .bind(&user.address.city)
        .bind(&user.address.street)
        .bind(user.address.house_number)
        .bind(user.address.zip)
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Error::Validation("user already exists".to_string());
                }
            }
            Error::Storage(format!("failed to create user: {e}"))
        })?;

        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET first_name = $2,
                middle_name = $3,
                last_name = $4,
                phone = $5,
                state = $6,
                country = $7,
                city = $8,
                street = $9,
                house_number = $10,
                zip = $11,
                is_admin = $12
            WHERE id = $1
            ",
        )
        .bind(user.id.0)
        .bind(&user.name.first)
        .bind(&user.name.middle)
        .bind(&user.name.last)
        .bind(&user.phone)
        .bind(&user.address.state)
        .bind(&user.address.country)
        .bind(&user.address.city)
        .bind(&user.address.street)
        .bind(user.address.house_number)
        .bind(user.address.zip)
        .bind(user.is_admin)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to update user: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("User"));
        }

        Ok(user.clone())
    }

    async fn delete(&self, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to list users: {e}")))?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
