use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{booking::*, comment::*, item::*, user::*};

mod booking;
mod comment;
mod item;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";
static POSTGRES_MAX_CONNECTIONS: &str = "POSTGRES_MAX_CONNECTIONS";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Lock waits and serialization failures surface as retryable conflicts.
const CONFLICT_CODES: [&str; 3] = ["40001", "40P01", "55P03"];

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let max_connections = match env(POSTGRES_MAX_CONNECTIONS) {
            Ok(value) => value.parse::<u32>().convert_error()?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .convert_error()
            .attach_printable("failed to apply migrations")?;
        tracing::debug!(max_connections, "postgres pool ready");
        Ok(Self { pool })
    }
}

/// One database transaction. Dropping it without `commit` rolls back.
pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(transaction))
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db)
                    if db
                        .code()
                        .is_some_and(|code| CONFLICT_CODES.contains(&&*code)) =>
                {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl<T> ConvertError for Result<T, MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

#[cfg(test)]
pub(in crate::database) mod test {
    use kernel::prelude::entity::{
        Item, ItemAvailable, ItemDescription, ItemId, ItemName, User, UserEmail, UserId, UserName,
    };
    use kernel::KernelError;
    use sqlx::PgConnection;

    use crate::error::ConvertError;

    pub(in crate::database) async fn insert_user(
        con: &mut PgConnection,
        name: &str,
    ) -> error_stack::Result<User, KernelError> {
        let email = format!("{name}@example.com");
        let id: i64 = sqlx::query_scalar(
            // language=postgresql
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(&email)
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(User::new(
            UserId::new(id),
            UserName::new(name),
            UserEmail::new(email),
        ))
    }

    pub(in crate::database) async fn insert_item(
        con: &mut PgConnection,
        owner: &User,
        name: &str,
        description: &str,
        available: bool,
    ) -> error_stack::Result<Item, KernelError> {
        let id: i64 = sqlx::query_scalar(
            // language=postgresql
            r#"
            INSERT INTO items (name, description, available, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(available)
        .bind(owner.id().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Item::new(
            ItemId::new(id),
            ItemName::new(name),
            ItemDescription::new(description),
            ItemAvailable::new(available),
            *owner.id(),
            None,
        ))
    }
}
