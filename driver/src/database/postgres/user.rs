use sqlx::PgConnection;

use kernel::interface::query::UserQuery;
use kernel::prelude::entity::{User, UserEmail, UserId, UserName};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresConnection;
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::new(row.id),
            UserName::new(row.name),
            UserEmail::new(row.email),
        )
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        let found = row.map(User::from);
        Ok(found)
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::prelude::entity::UserId;
    use kernel::KernelError;

    use crate::database::postgres::test::insert_user;
    use crate::database::postgres::{PostgresDatabase, PostgresUserRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_by_id() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let user = insert_user(&mut connection, "user_find_by_id").await?;

        let found = PostgresUserRepository
            .find_by_id(&mut connection, user.id())
            .await?;
        assert_eq!(found, Some(user));

        let found = PostgresUserRepository
            .find_by_id(&mut connection, &UserId::new(-1))
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
