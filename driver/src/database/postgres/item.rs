use sqlx::PgConnection;

use kernel::interface::query::ItemQuery;
use kernel::interface::update::{CreateItem, ItemModifier};
use kernel::prelude::entity::{
    Item, ItemAvailable, ItemDescription, ItemId, ItemName, ItemRequestId, PageRequest, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresItemRepository;

#[async_trait::async_trait]
impl ItemQuery for PostgresItemRepository {
    type Transaction = PostgresConnection;
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError> {
        PgItemInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresConnection,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError> {
        PgItemInternal::find_by_id_for_update(con, id).await
    }

    async fn find_by_owner(
        &self,
        con: &mut PostgresConnection,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        PgItemInternal::find_by_owner(con, owner_id, page).await
    }

    async fn search(
        &self,
        con: &mut PostgresConnection,
        text: &str,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        PgItemInternal::search(con, text, page).await
    }

    async fn exists_request(
        &self,
        con: &mut PostgresConnection,
        id: &ItemRequestId,
    ) -> error_stack::Result<bool, KernelError> {
        PgItemInternal::exists_request(con, id).await
    }
}

#[async_trait::async_trait]
impl ItemModifier for PostgresItemRepository {
    type Transaction = PostgresConnection;
    async fn create(
        &self,
        con: &mut PostgresConnection,
        item: &CreateItem,
    ) -> error_stack::Result<ItemId, KernelError> {
        PgItemInternal::create(con, item).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        item: &Item,
    ) -> error_stack::Result<(), KernelError> {
        PgItemInternal::update(con, item).await
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    available: bool,
    owner_id: i64,
    request_id: Option<i64>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item::new(
            ItemId::new(row.id),
            ItemName::new(row.name),
            ItemDescription::new(row.description),
            ItemAvailable::new(row.available),
            UserId::new(row.owner_id),
            row.request_id.map(ItemRequestId::new),
        )
    }
}

pub(in crate::database) struct PgItemInternal;

impl PgItemInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError> {
        let row = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Item::from))
    }

    async fn find_by_id_for_update(
        con: &mut PgConnection,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError> {
        let row = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Item::from))
    }

    async fn find_by_owner(
        con: &mut PgConnection,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE owner_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id.as_ref())
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn search(
        con: &mut PgConnection,
        text: &str,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        // strpos keeps `%` and `_` in the text literal.
        let rows = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE available
              AND (strpos(lower(name), lower($1)) > 0 OR strpos(lower(description), lower($1)) > 0)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(text)
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn exists_request(
        con: &mut PgConnection,
        id: &ItemRequestId,
    ) -> error_stack::Result<bool, KernelError> {
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(SELECT 1 FROM item_requests WHERE id = $1)
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(exists)
    }

    async fn create(
        con: &mut PgConnection,
        item: &CreateItem,
    ) -> error_stack::Result<ItemId, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(item.name().as_ref())
        .bind(item.description().as_ref())
        .bind(item.available().as_ref())
        .bind(item.owner_id().as_ref())
        .bind(item.request_id().map(i64::from))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(ItemId::new(id))
    }

    async fn update(con: &mut PgConnection, item: &Item) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE items
            SET name = $2, description = $3, available = $4
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_ref())
        .bind(item.name().as_ref())
        .bind(item.description().as_ref())
        .bind(item.available().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
