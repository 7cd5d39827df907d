use sqlx::PgConnection;
use time::PrimitiveDateTime;

use kernel::interface::query::CommentQuery;
use kernel::interface::update::{CommentModifier, CreateComment};
use kernel::prelude::entity::{
    Comment, CommentId, CommentText, CreatedAt, ItemId, User, UserEmail, UserId, UserName,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresCommentRepository;

#[async_trait::async_trait]
impl CommentQuery for PostgresCommentRepository {
    type Transaction = PostgresConnection;
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &CommentId,
    ) -> error_stack::Result<Option<Comment>, KernelError> {
        PgCommentInternal::find_by_id(con, id).await
    }

    async fn find_by_item_ids(
        &self,
        con: &mut PostgresConnection,
        item_ids: &[ItemId],
    ) -> error_stack::Result<Vec<Comment>, KernelError> {
        PgCommentInternal::find_by_item_ids(con, item_ids).await
    }
}

#[async_trait::async_trait]
impl CommentModifier for PostgresCommentRepository {
    type Transaction = PostgresConnection;
    async fn create(
        &self,
        con: &mut PostgresConnection,
        comment: &CreateComment,
    ) -> error_stack::Result<CommentId, KernelError> {
        PgCommentInternal::create(con, comment).await
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    text: String,
    item_id: i64,
    created: PrimitiveDateTime,
    author_id: i64,
    author_name: String,
    author_email: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        let author = User::new(
            UserId::new(row.author_id),
            UserName::new(row.author_name),
            UserEmail::new(row.author_email),
        );
        Comment::new(
            CommentId::new(row.id),
            CommentText::new(row.text),
            ItemId::new(row.item_id),
            author,
            CreatedAt::new(row.created),
        )
    }
}

pub(in crate::database) struct PgCommentInternal;

impl PgCommentInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CommentId,
    ) -> error_stack::Result<Option<Comment>, KernelError> {
        let row = sqlx::query_as::<_, CommentRow>(
            // language=postgresql
            r#"
            SELECT c.id, c.text, c.item_id, c.created,
                   u.id AS author_id, u.name AS author_name, u.email AS author_email
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Comment::from))
    }

    async fn find_by_item_ids(
        con: &mut PgConnection,
        item_ids: &[ItemId],
    ) -> error_stack::Result<Vec<Comment>, KernelError> {
        let ids: Vec<i64> = item_ids.iter().map(|id| i64::from(*id)).collect();
        let rows = sqlx::query_as::<_, CommentRow>(
            // language=postgresql
            r#"
            SELECT c.id, c.text, c.item_id, c.created,
                   u.id AS author_id, u.name AS author_name, u.email AS author_email
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.item_id = ANY($1)
            ORDER BY c.created, c.id
            "#,
        )
        .bind(ids)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        comment: &CreateComment,
    ) -> error_stack::Result<CommentId, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(comment.text().as_ref())
        .bind(comment.item_id().as_ref())
        .bind(comment.author_id().as_ref())
        .bind(comment.created())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(CommentId::new(id))
    }
}
