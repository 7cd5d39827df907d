use destructure::Destructure;
use time::PrimitiveDateTime;
use vodca::References;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CommentId, CommentText, ItemId, UserId};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CreateComment {
    text: CommentText,
    item_id: ItemId,
    author_id: UserId,
    created: PrimitiveDateTime,
}

impl CreateComment {
    pub fn new(
        text: CommentText,
        item_id: ItemId,
        author_id: UserId,
        created: PrimitiveDateTime,
    ) -> Self {
        Self {
            text,
            item_id,
            author_id,
            created,
        }
    }
}

#[async_trait::async_trait]
pub trait CommentModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        comment: &CreateComment,
    ) -> error_stack::Result<CommentId, KernelError>;
}

pub trait DependOnCommentModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CommentModifier: CommentModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn comment_modifier(&self) -> &Self::CommentModifier;
}
