mod id;
mod text;

pub use self::{id::*, text::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{CreatedAt, ItemId, User};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Comment {
    id: CommentId,
    text: CommentText,
    item_id: ItemId,
    author: User,
    created: CreatedAt<Comment>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        text: CommentText,
        item_id: ItemId,
        author: User,
        created: CreatedAt<Comment>,
    ) -> Self {
        Self {
            id,
            text,
            item_id,
            author,
            created,
        }
    }
}
