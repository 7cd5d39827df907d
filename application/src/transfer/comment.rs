use time::PrimitiveDateTime;

use kernel::prelude::entity::{Comment, DestructComment};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: PrimitiveDateTime,
}

impl From<Comment> for CommentDto {
    fn from(value: Comment) -> Self {
        let DestructComment {
            id,
            text,
            author,
            created,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            text: text.into(),
            author_name: author.name().to_string(),
            created: created.into(),
        }
    }
}

pub struct CreateCommentDto {
    pub item_id: i64,
    pub author_id: i64,
    pub text: String,
}
