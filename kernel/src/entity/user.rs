mod contact;
mod id;

pub use self::{contact::*, id::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
}

impl User {
    pub fn new(id: UserId, name: UserName, email: UserEmail) -> Self {
        Self { id, name, email }
    }
}
