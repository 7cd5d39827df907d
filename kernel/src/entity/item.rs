mod available;
mod description;
mod id;
mod name;
mod request_id;

pub use self::{available::*, description::*, id::*, name::*, request_id::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::UserId;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Item {
    id: ItemId,
    name: ItemName,
    description: ItemDescription,
    available: ItemAvailable,
    owner_id: UserId,
    request_id: Option<ItemRequestId>,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: ItemName,
        description: ItemDescription,
        available: ItemAvailable,
        owner_id: UserId,
        request_id: Option<ItemRequestId>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            available,
            owner_id,
            request_id,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id.eq(user_id)
    }

    pub fn is_available(&self) -> bool {
        *self.available.as_ref()
    }

    /// Applies the given fields and keeps the rest. Blank texts leave the stored value in place.
    pub fn patch(
        self,
        name: Option<String>,
        description: Option<String>,
        available: Option<bool>,
    ) -> Self {
        let DestructItem {
            id,
            name: stored_name,
            description: stored_description,
            available: stored_available,
            owner_id,
            request_id,
        } = self.into_destruct();
        Self {
            id,
            name: name
                .and_then(|name| ItemName::parse(name).ok())
                .unwrap_or(stored_name),
            description: description
                .and_then(|description| ItemDescription::parse(description).ok())
                .unwrap_or(stored_description),
            available: available.map(ItemAvailable::new).unwrap_or(stored_available),
            owner_id,
            request_id,
        }
    }
}
