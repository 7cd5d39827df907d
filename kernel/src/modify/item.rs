use destructure::Destructure;
use vodca::References;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Item, ItemAvailable, ItemDescription, ItemId, ItemName, ItemRequestId, UserId};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CreateItem {
    name: ItemName,
    description: ItemDescription,
    available: ItemAvailable,
    owner_id: UserId,
    request_id: Option<ItemRequestId>,
}

impl CreateItem {
    pub fn new(
        name: ItemName,
        description: ItemDescription,
        available: ItemAvailable,
        owner_id: UserId,
        request_id: Option<ItemRequestId>,
    ) -> Self {
        Self {
            name,
            description,
            available,
            owner_id,
            request_id,
        }
    }
}

#[async_trait::async_trait]
pub trait ItemModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        item: &CreateItem,
    ) -> error_stack::Result<ItemId, KernelError>;
    /// Owner and request reference are never rewritten.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        item: &Item,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnItemModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ItemModifier: ItemModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn item_modifier(&self) -> &Self::ItemModifier;
}
