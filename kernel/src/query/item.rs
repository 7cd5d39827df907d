use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Item, ItemId, ItemRequestId, PageRequest, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ItemQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError>;

    /// Same as `find_by_id`, additionally holding the item row until the transaction ends.
    /// Writers that check and then change the bookings of an item serialize on this lock.
    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError>;

    async fn find_by_owner(
        &self,
        con: &mut Self::Transaction,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Item>, KernelError>;

    /// Case-insensitive substring match on name or description among available items.
    async fn search(
        &self,
        con: &mut Self::Transaction,
        text: &str,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Item>, KernelError>;

    async fn exists_request(
        &self,
        con: &mut Self::Transaction,
        id: &ItemRequestId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnItemQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ItemQuery: ItemQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn item_query(&self) -> &Self::ItemQuery;
}
