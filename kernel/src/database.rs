use crate::KernelError;

/// Hands out one unit of work per service call.
///
/// Every read and write of a single booking or comment operation runs on the
/// same transaction, so row locks taken by `*_for_update` queries are held
/// until `commit`. A transaction dropped without `commit` must be discarded.
#[async_trait::async_trait]
pub trait DatabaseConnection: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError>;
}

pub trait DependOnDatabaseConnection: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

impl<T> DependOnDatabaseConnection for T
where
    T: DatabaseConnection,
{
    type DatabaseConnection = T;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self
    }
}

#[async_trait::async_trait]
pub trait Transaction: 'static + Sync + Send {
    async fn commit(self) -> error_stack::Result<(), KernelError>;
}
