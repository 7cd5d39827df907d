use std::ops::Deref;
use std::sync::Arc;

use driver::clock::SystemClock;
use driver::database::{
    PostgresBookingRepository, PostgresCommentRepository, PostgresDatabase,
    PostgresItemRepository, PostgresUserRepository,
};
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{
    DependOnBookingQuery, DependOnCommentQuery, DependOnItemQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookingModifier, DependOnCommentModifier, DependOnItemModifier,
};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    clock: SystemClock,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;

        Ok(Self {
            pgpool,
            clock: SystemClock,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnClock for Handler {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnItemQuery for Handler {
    type ItemQuery = PostgresItemRepository;
    fn item_query(&self) -> &Self::ItemQuery {
        &PostgresItemRepository
    }
}

impl DependOnItemModifier for Handler {
    type ItemModifier = PostgresItemRepository;
    fn item_modifier(&self) -> &Self::ItemModifier {
        &PostgresItemRepository
    }
}

impl DependOnBookingQuery for Handler {
    type BookingQuery = PostgresBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &PostgresBookingRepository
    }
}

impl DependOnBookingModifier for Handler {
    type BookingModifier = PostgresBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &PostgresBookingRepository
    }
}

impl DependOnCommentQuery for Handler {
    type CommentQuery = PostgresCommentRepository;
    fn comment_query(&self) -> &Self::CommentQuery {
        &PostgresCommentRepository
    }
}

impl DependOnCommentModifier for Handler {
    type CommentModifier = PostgresCommentRepository;
    fn comment_modifier(&self) -> &Self::CommentModifier {
        &PostgresCommentRepository
    }
}
