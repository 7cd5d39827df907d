use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::PrimitiveDateTime;

use kernel::interface::query::BookingQuery;
use kernel::interface::update::{BookingModifier, CreateBooking};
use kernel::prelude::entity::{
    Booking, BookingEnd, BookingId, BookingStart, BookingState, BookingStatus, Direction, Item,
    ItemAvailable, ItemDescription, ItemId, ItemName, ItemRequestId, PageRequest, Sort, SortKey,
    User, UserEmail, UserId, UserName,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookingRepository;

#[async_trait::async_trait]
impl BookingQuery for PostgresBookingRepository {
    type Transaction = PostgresConnection;
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_by_id(con, id).await
    }

    async fn exists_approved_overlap(
        &self,
        con: &mut PostgresConnection,
        item_id: &ItemId,
        start: &BookingStart,
        end: &BookingEnd,
        excluding: Option<&BookingId>,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookingInternal::exists_approved_overlap(con, item_id, start, end, excluding).await
    }

    async fn find_by_booker(
        &self,
        con: &mut PostgresConnection,
        booker_id: &UserId,
        state: &BookingState,
        now: &PrimitiveDateTime,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_party(con, Party::Booker(*booker_id), state, now, page).await
    }

    async fn find_by_owner(
        &self,
        con: &mut PostgresConnection,
        owner_id: &UserId,
        state: &BookingState,
        now: &PrimitiveDateTime,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_party(con, Party::Owner(*owner_id), state, now, page).await
    }

    async fn find_approved_started_before(
        &self,
        con: &mut PostgresConnection,
        item_ids: &[ItemId],
        as_of: &PrimitiveDateTime,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_approved_around(con, item_ids, as_of, Side::Before).await
    }

    async fn find_approved_starting_after(
        &self,
        con: &mut PostgresConnection,
        item_ids: &[ItemId],
        as_of: &PrimitiveDateTime,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_approved_around(con, item_ids, as_of, Side::After).await
    }

    async fn exists_completed(
        &self,
        con: &mut PostgresConnection,
        item_id: &ItemId,
        booker_id: &UserId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookingInternal::exists_completed(con, item_id, booker_id, now).await
    }
}

#[async_trait::async_trait]
impl BookingModifier for PostgresBookingRepository {
    type Transaction = PostgresConnection;
    async fn create(
        &self,
        con: &mut PostgresConnection,
        booking: &CreateBooking,
    ) -> error_stack::Result<BookingId, KernelError> {
        PgBookingInternal::create(con, booking).await
    }

    async fn update_status(
        &self,
        con: &mut PostgresConnection,
        id: &BookingId,
        status: &BookingStatus,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::update_status(con, id, status).await
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    start_date: PrimitiveDateTime,
    end_date: PrimitiveDateTime,
    status: String,
    item_id: i64,
    item_name: String,
    item_description: String,
    item_available: bool,
    item_owner_id: i64,
    item_request_id: Option<i64>,
    booker_id: i64,
    booker_name: String,
    booker_email: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = error_stack::Report<KernelError>;
    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let item = Item::new(
            ItemId::new(row.item_id),
            ItemName::new(row.item_name),
            ItemDescription::new(row.item_description),
            ItemAvailable::new(row.item_available),
            UserId::new(row.item_owner_id),
            row.item_request_id.map(ItemRequestId::new),
        );
        let booker = User::new(
            UserId::new(row.booker_id),
            UserName::new(row.booker_name),
            UserEmail::new(row.booker_email),
        );
        Ok(Booking::new(
            BookingId::new(row.id),
            BookingStart::new(row.start_date),
            BookingEnd::new(row.end_date),
            item,
            booker,
            row.status.parse::<BookingStatus>()?,
        ))
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> error_stack::Result<Vec<Booking>, KernelError> {
    rows.into_iter().map(Booking::try_from).collect()
}

// language=postgresql
const SELECT_BOOKING: &str = r#"
    SELECT
        b.id, b.start_date, b.end_date, b.status,
        i.id AS item_id, i.name AS item_name, i.description AS item_description,
        i.available AS item_available, i.owner_id AS item_owner_id,
        i.request_id AS item_request_id,
        u.id AS booker_id, u.name AS booker_name, u.email AS booker_email
    FROM bookings b
    JOIN items i ON i.id = b.item_id
    JOIN users u ON u.id = b.booker_id
"#;

enum Party {
    Booker(UserId),
    Owner(UserId),
}

enum Side {
    Before,
    After,
}

pub(in crate::database) struct PgBookingInternal;

impl PgBookingInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!("{SELECT_BOOKING} WHERE b.id = $1"))
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(Booking::try_from).transpose()
    }

    async fn exists_approved_overlap(
        con: &mut PgConnection,
        item_id: &ItemId,
        start: &BookingStart,
        end: &BookingEnd,
        excluding: Option<&BookingId>,
    ) -> error_stack::Result<bool, KernelError> {
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM bookings
                WHERE item_id = $1
                  AND status = 'APPROVED'
                  AND start_date < $3
                  AND end_date > $2
                  AND ($4::BIGINT IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(item_id.as_ref())
        .bind(start.as_ref())
        .bind(end.as_ref())
        .bind(excluding.map(|id| i64::from(*id)))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(exists)
    }

    /// One parameterized query per listing: the state only adds predicates.
    async fn find_by_party(
        con: &mut PgConnection,
        party: Party,
        state: &BookingState,
        now: &PrimitiveDateTime,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_BOOKING);
        match party {
            Party::Booker(id) => query.push(" WHERE b.booker_id = ").push_bind(i64::from(id)),
            Party::Owner(id) => query.push(" WHERE i.owner_id = ").push_bind(i64::from(id)),
        };
        push_state(&mut query, state, *now);
        push_order(&mut query, page.sort());
        query
            .push(" LIMIT ")
            .push_bind(*page.size())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<BookingRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        into_bookings(rows)
    }

    async fn find_approved_around(
        con: &mut PgConnection,
        item_ids: &[ItemId],
        as_of: &PrimitiveDateTime,
        side: Side,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let comparison = match side {
            Side::Before => "<",
            Side::After => ">",
        };
        let ids: Vec<i64> = item_ids.iter().map(|id| i64::from(*id)).collect();
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING} WHERE b.item_id = ANY($1) AND b.status = 'APPROVED' AND b.start_date {comparison} $2"
        ))
        .bind(ids)
        .bind(as_of)
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn exists_completed(
        con: &mut PgConnection,
        item_id: &ItemId,
        booker_id: &UserId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<bool, KernelError> {
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM bookings
                WHERE item_id = $1
                  AND booker_id = $2
                  AND status = 'APPROVED'
                  AND end_date < $3
            )
            "#,
        )
        .bind(item_id.as_ref())
        .bind(booker_id.as_ref())
        .bind(now)
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(exists)
    }

    async fn create(
        con: &mut PgConnection,
        booking: &CreateBooking,
    ) -> error_stack::Result<BookingId, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(booking.start().as_ref())
        .bind(booking.end().as_ref())
        .bind(booking.item_id().as_ref())
        .bind(booking.booker_id().as_ref())
        .bind(booking.status().as_str())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(BookingId::new(id))
    }

    async fn update_status(
        con: &mut PgConnection,
        id: &BookingId,
        status: &BookingStatus,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(status.as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

fn push_state(query: &mut QueryBuilder<Postgres>, state: &BookingState, now: PrimitiveDateTime) {
    match state {
        BookingState::All => {}
        BookingState::Current => {
            query
                .push(" AND b.start_date < ")
                .push_bind(now)
                .push(" AND b.end_date > ")
                .push_bind(now);
        }
        BookingState::Past => {
            query.push(" AND b.end_date < ").push_bind(now);
        }
        BookingState::Future => {
            query.push(" AND b.start_date > ").push_bind(now);
        }
        BookingState::Waiting => {
            query
                .push(" AND b.status = ")
                .push_bind(BookingStatus::Waiting.as_str());
        }
        BookingState::Rejected => {
            query
                .push(" AND b.status = ")
                .push_bind(BookingStatus::Rejected.as_str());
        }
    }
}

fn push_order(query: &mut QueryBuilder<Postgres>, sort: &Sort) {
    let Sort::By(key, direction) = sort else {
        return;
    };
    let column = match key {
        SortKey::Id => "b.id",
        SortKey::Start => "b.start_date",
    };
    let direction = match direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    };
    query
        .push(" ORDER BY ")
        .push(column)
        .push(" ")
        .push(direction)
        .push(", b.id ")
        .push(direction);
}
