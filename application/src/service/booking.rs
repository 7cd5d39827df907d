use std::fmt::Debug;

use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnItemQuery, DependOnUserQuery, ItemQuery,
    UserQuery,
};
use kernel::interface::update::{BookingModifier, CreateBooking, DependOnBookingModifier};
use kernel::prelude::entity::{
    Booking, BookingEnd, BookingId, BookingStart, BookingState, BookingStatus, Direction, ItemId, PageRequest,
    SelectFrom, SelectSize, Sort, SortKey, UserId,
};
use kernel::{Invalid, KernelError, NotFound};

use crate::transfer::{
    ApproveBookingDto, BookingDto, CreateBookingDto, GetBookingDto, GetBookingsDto,
};

/// Booking listings are always ordered by start, most recent first.
pub const BOOKINGS_BY_START: Sort = Sort::By(SortKey::Start, Direction::Desc);

#[async_trait::async_trait]
pub trait CreateBookingService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnItemQuery
    + DependOnBookingQuery
    + DependOnBookingModifier
{
    async fn create_booking(
        &self,
        dto: CreateBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let item_id = ItemId::new(dto.item_id);
        let booker_id = UserId::new(dto.booker_id);
        let start = BookingStart::new(dto.start);
        let end = BookingEnd::new(dto.end);

        let item = self
            .item_query()
            .find_by_id_for_update(&mut connection, &item_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Item, &item_id))?;
        self.user_query()
            .find_by_id(&mut connection, &booker_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &booker_id))?;
        if item.is_owned_by(&booker_id) {
            return Err(not_found(NotFound::SelfBooking, &item_id));
        }
        if !item.is_available() {
            return Err(invalid(Invalid::ItemUnavailable, &item_id));
        }
        Booking::check_period(&start, &end)?;
        let overlapping = self
            .booking_query()
            .exists_approved_overlap(&mut connection, &item_id, &start, &end, None)
            .await?;
        if overlapping {
            return Err(invalid(Invalid::AlreadyBooked, &item_id));
        }

        let id = self
            .booking_modifier()
            .create(
                &mut connection,
                &CreateBooking::new(item_id, booker_id, start, end),
            )
            .await?;
        let booking = self
            .booking_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("created booking {id:?} is not visible"))
            })?;

        connection.commit().await?;

        tracing::info!(
            booking = ?id,
            item = dto.item_id,
            booker = dto.booker_id,
            "booking requested"
        );
        Ok(BookingDto::from(booking))
    }
}

impl<T> CreateBookingService for T where
    T: DependOnUserQuery + DependOnItemQuery + DependOnBookingQuery + DependOnBookingModifier
{
}

#[async_trait::async_trait]
pub trait ApproveBookingService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnItemQuery
    + DependOnBookingQuery
    + DependOnBookingModifier
{
    async fn approve_booking(
        &self,
        dto: ApproveBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let booking_id = BookingId::new(dto.booking_id);
        let user_id = UserId::new(dto.user_id);

        self.user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &user_id))?;
        let booking = self
            .booking_query()
            .find_by_id(&mut connection, &booking_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Booking, &booking_id))?;
        if !booking.item().is_owned_by(&user_id) {
            return Err(not_found(NotFound::NotOwner, &booking_id));
        }

        // Decide against the status as seen under the item lock.
        let item_id = *booking.item().id();
        self.item_query()
            .find_by_id_for_update(&mut connection, &item_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Item, &item_id))?;
        let booking = self
            .booking_query()
            .find_by_id(&mut connection, &booking_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Booking, &booking_id))?;

        let status = booking.status().decide(dto.approved)?;
        if status == BookingStatus::Approved {
            let overlapping = self
                .booking_query()
                .exists_approved_overlap(
                    &mut connection,
                    &item_id,
                    booking.start(),
                    booking.end(),
                    Some(&booking_id),
                )
                .await?;
            if overlapping {
                return Err(invalid(Invalid::AlreadyBooked, &item_id));
            }
        }

        self.booking_modifier()
            .update_status(&mut connection, &booking_id, &status)
            .await?;
        let booking = self
            .booking_query()
            .find_by_id(&mut connection, &booking_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Booking, &booking_id))?;

        connection.commit().await?;

        tracing::info!(
            booking = dto.booking_id,
            status = %status,
            "booking decided"
        );
        Ok(BookingDto::from(booking))
    }
}

impl<T> ApproveBookingService for T where
    T: DependOnUserQuery + DependOnItemQuery + DependOnBookingQuery + DependOnBookingModifier
{
}

#[async_trait::async_trait]
pub trait GetBookingService: 'static + Sync + Send + DependOnUserQuery + DependOnBookingQuery {
    async fn get_booking(
        &self,
        dto: GetBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let booking_id = BookingId::new(dto.booking_id);
        let user_id = UserId::new(dto.user_id);
        self.user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &user_id))?;
        let booking = self
            .booking_query()
            .find_by_id(&mut connection, &booking_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Booking, &booking_id))?;
        if !booking.is_participant(&user_id) {
            return Err(not_found(NotFound::NotParticipant, &booking_id));
        }

        connection.commit().await?;

        Ok(BookingDto::from(booking))
    }
}

impl<T> GetBookingService for T where T: DependOnUserQuery + DependOnBookingQuery {}

#[async_trait::async_trait]
pub trait GetBookingsService:
    'static + Sync + Send + DependOnUserQuery + DependOnBookingQuery + DependOnClock
{
    /// Bookings made by the user.
    async fn get_booker_bookings(
        &self,
        dto: GetBookingsDto,
    ) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let booker_id = UserId::new(dto.user_id);
        let (state, page) = self
            .prepare_listing(&mut connection, &booker_id, &dto)
            .await?;
        let now = self.clock().now();
        let bookings = self
            .booking_query()
            .find_by_booker(&mut connection, &booker_id, &state, &now, &page)
            .await?;

        connection.commit().await?;

        tracing::debug!(booker = dto.user_id, ?state, found = bookings.len(), "booker bookings");
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    /// Bookings of the items the user owns.
    async fn get_owner_bookings(
        &self,
        dto: GetBookingsDto,
    ) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let owner_id = UserId::new(dto.user_id);
        let (state, page) = self
            .prepare_listing(&mut connection, &owner_id, &dto)
            .await?;
        let now = self.clock().now();
        let bookings = self
            .booking_query()
            .find_by_owner(&mut connection, &owner_id, &state, &now, &page)
            .await?;

        connection.commit().await?;

        tracing::debug!(owner = dto.user_id, ?state, found = bookings.len(), "owner bookings");
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    async fn prepare_listing(
        &self,
        connection: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        user_id: &UserId,
        dto: &GetBookingsDto,
    ) -> error_stack::Result<(BookingState, PageRequest), KernelError> {
        self.user_query()
            .find_by_id(connection, user_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &user_id))?;
        let state = dto.state.parse::<BookingState>()?;
        let page = PageRequest::from_offset(
            &SelectFrom::new(dto.from),
            &SelectSize::new(dto.size),
            BOOKINGS_BY_START,
        )?;
        Ok((state, page))
    }
}

impl<T> GetBookingsService for T where T: DependOnUserQuery + DependOnBookingQuery + DependOnClock {}

pub(crate) fn not_found(reason: NotFound, id: &impl Debug) -> Report<KernelError> {
    Report::new(KernelError::from(reason)).attach_printable(format!("{id:?}"))
}

pub(crate) fn invalid(reason: Invalid, id: &impl Debug) -> Report<KernelError> {
    Report::new(KernelError::from(reason)).attach_printable(format!("{id:?}"))
}
