use std::collections::HashMap;

use time::PrimitiveDateTime;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    BookingQuery, CommentQuery, DependOnBookingQuery, DependOnCommentQuery,
};
use kernel::prelude::entity::{Booking, ItemId};
use kernel::KernelError;

use crate::transfer::{BookingShortDto, CommentDto, ItemDetailDto};

/// Binds the nearest past/future APPROVED booking and the comments of each item
/// of a listing, with one query per binding regardless of the number of items.
/// Nothing is persisted; absence of bookings or comments is not an error.
#[async_trait::async_trait]
pub trait AttachAvailabilityService:
    'static + Sync + Send + DependOnBookingQuery + DependOnCommentQuery
{
    async fn attach_availability(
        &self,
        con: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        items: Vec<ItemDetailDto>,
        as_of: &PrimitiveDateTime,
    ) -> error_stack::Result<Vec<ItemDetailDto>, KernelError> {
        let ids = item_ids(&items);
        let before = self
            .booking_query()
            .find_approved_started_before(con, &ids, as_of)
            .await?;
        let after = self
            .booking_query()
            .find_approved_starting_after(con, &ids, as_of)
            .await?;
        let mut last = latest_per_item(before);
        let mut next = earliest_per_item(after);

        Ok(items
            .into_iter()
            .map(|mut view| {
                let id = ItemId::new(view.item.id);
                view.last_booking = last.remove(&id).map(BookingShortDto::from);
                view.next_booking = next.remove(&id).map(BookingShortDto::from);
                view
            })
            .collect())
    }

    async fn attach_comments(
        &self,
        con: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        items: Vec<ItemDetailDto>,
    ) -> error_stack::Result<Vec<ItemDetailDto>, KernelError> {
        let ids = item_ids(&items);
        let comments = self.comment_query().find_by_item_ids(con, &ids).await?;
        let mut grouped: HashMap<ItemId, Vec<CommentDto>> = HashMap::new();
        for comment in comments {
            grouped
                .entry(*comment.item_id())
                .or_default()
                .push(CommentDto::from(comment));
        }

        Ok(items
            .into_iter()
            .map(|mut view| {
                view.comments = grouped
                    .remove(&ItemId::new(view.item.id))
                    .unwrap_or_default();
                view
            })
            .collect())
    }
}

impl<T> AttachAvailabilityService for T where T: DependOnBookingQuery + DependOnCommentQuery {}

fn item_ids(items: &[ItemDetailDto]) -> Vec<ItemId> {
    items.iter().map(|view| ItemId::new(view.item.id)).collect()
}

/// Booking with the greatest start per item.
fn latest_per_item(bookings: Vec<Booking>) -> HashMap<ItemId, Booking> {
    let mut found: HashMap<ItemId, Booking> = HashMap::new();
    for booking in bookings {
        let item_id = *booking.item().id();
        match found.get(&item_id) {
            Some(current) if current.start() >= booking.start() => {}
            _ => {
                found.insert(item_id, booking);
            }
        }
    }
    found
}

/// Booking with the smallest start per item.
fn earliest_per_item(bookings: Vec<Booking>) -> HashMap<ItemId, Booking> {
    let mut found: HashMap<ItemId, Booking> = HashMap::new();
    for booking in bookings {
        let item_id = *booking.item().id();
        match found.get(&item_id) {
            Some(current) if current.start() <= booking.start() => {}
            _ => {
                found.insert(item_id, booking);
            }
        }
    }
    found
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use crate::service::availability::{earliest_per_item, latest_per_item};
    use crate::test::Fixture;

    #[test]
    fn picks_nearest_booking_per_item() {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        let booker = fixture.user(2);
        let drill = fixture.item(10, &owner, true);
        let saw = fixture.item(11, &owner, true);

        let past = vec![
            fixture.approved(1, &drill, &booker, datetime!(2024-01-01 10:00), 1),
            fixture.approved(2, &drill, &booker, datetime!(2024-01-03 10:00), 1),
            fixture.approved(3, &saw, &booker, datetime!(2024-01-02 10:00), 1),
        ];
        let future = vec![
            fixture.approved(4, &drill, &booker, datetime!(2024-02-05 10:00), 1),
            fixture.approved(5, &drill, &booker, datetime!(2024-02-01 10:00), 1),
        ];

        let last = latest_per_item(past);
        let next = earliest_per_item(future);

        assert_eq!(*last[drill.id()].id().as_ref(), 2);
        assert_eq!(*last[saw.id()].id().as_ref(), 3);
        assert_eq!(*next[drill.id()].id().as_ref(), 5);
        assert!(!next.contains_key(saw.id()));
    }
}
