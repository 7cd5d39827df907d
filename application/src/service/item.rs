use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    BookingQuery, CommentQuery, DependOnBookingQuery, DependOnCommentQuery, DependOnItemQuery,
    DependOnUserQuery, ItemQuery, UserQuery,
};
use kernel::interface::update::{
    CommentModifier, CreateComment, CreateItem, DependOnCommentModifier, DependOnItemModifier,
    ItemModifier,
};
use kernel::prelude::entity::{
    CommentText, Direction, ItemAvailable, ItemDescription, ItemId, ItemName, ItemRequestId,
    PageRequest, SelectFrom, SelectSize, Sort, SortKey, UserId,
};
use kernel::{Invalid, KernelError, NotFound};

use crate::service::booking::{invalid, not_found};
use crate::service::AttachAvailabilityService;
use crate::transfer::{
    CommentDto, CreateCommentDto, CreateItemDto, GetItemDto, GetOwnerItemsDto, ItemDetailDto,
    ItemDto, SearchItemsDto, UpdateItemDto,
};

const ITEMS_BY_ID: Sort = Sort::By(SortKey::Id, Direction::Asc);

#[async_trait::async_trait]
pub trait CreateItemService:
    'static + Sync + Send + DependOnUserQuery + DependOnItemQuery + DependOnItemModifier
{
    async fn create_item(&self, dto: CreateItemDto) -> error_stack::Result<ItemDto, KernelError> {
        let name = ItemName::parse(dto.name)?;
        let description = ItemDescription::parse(dto.description)?;
        let available = dto
            .available
            .map(ItemAvailable::new)
            .ok_or_else(|| Report::new(KernelError::from(Invalid::MissingAvailability)))?;

        let mut connection = self.database_connection().transact().await?;

        let owner_id = UserId::new(dto.owner_id);
        self.user_query()
            .find_by_id(&mut connection, &owner_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &owner_id))?;
        let request_id = dto.request_id.map(ItemRequestId::new);
        if let Some(request_id) = &request_id {
            let exists = self
                .item_query()
                .exists_request(&mut connection, request_id)
                .await?;
            if !exists {
                return Err(not_found(NotFound::ItemRequest, request_id));
            }
        }

        let id = self
            .item_modifier()
            .create(
                &mut connection,
                &CreateItem::new(name, description, available, owner_id, request_id),
            )
            .await?;
        let item = self
            .item_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("created item {id:?} is not visible"))
            })?;

        connection.commit().await?;

        tracing::info!(item = ?id, owner = dto.owner_id, "item listed");
        Ok(ItemDto::from(item))
    }
}

impl<T> CreateItemService for T where T: DependOnUserQuery + DependOnItemQuery + DependOnItemModifier {}

#[async_trait::async_trait]
pub trait UpdateItemService:
    'static + Sync + Send + DependOnUserQuery + DependOnItemQuery + DependOnItemModifier
{
    /// Only the owner may change an item.
    async fn update_item(&self, dto: UpdateItemDto) -> error_stack::Result<ItemDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let item_id = ItemId::new(dto.item_id);
        let user_id = UserId::new(dto.user_id);
        // Bookings of this item check availability under the same lock.
        let item = self
            .item_query()
            .find_by_id_for_update(&mut connection, &item_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Item, &item_id))?;
        self.user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &user_id))?;
        if !item.is_owned_by(&user_id) {
            return Err(not_found(NotFound::NotItemOwner, &item_id));
        }

        let item = item.patch(dto.name, dto.description, dto.available);
        self.item_modifier()
            .update(&mut connection, &item)
            .await?;

        connection.commit().await?;

        tracing::info!(item = dto.item_id, available = item.is_available(), "item updated");
        Ok(ItemDto::from(item))
    }
}

impl<T> UpdateItemService for T where T: DependOnUserQuery + DependOnItemQuery + DependOnItemModifier {}

#[async_trait::async_trait]
pub trait GetItemService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnItemQuery
    + AttachAvailabilityService
    + DependOnClock
{
    /// Bookings are attached only when the requester owns the item.
    async fn get_item(&self, dto: GetItemDto) -> error_stack::Result<ItemDetailDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let viewer_id = UserId::new(dto.user_id);
        self.user_query()
            .find_by_id(&mut connection, &viewer_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &viewer_id))?;
        let item_id = ItemId::new(dto.item_id);
        let item = self
            .item_query()
            .find_by_id(&mut connection, &item_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Item, &item_id))?;
        let owned = item.is_owned_by(&viewer_id);

        let mut views = vec![ItemDetailDto::from(item)];
        if owned {
            let now = self.clock().now();
            views = self
                .attach_availability(&mut connection, views, &now)
                .await?;
        }
        let mut views = self.attach_comments(&mut connection, views).await?;

        connection.commit().await?;

        views.pop().ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("item view was lost while binding")
        })
    }

    async fn get_owner_items(
        &self,
        dto: GetOwnerItemsDto,
    ) -> error_stack::Result<Vec<ItemDetailDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let owner_id = UserId::new(dto.owner_id);
        self.user_query()
            .find_by_id(&mut connection, &owner_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &owner_id))?;
        let page = PageRequest::from_offset(
            &SelectFrom::new(dto.from),
            &SelectSize::new(dto.size),
            ITEMS_BY_ID,
        )?;
        let items = self
            .item_query()
            .find_by_owner(&mut connection, &owner_id, &page)
            .await?;
        let views = items.into_iter().map(ItemDetailDto::from).collect();
        let now = self.clock().now();
        let views = self
            .attach_availability(&mut connection, views, &now)
            .await?;
        let views = self.attach_comments(&mut connection, views).await?;

        connection.commit().await?;

        Ok(views)
    }

    /// Blank text matches nothing.
    async fn search_items(
        &self,
        dto: SearchItemsDto,
    ) -> error_stack::Result<Vec<ItemDto>, KernelError> {
        let page = PageRequest::from_offset(
            &SelectFrom::new(dto.from),
            &SelectSize::new(dto.size),
            ITEMS_BY_ID,
        )?;
        if dto.text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut connection = self.database_connection().transact().await?;
        let items = self
            .item_query()
            .search(&mut connection, &dto.text, &page)
            .await?;
        connection.commit().await?;

        tracing::debug!(text = %dto.text, found = items.len(), "item search");
        Ok(items.into_iter().map(ItemDto::from).collect())
    }
}

impl<T> GetItemService for T where
    T: DependOnUserQuery + DependOnItemQuery + AttachAvailabilityService + DependOnClock
{
}

#[async_trait::async_trait]
pub trait CommentService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnItemQuery
    + DependOnBookingQuery
    + DependOnCommentQuery
    + DependOnCommentModifier
    + DependOnClock
{
    /// Only a user with a finished APPROVED booking of the item may comment on it.
    async fn add_comment(
        &self,
        dto: CreateCommentDto,
    ) -> error_stack::Result<CommentDto, KernelError> {
        let text = CommentText::parse(dto.text)?;
        let mut connection = self.database_connection().transact().await?;

        let item_id = ItemId::new(dto.item_id);
        let author_id = UserId::new(dto.author_id);
        let now = self.clock().now();

        let completed = self
            .booking_query()
            .exists_completed(&mut connection, &item_id, &author_id, &now)
            .await?;
        if !completed {
            return Err(invalid(Invalid::CommentNotAllowed, &item_id));
        }
        self.user_query()
            .find_by_id(&mut connection, &author_id)
            .await?
            .ok_or_else(|| not_found(NotFound::User, &author_id))?;
        self.item_query()
            .find_by_id(&mut connection, &item_id)
            .await?
            .ok_or_else(|| not_found(NotFound::Item, &item_id))?;

        let id = self
            .comment_modifier()
            .create(
                &mut connection,
                &CreateComment::new(text, item_id, author_id, now),
            )
            .await?;
        let comment = self
            .comment_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("created comment {id:?} is not visible"))
            })?;

        connection.commit().await?;

        tracing::info!(item = dto.item_id, author = dto.author_id, "comment added");
        Ok(CommentDto::from(comment))
    }
}

impl<T> CommentService for T where
    T: DependOnUserQuery
        + DependOnItemQuery
        + DependOnBookingQuery
        + DependOnCommentQuery
        + DependOnCommentModifier
        + DependOnClock
{
}

#[cfg(test)]
mod test {
    use time::Duration;

    use kernel::prelude::entity::BookingStatus;
    use kernel::{Invalid, KernelError, NotFound};

    use crate::service::{
        CommentService, CreateBookingService, CreateItemService, GetItemService,
        UpdateItemService,
    };
    use crate::test::{Fixture, NOW};
    use crate::transfer::{
        CreateBookingDto, CreateCommentDto, CreateItemDto, GetItemDto, GetOwnerItemsDto,
        SearchItemsDto, UpdateItemDto,
    };

    fn search(text: &str) -> SearchItemsDto {
        SearchItemsDto {
            text: text.to_string(),
            from: 0,
            size: 20,
        }
    }

    fn comment(item_id: i64, author_id: i64, text: &str) -> CreateCommentDto {
        CreateCommentDto {
            item_id,
            author_id,
            text: text.to_string(),
        }
    }

    fn listing(owner_id: i64, name: &str, available: Option<bool>) -> CreateItemDto {
        CreateItemDto {
            owner_id,
            name: name.to_string(),
            description: format!("{name} for rent"),
            available,
            request_id: None,
        }
    }

    fn change(item_id: i64, user_id: i64) -> UpdateItemDto {
        UpdateItemDto {
            item_id,
            user_id,
            name: None,
            description: None,
            available: None,
        }
    }

    #[tokio::test]
    async fn create_item_belongs_to_owner() -> error_stack::Result<(), KernelError> {
        let fixture = Fixture::default();
        fixture.user(1);
        let request = fixture.request(40);

        let item = fixture
            .create_item(CreateItemDto {
                request_id: Some(request.into()),
                ..listing(1, "Drill", Some(true))
            })
            .await?;
        assert_eq!(item.name, "Drill");
        assert_eq!(item.description, "Drill for rent");
        assert!(item.available);
        assert_eq!(item.owner_id, 1);
        assert_eq!(item.request_id, Some(40));
        assert!(fixture.stored_item(item.id).is_some());
        Ok(())
    }

    #[tokio::test]
    async fn create_item_rejects_bad_input() {
        let fixture = Fixture::default();
        fixture.user(1);

        let cases = [
            (listing(1, " ", Some(true)), KernelError::from(Invalid::BlankText)),
            (listing(1, "Drill", None), KernelError::from(Invalid::MissingAvailability)),
            (listing(9, "Drill", Some(true)), KernelError::from(NotFound::User)),
            (
                CreateItemDto {
                    request_id: Some(41),
                    ..listing(1, "Drill", Some(true))
                },
                KernelError::from(NotFound::ItemRequest),
            ),
        ];
        for (dto, expected) in cases {
            let report = fixture.create_item(dto).await.unwrap_err();
            assert_eq!(report.current_context(), &expected);
        }
        let report = fixture
            .create_item(CreateItemDto {
                description: "\t".to_string(),
                ..listing(1, "Drill", Some(true))
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::from(Invalid::BlankText));
    }

    #[tokio::test]
    async fn owner_patches_item_and_availability_gates_booking(
    ) -> error_stack::Result<(), KernelError> {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        fixture.user(2);
        fixture.named_item(10, &owner, true, "Drill", "cordless");

        let updated = fixture
            .update_item(UpdateItemDto {
                name: Some("  ".to_string()),
                available: Some(false),
                ..change(10, 1)
            })
            .await?;
        assert_eq!(updated.name, "Drill");
        assert_eq!(updated.description, "cordless");
        assert!(!updated.available);

        let booking = CreateBookingDto {
            item_id: 10,
            booker_id: 2,
            start: NOW + Duration::hours(1),
            end: NOW + Duration::hours(2),
        };
        let report = fixture
            .create_booking(CreateBookingDto { ..booking })
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::from(Invalid::ItemUnavailable)
        );

        let updated = fixture
            .update_item(UpdateItemDto {
                description: Some("two batteries".to_string()),
                available: Some(true),
                ..change(10, 1)
            })
            .await?;
        assert_eq!(updated.description, "two batteries");
        fixture.create_booking(booking).await?;
        Ok(())
    }

    #[tokio::test]
    async fn only_owner_updates_item() {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        fixture.user(2);
        let item = fixture.item(10, &owner, true);

        let cases = [
            (change(11, 1), KernelError::from(NotFound::Item)),
            (change(10, 9), KernelError::from(NotFound::User)),
            (change(10, 2), KernelError::from(NotFound::NotItemOwner)),
        ];
        for (dto, expected) in cases {
            let report = fixture
                .update_item(UpdateItemDto {
                    available: Some(false),
                    ..dto
                })
                .await
                .unwrap_err();
            assert_eq!(report.current_context(), &expected);
        }
        assert_eq!(fixture.stored_item(10), Some(item));
    }

    #[tokio::test]
    async fn detail_shows_bookings_to_owner_only() -> error_stack::Result<(), KernelError> {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        let booker = fixture.user(2);
        let item = fixture.item(10, &owner, true);
        let past_start = NOW - Duration::hours(3);
        let next_start = NOW + Duration::hours(5);
        fixture.approved(1, &item, &booker, past_start, 2);
        fixture.approved(2, &item, &booker, next_start, 1);
        fixture.approved(3, &item, &booker, NOW + Duration::hours(9), 1);
        fixture.booking(4, &item, &booker, NOW + Duration::hours(2), 1, BookingStatus::Waiting);

        let view = fixture
            .get_item(GetItemDto {
                item_id: 10,
                user_id: 1,
            })
            .await?;
        let last = view.last_booking.expect("last booking");
        let next = view.next_booking.expect("next booking");
        assert_eq!(last.start, past_start);
        assert_eq!(last.booker_id, 2);
        assert_eq!(next.start, next_start);
        assert_eq!(next.id, 2);

        let view = fixture
            .get_item(GetItemDto {
                item_id: 10,
                user_id: 2,
            })
            .await?;
        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn detail_requires_viewer_and_item() {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        fixture.item(10, &owner, true);

        let report = fixture
            .get_item(GetItemDto {
                item_id: 10,
                user_id: 9,
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::from(NotFound::User));
        let report = fixture
            .get_item(GetItemDto {
                item_id: 11,
                user_id: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::from(NotFound::Item));
    }

    #[tokio::test]
    async fn owner_items_are_bound_and_ordered() -> error_stack::Result<(), KernelError> {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        let booker = fixture.user(2);
        let saw = fixture.item(12, &owner, true);
        fixture.item(11, &owner, false);
        fixture.item(13, &booker, true);
        fixture.approved(1, &saw, &booker, NOW - Duration::days(2), 1);

        let views = fixture
            .get_owner_items(GetOwnerItemsDto {
                owner_id: 1,
                from: 0,
                size: 20,
            })
            .await?;
        let ids: Vec<i64> = views.iter().map(|view| view.item.id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert!(views[0].last_booking.is_none());
        assert_eq!(views[1].last_booking.as_ref().map(|last| last.id), Some(1));
        assert!(views.iter().all(|view| view.next_booking.is_none()));
        assert!(views.iter().all(|view| view.comments.is_empty()));
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_available_items_case_insensitively(
    ) -> error_stack::Result<(), KernelError> {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        fixture.named_item(10, &owner, true, "Cordless Drill", "18V");
        fixture.named_item(11, &owner, true, "Hammer", "for DRILLING holes too");
        fixture.named_item(12, &owner, false, "Old drill", "broken");
        fixture.named_item(13, &owner, true, "Saw", "sharp");

        let found = fixture.search_items(search("dRiLl")).await?;
        let ids: Vec<i64> = found.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![10, 11]);

        assert!(fixture.search_items(search("   ")).await?.is_empty());
        assert!(fixture.search_items(search("")).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn comment_needs_finished_approved_booking() -> error_stack::Result<(), KernelError> {
        let fixture = Fixture::default();
        let owner = fixture.user(1);
        let booker = fixture.user(2);
        let item = fixture.item(10, &owner, true);
        fixture.approved(1, &item, &booker, NOW + Duration::hours(1), 1);
        fixture.booking(2, &item, &booker, NOW - Duration::days(1), 1, BookingStatus::Rejected);

        let report = fixture
            .add_comment(comment(10, 2, "great drill"))
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::from(Invalid::CommentNotAllowed)
        );
        let report = fixture
            .add_comment(comment(10, 2, "  "))
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::from(Invalid::BlankText)
        );

        fixture.approved(3, &item, &booker, NOW - Duration::days(2), 1);
        let created = fixture.add_comment(comment(10, 2, "great drill")).await?;
        assert_eq!(created.text, "great drill");
        assert_eq!(created.author_name, "user2");
        assert_eq!(created.created, NOW);
        assert_eq!(fixture.comment_count(), 1);

        let view = fixture
            .get_item(GetItemDto {
                item_id: 10,
                user_id: 2,
            })
            .await?;
        assert_eq!(view.comments, vec![created]);
        Ok(())
    }
}
