//! Behaviour shared by every `ScheduleStore` backend.
//!
//! Each backend's test module runs these scenarios against a fresh store.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use entities::{
    Contact, Event, EventDuration, EventPatch, EventType, PreferenceType, Timeblock,
    TimeblockKind, TimeblockPatch, User, UserPatch,
};

use crate::{
    ContactFilter, EventFilter, ScheduleStore, ScheduleStoreError, TimeblockFilter, UserFilter,
};

fn may_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn instant(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

async fn user<S: ScheduleStore + ?Sized>(store: &S, username: &str) -> User {
    store
        .create_user(User::new(username, format!("{username}@example.com")))
        .await
        .unwrap()
}

async fn intro_call<S: ScheduleStore + ?Sized>(store: &S) -> Event {
    store
        .create_event(Event::new(
            "Intro Call",
            EventDuration::Minutes30,
            EventType::Video,
            "invitee-1",
        ))
        .await
        .unwrap()
}

/// E1/U1, 2024-05-01 09:00-09:30, high, not finalized.
fn morning_block(event: &Event, owner: &User) -> Timeblock {
    Timeblock::for_event(
        event.id,
        owner.id,
        may_first(),
        at(9, 0),
        at(9, 30),
        PreferenceType::High,
    )
}

pub async fn user_crud<S: ScheduleStore>(store: &S) {
    let alice = store
        .create_user(User::new("alice", "alice@example.com").with_name("Alice", "Liddell"))
        .await
        .unwrap();

    let fetched = store.get_user(alice.id).await.unwrap().unwrap();
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.display_name(), "Alice Liddell");

    let by_name = store.get_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, alice.id);
    assert!(store.get_user_by_username("nobody").await.unwrap().is_none());

    let err = store
        .create_user(User::new("alice", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::AlreadyExists { .. }));

    user(store, "bob").await;
    let (users, total) = store.list_users(UserFilter::default()).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(users[0].username, "alice");
    assert_eq!(users[1].username, "bob");

    let phone = UserPatch {
        phone_number: Some(Some("555-0100".to_string())),
        ..UserPatch::default()
    };
    let updated = store.update_user(alice.id, phone).await.unwrap();
    assert!(updated.updated_at >= fetched.updated_at);
    assert_eq!(updated.first_name, "Alice");
    let fetched = store.get_user(alice.id).await.unwrap().unwrap();
    assert_eq!(fetched.phone_number.as_deref(), Some("555-0100"));

    let rename = UserPatch {
        username: Some("bob".to_string()),
        ..UserPatch::default()
    };
    let err = store.update_user(alice.id, rename).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::AlreadyExists { .. }));

    let blank = UserPatch {
        username: Some(String::new()),
        ..UserPatch::default()
    };
    let err = store.update_user(alice.id, blank).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::Validation(_)));
    assert_eq!(store.get_user(alice.id).await.unwrap(), Some(fetched));

    let err = store
        .update_user(uuid::Uuid::new_v4(), UserPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));

    let err = store.create_user(User::new("", "x@example.com")).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::Validation(_)));

    store.delete_user(alice.id).await.unwrap();
    assert!(store.get_user(alice.id).await.unwrap().is_none());
    let err = store.delete_user(alice.id).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));
}

pub async fn contact_listing_order<S: ScheduleStore>(store: &S) {
    let owner = user(store, "owner").await;
    let first = user(store, "first").await;
    let second = user(store, "second").await;

    // Inserted newest first; listing must still come back oldest first.
    let later = store
        .create_contact(
            Contact::new(owner.id, second.id).with_added_at(instant("2024-05-02T10:00:00Z")),
        )
        .await
        .unwrap();
    let earlier = store
        .create_contact(
            Contact::new(owner.id, first.id).with_added_at(instant("2024-05-01T10:00:00Z")),
        )
        .await
        .unwrap();
    let others = store
        .create_contact(
            Contact::new(first.id, owner.id).with_added_at(instant("2024-04-30T10:00:00Z")),
        )
        .await
        .unwrap();

    let (all, total) = store.list_contacts(ContactFilter::all()).await.unwrap();
    assert_eq!(total, 3);
    let ids: Vec<_> = all.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![others.id, earlier.id, later.id]);

    let (mine, total) = store
        .list_contacts(ContactFilter::for_user(owner.id))
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(mine[0].id, earlier.id);
    assert_eq!(mine[0].added_at, instant("2024-05-01T10:00:00Z"));

    let removed = store.remove_contact(earlier.id).await.unwrap();
    assert!(removed.removed);

    let (mine, _) = store
        .list_contacts(ContactFilter::for_user(owner.id))
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, later.id);

    let (all, _) = store.list_contacts(ContactFilter::all()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().any(|c| c.id == earlier.id && c.removed));

    let page = ContactFilter {
        limit: Some(1),
        offset: Some(1),
        ..ContactFilter::all()
    };
    let (paged, total) = store.list_contacts(page).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].id, earlier.id);

    store.delete_contact(later.id).await.unwrap();
    assert!(store.get_contact(later.id).await.unwrap().is_none());
    let err = store.remove_contact(later.id).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));

    let err = store
        .create_contact(Contact::new(owner.id, uuid::Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::ForeignKeyViolation(_)));
}

pub async fn event_crud<S: ScheduleStore>(store: &S) {
    let event = intro_call(store).await;

    let fetched = store.get_event(event.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Intro Call");
    assert_eq!(fetched.duration, EventDuration::Minutes30);
    assert_eq!(fetched.event_type, EventType::Video);

    store
        .create_event(Event::new(
            "Check-in",
            EventDuration::Minutes15,
            EventType::Phone,
            "invitee-2",
        ))
        .await
        .unwrap();

    let (all, total) = store.list_events(EventFilter::default()).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(all.len(), 2);

    let videos = EventFilter {
        event_type: Some(EventType::Video),
        ..EventFilter::default()
    };
    let (found, total) = store.list_events(videos).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].id, event.id);

    let by_invitee = EventFilter {
        invitee_id: Some("invitee-2".to_string()),
        ..EventFilter::default()
    };
    let (found, _) = store.list_events(by_invitee).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Check-in");

    let longer = EventPatch {
        duration: Some(EventDuration::Minutes60),
        description: Some("Longer".to_string()),
        ..EventPatch::default()
    };
    store.update_event(event.id, longer).await.unwrap();
    let fetched = store.get_event(event.id).await.unwrap().unwrap();
    assert_eq!(fetched.duration, EventDuration::Minutes60);
    assert_eq!(fetched.description, "Longer");
    assert_eq!(fetched.title, "Intro Call");

    // A rejected update leaves the record untouched, timestamps included.
    let too_long = EventPatch {
        title: Some("x".repeat(256)),
        ..EventPatch::default()
    };
    let err = store.update_event(event.id, too_long).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::Validation(_)));
    assert_eq!(store.get_event(event.id).await.unwrap(), Some(fetched));

    let err = store
        .update_event(uuid::Uuid::new_v4(), EventPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));

    store.delete_event(event.id).await.unwrap();
    assert!(store.get_event(event.id).await.unwrap().is_none());
    let err = store.delete_event(event.id).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));
}

pub async fn duplicate_timeblock_rejected<S: ScheduleStore>(store: &S) {
    let owner = user(store, "u1").await;
    let event = intro_call(store).await;

    let first = store
        .create_timeblock(morning_block(&event, &owner))
        .await
        .unwrap();

    let err = store
        .create_timeblock(morning_block(&event, &owner))
        .await
        .unwrap_err();
    match err {
        ScheduleStoreError::UniqueViolation { constraint } => {
            assert_eq!(constraint, "unique_event_timeblock");
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    // Any differing column makes it a distinct row.
    store
        .create_timeblock(morning_block(&event, &owner).with_finalized(true))
        .await
        .unwrap();

    // The availability table has its own constraint.
    let mut availability = morning_block(&event, &owner);
    availability.kind = TimeblockKind::Availability;
    store.create_timeblock(availability.clone()).await.unwrap();
    availability.id = uuid::Uuid::new_v4();
    let err = store.create_timeblock(availability).await.unwrap_err();
    match err {
        ScheduleStoreError::UniqueViolation { constraint } => {
            assert_eq!(constraint, "unique_availability_timeblock");
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    let mut reused_id = morning_block(&event, &owner);
    reused_id.id = first.id;
    reused_id.preference_type = PreferenceType::Low;
    let err = store.create_timeblock(reused_id).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::AlreadyExists { .. }));

    let (blocks, total) = store
        .list_timeblocks(TimeblockKind::Event, TimeblockFilter::new())
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(blocks.len(), 2);
}

pub async fn unlinked_timeblocks_never_collide<S: ScheduleStore>(store: &S) {
    let owner = user(store, "u1").await;
    let make = || {
        Timeblock::availability(owner.id, may_first(), at(9, 0), at(9, 30), PreferenceType::Low)
    };

    store.create_timeblock(make()).await.unwrap();
    store.create_timeblock(make()).await.unwrap();

    let (blocks, _) = store
        .list_timeblocks(TimeblockKind::Availability, TimeblockFilter::new())
        .await
        .unwrap();
    assert_eq!(blocks.len(), 2);
}

pub async fn event_delete_unlinks_timeblocks<S: ScheduleStore>(store: &S) {
    let owner = user(store, "u1").await;
    let event = intro_call(store).await;

    let linked = store
        .create_timeblock(morning_block(&event, &owner))
        .await
        .unwrap();
    let mut availability = morning_block(&event, &owner);
    availability.kind = TimeblockKind::Availability;
    let availability = store.create_timeblock(availability).await.unwrap();

    store.delete_event(event.id).await.unwrap();

    let block = store
        .get_timeblock(TimeblockKind::Event, linked.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(block.event_id, None);
    assert_eq!(block.user_id, owner.id);
    assert_eq!(block.date, may_first());
    assert_eq!(block.start_time, at(9, 0));
    assert_eq!(block.end_time, at(9, 30));
    assert_eq!(block.preference_type, PreferenceType::High);
    assert!(!block.is_finalized);

    let block = store
        .get_timeblock(TimeblockKind::Availability, availability.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(block.event_id, None);

    // The same slot can be linked to a new event afterwards.
    let replacement = intro_call(store).await;
    store
        .create_timeblock(morning_block(&replacement, &owner))
        .await
        .unwrap();
}

pub async fn user_delete_cascades<S: ScheduleStore>(store: &S) {
    let leaving = user(store, "leaving").await;
    let staying = user(store, "staying").await;
    let event = intro_call(store).await;

    store
        .create_timeblock(morning_block(&event, &leaving))
        .await
        .unwrap();
    store
        .create_timeblock(Timeblock::availability(
            leaving.id,
            may_first(),
            at(13, 0),
            at(14, 0),
            PreferenceType::Medium,
        ))
        .await
        .unwrap();
    let kept = store
        .create_timeblock(morning_block(&event, &staying))
        .await
        .unwrap();

    store
        .create_contact(Contact::new(leaving.id, staying.id))
        .await
        .unwrap();
    store
        .create_contact(Contact::new(staying.id, leaving.id))
        .await
        .unwrap();

    store.delete_user(leaving.id).await.unwrap();

    let gone = TimeblockFilter::new().with_user(leaving.id);
    for kind in TimeblockKind::ALL {
        let (blocks, total) = store.list_timeblocks(kind, gone.clone()).await.unwrap();
        assert!(blocks.is_empty());
        assert_eq!(total, 0);
    }

    let (blocks, _) = store
        .list_timeblocks(TimeblockKind::Event, TimeblockFilter::new())
        .await
        .unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].id, kept.id);

    let (contacts, total) = store.list_contacts(ContactFilter::all()).await.unwrap();
    assert!(contacts.is_empty());
    assert_eq!(total, 0);

    // Events are not owned by users.
    assert!(store.get_event(event.id).await.unwrap().is_some());
}

pub async fn timeblock_references_checked<S: ScheduleStore>(store: &S) {
    let owner = user(store, "u1").await;
    let event = intro_call(store).await;

    let mut orphan = morning_block(&event, &owner);
    orphan.user_id = uuid::Uuid::new_v4();
    let err = store.create_timeblock(orphan).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::ForeignKeyViolation(_)));

    let mut dangling = morning_block(&event, &owner);
    dangling.event_id = Some(uuid::Uuid::new_v4());
    let err = store.create_timeblock(dangling).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::ForeignKeyViolation(_)));

    let backwards = Timeblock::availability(
        owner.id,
        may_first(),
        at(10, 0),
        at(9, 0),
        PreferenceType::Low,
    );
    let err = store.create_timeblock(backwards).await.unwrap_err();
    assert!(matches!(err, ScheduleStoreError::Validation(_)));

    let missing = store
        .get_timeblock(TimeblockKind::Event, uuid::Uuid::new_v4())
        .await
        .unwrap();
    assert!(missing.is_none());
    let err = store
        .delete_timeblock(TimeblockKind::Event, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));
}

pub async fn timeblock_filters<S: ScheduleStore>(store: &S) {
    let u1 = user(store, "u1").await;
    let u2 = user(store, "u2").await;
    let event = intro_call(store).await;
    let next_day = may_first() + Duration::days(1);

    let afternoon = store
        .create_timeblock(
            Timeblock::for_event(event.id, u1.id, may_first(), at(14, 0), at(15, 0), PreferenceType::Low)
                .with_finalized(true),
        )
        .await
        .unwrap();
    let morning = store
        .create_timeblock(morning_block(&event, &u1))
        .await
        .unwrap();
    let tomorrow = store
        .create_timeblock(Timeblock::for_event(
            event.id,
            u1.id,
            next_day,
            at(8, 0),
            at(8, 45),
            PreferenceType::Medium,
        ))
        .await
        .unwrap();
    let other_user = store
        .create_timeblock(morning_block(&event, &u2))
        .await
        .unwrap();

    let (blocks, total) = store
        .list_timeblocks(TimeblockKind::Event, TimeblockFilter::new().with_user(u1.id))
        .await
        .unwrap();
    assert_eq!(total, 3);
    let ids: Vec<_> = blocks.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![morning.id, afternoon.id, tomorrow.id]);

    let (blocks, _) = store
        .list_timeblocks(
            TimeblockKind::Event,
            TimeblockFilter::new().with_date(may_first()).with_finalized(true),
        )
        .await
        .unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].id, afternoon.id);

    let (blocks, total) = store
        .list_timeblocks(TimeblockKind::Event, TimeblockFilter::new().with_event(event.id))
        .await
        .unwrap();
    assert_eq!(total, 4);
    assert!(blocks.iter().any(|b| b.id == other_user.id));

    let page = TimeblockFilter {
        limit: Some(2),
        offset: Some(2),
        ..TimeblockFilter::new()
    };
    let (blocks, total) = store
        .list_timeblocks(TimeblockKind::Event, page)
        .await
        .unwrap();
    assert_eq!(total, 4);
    assert_eq!(blocks.len(), 2);

    let (blocks, total) = store
        .list_timeblocks(TimeblockKind::Availability, TimeblockFilter::new())
        .await
        .unwrap();
    assert!(blocks.is_empty());
    assert_eq!(total, 0);
}

pub async fn update_timeblock_into_conflict<S: ScheduleStore>(store: &S) {
    let owner = user(store, "u1").await;
    let event = intro_call(store).await;

    store
        .create_timeblock(morning_block(&event, &owner))
        .await
        .unwrap();
    let other = store
        .create_timeblock(morning_block(&event, &owner).with_finalized(true))
        .await
        .unwrap();

    let clash = TimeblockPatch {
        is_finalized: Some(false),
        ..TimeblockPatch::default()
    };
    let err = store
        .update_timeblock(TimeblockKind::Event, other.id, clash)
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::UniqueViolation { .. }));

    let moved = TimeblockPatch {
        end_time: Some(at(10, 0)),
        preference_type: Some(PreferenceType::Medium),
        ..TimeblockPatch::default()
    };
    let updated = store
        .update_timeblock(TimeblockKind::Event, other.id, moved)
        .await
        .unwrap();
    assert_eq!(updated.end_time, at(10, 0));
    assert!(updated.is_finalized);

    let fetched = store
        .get_timeblock(TimeblockKind::Event, other.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, updated);

    // Writing a block back unchanged never conflicts with itself.
    store
        .update_timeblock(TimeblockKind::Event, other.id, TimeblockPatch::default())
        .await
        .unwrap();

    let backwards = TimeblockPatch {
        start_time: Some(at(11, 0)),
        ..TimeblockPatch::default()
    };
    let err = store
        .update_timeblock(TimeblockKind::Event, other.id, backwards)
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::Validation(_)));

    let err = store
        .update_timeblock(TimeblockKind::Event, uuid::Uuid::new_v4(), TimeblockPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));

    // The id belongs to the event table only.
    let err = store
        .update_timeblock(TimeblockKind::Availability, other.id, TimeblockPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleStoreError::NotFound { .. }));
}

pub async fn concurrent_duplicate_inserts<S: ScheduleStore + 'static>(store: Arc<S>) {
    let owner = user(store.as_ref(), "u1").await;
    let event = intro_call(store.as_ref()).await;

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let store = Arc::clone(&store);
            let block = morning_block(&event, &owner);
            tokio::spawn(async move { store.create_timeblock(block).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(err) => assert!(matches!(err, ScheduleStoreError::UniqueViolation { .. })),
        }
    }
    assert_eq!(succeeded, 1);
}

pub async fn concurrent_partial_updates<S: ScheduleStore + 'static>(store: Arc<S>) {
    let alice = user(store.as_ref(), "alice").await;
    let id = alice.id;

    let patches = [
        UserPatch {
            email: Some("alice@example.org".to_string()),
            ..UserPatch::default()
        },
        UserPatch {
            first_name: Some("Alice".to_string()),
            ..UserPatch::default()
        },
        UserPatch {
            last_name: Some("Liddell".to_string()),
            ..UserPatch::default()
        },
        UserPatch {
            phone_number: Some(Some("555-0100".to_string())),
            ..UserPatch::default()
        },
    ];
    let handles: Vec<_> = patches
        .into_iter()
        .map(|patch| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.update_user(id, patch).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let merged = store.get_user(id).await.unwrap().unwrap();
    assert_eq!(merged.username, "alice");
    assert_eq!(merged.email, "alice@example.org");
    assert_eq!(merged.first_name, "Alice");
    assert_eq!(merged.last_name, "Liddell");
    assert_eq!(merged.phone_number.as_deref(), Some("555-0100"));
}

pub async fn records_read_back_as_created<S: ScheduleStore>(store: &S) {
    let precise = instant("2024-05-01T09:00:00.123456789Z");

    let mut alice = User::new("alice", "alice@example.com");
    alice.created_at = precise;
    alice.updated_at = precise;
    let alice = store.create_user(alice).await.unwrap();
    assert_eq!(alice.created_at, instant("2024-05-01T09:00:00.123456Z"));
    assert_eq!(store.get_user(alice.id).await.unwrap(), Some(alice.clone()));

    let bob = user(store, "bob").await;
    assert_eq!(store.get_user(bob.id).await.unwrap(), Some(bob.clone()));

    let mut contact = Contact::new(alice.id, bob.id);
    contact.added_at = precise;
    let contact = store.create_contact(contact).await.unwrap();
    assert_eq!(contact.added_at, instant("2024-05-01T09:00:00.123456Z"));
    assert_eq!(store.get_contact(contact.id).await.unwrap(), Some(contact));

    let event = intro_call(store).await;
    assert_eq!(store.get_event(event.id).await.unwrap(), Some(event.clone()));

    let named = UserPatch {
        first_name: Some("Alice".to_string()),
        ..UserPatch::default()
    };
    let updated = store.update_user(alice.id, named).await.unwrap();
    assert_eq!(store.get_user(alice.id).await.unwrap(), Some(updated));

    let described = EventPatch {
        description: Some("First chat".to_string()),
        ..EventPatch::default()
    };
    let updated = store.update_event(event.id, described).await.unwrap();
    assert_eq!(store.get_event(event.id).await.unwrap(), Some(updated));

    // Contacts added within one microsecond tie on `added_at` and fall back
    // to id order.
    let first = store
        .create_contact(
            Contact::new(bob.id, alice.id).with_added_at(instant("2024-05-03T09:00:00.000000100Z")),
        )
        .await
        .unwrap();
    let second = store
        .create_contact(
            Contact::new(bob.id, alice.id).with_added_at(instant("2024-05-03T09:00:00.000000900Z")),
        )
        .await
        .unwrap();
    assert_eq!(first.added_at, second.added_at);

    let (listed, _) = store
        .list_contacts(ContactFilter::for_user(bob.id))
        .await
        .unwrap();
    let mut expected = vec![first.id, second.id];
    expected.sort();
    assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), expected);
}

pub async fn duplicate_user_reported_by_username<S: ScheduleStore>(store: &S) {
    let alice = user(store, "alice").await;

    let err = store
        .create_user(User::new("alice", "other@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User already exists: alice");

    let mut same_id = User::new("alice2", "alice2@example.com");
    same_id.id = alice.id;
    let err = store.create_user(same_id).await.unwrap_err();
    assert_eq!(err.to_string(), "User already exists: alice2");
}
