// File: raffbot-core/tests/registry_tests.rs
//
// Lifecycle transitions per channel: Absent -> Active -> Expired -> Absent,
// plus the lazy-expiry and sweep paths that take the same lock as every
// credit.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use raffbot_common::models::giveaway::Giveaway;
use raffbot_core::services::registry::GiveawayRegistry;
use raffbot_core::tasks::expiry_sweep::spawn_expiry_sweep_task;
use raffbot_core::Error;

const FEE: u128 = 166_666_666_666_667;

fn make_giveaway(channel_id: &str, hours: i64) -> Giveaway {
    let now = Utc::now();
    Giveaway::new(
        channel_id,
        "a hat",
        now,
        now + Duration::hours(hours),
        FEE,
        10,
    )
}

#[tokio::test]
async fn create_is_exclusive_per_channel() {
    let registry = GiveawayRegistry::new();
    registry.create(make_giveaway("chan-1", 24)).await.unwrap();

    let err = registry.create(make_giveaway("chan-1", 24)).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyActive(_)));

    // Other channels are unaffected.
    registry.create(make_giveaway("chan-2", 24)).await.unwrap();
}

#[tokio::test]
async fn expired_but_undrawn_record_still_blocks_create() {
    let registry = GiveawayRegistry::new();
    registry.create(make_giveaway("chan-1", 1)).await.unwrap();

    let later = Utc::now() + Duration::hours(2);
    assert_eq!(registry.expire_due(later).await, vec!["chan-1"]);

    // The record survives expiry and must be explicitly ended first.
    let status = registry.snapshot("chan-1", 5).await.unwrap();
    assert!(!status.is_active);
    let err = registry.create(make_giveaway("chan-1", 24)).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyActive(_)));
}

#[tokio::test]
async fn take_for_draw_frees_the_channel() {
    let registry = GiveawayRegistry::new();
    registry.create(make_giveaway("chan-1", 24)).await.unwrap();

    let taken = registry.take_for_draw("chan-1").await.unwrap();
    assert!(!taken.is_active);

    assert!(matches!(
        registry.snapshot("chan-1", 5).await,
        Err(Error::NoActiveGiveaway(_))
    ));
    // Scenario: a fresh create on the now-empty channel succeeds.
    registry.create(make_giveaway("chan-1", 24)).await.unwrap();
}

#[tokio::test]
async fn operations_on_missing_records_fail_cleanly() {
    let registry = GiveawayRegistry::new();

    assert!(matches!(
        registry.take_for_draw("nope").await,
        Err(Error::NoActiveGiveaway(_))
    ));
    assert!(matches!(
        registry.attach_announcement("nope", "msg-1").await,
        Err(Error::NoActiveGiveaway(_))
    ));
    assert!(matches!(
        registry.set_entry_fee("nope", FEE).await,
        Err(Error::NoActiveGiveaway(_))
    ));
    assert!(matches!(
        registry.set_entry_cap("nope", 5).await,
        Err(Error::NoActiveGiveaway(_))
    ));
}

#[tokio::test]
async fn setters_validate_and_do_not_change_lifecycle() {
    let registry = GiveawayRegistry::new();
    registry.create(make_giveaway("chan-1", 24)).await.unwrap();

    assert!(matches!(
        registry.set_entry_fee("chan-1", 0).await,
        Err(Error::InvalidAmount(_))
    ));
    assert!(matches!(
        registry.set_entry_cap("chan-1", 0).await,
        Err(Error::InvalidAmount(_))
    ));

    registry.set_entry_fee("chan-1", FEE * 2).await.unwrap();
    registry.set_entry_cap("chan-1", 3).await.unwrap();

    let status = registry.snapshot("chan-1", 5).await.unwrap();
    assert_eq!(status.tip_entry_fee, FEE * 2);
    assert_eq!(status.tip_entry_cap, 3);
    assert!(status.is_active);
}

#[tokio::test]
async fn reactions_only_count_on_the_announcement_message() {
    let registry = GiveawayRegistry::new();
    registry.create(make_giveaway("chan-1", 24)).await.unwrap();
    let now = Utc::now();

    // No announcement attached yet: nothing to react to.
    assert!(!registry.credit_reaction("chan-1", "alice", "msg-1", now).await);

    registry.attach_announcement("chan-1", "msg-1").await.unwrap();
    assert!(registry.credit_reaction("chan-1", "alice", "msg-1", now).await);
    assert!(!registry.credit_reaction("chan-1", "bob", "msg-other", now).await);
    // Duplicate delivery.
    assert!(!registry.credit_reaction("chan-1", "alice", "msg-1", now).await);
}

#[tokio::test]
async fn credits_lazily_expire_overdue_giveaways() {
    let registry = GiveawayRegistry::new();
    registry.create(make_giveaway("chan-1", 1)).await.unwrap();
    registry.attach_announcement("chan-1", "msg-1").await.unwrap();

    let later = Utc::now() + Duration::hours(2);
    assert_eq!(registry.credit_tip("chan-1", "alice", FEE * 3, later).await, 0);
    assert!(!registry.credit_reaction("chan-1", "alice", "msg-1", later).await);

    // The lazy check flipped the record, same as a sweep would.
    let status = registry.snapshot("chan-1", 5).await.unwrap();
    assert!(!status.is_active);
    assert_eq!(status.total_entries, 0);
}

#[tokio::test]
async fn credit_tip_is_zero_for_unknown_channels() {
    let registry = GiveawayRegistry::new();
    assert_eq!(registry.credit_tip("nope", "alice", FEE, Utc::now()).await, 0);
}

#[tokio::test]
async fn sweep_only_touches_overdue_records() {
    let registry = GiveawayRegistry::new();
    registry.create(make_giveaway("short", 1)).await.unwrap();
    registry.create(make_giveaway("long", 48)).await.unwrap();

    let later = Utc::now() + Duration::hours(2);
    let expired = registry.expire_due(later).await;
    assert_eq!(expired, vec!["short"]);

    assert!(!registry.snapshot("short", 5).await.unwrap().is_active);
    assert!(registry.snapshot("long", 5).await.unwrap().is_active);

    // Idempotent: a second pass finds nothing new.
    assert!(registry.expire_due(later).await.is_empty());
}

#[tokio::test]
async fn background_sweep_task_expires_overdue_giveaways() {
    let registry = Arc::new(GiveawayRegistry::new());
    let now = Utc::now();
    let overdue = Giveaway::new(
        "chan-1",
        "a sticker",
        now - Duration::hours(2),
        now - Duration::hours(1),
        FEE,
        10,
    );
    registry.create(overdue).await.unwrap();

    let handle = spawn_expiry_sweep_task(registry.clone(), StdDuration::from_millis(10));
    tokio::time::sleep(StdDuration::from_millis(100)).await;
    handle.abort();

    let status = registry.snapshot("chan-1", 5).await.unwrap();
    assert!(!status.is_active);
}
