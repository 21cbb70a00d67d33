mod common;

use common::{COLLECTION, FailingIdentityProvider, Fixture, settle};

use lg_core::{Coordinates, DEFAULT_COORDINATES};
use lg_sync::{BroadcasterConfig, BroadcasterState, ChannelSensor, SensorFault, WalkParams};

use std::sync::Arc;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use tokio::time::{Duration, sleep};

#[tokio::test(start_paused = true)]
async fn given_idle_broadcaster_when_started_simulated_then_active_and_first_record_written() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();

    assert_that!(broadcaster.start("Alice", true).await, ok(anything()));
    settle().await;

    assert_that!(broadcaster.state(), eq(BroadcasterState::Active));
    let identity = broadcaster.identity().unwrap().clone();
    let record = fixture.store.get(COLLECTION, &identity).await.unwrap();
    assert_eq!(record.display_name, "Alice");
    assert!(record.is_simulated);
    assert_eq!(broadcaster.current_position(), Some(record.coordinates()));
}

#[tokio::test(start_paused = true)]
async fn given_active_broadcaster_when_ticks_elapse_then_record_replaced_each_tick() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();
    broadcaster.start("Alice", true).await.unwrap();
    settle().await;
    let identity = broadcaster.identity().unwrap().clone();
    let first = fixture.store.get(COLLECTION, &identity).await.unwrap();

    sleep(Duration::from_millis(2000)).await;
    sleep(Duration::from_millis(2000)).await;

    let latest = fixture.store.get(COLLECTION, &identity).await.unwrap();
    assert_that!(broadcaster.status().samples_published, eq(3));
    assert!(latest.timestamp >= first.timestamp);
    assert_that!(fixture.store.len(COLLECTION).await, eq(1));
}

#[tokio::test(start_paused = true)]
async fn given_active_broadcaster_when_stopped_then_record_deleted_and_idle() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();
    broadcaster.start("Alice", true).await.unwrap();
    settle().await;

    assert_that!(broadcaster.stop().await, ok(anything()));

    assert_that!(broadcaster.state(), eq(BroadcasterState::Idle));
    assert!(broadcaster.identity().is_none());
    assert_that!(fixture.store.len(COLLECTION).await, eq(0));
}

#[tokio::test(start_paused = true)]
async fn given_stopped_broadcaster_when_time_passes_then_no_further_writes() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();
    broadcaster.start("Alice", true).await.unwrap();
    settle().await;
    broadcaster.stop().await.unwrap();

    sleep(Duration::from_secs(10)).await;

    assert_that!(fixture.store.len(COLLECTION).await, eq(0));
}

#[tokio::test(start_paused = true)]
async fn given_active_broadcaster_when_started_again_then_invalid_state() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();
    broadcaster.start("Alice", true).await.unwrap();

    let error = broadcaster.start("Alice", true).await.unwrap_err();

    assert_that!(error.error_code(), eq("INVALID_STATE"));
    assert_that!(broadcaster.state(), eq(BroadcasterState::Active));
}

#[tokio::test]
async fn given_idle_broadcaster_when_stopped_then_invalid_state() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();

    let error = broadcaster.stop().await.unwrap_err();

    assert_that!(error.error_code(), eq("INVALID_STATE"));
}

#[tokio::test]
async fn given_blank_name_when_started_then_validation_error_and_idle() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();

    let error = broadcaster.start("   ", true).await.unwrap_err();

    assert_that!(error.error_code(), eq("VALIDATION_ERROR"));
    assert_that!(broadcaster.state(), eq(BroadcasterState::Idle));
}

#[tokio::test]
async fn given_overlong_name_when_started_then_validation_error() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();

    let error = broadcaster.start(&"x".repeat(101), true).await.unwrap_err();

    assert_that!(error.error_code(), eq("VALIDATION_ERROR"));
}

#[tokio::test(start_paused = true)]
async fn given_padded_name_when_started_then_trimmed_name_published() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();

    broadcaster.start("  Alice  ", true).await.unwrap();
    settle().await;

    let identity = broadcaster.identity().unwrap().clone();
    let record = fixture.store.get(COLLECTION, &identity).await.unwrap();
    assert_eq!(record.display_name, "Alice");
}

#[tokio::test]
async fn given_failing_sign_in_when_started_then_auth_failure_and_nothing_written() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster_with(Arc::new(FailingIdentityProvider));

    let error = broadcaster.start("Alice", true).await.unwrap_err();
    settle().await;

    assert_that!(error.error_code(), eq("AUTH_FAILURE"));
    assert_that!(broadcaster.state(), eq(BroadcasterState::Idle));
    assert_that!(fixture.store.len(COLLECTION).await, eq(0));
}

#[tokio::test(start_paused = true)]
async fn given_failing_delete_when_stopped_then_write_failure_but_idle() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();
    broadcaster.start("Alice", true).await.unwrap();
    settle().await;
    fixture.store.set_fail_deletes(true);

    let error = broadcaster.stop().await.unwrap_err();

    assert_that!(error.error_code(), eq("WRITE_FAILURE"));
    assert_that!(broadcaster.state(), eq(BroadcasterState::Idle));
    assert_that!(fixture.store.len(COLLECTION).await, eq(1));
}

#[tokio::test(start_paused = true)]
async fn given_failing_writes_when_active_then_stays_active_with_no_record() {
    let fixture = Fixture::new();
    fixture.store.set_fail_writes(true);
    let mut broadcaster = fixture.broadcaster();

    broadcaster.start("Alice", true).await.unwrap();
    sleep(Duration::from_millis(2010)).await;

    assert!(broadcaster.is_active());
    assert_that!(fixture.store.len(COLLECTION).await, eq(0));
}

#[tokio::test(start_paused = true)]
async fn given_restart_when_started_again_then_new_identity() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();
    broadcaster.start("Alice", true).await.unwrap();
    let first = broadcaster.identity().unwrap().clone();
    broadcaster.stop().await.unwrap();

    broadcaster.start("Alice", true).await.unwrap();

    assert_ne!(broadcaster.identity().unwrap(), &first);
}

#[tokio::test(start_paused = true)]
async fn given_active_broadcaster_when_dropped_then_record_removed() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();
    broadcaster.start("Alice", true).await.unwrap();
    settle().await;
    assert_that!(fixture.store.len(COLLECTION).await, eq(1));

    drop(broadcaster);
    settle().await;

    assert_that!(fixture.store.len(COLLECTION).await, eq(0));
}

#[tokio::test]
async fn given_no_sensor_when_started_real_then_sensor_failure() {
    let fixture = Fixture::new();
    let mut broadcaster = fixture.broadcaster();

    let error = broadcaster.start("Alice", false).await.unwrap_err();

    assert_that!(error.error_code(), eq("SENSOR_FAILURE"));
    assert_that!(broadcaster.state(), eq(BroadcasterState::Idle));
}

#[tokio::test]
async fn given_sensor_readings_when_broadcasting_real_then_each_reading_published() {
    let fixture = Fixture::new();
    let sensor = ChannelSensor::new();
    let feed = sensor.feed();
    let mut broadcaster = fixture.sensor_broadcaster(&sensor);
    broadcaster.start("Bob", false).await.unwrap();
    let identity = broadcaster.identity().unwrap().clone();

    feed.push(DEFAULT_COORDINATES);
    settle().await;

    let record = fixture.store.get(COLLECTION, &identity).await.unwrap();
    assert!(!record.is_simulated);
    assert_that!(record.coordinates(), eq(DEFAULT_COORDINATES));
}

#[tokio::test]
async fn given_sensor_fault_when_broadcasting_then_tick_skipped_and_last_record_kept() {
    let fixture = Fixture::new();
    let sensor = ChannelSensor::new();
    let feed = sensor.feed();
    let mut broadcaster = fixture.sensor_broadcaster(&sensor);
    broadcaster.start("Bob", false).await.unwrap();
    let identity = broadcaster.identity().unwrap().clone();
    feed.push(DEFAULT_COORDINATES);
    settle().await;

    feed.fail(SensorFault::PositionUnavailable);
    settle().await;

    assert!(broadcaster.is_active());
    let record = fixture.store.get(COLLECTION, &identity).await.unwrap();
    assert_that!(record.coordinates(), eq(DEFAULT_COORDINATES));

    let moved = Coordinates::new(40.75, -73.98).unwrap();
    feed.push(moved);
    settle().await;

    let record = fixture.store.get(COLLECTION, &identity).await.unwrap();
    assert_that!(record.coordinates(), eq(moved));
    assert_that!(broadcaster.status().samples_published, eq(2));
}

#[tokio::test]
async fn given_out_of_range_reading_when_broadcasting_then_sample_skipped() {
    let fixture = Fixture::new();
    let sensor = ChannelSensor::new();
    let feed = sensor.feed();
    let mut broadcaster = fixture.sensor_broadcaster(&sensor);
    broadcaster.start("Bob", false).await.unwrap();

    feed.push(Coordinates {
        latitude: 120.0,
        longitude: 0.0,
    });
    settle().await;

    assert!(broadcaster.is_active());
    assert_that!(fixture.store.len(COLLECTION).await, eq(0));
    assert!(broadcaster.current_position().is_none());
}

#[tokio::test]
async fn given_real_broadcast_when_stopped_then_sensor_watch_released() {
    let fixture = Fixture::new();
    let sensor = ChannelSensor::new();
    let feed = sensor.feed();
    let mut broadcaster = fixture.sensor_broadcaster(&sensor);
    broadcaster.start("Bob", false).await.unwrap();
    assert!(feed.is_watching());

    broadcaster.stop().await.unwrap();

    assert!(!feed.is_watching());
}

#[tokio::test]
async fn given_unavailable_sensor_when_started_real_then_sensor_failure() {
    let fixture = Fixture::new();
    let sensor = ChannelSensor::unavailable();
    let mut broadcaster = fixture.sensor_broadcaster(&sensor);

    let result = broadcaster.start("Bob", false).await;

    assert_that!(result, err(anything()));
    assert!(!broadcaster.is_active());
}

#[tokio::test(start_paused = true)]
async fn given_origin_on_pole_with_max_variation_when_started_then_every_tick_published() {
    let fixture = Fixture::new();
    let config = BroadcasterConfig {
        walk: WalkParams {
            origin: Coordinates {
                latitude: 90.0,
                longitude: 180.0,
            },
            variation: 1.0,
            step: 0.1,
        },
        ..BroadcasterConfig::default()
    };
    let mut broadcaster = fixture.configured_broadcaster(config);

    broadcaster.start("Polar", true).await.unwrap();
    settle().await;
    let identity = broadcaster.identity().unwrap().clone();
    assert!(fixture.store.get(COLLECTION, &identity).await.is_some());

    for _ in 0..5 {
        sleep(Duration::from_millis(2000)).await;
    }

    assert_that!(broadcaster.status().samples_published, eq(6));
    let record = fixture.store.get(COLLECTION, &identity).await.unwrap();
    assert!(record.coordinates().is_valid());
}
