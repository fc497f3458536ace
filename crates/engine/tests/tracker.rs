use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use engine::{
    ConsumptionBasis, DatabaseGateway, EngineError, FuelGateway, NewEntry, RawEntry,
    ResultEngine, Tracker,
};
use migration::MigratorTrait;

/// In-memory gateway that can be switched into a failing state.
#[derive(Clone, Default)]
struct FakeGateway {
    entries: Arc<Mutex<Vec<RawEntry>>>,
    failing: Arc<AtomicBool>,
    add_calls: Arc<AtomicUsize>,
}

impl FakeGateway {
    fn with_entries(entries: Vec<RawEntry>) -> Self {
        let gateway = Self::default();
        *gateway.entries.lock().unwrap() = entries;
        gateway
    }

    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> ResultEngine<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EngineError::Persistence("gateway down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FuelGateway for FakeGateway {
    async fn load(&self) -> ResultEngine<Vec<RawEntry>> {
        self.check()?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn add(&self, entry: NewEntry) -> ResultEngine<RawEntry> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let raw = entry.with_id(Uuid::new_v4());
        self.entries.lock().unwrap().push(raw.clone());
        Ok(raw)
    }

    async fn delete(&self, id: Uuid) -> ResultEngine<()> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(EngineError::KeyNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, day).unwrap()
}

fn new_entry(day: u32, odometer: u64, liters: f64, total_price: f64) -> NewEntry {
    NewEntry {
        date: date(day),
        liters,
        total_price,
        odometer,
    }
}

fn raw(id: u128, odometer: u64) -> RawEntry {
    new_entry(1, odometer, 40.0, 80.0).with_id(Uuid::from_u128(id))
}

async fn tracker_with(gateway: FakeGateway) -> Tracker {
    let mut tracker = Tracker::builder().gateway(gateway).build().unwrap();
    tracker.load().await.unwrap();
    tracker
}

#[test]
fn build_without_gateway_fails() {
    let err = Tracker::builder().build().unwrap_err();
    assert_eq!(err, EngineError::InvalidConfig("missing gateway".to_string()));
}

#[tokio::test]
async fn load_builds_the_log() {
    let gateway = FakeGateway::with_entries(vec![raw(2, 10500), raw(1, 10000)]);
    let tracker = tracker_with(gateway).await;

    let odometers: Vec<u64> = tracker.entries().iter().map(|e| e.odometer()).collect();
    assert_eq!(odometers, vec![10000, 10500]);
    assert_eq!(tracker.stats().total_distance, 500);
}

#[tokio::test]
async fn failed_load_keeps_the_current_log() {
    let gateway = FakeGateway::with_entries(vec![raw(1, 10000)]);
    let mut tracker = tracker_with(gateway.clone()).await;

    gateway.fail(true);
    let err = tracker.load().await.unwrap_err();

    assert_eq!(err, EngineError::Persistence("gateway down".to_string()));
    assert_eq!(tracker.raw_entries(), &[raw(1, 10000)]);
}

#[tokio::test]
async fn add_rebuilds_the_log() {
    let gateway = FakeGateway::with_entries(vec![raw(1, 10000)]);
    let mut tracker = tracker_with(gateway.clone()).await;

    let stored = tracker
        .add(new_entry(15, 10500, 35.0, 70.0))
        .await
        .unwrap();

    assert_eq!(tracker.entries().len(), 2);
    assert_eq!(tracker.entries()[1].id(), stored.id);
    assert_eq!(tracker.entries()[1].trip_distance, Some(500));
    assert_eq!(gateway.entries.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_odometer_never_reaches_the_gateway() {
    let gateway = FakeGateway::with_entries(vec![raw(1, 15000)]);
    let mut tracker = tracker_with(gateway.clone()).await;

    let err = tracker
        .add(new_entry(2, 15000, 30.0, 60.0))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::DuplicateOdometer(15000));
    assert_eq!(
        err.to_string(),
        "an entry with odometer 15000 km already exists"
    );
    assert_eq!(gateway.add_calls.load(Ordering::SeqCst), 0);
    assert_eq!(tracker.raw_entries(), &[raw(1, 15000)]);
}

#[tokio::test]
async fn zero_odometer_is_never_a_duplicate() {
    let gateway = FakeGateway::with_entries(vec![raw(1, 0)]);
    let mut tracker = tracker_with(gateway).await;

    tracker.add(new_entry(2, 0, 30.0, 60.0)).await.unwrap();
    assert_eq!(tracker.entries().len(), 2);
}

#[tokio::test]
async fn invalid_entry_is_rejected() {
    let gateway = FakeGateway::default();
    let mut tracker = tracker_with(gateway.clone()).await;

    let err = tracker.add(new_entry(1, 10000, 0.0, 60.0)).await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidEntry(_)));
    assert_eq!(gateway.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_add_keeps_the_current_log() {
    let gateway = FakeGateway::with_entries(vec![raw(1, 10000)]);
    let mut tracker = tracker_with(gateway.clone()).await;

    gateway.fail(true);
    let err = tracker
        .add(new_entry(2, 10500, 35.0, 70.0))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::Persistence("gateway down".to_string()));
    assert_eq!(tracker.raw_entries(), &[raw(1, 10000)]);
}

#[tokio::test]
async fn delete_rebuilds_the_log() {
    let gateway = FakeGateway::with_entries(vec![raw(1, 10000), raw(2, 10500), raw(3, 11050)]);
    let mut tracker = tracker_with(gateway).await;

    tracker.delete(Uuid::from_u128(2)).await.unwrap();

    let entries = tracker.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].trip_distance, Some(1050));
}

#[tokio::test]
async fn failed_delete_keeps_the_current_log() {
    let gateway = FakeGateway::with_entries(vec![raw(1, 10000), raw(2, 10500)]);
    let mut tracker = tracker_with(gateway.clone()).await;

    gateway.fail(true);
    assert!(tracker.delete(Uuid::from_u128(2)).await.is_err());
    assert_eq!(tracker.entries().len(), 2);

    gateway.fail(false);
    let missing = Uuid::from_u128(9);
    assert_eq!(
        tracker.delete(missing).await,
        Err(EngineError::KeyNotFound(missing.to_string()))
    );
    assert_eq!(tracker.entries().len(), 2);
}

#[tokio::test]
async fn stats_follow_the_configured_basis() {
    let entries = vec![
        new_entry(1, 10000, 40.0, 80.0).with_id(Uuid::from_u128(1)),
        new_entry(15, 10500, 35.0, 70.0).with_id(Uuid::from_u128(2)),
        new_entry(31, 11050, 38.0, 52.0).with_id(Uuid::from_u128(3)),
    ];
    let tracker = Tracker::builder()
        .gateway(FakeGateway::default())
        .entries(entries)
        .consumption_basis(ConsumptionBasis::ExcludeFirstFill)
        .build()
        .unwrap();

    let stats = tracker.stats();
    assert!((stats.average_consumption - 73.0 / 1050.0 * 100.0).abs() < 1e-9);
    assert!((tracker.log().stats().average_consumption - 113.0 / 1050.0 * 100.0).abs() < 1e-9);
}

async fn database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

#[tokio::test]
async fn database_gateway_round_trip() {
    let gateway = DatabaseGateway::new(database().await);

    let later = gateway.add(new_entry(15, 10500, 35.0, 70.0)).await.unwrap();
    let earlier = gateway.add(new_entry(1, 10000, 40.0, 80.0)).await.unwrap();

    assert_eq!(gateway.load().await.unwrap(), vec![earlier.clone(), later]);

    gateway.delete(earlier.id).await.unwrap();
    assert_eq!(gateway.load().await.unwrap().len(), 1);
    assert_eq!(
        gateway.delete(earlier.id).await,
        Err(EngineError::KeyNotFound(earlier.id.to_string()))
    );
}

#[tokio::test]
async fn tracker_over_database() {
    let db = database().await;
    let mut tracker = Tracker::builder()
        .gateway(DatabaseGateway::new(db.clone()))
        .build()
        .unwrap();

    tracker.add(new_entry(1, 10000, 40.0, 80.0)).await.unwrap();
    tracker.add(new_entry(15, 10500, 35.0, 70.0)).await.unwrap();
    tracker.add(new_entry(31, 11050, 38.0, 52.0)).await.unwrap();
    assert_eq!(
        tracker.add(new_entry(31, 11050, 1.0, 1.0)).await,
        Err(EngineError::DuplicateOdometer(11050))
    );

    let mut reloaded = Tracker::builder()
        .gateway(DatabaseGateway::new(db))
        .build()
        .unwrap();
    reloaded.load().await.unwrap();

    assert_eq!(reloaded.entries(), tracker.entries());
    let stats = reloaded.stats();
    assert_eq!(stats.total_distance, 1050);
    assert!((stats.total_cost - 202.0).abs() < 1e-9);
    assert!((stats.average_consumption - 10.762).abs() < 1e-3);
}
