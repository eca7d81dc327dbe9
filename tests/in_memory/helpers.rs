//! Shared harness wiring the full engine over the in-memory adapters.

use std::sync::Arc;

use chrono::Duration;
use mockable::{Clock, DefaultClock};
use taskloom::notification::adapters::memory::{
    InMemoryNotificationRepository, InMemoryUserDirectory, RecordingPushTransport,
};
use taskloom::notification::services::NotificationFanout;
use taskloom::scoring::adapters::memory::InMemoryPerformancePointRepository;
use taskloom::scoring::services::ScoringEngine;
use taskloom::task::adapters::memory::{InMemoryLifecycleStore, InMemoryTransactionLog};
use taskloom::task::domain::{Difficulty, NewTaskParams, Task, UserId};
use taskloom::task::ports::LifecycleStore;
use taskloom::task::services::{AuditLedger, TaskLifecycleService};

pub type Lifecycle = TaskLifecycleService<
    InMemoryLifecycleStore,
    InMemoryTransactionLog,
    InMemoryNotificationRepository,
    RecordingPushTransport,
    InMemoryUserDirectory,
    DefaultClock,
>;

pub type Scoring = ScoringEngine<
    InMemoryLifecycleStore,
    InMemoryTransactionLog,
    InMemoryPerformancePointRepository,
    InMemoryNotificationRepository,
    RecordingPushTransport,
    InMemoryUserDirectory,
    DefaultClock,
>;

pub struct Engine {
    pub lifecycle: Lifecycle,
    pub scoring: Scoring,
    pub store: InMemoryLifecycleStore,
    pub log: InMemoryTransactionLog,
    pub notifications: InMemoryNotificationRepository,
    pub points: InMemoryPerformancePointRepository,
    pub push: RecordingPushTransport,
    pub directory: InMemoryUserDirectory,
}

pub fn engine() -> Engine {
    let log = InMemoryTransactionLog::new();
    let notifications = InMemoryNotificationRepository::new();
    let points = InMemoryPerformancePointRepository::new();
    let store = InMemoryLifecycleStore::new(log.clone(), notifications.clone(), points.clone());
    let push = RecordingPushTransport::new();
    let directory = InMemoryUserDirectory::new();
    let clock = Arc::new(DefaultClock);
    let ledger = AuditLedger::new(Arc::new(log.clone()), Arc::clone(&clock));
    let fanout = NotificationFanout::new(
        Arc::new(notifications.clone()),
        Arc::new(push.clone()),
        Arc::clone(&clock),
    );
    let lifecycle = TaskLifecycleService::new(
        Arc::new(store.clone()),
        ledger.clone(),
        fanout.clone(),
        Arc::new(directory.clone()),
        Arc::clone(&clock),
    );
    let scoring = ScoringEngine::new(
        Arc::new(store.clone()),
        ledger,
        Arc::new(points.clone()),
        fanout,
        Arc::new(directory.clone()),
        clock,
    );
    Engine {
        lifecycle,
        scoring,
        store,
        log,
        notifications,
        points,
        push,
        directory,
    }
}

pub async fn seed_task(
    engine: &Engine,
    creator: UserId,
    title: &str,
    difficulty: Difficulty,
) -> eyre::Result<Task> {
    let clock = DefaultClock;
    let deadline = clock.utc() + Duration::days(14);
    let task = Task::new(NewTaskParams::new(creator, title, difficulty, deadline), &clock)?;
    engine.store.insert(&task).await?;
    Ok(task)
}
