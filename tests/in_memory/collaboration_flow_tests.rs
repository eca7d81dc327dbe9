//! Full collaboration flows across lifecycle, audit, and fanout.

use super::helpers::{engine, seed_task};
use eyre::ensure;
use taskloom::notification::ports::NotificationRepository;
use taskloom::task::domain::{Difficulty, TaskStatus};
use taskloom::task::ports::{LifecycleStore, TransactionLog};

#[tokio::test(flavor = "multi_thread")]
async fn a_task_travels_the_whole_lifecycle_with_a_complete_audit_trail() -> eyre::Result<()> {
    let engine = engine();
    let creator = engine.directory.register("priya", "Priya Nair")?;
    let assignee = engine.directory.register("marco", "Marco Ruiz")?;
    let task = seed_task(&engine, creator.id(), "Migrate the billing jobs", Difficulty::Hard).await?;

    engine
        .lifecycle
        .assign(task.id(), creator.id(), assignee.id())
        .await?;
    engine.lifecycle.accept(task.id(), assignee.id()).await?;
    engine.lifecycle.finish(task.id(), assignee.id()).await?;
    engine
        .lifecycle
        .return_for_revision(task.id(), creator.id(), "cover the retry path")
        .await?;
    engine.lifecycle.finish(task.id(), assignee.id()).await?;
    let completed = engine
        .scoring
        .complete_with_score(task.id(), creator.id(), "thorough migration")
        .await?;

    ensure!(completed.status() == TaskStatus::Completed);
    ensure!(completed.assigned_to() == Some(assignee.id()));

    let comments: Vec<String> = engine
        .log
        .list_for_task(task.id())
        .await?
        .iter()
        .map(|row| row.comment().to_owned())
        .collect();
    ensure!(
        comments
            == vec![
                "Task assigned".to_owned(),
                "Task accepted".to_owned(),
                "Task finished".to_owned(),
                "Task returned for revision: cover the retry path".to_owned(),
                "Task finished".to_owned(),
                "Performance Point Added".to_owned(),
            ]
    );

    // Completed tasks accept no further lifecycle operations.
    let replay = engine.lifecycle.accept(task.id(), assignee.id()).await;
    ensure!(replay.as_ref().is_err_and(|err| err.is_invalid_state()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejection_reopens_the_task_for_another_assignee() -> eyre::Result<()> {
    let engine = engine();
    let creator = engine.directory.register("priya", "Priya Nair")?;
    let first = engine.directory.register("marco", "Marco Ruiz")?;
    let second = engine.directory.register("sam", "Sam Whittaker")?;
    let task = seed_task(&engine, creator.id(), "Tune the cache limits", Difficulty::Easy).await?;

    engine
        .lifecycle
        .assign(task.id(), creator.id(), first.id())
        .await?;
    engine
        .lifecycle
        .reject(task.id(), first.id(), "on leave next week")
        .await?;

    let reopened = engine.lifecycle.find(task.id()).await?;
    ensure!(
        reopened.as_ref().map(taskloom::task::domain::Task::status) == Some(TaskStatus::Assigned)
    );
    ensure!(reopened.as_ref().and_then(|current| current.assigned_to()).is_none());

    engine
        .lifecycle
        .assign(task.id(), creator.id(), second.id())
        .await?;
    engine.lifecycle.accept(task.id(), second.id()).await?;

    let current = engine.store.load(task.id()).await?;
    ensure!(current.as_ref().map(|task| task.status()) == Some(TaskStatus::InProgress));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_mentions_cross_the_subsystem_boundary() -> eyre::Result<()> {
    let engine = engine();
    let creator = engine.directory.register("priya", "Priya Nair")?;
    let assignee = engine.directory.register("marco", "Marco Ruiz")?;
    let watcher = engine.directory.register("sam", "Sam Whittaker")?;
    let task = seed_task(&engine, creator.id(), "Document the webhook API", Difficulty::Medium).await?;
    engine
        .lifecycle
        .assign(task.id(), creator.id(), assignee.id())
        .await?;

    engine
        .lifecycle
        .add_comment(
            task.id(),
            assignee.id(),
            "@sam could you sanity-check the auth section? cc @priya",
        )
        .await?;

    let watcher_inbox = engine
        .notifications
        .list_for_recipient(watcher.id())
        .await?;
    ensure!(watcher_inbox.len() == 1);
    ensure!(
        watcher_inbox.first().map(|row| row.message())
            == Some("marco mentioned you in task: Document the webhook API")
    );
    ensure!(
        !engine
            .notifications
            .list_for_recipient(creator.id())
            .await?
            .is_empty()
    );

    // Push deliveries happened for the mention recipients as well.
    let pushed_recipients: Vec<_> = engine
        .push
        .pushed()
        .into_iter()
        .map(|(recipient, _)| recipient)
        .collect();
    ensure!(pushed_recipients.contains(&watcher.id()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn expiry_is_reachable_until_a_terminal_status() -> eyre::Result<()> {
    let engine = engine();
    let creator = engine.directory.register("priya", "Priya Nair")?;
    let assignee = engine.directory.register("marco", "Marco Ruiz")?;
    let task = seed_task(&engine, creator.id(), "Rotate the signing keys", Difficulty::Medium).await?;
    engine
        .lifecycle
        .assign(task.id(), creator.id(), assignee.id())
        .await?;
    engine.lifecycle.accept(task.id(), assignee.id()).await?;

    engine.lifecycle.expire(task.id()).await?;

    let stored = engine.store.load(task.id()).await?;
    ensure!(stored.as_ref().map(|current| current.status()) == Some(TaskStatus::Expired));

    let replay = engine.lifecycle.expire(task.id()).await;
    ensure!(replay.as_ref().is_err_and(|err| err.is_invalid_state()));
    Ok(())
}
