//! Scoring flows: awards, the leaderboard, and racing completions.

use super::helpers::{engine, seed_task};
use eyre::ensure;
use taskloom::scoring::ports::PerformancePointRepository;
use taskloom::task::domain::{Difficulty, TaskStatus, UserId};
use taskloom::task::ports::LifecycleStore;

async fn completed_task_for(
    engine: &super::helpers::Engine,
    creator: UserId,
    assignee: UserId,
    title: &str,
    difficulty: Difficulty,
    reason: &str,
) -> eyre::Result<()> {
    let task = seed_task(engine, creator, title, difficulty).await?;
    engine.lifecycle.assign(task.id(), creator, assignee).await?;
    engine.lifecycle.accept(task.id(), assignee).await?;
    engine.lifecycle.finish(task.id(), assignee).await?;
    engine
        .scoring
        .complete_with_score(task.id(), creator, reason)
        .await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn the_leaderboard_accumulates_across_tasks_and_users() -> eyre::Result<()> {
    let engine = engine();
    let creator = engine.directory.register("priya", "Priya Nair")?;
    let marco = engine.directory.register("marco", "Marco Ruiz")?;
    let sam = engine.directory.register("sam", "Sam Whittaker")?;

    completed_task_for(&engine, creator.id(), marco.id(), "Easy cleanup", Difficulty::Easy, "tidy").await?;
    completed_task_for(&engine, creator.id(), sam.id(), "Hard refactor", Difficulty::Hard, "brave").await?;
    completed_task_for(&engine, creator.id(), marco.id(), "Medium feature", Difficulty::Medium, "solid").await?;

    let board = engine.scoring.leaderboard().await?;

    ensure!(board.len() == 2);
    ensure!(board.first().map(|entry| (entry.total(), entry.display_name().to_owned()))
        == Some((30, "Marco Ruiz".to_owned())));
    ensure!(board.get(1).map(|entry| (entry.total(), entry.display_name().to_owned()))
        == Some((30, "Sam Whittaker".to_owned())));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn one_completed_task_yields_exactly_one_award() -> eyre::Result<()> {
    let engine = engine();
    let creator = engine.directory.register("priya", "Priya Nair")?;
    let marco = engine.directory.register("marco", "Marco Ruiz")?;
    let task = seed_task(&engine, creator.id(), "Ship the exporter", Difficulty::Hard).await?;
    engine
        .lifecycle
        .assign(task.id(), creator.id(), marco.id())
        .await?;
    engine.lifecycle.accept(task.id(), marco.id()).await?;
    engine.lifecycle.finish(task.id(), marco.id()).await?;

    engine
        .scoring
        .complete_with_score(task.id(), creator.id(), "great work")
        .await?;
    let replay = engine
        .scoring
        .complete_with_score(task.id(), creator.id(), "again")
        .await;

    ensure!(replay.as_ref().is_err_and(|err| err.is_invalid_state()));
    ensure!(engine.points.list_for_task(task.id()).await?.len() == 1);
    let stored = engine.store.load(task.id()).await?;
    ensure!(stored.as_ref().map(|current| current.status()) == Some(TaskStatus::Completed));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn racing_completions_are_serialised_by_the_version_guard() -> eyre::Result<()> {
    let engine = engine();
    let creator = engine.directory.register("priya", "Priya Nair")?;
    let marco = engine.directory.register("marco", "Marco Ruiz")?;
    let task = seed_task(&engine, creator.id(), "Close out the audit", Difficulty::Medium).await?;
    engine
        .lifecycle
        .assign(task.id(), creator.id(), marco.id())
        .await?;
    engine.lifecycle.accept(task.id(), marco.id()).await?;
    engine.lifecycle.finish(task.id(), marco.id()).await?;

    let first_review = engine
        .scoring
        .complete_with_score(task.id(), creator.id(), "reviewed");
    let second_review = engine
        .scoring
        .complete_with_score(task.id(), creator.id(), "reviewed twice");
    let (winner, loser) = tokio::join!(first_review, second_review);

    // Exactly one caller observed the precondition as true.
    ensure!(winner.is_ok() != loser.is_ok());
    ensure!(
        [winner.as_ref(), loser.as_ref()]
            .into_iter()
            .filter_map(Result::err)
            .all(|err| err.is_invalid_state())
    );
    ensure!(engine.points.list_for_task(task.id()).await?.len() == 1);
    Ok(())
}
