//! Unit tests for task transition guards.

use crate::task::domain::{
    Difficulty, NewTaskParams, Task, TaskDomainError, TaskStatus, TransitionError, UserId,
};
use chrono::Duration;
use eyre::{bail, ensure};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn creator() -> UserId {
    UserId::new()
}

#[fixture]
fn assignee() -> UserId {
    UserId::new()
}

fn pending_task(creator: UserId, clock: &DefaultClock) -> eyre::Result<Task> {
    let deadline = clock.utc() + Duration::days(7);
    let params = NewTaskParams::new(creator, "Ship the release notes", Difficulty::Medium, deadline)
        .with_description("Collect highlights from the changelog");
    Ok(Task::new(params, clock)?)
}

/// Drives a fresh task into the requested status through real transitions.
fn task_in(
    status: TaskStatus,
    creator: UserId,
    assignee: UserId,
    clock: &DefaultClock,
) -> eyre::Result<Task> {
    let mut task = pending_task(creator, clock)?;
    match status {
        TaskStatus::Pending => {}
        TaskStatus::Assigned => task.assign(creator, assignee, clock)?,
        TaskStatus::InProgress => {
            task.assign(creator, assignee, clock)?;
            task.accept(assignee, clock)?;
        }
        TaskStatus::UnderReview => {
            task.assign(creator, assignee, clock)?;
            task.accept(assignee, clock)?;
            task.finish(assignee, clock)?;
        }
        TaskStatus::Completed => {
            task.assign(creator, assignee, clock)?;
            task.accept(assignee, clock)?;
            task.finish(assignee, clock)?;
            task.complete(creator, clock)?;
        }
        TaskStatus::Expired => task.expire(clock)?,
    }
    ensure!(task.status() == status);
    Ok(task)
}

#[rstest]
fn new_task_starts_pending_and_unassigned(
    creator: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let task = pending_task(creator, &clock)?;
    ensure!(task.status() == TaskStatus::Pending);
    ensure!(task.assigned_to().is_none());
    ensure!(task.version() == 0);
    ensure!(task.comments().is_empty());
    Ok(())
}

#[rstest]
fn subtasks_keep_their_parent_reference(creator: UserId, clock: DefaultClock) -> eyre::Result<()> {
    let parent = pending_task(creator, &clock)?;
    let deadline = clock.utc() + Duration::days(2);
    let params = NewTaskParams::new(creator, "Split out the appendix", Difficulty::Easy, deadline)
        .with_description("Follow-up carved off the release notes")
        .with_parent(parent.id());

    let subtask = Task::new(params, &clock)?;

    ensure!(subtask.parent() == Some(parent.id()));
    ensure!(subtask.description() == "Follow-up carved off the release notes");
    Ok(())
}

#[rstest]
fn reconstruction_from_persisted_data_preserves_the_aggregate(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let task = task_in(TaskStatus::InProgress, creator, assignee, &clock)?;
    let data = crate::task::domain::PersistedTaskData {
        id: task.id(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        difficulty: task.difficulty(),
        deadline: task.deadline(),
        status: task.status(),
        created_by: task.created_by(),
        assigned_to: task.assigned_to(),
        parent: task.parent(),
        comments: task.comments().to_vec(),
        version: task.version(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    };

    let restored = Task::from_persisted(data);

    ensure!(restored == task);
    Ok(())
}

#[rstest]
fn new_task_rejects_blank_title(creator: UserId, clock: DefaultClock) {
    let deadline = clock.utc() + Duration::days(1);
    let params = NewTaskParams::new(creator, "   ", Difficulty::Easy, deadline);
    assert_eq!(Task::new(params, &clock), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Assigned)]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::UnderReview)]
#[case(TaskStatus::Completed)]
#[case(TaskStatus::Expired)]
fn assign_is_legal_from_every_status(
    #[case] status: TaskStatus,
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(status, creator, assignee, &clock)?;
    let next_assignee = UserId::new();

    task.assign(creator, next_assignee, &clock)?;

    ensure!(task.status() == TaskStatus::Assigned);
    ensure!(task.assigned_to() == Some(next_assignee));
    Ok(())
}

#[rstest]
fn assign_by_non_creator_is_forbidden(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = pending_task(creator, &clock)?;
    let outsider = UserId::new();
    let before = task.clone();

    let result = task.assign(outsider, assignee, &clock);

    ensure!(matches!(result, Err(TransitionError::NotCreator { .. })));
    ensure!(result.as_ref().is_err_and(|err| err.is_forbidden()));
    ensure!(task == before);
    Ok(())
}

#[rstest]
fn assign_to_creator_is_forbidden(creator: UserId, clock: DefaultClock) -> eyre::Result<()> {
    let mut task = pending_task(creator, &clock)?;

    let result = task.assign(creator, creator, &clock);

    ensure!(matches!(result, Err(TransitionError::SelfAssignment { .. })));
    ensure!(task.status() == TaskStatus::Pending);
    ensure!(task.assigned_to().is_none());
    Ok(())
}

#[rstest]
#[case(TaskStatus::Pending, false)]
#[case(TaskStatus::Assigned, true)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::UnderReview, false)]
#[case(TaskStatus::Completed, false)]
#[case(TaskStatus::Expired, false)]
fn accept_is_legal_only_from_assigned(
    #[case] status: TaskStatus,
    #[case] expected: bool,
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(status, creator, assignee, &clock)?;

    let result = task.accept(assignee, &clock);

    if expected {
        ensure!(result.is_ok());
        ensure!(task.status() == TaskStatus::InProgress);
    } else {
        ensure!(matches!(result, Err(TransitionError::WrongStatus { .. })));
        ensure!(result.as_ref().is_err_and(TransitionError::is_invalid_state));
        ensure!(task.status() == status);
    }
    Ok(())
}

#[rstest]
fn accept_by_non_assignee_is_forbidden(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::Assigned, creator, assignee, &clock)?;
    let before_version = task.version();

    let result = task.accept(creator, &clock);

    ensure!(matches!(result, Err(TransitionError::NotAssignee { .. })));
    ensure!(task.status() == TaskStatus::Assigned);
    ensure!(task.version() == before_version);
    Ok(())
}

#[rstest]
fn reject_clears_assignee_and_keeps_status(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::Assigned, creator, assignee, &clock)?;

    task.reject(assignee, &clock)?;

    ensure!(task.status() == TaskStatus::Assigned);
    ensure!(task.assigned_to().is_none());
    Ok(())
}

#[rstest]
fn reject_cannot_be_replayed_after_assignee_cleared(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::Assigned, creator, assignee, &clock)?;
    task.reject(assignee, &clock)?;

    let result = task.reject(assignee, &clock);

    ensure!(matches!(result, Err(TransitionError::NotAssignee { .. })));
    Ok(())
}

#[rstest]
fn finish_moves_in_progress_work_to_review(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::InProgress, creator, assignee, &clock)?;

    task.finish(assignee, &clock)?;

    ensure!(task.status() == TaskStatus::UnderReview);
    Ok(())
}

#[rstest]
fn finish_outside_in_progress_is_rejected(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::Assigned, creator, assignee, &clock)?;

    let result = task.finish(assignee, &clock);

    ensure!(matches!(result, Err(TransitionError::WrongStatus { .. })));
    ensure!(task.status() == TaskStatus::Assigned);
    Ok(())
}

#[rstest]
fn return_for_revision_requires_the_creator(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::UnderReview, creator, assignee, &clock)?;

    let denied = task.return_for_revision(assignee, &clock);
    ensure!(matches!(denied, Err(TransitionError::NotCreator { .. })));
    ensure!(task.status() == TaskStatus::UnderReview);

    task.return_for_revision(creator, &clock)?;
    ensure!(task.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
fn complete_credits_the_assignee(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::UnderReview, creator, assignee, &clock)?;

    let credited = task.complete(creator, &clock)?;

    ensure!(credited == assignee);
    ensure!(task.status() == TaskStatus::Completed);
    ensure!(task.assigned_to() == Some(assignee));
    Ok(())
}

#[rstest]
fn complete_without_assignee_is_rejected(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::UnderReview, creator, assignee, &clock)?;
    task.unassign(creator, &clock)?;

    let result = task.complete(creator, &clock);

    ensure!(matches!(result, Err(TransitionError::MissingAssignee { .. })));
    ensure!(task.status() == TaskStatus::UnderReview);
    Ok(())
}

#[rstest]
fn complete_cannot_be_replayed(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(TaskStatus::Completed, creator, assignee, &clock)?;

    let result = task.complete(creator, &clock);

    if !matches!(result, Err(TransitionError::WrongStatus { .. })) {
        bail!("expected WrongStatus, got {result:?}");
    }
    Ok(())
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Assigned)]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::UnderReview)]
fn expire_is_legal_from_non_terminal_statuses(
    #[case] status: TaskStatus,
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(status, creator, assignee, &clock)?;

    task.expire(&clock)?;

    ensure!(task.status() == TaskStatus::Expired);
    Ok(())
}

#[rstest]
#[case(TaskStatus::Completed)]
#[case(TaskStatus::Expired)]
fn expire_is_rejected_from_terminal_statuses(
    #[case] status: TaskStatus,
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_in(status, creator, assignee, &clock)?;

    let result = task.expire(&clock);

    ensure!(matches!(result, Err(TransitionError::WrongStatus { .. })));
    ensure!(task.status() == status);
    Ok(())
}

#[rstest]
fn unassign_without_assignee_is_rejected(
    creator: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = pending_task(creator, &clock)?;

    let result = task.unassign(creator, &clock);

    ensure!(matches!(result, Err(TransitionError::MissingAssignee { .. })));
    Ok(())
}

#[rstest]
fn every_applied_transition_bumps_the_version(
    creator: UserId,
    assignee: UserId,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = pending_task(creator, &clock)?;

    task.assign(creator, assignee, &clock)?;
    ensure!(task.version() == 1);
    task.accept(assignee, &clock)?;
    ensure!(task.version() == 2);
    task.finish(assignee, &clock)?;
    ensure!(task.version() == 3);
    task.complete(creator, &clock)?;
    ensure!(task.version() == 4);
    Ok(())
}
