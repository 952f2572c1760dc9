// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use foreman_core::OutputEvent;
use foreman_state::CoordinatorState;
use foreman_supervisor::{EventParser, ParseError, ParsedEvent, Provider, ProviderRegistry};
use std::time::Duration;

/// Treats every stdout line as a bare JSON object with `type`/`subtype`/
/// `session_id` — enough to drive the pump without a real vendor CLI.
struct EchoParser;

impl EventParser for EchoParser {
    fn parse(&self, line: &[u8]) -> Result<ParsedEvent, ParseError> {
        let value: serde_json::Value = serde_json::from_slice(line).map_err(|e| ParseError(e.to_string()))?;
        let mut event = OutputEvent::new(value.get("type").and_then(|v| v.as_str()).unwrap_or_default(), line.to_vec());
        event.subtype = value.get("subtype").and_then(|v| v.as_str()).map(String::from);
        event.session_id = value.get("session_id").and_then(|v| v.as_str()).map(String::from);
        Ok(ParsedEvent::Event(event))
    }

    fn context_window_size(&self) -> usize {
        1_000
    }
}

/// A provider whose executable is the real `sh` on PATH, so tests exercise
/// the real spawn/resume path without depending on a vendor CLI being
/// installed.
struct ShProvider;

impl Provider for ShProvider {
    fn name(&self) -> &'static str {
        "sh"
    }

    fn known_paths(&self) -> &[&'static str] {
        &[]
    }

    fn build_argv(&self, _cfg: &SpawnConfig) -> Vec<String> {
        vec!["-c".to_string(), "echo '{\"type\":\"system\",\"subtype\":\"init\",\"session_id\":\"sess-1\"}'".to_string()]
    }

    fn parser(&self) -> &dyn EventParser {
        &EchoParser
    }

    fn mcp_config_subdir(&self) -> Option<&'static str> {
        None
    }

    fn kill_grace_period(&self) -> Duration {
        Duration::from_millis(50)
    }
}

fn spawn_params() -> SpawnWorkerParams {
    SpawnWorkerParams { provider: Some("sh".to_string()), agent_type: None, work_dir: None }
}

fn fixture() -> (Arc<CoordinatorState>, Arc<WorkerPool>, CoordinatorTools) {
    let state = Arc::new(CoordinatorState::new());
    let pool = Arc::new(WorkerPool::new());
    let fabric = Arc::new(Fabric::new(SystemClock));
    let mut registry = ProviderRegistry::new();
    registry.insert_test_provider(Arc::new(ShProvider));
    let tools = CoordinatorTools::new(
        state.clone(),
        pool.clone(),
        fabric,
        Arc::new(registry),
        Arc::new(PromptRegistry::new()),
        PathBuf::from("."),
        60_000,
    );
    (state, pool, tools)
}

#[tokio::test]
async fn spawn_worker_registers_a_ready_worker() {
    let (_state, pool, tools) = fixture();
    let result = tools.spawn_worker_impl(spawn_params()).await.unwrap();
    assert_eq!(result.worker_id, "worker-1");
    let worker = pool.get_worker(&WorkerId::new("worker-1")).unwrap();
    assert_eq!(worker.status, foreman_core::WorkerStatus::Ready);
    assert_eq!(worker.phase, WorkerPhase::Idle);
}

#[tokio::test]
async fn assign_task_moves_worker_to_implementing_and_creates_task() {
    let (state, _pool, tools) = fixture();
    tools.spawn_worker_impl(spawn_params()).await.unwrap();

    let result = tools
        .assign_task_impl(AssignTaskParams { worker_id: "worker-1".to_string(), task_id: "perl-abcd".to_string(), summary: None })
        .await
        .unwrap();

    assert_eq!(result.phase, WorkerPhase::Implementing);
    assert_eq!(result.status, TaskWorkflowStatus::Implementing);
    assert_eq!(state.task_assignment(&TaskId::parse("perl-abcd").unwrap()).unwrap().implementer, "worker-1");
}

#[tokio::test]
async fn assign_task_to_unknown_worker_fails() {
    let (_state, _pool, tools) = fixture();
    let err = tools
        .assign_task_impl(AssignTaskParams { worker_id: "ghost".to_string(), task_id: "perl-abcd".to_string(), summary: None })
        .await
        .unwrap_err();
    assert!(matches!(err, ForemanError::NotFound(_)));
}

async fn assigned_pair(tools: &CoordinatorTools) -> (TaskId, WorkerId, WorkerId) {
    tools.spawn_worker_impl(spawn_params()).await.unwrap();
    tools.spawn_worker_impl(spawn_params()).await.unwrap();
    let task_id = TaskId::parse("perl-abcd").unwrap();
    tools
        .assign_task_impl(AssignTaskParams { worker_id: "worker-1".to_string(), task_id: task_id.as_str().to_string(), summary: None })
        .await
        .unwrap();
    tools.callback_complete("worker-1").await;
    (task_id, WorkerId::new("worker-1"), WorkerId::new("worker-2"))
}

impl CoordinatorTools {
    /// Test helper: drive the implementer straight to `awaiting_review`
    /// without routing through `foreman-rpc`'s worker-side tools.
    async fn callback_complete(&self, worker_id: &str) {
        let worker_id = WorkerId::new(worker_id);
        let mut assignment = self.state.worker_assignment(&worker_id).unwrap();
        assignment.phase = WorkerPhase::AwaitingReview;
        self.state.set_worker_assignment(worker_id.clone(), assignment);
    }
}

#[tokio::test]
async fn full_review_cycle_reaches_completed() {
    let (_state, pool, tools) = fixture();
    let (task_id, implementer, reviewer) = assigned_pair(&tools).await;

    let review = tools
        .assign_task_review_impl(AssignTaskReviewParams {
            reviewer_id: reviewer.to_string(),
            task_id: task_id.as_str().to_string(),
            implementer_id: implementer.to_string(),
            summary: "please review".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(review.status, TaskWorkflowStatus::InReview);

    // Reviewer denies: task goes back to the implementer via feedback.
    tools.state.set_task_assignment(task_id.clone(), {
        let mut t = tools.state.task_assignment(&task_id).unwrap();
        t.status = TaskWorkflowStatus::Denied;
        t
    });
    tools.state.clear_worker_assignment(&reviewer);
    pool.set_worker_phase(&reviewer, WorkerPhase::Idle, None).unwrap();
    pool.complete(&reviewer).unwrap();

    let feedback = tools
        .assign_review_feedback_impl(AssignReviewFeedbackParams {
            implementer_id: implementer.to_string(),
            task_id: task_id.as_str().to_string(),
            feedback: "fix the tests".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(feedback.phase, WorkerPhase::AddressingFeedback);
    assert_eq!(feedback.status, TaskWorkflowStatus::Implementing);

    // Implementer re-completes and is approved directly this time.
    tools.callback_complete(implementer.as_str()).await;
    tools.state.set_task_assignment(task_id.clone(), {
        let mut t = tools.state.task_assignment(&task_id).unwrap();
        t.status = TaskWorkflowStatus::Approved;
        t
    });

    let commit = tools
        .approve_commit_impl(ApproveCommitParams { implementer_id: implementer.to_string(), task_id: task_id.as_str().to_string() })
        .await
        .unwrap();
    assert_eq!(commit.phase, WorkerPhase::Committing);

    let complete = tools.mark_task_complete_impl(MarkTaskCompleteParams { task_id: task_id.as_str().to_string() }).await.unwrap();
    assert_eq!(complete.status, TaskWorkflowStatus::Completed);
    assert!(tools.state.worker_assignment(&implementer).is_none());
    assert_eq!(pool.get_worker(&implementer).unwrap().status, foreman_core::WorkerStatus::Ready);
}

#[tokio::test]
async fn mark_task_failed_frees_implementer_and_reviewer() {
    let (state, pool, tools) = fixture();
    let (task_id, implementer, reviewer) = assigned_pair(&tools).await;
    tools
        .assign_task_review_impl(AssignTaskReviewParams {
            reviewer_id: reviewer.to_string(),
            task_id: task_id.as_str().to_string(),
            implementer_id: implementer.to_string(),
            summary: "please review".to_string(),
        })
        .await
        .unwrap();

    let result = tools.mark_task_failed_impl(MarkTaskFailedParams { task_id: task_id.as_str().to_string(), reason: "crashed".to_string() }).await.unwrap();
    assert_eq!(result.task_id, task_id.as_str());
    assert!(state.task_assignment(&task_id).is_none());
    assert!(state.worker_assignment(&implementer).is_none());
    assert!(state.worker_assignment(&reviewer).is_none());
    assert_eq!(pool.get_worker(&implementer).unwrap().status, foreman_core::WorkerStatus::Ready);
    assert_eq!(pool.get_worker(&reviewer).unwrap().status, foreman_core::WorkerStatus::Ready);
}

#[tokio::test]
async fn get_task_status_reports_current_status() {
    let (_state, _pool, tools) = fixture();
    let (task_id, _implementer, _reviewer) = assigned_pair(&tools).await;
    let status = tools.get_task_status_impl(GetTaskStatusParams { task_id: task_id.as_str().to_string() }).await.unwrap();
    assert_eq!(status.status, TaskWorkflowStatus::Implementing);
}

#[tokio::test]
async fn list_workers_reports_idle_and_assigned() {
    let (_state, _pool, tools) = fixture();
    let (_task_id, _implementer, _reviewer) = assigned_pair(&tools).await;
    let workers = tools.list_workers_impl();
    assert_eq!(workers.len(), 2);
    let implementer = workers.iter().find(|w| w.worker_id == "worker-1").unwrap();
    assert_eq!(implementer.phase, WorkerPhase::Implementing);
    let idle = workers.iter().find(|w| w.worker_id == "worker-2").unwrap();
    assert_eq!(idle.phase, WorkerPhase::Idle);
}

#[tokio::test]
async fn query_worker_state_filters_by_task_id() {
    let (_state, _pool, tools) = fixture();
    let (task_id, _implementer, _reviewer) = assigned_pair(&tools).await;
    let snapshot = tools.query_worker_state_impl(QueryWorkerStateParams { worker_id: None, task_id: Some(task_id.as_str().to_string()) });
    assert_eq!(snapshot.task_assignments.len(), 1);
    assert_eq!(snapshot.ready_workers, vec!["worker-2".to_string()]);
}

#[tokio::test]
async fn post_message_rejects_empty_content() {
    let (_state, _pool, tools) = fixture();
    let err = tools.post_message_impl(PostMessageParams { to: "worker-1".to_string(), content: String::new() }).await.unwrap_err();
    assert!(matches!(err, ForemanError::Validation(_)));
}

#[tokio::test]
async fn prepare_handoff_wraps_summary() {
    let (_state, _pool, tools) = fixture();
    let entry = tools.prepare_handoff_impl(PrepareHandoffParams { summary: "wrapping up for the day".to_string() }).unwrap();
    assert_eq!(entry.content, "[HANDOFF]\nwrapping up for the day");
    assert_eq!(entry.kind, foreman_core::MessageType::Handoff);
}

#[tokio::test]
async fn replace_worker_retires_and_spawns_a_replacement() {
    let (state, pool, tools) = fixture();
    tools.spawn_worker_impl(spawn_params()).await.unwrap();

    let result = tools.replace_worker_impl(ReplaceWorkerParams { worker_id: "worker-1".to_string() }).await.unwrap();
    assert_eq!(result.retired, "worker-1");
    assert_eq!(result.replacement, "worker-2");
    assert_eq!(pool.get_worker(&WorkerId::new("worker-1")).unwrap().status, foreman_core::WorkerStatus::Retired);
    assert!(state.worker_assignment(&WorkerId::new("worker-1")).is_none());
    assert_eq!(pool.get_worker(&WorkerId::new("worker-2")).unwrap().status, foreman_core::WorkerStatus::Ready);
}
