// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The 15 coordinator-side RPC tools: state mutation, fabric messaging, and
//! worker subprocess lifecycle, behind an `rmcp` tool router.

use crate::error::ForemanError;
use crate::tracker::{StateTracker, TaskTracker, TrackerStatus};
use foreman_core::{
    Clock, SystemClock, TaskAssignment, TaskId, TaskWorkflowStatus, WorkerAssignment, WorkerId, WorkerPhase, WorkerRole,
    MessageEntry, COORDINATOR,
};
use foreman_fabric::Fabric;
use foreman_prompts::{AgentType, PromptRegistry};
use foreman_state::{CoordinatorState, WorkerPool};
use foreman_supervisor::{ProviderRegistry, SpawnConfig, Supervisor};
use parking_lot::Mutex;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Default)]
pub struct SpawnWorkerParams {
    /// Provider name, e.g. "claude". Defaults to the first registered provider.
    #[serde(default)]
    pub provider: Option<String>,
    /// Agent type: generic, implementer, reviewer, or researcher. Defaults to generic.
    #[serde(default)]
    pub agent_type: Option<String>,
    /// Working directory the subprocess is spawned in. Defaults to the coordinator's own.
    #[serde(default)]
    pub work_dir: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct SpawnWorkerResult {
    pub worker_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct AssignTaskParams {
    pub worker_id: String,
    pub task_id: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct AssignTaskResult {
    pub worker_id: String,
    pub task_id: String,
    pub phase: WorkerPhase,
    pub status: TaskWorkflowStatus,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct AssignTaskReviewParams {
    pub reviewer_id: String,
    pub task_id: String,
    pub implementer_id: String,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct AssignTaskReviewResult {
    pub reviewer_id: String,
    pub task_id: String,
    pub phase: WorkerPhase,
    pub status: TaskWorkflowStatus,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct AssignReviewFeedbackParams {
    pub implementer_id: String,
    pub task_id: String,
    pub feedback: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct AssignReviewFeedbackResult {
    pub implementer_id: String,
    pub task_id: String,
    pub phase: WorkerPhase,
    pub status: TaskWorkflowStatus,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ApproveCommitParams {
    pub implementer_id: String,
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ApproveCommitResult {
    pub implementer_id: String,
    pub task_id: String,
    pub phase: WorkerPhase,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct MarkTaskCompleteParams {
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct MarkTaskCompleteResult {
    pub task_id: String,
    pub status: TaskWorkflowStatus,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct MarkTaskFailedParams {
    pub task_id: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct MarkTaskFailedResult {
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct GetTaskStatusParams {
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ReplaceWorkerParams {
    pub worker_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ReplaceWorkerResult {
    pub retired: String,
    pub replacement: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct SendToWorkerParams {
    pub worker_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct PostMessageParams {
    pub to: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Default)]
pub struct ReadMessageLogParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Default)]
pub struct ListWorkersParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct WorkerSummary {
    pub worker_id: String,
    pub phase: WorkerPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<WorkerRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Default)]
pub struct QueryWorkerStateParams {
    #[serde(default)]
    pub worker_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct QueryWorkerStateResult {
    pub workers: Vec<WorkerSummary>,
    pub task_assignments: Vec<TaskAssignment>,
    pub ready_workers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct PrepareHandoffParams {
    pub summary: String,
}

/// Coordinator-side state shared with [`crate::worker_tools::WorkerTools`]
/// via [`crate::callback::CoordinatorCallback`].
pub struct CoordinatorTools {
    state: Arc<CoordinatorState>,
    pool: Arc<WorkerPool>,
    fabric: Arc<Fabric<SystemClock>>,
    clock: SystemClock,
    providers: Arc<ProviderRegistry>,
    prompts: Arc<PromptRegistry>,
    tracker: Arc<dyn TaskTracker>,
    supervisors: Mutex<HashMap<WorkerId, Supervisor>>,
    worker_providers: Mutex<HashMap<WorkerId, &'static str>>,
    base_work_dir: PathBuf,
    next_worker_seq: AtomicU64,
    max_task_duration_ms: u64,
    tool_router: ToolRouter<Self>,
}

#[rmcp::tool_router(router = tool_router)]
impl CoordinatorTools {
    pub fn new(
        state: Arc<CoordinatorState>,
        pool: Arc<WorkerPool>,
        fabric: Arc<Fabric<SystemClock>>,
        providers: Arc<ProviderRegistry>,
        prompts: Arc<PromptRegistry>,
        base_work_dir: PathBuf,
        max_task_duration_ms: u64,
    ) -> Self {
        let tracker = Arc::new(StateTracker::new(state.clone())) as Arc<dyn TaskTracker>;
        Self {
            state,
            pool,
            fabric,
            clock: SystemClock,
            providers,
            prompts,
            tracker,
            supervisors: Mutex::new(HashMap::new()),
            worker_providers: Mutex::new(HashMap::new()),
            base_work_dir,
            next_worker_seq: AtomicU64::new(1),
            max_task_duration_ms,
            tool_router: Self::tool_router(),
        }
    }

    fn next_worker_id(&self) -> WorkerId {
        let n = self.next_worker_seq.fetch_add(1, Ordering::SeqCst);
        WorkerId::new(format!("worker-{n}"))
    }

    async fn spawn_worker_with(&self, provider_name: &str, agent_type: AgentType, work_dir: PathBuf) -> Result<WorkerId, ForemanError> {
        let provider = self.providers.get(provider_name)?;
        let worker_id = self.next_worker_id();

        let system_prompt = self.prompts.system_prompt(&worker_id, agent_type, None);
        let initial_prompt = self.prompts.initial_prompt(&worker_id, agent_type, None);
        let cfg = SpawnConfig::new(work_dir, initial_prompt).system_prompt(system_prompt);

        let supervisor = Supervisor::spawn(provider.clone(), cfg).await?;

        self.pool.add_worker(worker_id.clone());
        self.supervisors.lock().insert(worker_id.clone(), supervisor);
        self.worker_providers.lock().insert(worker_id.clone(), provider.name());
        Ok(worker_id)
    }

    /// Re-spawns a worker's subprocess with a new prompt, resuming its prior
    /// session if one is known. Each vendor CLI invocation is a one-shot
    /// process; "resuming" means starting a fresh one with `--resume`.
    async fn resume_worker(&self, worker_id: &WorkerId, prompt: String) -> Result<(), ForemanError> {
        let provider_name = self
            .worker_providers
            .lock()
            .get(worker_id)
            .copied()
            .ok_or_else(|| ForemanError::NotFound(format!("worker {worker_id} has no known provider")))?;
        let session_id = self.supervisors.lock().get(worker_id).and_then(Supervisor::session_ref);

        let provider = self.providers.get(provider_name)?;
        let mut cfg = SpawnConfig::new(self.base_work_dir.clone(), prompt);
        if let Some(session_id) = session_id {
            cfg = cfg.session_id(session_id);
        }
        let supervisor = Supervisor::spawn(provider, cfg).await?;
        self.supervisors.lock().insert(worker_id.clone(), supervisor);
        Ok(())
    }

    fn worker_summary(&self, id: &WorkerId) -> WorkerSummary {
        match self.state.worker_assignment(id) {
            Some(assignment) => WorkerSummary {
                worker_id: id.to_string(),
                phase: assignment.phase,
                role: Some(assignment.role),
                task_id: Some(assignment.task_id.as_str().to_string()),
            },
            None => WorkerSummary {
                worker_id: id.to_string(),
                phase: WorkerPhase::Idle,
                role: None,
                task_id: None,
            },
        }
    }

    async fn spawn_worker_impl(&self, params: SpawnWorkerParams) -> Result<SpawnWorkerResult, ForemanError> {
        let provider_name = params.provider.unwrap_or_else(|| "claude".to_string());
        let agent_type = match &params.agent_type {
            Some(s) => AgentType::parse(s)?,
            None => AgentType::Generic,
        };
        let work_dir = params.work_dir.map(PathBuf::from).unwrap_or_else(|| self.base_work_dir.clone());
        let worker_id = self.spawn_worker_with(&provider_name, agent_type, work_dir).await?;
        Ok(SpawnWorkerResult { worker_id: worker_id.to_string() })
    }

    async fn assign_task_impl(&self, params: AssignTaskParams) -> Result<AssignTaskResult, ForemanError> {
        let worker_id = WorkerId::parse(params.worker_id)?;
        let task_id = TaskId::parse(params.task_id)?;

        self.state.validate_task_assignment(&worker_id, &task_id, &self.pool)?;
        self.pool.assign(&worker_id)?;

        let now = self.clock.epoch_ms();
        self.state.set_worker_and_task_assignment(
            worker_id.clone(),
            WorkerAssignment {
                task_id: task_id.clone(),
                role: WorkerRole::Implementer,
                phase: WorkerPhase::Implementing,
                assigned_at: now,
                implementer_id: None,
                reviewer_id: None,
            },
            task_id.clone(),
            TaskAssignment {
                task_id: task_id.clone(),
                implementer: worker_id.clone(),
                reviewer: None,
                status: TaskWorkflowStatus::Implementing,
                started_at: now,
                review_started_at: None,
            },
        );
        self.pool.set_worker_phase(&worker_id, WorkerPhase::Implementing, Some(task_id.clone()))?;

        let mut prompt = format!("You have been assigned task {task_id}. Implement it.");
        if let Some(summary) = &params.summary {
            prompt.push_str(&format!("\n\n{summary}"));
        }
        self.resume_worker(&worker_id, prompt).await?;

        Ok(AssignTaskResult {
            worker_id: worker_id.to_string(),
            task_id: task_id.as_str().to_string(),
            phase: WorkerPhase::Implementing,
            status: TaskWorkflowStatus::Implementing,
        })
    }

    async fn assign_task_review_impl(&self, params: AssignTaskReviewParams) -> Result<AssignTaskReviewResult, ForemanError> {
        let reviewer_id = WorkerId::parse(params.reviewer_id)?;
        let implementer_id = WorkerId::parse(params.implementer_id)?;
        let task_id = TaskId::parse(params.task_id)?;

        self.state.validate_review_assignment(&reviewer_id, &task_id, &implementer_id, &self.pool)?;
        self.pool.assign(&reviewer_id)?;

        let now = self.clock.epoch_ms();
        let mut task = self
            .state
            .task_assignment(&task_id)
            .ok_or_else(|| ForemanError::NotFound(format!("task {task_id} not found")))?;
        task.status.validate_transition(TaskWorkflowStatus::InReview)?;
        task.status = TaskWorkflowStatus::InReview;
        task.reviewer = Some(reviewer_id.clone());
        task.review_started_at = Some(now);

        self.state.set_worker_and_task_assignment(
            reviewer_id.clone(),
            WorkerAssignment {
                task_id: task_id.clone(),
                role: WorkerRole::Reviewer,
                phase: WorkerPhase::Reviewing,
                assigned_at: now,
                implementer_id: Some(implementer_id.clone()),
                reviewer_id: None,
            },
            task_id.clone(),
            task,
        );
        self.pool.set_worker_phase(&reviewer_id, WorkerPhase::Reviewing, Some(task_id.clone()))?;

        if let Some(mut impl_assignment) = self.state.worker_assignment(&implementer_id) {
            impl_assignment.reviewer_id = Some(reviewer_id.clone());
            self.state.set_worker_assignment(implementer_id.clone(), impl_assignment);
        }

        let prompt = format!("You are reviewing task {task_id}, implemented by {implementer_id}.\n\n{}", params.summary);
        self.resume_worker(&reviewer_id, prompt).await?;

        Ok(AssignTaskReviewResult {
            reviewer_id: reviewer_id.to_string(),
            task_id: task_id.as_str().to_string(),
            phase: WorkerPhase::Reviewing,
            status: TaskWorkflowStatus::InReview,
        })
    }

    async fn assign_review_feedback_impl(&self, params: AssignReviewFeedbackParams) -> Result<AssignReviewFeedbackResult, ForemanError> {
        let implementer_id = WorkerId::parse(params.implementer_id)?;
        let task_id = TaskId::parse(params.task_id)?;

        let mut task = self
            .state
            .task_assignment(&task_id)
            .ok_or_else(|| ForemanError::NotFound(format!("task {task_id} not found")))?;
        if task.status != TaskWorkflowStatus::Denied {
            return Err(ForemanError::Invariant(format!("task {task_id} is not denied (status: {})", task.status)));
        }
        task.status.validate_transition(TaskWorkflowStatus::Implementing)?;
        task.status = TaskWorkflowStatus::Implementing;

        let mut assignment = self
            .state
            .worker_assignment(&implementer_id)
            .ok_or_else(|| ForemanError::NotFound(format!("worker {implementer_id} has no active assignment")))?;
        assignment.phase.validate_transition(WorkerPhase::AddressingFeedback)?;
        assignment.phase = WorkerPhase::AddressingFeedback;
        assignment.reviewer_id = None;

        self.state.set_worker_and_task_assignment(implementer_id.clone(), assignment, task_id.clone(), task);
        self.pool.set_worker_phase(&implementer_id, WorkerPhase::AddressingFeedback, Some(task_id.clone()))?;

        let prompt = format!("Review feedback for task {task_id}:\n\n{}", params.feedback);
        self.resume_worker(&implementer_id, prompt).await?;

        Ok(AssignReviewFeedbackResult {
            implementer_id: implementer_id.to_string(),
            task_id: task_id.as_str().to_string(),
            phase: WorkerPhase::AddressingFeedback,
            status: TaskWorkflowStatus::Implementing,
        })
    }

    async fn approve_commit_impl(&self, params: ApproveCommitParams) -> Result<ApproveCommitResult, ForemanError> {
        let implementer_id = WorkerId::parse(params.implementer_id)?;
        let task_id = TaskId::parse(params.task_id)?;

        let mut task = self
            .state
            .task_assignment(&task_id)
            .ok_or_else(|| ForemanError::NotFound(format!("task {task_id} not found")))?;
        if task.implementer != implementer_id {
            return Err(ForemanError::Invariant(format!(
                "task {task_id} implementer mismatch: expected {}, got {implementer_id}",
                task.implementer
            )));
        }
        if task.status != TaskWorkflowStatus::Approved {
            return Err(ForemanError::Invariant(format!("task {task_id} is not approved (status: {})", task.status)));
        }
        task.status.validate_transition(TaskWorkflowStatus::Committing)?;
        task.status = TaskWorkflowStatus::Committing;

        let mut assignment = self
            .state
            .worker_assignment(&implementer_id)
            .ok_or_else(|| ForemanError::NotFound(format!("worker {implementer_id} has no active assignment")))?;
        assignment.phase.validate_transition(WorkerPhase::Committing)?;
        assignment.phase = WorkerPhase::Committing;

        self.state.set_worker_and_task_assignment(implementer_id.clone(), assignment, task_id.clone(), task);
        self.pool.set_worker_phase(&implementer_id, WorkerPhase::Committing, Some(task_id.clone()))?;

        Ok(ApproveCommitResult {
            implementer_id: implementer_id.to_string(),
            task_id: task_id.as_str().to_string(),
            phase: WorkerPhase::Committing,
        })
    }

    async fn mark_task_complete_impl(&self, params: MarkTaskCompleteParams) -> Result<MarkTaskCompleteResult, ForemanError> {
        let task_id = TaskId::parse(params.task_id)?;
        let mut task = self
            .state
            .task_assignment(&task_id)
            .ok_or_else(|| ForemanError::NotFound(format!("task {task_id} not found")))?;
        if task.status != TaskWorkflowStatus::Committing {
            return Err(ForemanError::Invariant(format!("task {task_id} is not committing (status: {})", task.status)));
        }
        task.status.validate_transition(TaskWorkflowStatus::Completed)?;
        task.status = TaskWorkflowStatus::Completed;
        let implementer_id = task.implementer.clone();
        self.state.set_task_assignment_and_clear_worker(task_id.clone(), task, &implementer_id);

        self.pool.set_worker_phase(&implementer_id, WorkerPhase::Idle, None)?;
        self.pool.complete(&implementer_id)?;

        Ok(MarkTaskCompleteResult { task_id: task_id.as_str().to_string(), status: TaskWorkflowStatus::Completed })
    }

    async fn mark_task_failed_impl(&self, params: MarkTaskFailedParams) -> Result<MarkTaskFailedResult, ForemanError> {
        let task_id = TaskId::parse(params.task_id)?;
        let task = self
            .state
            .task_assignment(&task_id)
            .ok_or_else(|| ForemanError::NotFound(format!("task {task_id} not found")))?;

        let mut freed_workers = Vec::new();
        if let Some(assignment) = self.state.worker_assignment(&task.implementer) {
            assignment.phase.validate_transition(WorkerPhase::Idle)?;
            freed_workers.push(task.implementer.clone());
        }
        if let Some(reviewer_id) = &task.reviewer {
            if let Some(assignment) = self.state.worker_assignment(reviewer_id) {
                assignment.phase.validate_transition(WorkerPhase::Idle)?;
                freed_workers.push(reviewer_id.clone());
            }
        }

        let worker_refs: Vec<&WorkerId> = freed_workers.iter().collect();
        self.state.remove_task_and_clear_workers(&task_id, &worker_refs);

        for worker_id in &freed_workers {
            self.pool.set_worker_phase(worker_id, WorkerPhase::Idle, None)?;
            self.pool.complete(worker_id)?;
        }

        self.fabric.append(COORDINATOR, foreman_core::ALL, format!("task {task_id} failed: {}", params.reason), foreman_core::MessageType::Info);
        Ok(MarkTaskFailedResult { task_id: task_id.as_str().to_string() })
    }

    async fn get_task_status_impl(&self, params: GetTaskStatusParams) -> Result<TrackerStatus, ForemanError> {
        let task_id = TaskId::parse(params.task_id)?;
        self.tracker.get_task_status(&task_id)
    }

    async fn replace_worker_impl(&self, params: ReplaceWorkerParams) -> Result<ReplaceWorkerResult, ForemanError> {
        let worker_id = WorkerId::parse(params.worker_id)?;
        self.pool.retire(&worker_id)?;
        self.state.clear_worker_assignment(&worker_id);

        let provider_name = self.worker_providers.lock().remove(&worker_id);
        if let Some(supervisor) = self.supervisors.lock().remove(&worker_id) {
            supervisor.cancel();
        }

        let provider_name = provider_name.unwrap_or("claude");
        let replacement = self.spawn_worker_with(provider_name, AgentType::Generic, self.base_work_dir.clone()).await?;

        Ok(ReplaceWorkerResult { retired: worker_id.to_string(), replacement: replacement.to_string() })
    }

    async fn send_to_worker_impl(&self, params: SendToWorkerParams) -> Result<(), ForemanError> {
        let worker_id = WorkerId::parse(params.worker_id)?;
        self.fabric.append(COORDINATOR, worker_id.as_str(), params.message.clone(), foreman_core::MessageType::Info);
        self.resume_worker(&worker_id, params.message).await
    }

    async fn post_message_impl(&self, params: PostMessageParams) -> Result<MessageEntry, ForemanError> {
        if params.to.is_empty() || params.content.is_empty() {
            return Err(ForemanError::Validation("to and content must be non-empty".to_string()));
        }
        Ok(self.fabric.append(COORDINATOR, params.to, params.content, foreman_core::MessageType::Info))
    }

    fn read_message_log_impl(&self, params: ReadMessageLogParams) -> Vec<MessageEntry> {
        self.fabric.tail(params.limit)
    }

    fn list_workers_impl(&self) -> Vec<WorkerSummary> {
        self.pool.active_workers().iter().map(|w| self.worker_summary(&w.id)).collect()
    }

    fn query_worker_state_impl(&self, params: QueryWorkerStateParams) -> QueryWorkerStateResult {
        let filter_worker = params.worker_id.map(WorkerId::new);
        let filter_task = params.task_id;

        let workers: Vec<WorkerSummary> = self
            .pool
            .active_workers()
            .iter()
            .filter(|w| filter_worker.as_ref().is_none_or(|id| id == &w.id))
            .map(|w| self.worker_summary(&w.id))
            .collect();

        let task_assignments: Vec<TaskAssignment> = self
            .state
            .all_task_assignments()
            .into_iter()
            .map(|(_, assignment)| assignment)
            .filter(|a| filter_task.as_deref().is_none_or(|id| a.task_id == *id))
            .collect();

        let ready_workers: Vec<String> = self
            .pool
            .active_workers()
            .iter()
            .filter(|w| w.status == foreman_core::WorkerStatus::Ready && self.state.worker_assignment(&w.id).is_none())
            .map(|w| w.id.to_string())
            .collect();

        QueryWorkerStateResult { workers, task_assignments, ready_workers }
    }

    fn prepare_handoff_impl(&self, params: PrepareHandoffParams) -> Result<MessageEntry, ForemanError> {
        if params.summary.is_empty() {
            return Err(ForemanError::Validation("summary must be non-empty".to_string()));
        }
        Ok(self.fabric.append(
            COORDINATOR,
            foreman_core::ALL,
            MessageEntry::handoff_content(&params.summary),
            foreman_core::MessageType::Handoff,
        ))
    }

    /// Every task_id whose implementer or reviewer is missing or retired.
    pub fn detect_orphaned_tasks(&self) -> Vec<TaskId> {
        self.state.detect_orphaned_tasks(&self.pool)
    }

    /// Every worker_id whose assignment has run longer than `max_task_duration_ms`.
    pub fn check_stuck_workers(&self) -> Vec<WorkerId> {
        self.state.check_stuck_workers(self.clock.epoch_ms(), self.max_task_duration_ms)
    }

    #[tool(name = "spawn_worker", description = "Create a new worker, spawn its subprocess, and register it in the pool.")]
    pub async fn spawn_worker(&self, params: Parameters<SpawnWorkerParams>) -> Result<Json<SpawnWorkerResult>, String> {
        self.spawn_worker_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "assign_task", description = "Assign a task to a ready worker and send the task-assignment prompt.")]
    pub async fn assign_task(&self, params: Parameters<AssignTaskParams>) -> Result<Json<AssignTaskResult>, String> {
        self.assign_task_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "assign_task_review", description = "Assign a reviewer to an implemented task and send the review prompt.")]
    pub async fn assign_task_review(&self, params: Parameters<AssignTaskReviewParams>) -> Result<Json<AssignTaskReviewResult>, String> {
        self.assign_task_review_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "assign_review_feedback", description = "Send a denied task's review feedback back to its implementer.")]
    pub async fn assign_review_feedback(
        &self,
        params: Parameters<AssignReviewFeedbackParams>,
    ) -> Result<Json<AssignReviewFeedbackResult>, String> {
        self.assign_review_feedback_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "approve_commit", description = "Transition an approved task's implementer into committing.")]
    pub async fn approve_commit(&self, params: Parameters<ApproveCommitParams>) -> Result<Json<ApproveCommitResult>, String> {
        self.approve_commit_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "mark_task_complete", description = "Mark a committing task completed and free its implementer.")]
    pub async fn mark_task_complete(&self, params: Parameters<MarkTaskCompleteParams>) -> Result<Json<MarkTaskCompleteResult>, String> {
        self.mark_task_complete_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "mark_task_failed", description = "Remove a task from tracking and free its implementer and reviewer.")]
    pub async fn mark_task_failed(&self, params: Parameters<MarkTaskFailedParams>) -> Result<Json<MarkTaskFailedResult>, String> {
        self.mark_task_failed_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "get_task_status", description = "Read-only query of a task's status, proxied to the external tracker.")]
    pub async fn get_task_status(&self, params: Parameters<GetTaskStatusParams>) -> Result<Json<TrackerStatus>, String> {
        self.get_task_status_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "replace_worker", description = "Retire a worker and spawn a replacement, keeping its task assignment for orphan detection.")]
    pub async fn replace_worker(&self, params: Parameters<ReplaceWorkerParams>) -> Result<Json<ReplaceWorkerResult>, String> {
        self.replace_worker_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "send_to_worker", description = "Append a direct message to a worker and resume its subprocess.")]
    pub async fn send_to_worker(&self, params: Parameters<SendToWorkerParams>) -> Result<Json<()>, String> {
        self.send_to_worker_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "post_message", description = "Append an info entry to the fabric.")]
    pub async fn post_message(&self, params: Parameters<PostMessageParams>) -> Result<Json<MessageEntry>, String> {
        self.post_message_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "read_message_log", description = "Return the tail of the fabric, or the entire log when no limit is given.")]
    pub async fn read_message_log(&self, params: Parameters<ReadMessageLogParams>) -> Result<Json<Vec<MessageEntry>>, String> {
        Ok(Json(self.read_message_log_impl(params.0)))
    }

    #[tool(name = "list_workers", description = "List every active worker with its phase, role, and task.")]
    pub async fn list_workers(&self, _params: Parameters<ListWorkersParams>) -> Result<Json<Vec<WorkerSummary>>, String> {
        Ok(Json(self.list_workers_impl()))
    }

    #[tool(name = "query_worker_state", description = "Filtered snapshot of workers, task assignments, and ready workers.")]
    pub async fn query_worker_state(&self, params: Parameters<QueryWorkerStateParams>) -> Result<Json<QueryWorkerStateResult>, String> {
        Ok(Json(self.query_worker_state_impl(params.0)))
    }

    #[tool(name = "prepare_handoff", description = "Append a handoff entry from the coordinator to all agents.")]
    pub async fn prepare_handoff(&self, params: Parameters<PrepareHandoffParams>) -> Result<Json<MessageEntry>, String> {
        self.prepare_handoff_impl(params.0).await.map(Json).map_err(|e| e.to_string())
    }
}

#[rmcp::tool_handler]
impl rmcp::handler::server::ServerHandler for CoordinatorTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            protocol_version: Default::default(),
            capabilities: rmcp::model::ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation::from_build_env(),
            instructions: Some(
                "Foreman coordinator: spawn workers, assign and review tasks, query worker state.".to_string(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tools_tests.rs"]
mod tests;
