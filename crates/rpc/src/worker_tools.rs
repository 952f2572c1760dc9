// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The 5 worker-side RPC tools: a single worker's self-reporting surface,
//! behind an `rmcp` tool router. One [`WorkerTools`] instance is bound to a
//! single worker id for the lifetime of its MCP server process.

use crate::callback::{ReviewVerdict, WorkerStateCallback};
use crate::error::ForemanError;
use foreman_core::{WorkerId, WorkerPhase};
use foreman_fabric::Fabric;
use foreman_core::SystemClock;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Default)]
pub struct SignalReadyParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct SignalReadyResult {
    pub phase: WorkerPhase,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Default)]
pub struct CheckMessagesParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct CheckMessagesResult {
    pub unread_count: usize,
    pub messages: Vec<foreman_core::MessageEntry>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct PostMessageParams {
    pub to: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ReportImplementationCompleteParams {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ReportImplementationCompleteResult {
    pub phase: WorkerPhase,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ReportReviewVerdictParams {
    pub verdict: ReviewVerdict,
    pub comments: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct ReportReviewVerdictResult {
    pub phase: WorkerPhase,
}

/// A worker's own RPC surface: its identity is fixed at construction, since
/// a worker subprocess only ever speaks for itself.
pub struct WorkerTools {
    worker_id: WorkerId,
    fabric: Arc<Fabric<SystemClock>>,
    callback: Arc<dyn WorkerStateCallback>,
    tool_router: ToolRouter<Self>,
}

#[rmcp::tool_router(router = tool_router)]
impl WorkerTools {
    pub fn new(worker_id: WorkerId, fabric: Arc<Fabric<SystemClock>>, callback: Arc<dyn WorkerStateCallback>) -> Self {
        Self { worker_id, fabric, callback, tool_router: Self::tool_router() }
    }

    fn signal_ready_impl(&self) -> Result<SignalReadyResult, ForemanError> {
        let phase = self.callback.get_worker_phase(&self.worker_id)?;
        self.fabric.append(
            self.worker_id.as_str(),
            foreman_core::COORDINATOR,
            "ready",
            foreman_core::MessageType::WorkerReady,
        );
        Ok(SignalReadyResult { phase })
    }

    fn check_messages_impl(&self) -> CheckMessagesResult {
        let messages = self.fabric.unread_for(self.worker_id.as_str());
        self.fabric.mark_read(self.worker_id.as_str());
        CheckMessagesResult { unread_count: messages.len(), messages }
    }

    fn post_message_impl(&self, params: PostMessageParams) -> Result<foreman_core::MessageEntry, ForemanError> {
        if params.to.is_empty() || params.content.is_empty() {
            return Err(ForemanError::Validation("to and content must be non-empty".to_string()));
        }
        Ok(self.fabric.append(self.worker_id.as_str(), params.to, params.content, foreman_core::MessageType::Info))
    }

    fn report_implementation_complete_impl(
        &self,
        params: ReportImplementationCompleteParams,
    ) -> Result<ReportImplementationCompleteResult, ForemanError> {
        let phase = self.callback.on_implementation_complete(&self.worker_id, &params.summary)?;
        self.fabric.append(
            self.worker_id.as_str(),
            foreman_core::COORDINATOR,
            format!("implementation complete: {}", params.summary),
            foreman_core::MessageType::Info,
        );
        Ok(ReportImplementationCompleteResult { phase })
    }

    fn report_review_verdict_impl(&self, params: ReportReviewVerdictParams) -> Result<ReportReviewVerdictResult, ForemanError> {
        let phase = self.callback.on_review_verdict(&self.worker_id, params.verdict, &params.comments)?;
        self.fabric.append(
            self.worker_id.as_str(),
            foreman_core::COORDINATOR,
            format!("review verdict {:?}: {}", params.verdict, params.comments),
            foreman_core::MessageType::Info,
        );
        Ok(ReportReviewVerdictResult { phase })
    }

    #[tool(name = "signal_ready", description = "Announce readiness for work and report the current phase.")]
    pub async fn signal_ready(&self, _params: Parameters<SignalReadyParams>) -> Result<Json<SignalReadyResult>, String> {
        self.signal_ready_impl().map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "check_messages", description = "Fetch and acknowledge unread fabric messages for this worker.")]
    pub async fn check_messages(&self, _params: Parameters<CheckMessagesParams>) -> Result<Json<CheckMessagesResult>, String> {
        Ok(Json(self.check_messages_impl()))
    }

    #[tool(name = "post_message", description = "Append a message from this worker to the fabric.")]
    pub async fn post_message(&self, params: Parameters<PostMessageParams>) -> Result<Json<foreman_core::MessageEntry>, String> {
        self.post_message_impl(params.0).map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "report_implementation_complete", description = "Report that implementation is done and ready for review.")]
    pub async fn report_implementation_complete(
        &self,
        params: Parameters<ReportImplementationCompleteParams>,
    ) -> Result<Json<ReportImplementationCompleteResult>, String> {
        self.report_implementation_complete_impl(params.0).map(Json).map_err(|e| e.to_string())
    }

    #[tool(name = "report_review_verdict", description = "Report a review verdict (approved or denied) on the task under review.")]
    pub async fn report_review_verdict(
        &self,
        params: Parameters<ReportReviewVerdictParams>,
    ) -> Result<Json<ReportReviewVerdictResult>, String> {
        self.report_review_verdict_impl(params.0).map(Json).map_err(|e| e.to_string())
    }
}

#[rmcp::tool_handler]
impl rmcp::handler::server::ServerHandler for WorkerTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            protocol_version: Default::default(),
            capabilities: rmcp::model::ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation::from_build_env(),
            instructions: Some(format!("Foreman worker surface for {}.", self.worker_id)),
        }
    }
}

#[cfg(test)]
#[path = "worker_tools_tests.rs"]
mod tests;
