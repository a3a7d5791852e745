//! BulkCoordinator - batched mutations with visible partial failure.
//!
//! The coordinator is the engine's single effectful component and its only
//! suspension point. It issues one batched request through a
//! [`MutationBackend`] and maps whatever comes back - a bare success boolean
//! or a per-id result list - into an [`OutcomeReport`] that accounts for
//! every requested id exactly once. Its job is to make partial failure
//! visible, not to hide it: there is no retry logic here, retries are a
//! caller decision.
//!
//! Cancellation is dropping the returned future. The backend call is a single
//! batched request, and the report is only assembled after it resolves, so a
//! batch is either applied or discarded as a whole - an abandoned call never
//! leaves a half-reported batch behind.

use crate::CategoryId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// A uniform mutation applied across a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BulkOp {
    /// Set visibility for every selected entity
    SetVisibility { visible: bool },
    /// Move every selected entity under a target category (`None` = root)
    MoveToCategory { target: Option<CategoryId> },
    /// Delete every selected entity
    Delete,
}

/// The batched request handed to the mutation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRequest {
    /// Selected entity ids
    pub ids: Vec<String>,
    /// The uniform operation
    pub op: BulkOp,
}

/// Why a single id failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// The entity does not exist
    #[error("entity not found")]
    NotFound,
    /// The mutation contradicts current state (e.g. moving under a missing
    /// target category)
    #[error("conflicting state")]
    Conflict,
    /// The backend refused the mutation without a more specific reason
    #[error("rejected by backend")]
    Rejected,
    /// The backend's per-id response never mentioned this requested id
    #[error("missing from backend response")]
    Unreported,
    /// Backend-specific failure detail
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Per-id result as reported by a partial-failure-capable backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdOutcome {
    /// The entity id
    pub id: String,
    /// Whether the mutation applied to this id
    pub ok: bool,
    /// Failure detail when `ok` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureKind>,
}

impl IdOutcome {
    /// A successful per-id outcome.
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ok: true,
            error: None,
        }
    }

    /// A failed per-id outcome.
    pub fn failed(id: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            id: id.into(),
            ok: false,
            error: Some(kind),
        }
    }
}

/// Response shape of the external mutation endpoint.
///
/// The same call site must accept both shapes: some backends answer with a
/// single boolean (all-or-nothing), batch-capable ones answer per id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulkResponse {
    /// Per-id results (partial-failure-capable)
    PerId(Vec<IdOutcome>),
    /// A single success boolean, treated as all-or-nothing
    AllOrNothing(bool),
}

/// Transport-level failure of the whole batch.
///
/// This is the only hard error the engine surfaces. Per-id business failures
/// travel inside [`OutcomeReport`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("mutation endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("mutation endpoint timed out")]
    TimedOut,

    #[error("invalid response from mutation endpoint: {0}")]
    InvalidResponse(String),
}

/// Per-invocation lifecycle of a bulk operation. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulkState {
    /// Created, backend not yet contacted
    Pending,
    /// Batched request in flight
    Applying,
    /// Every id succeeded
    Completed,
    /// Some ids succeeded, some failed
    PartiallyFailed,
    /// No id succeeded
    Failed,
}

impl BulkState {
    /// Whether `next` is a legal successor state.
    pub fn can_advance_to(self, next: BulkState) -> bool {
        matches!(
            (self, next),
            (BulkState::Pending, BulkState::Applying)
                | (BulkState::Applying, BulkState::Completed)
                | (BulkState::Applying, BulkState::PartiallyFailed)
                | (BulkState::Applying, BulkState::Failed)
        )
    }

    /// Whether this is a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BulkState::Completed | BulkState::PartiallyFailed | BulkState::Failed
        )
    }

    fn advance(self, next: BulkState) -> BulkState {
        debug_assert!(self.can_advance_to(next), "illegal bulk state transition");
        next
    }
}

/// Accounting for a finished bulk operation.
///
/// Every requested id appears in exactly one of `succeeded` or `failed`,
/// never both, never neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeReport {
    /// Terminal state of the invocation
    pub status: BulkState,
    /// Ids the mutation applied to
    pub succeeded: BTreeSet<String>,
    /// Ids that failed, with the reason per id
    pub failed: BTreeMap<String, FailureKind>,
}

impl OutcomeReport {
    /// Report for an empty selection: nothing to do, trivially complete.
    pub fn empty() -> Self {
        Self {
            status: BulkState::Completed,
            succeeded: BTreeSet::new(),
            failed: BTreeMap::new(),
        }
    }

    /// Map a backend response onto the requested id set.
    ///
    /// Per-id responses are matched by id; requested ids the backend never
    /// mentioned fail as [`FailureKind::Unreported`], and results for ids
    /// that were never requested are ignored. An all-or-nothing boolean
    /// applies to every requested id uniformly.
    pub fn from_response(ids: &BTreeSet<String>, response: BulkResponse) -> Self {
        let mut succeeded = BTreeSet::new();
        let mut failed = BTreeMap::new();

        match response {
            BulkResponse::AllOrNothing(true) => {
                succeeded.extend(ids.iter().cloned());
            }
            BulkResponse::AllOrNothing(false) => {
                for id in ids {
                    failed.insert(id.clone(), FailureKind::Rejected);
                }
            }
            BulkResponse::PerId(outcomes) => {
                let mut reported: BTreeMap<&str, &IdOutcome> = BTreeMap::new();
                for outcome in &outcomes {
                    // First mention wins if a backend repeats an id.
                    reported.entry(outcome.id.as_str()).or_insert(outcome);
                }

                for id in ids {
                    match reported.get(id.as_str()) {
                        Some(outcome) if outcome.ok => {
                            succeeded.insert(id.clone());
                        }
                        Some(outcome) => {
                            let kind =
                                outcome.error.clone().unwrap_or(FailureKind::Rejected);
                            failed.insert(id.clone(), kind);
                        }
                        None => {
                            failed.insert(id.clone(), FailureKind::Unreported);
                        }
                    }
                }
            }
        }

        let status = if failed.is_empty() {
            BulkState::Completed
        } else if succeeded.is_empty() {
            BulkState::Failed
        } else {
            BulkState::PartiallyFailed
        };

        Self {
            status,
            succeeded,
            failed,
        }
    }

    /// Whether every requested id succeeded.
    pub fn is_complete(&self) -> bool {
        self.status == BulkState::Completed
    }

    /// Total ids accounted for.
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether the report covers no ids at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The external mutation endpoint, seen from the engine.
///
/// Implementations own the transport (HTTP, SQL, in-memory); the engine only
/// requires that the whole batch travels as one request.
#[async_trait]
pub trait MutationBackend: Send + Sync {
    /// Execute one batched mutation.
    async fn execute(&self, request: &BulkRequest) -> Result<BulkResponse, TransportError>;
}

/// Applies one mutation across a selected id set.
///
/// No mutual exclusion is implemented here: concurrent `apply` calls on
/// overlapping id sets have no ordering guarantee, and callers that need one
/// must serialize calls themselves.
#[derive(Debug)]
pub struct BulkCoordinator<B> {
    backend: B,
}

impl<B: MutationBackend> BulkCoordinator<B> {
    /// Create a coordinator over a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Apply `op` to every id in `ids` as one batched request.
    ///
    /// Returns `Err` only for transport-level failures, which apply to the
    /// whole batch and are retryable by the caller. Business failures come
    /// back per id inside the report. An empty selection completes without
    /// touching the backend.
    pub async fn apply(
        &self,
        ids: &BTreeSet<String>,
        op: BulkOp,
    ) -> Result<OutcomeReport, TransportError> {
        if ids.is_empty() {
            return Ok(OutcomeReport::empty());
        }

        let mut state = BulkState::Pending;
        let request = BulkRequest {
            ids: ids.iter().cloned().collect(),
            op,
        };

        state = state.advance(BulkState::Applying);
        let response = self.backend.execute(&request).await?;

        let report = OutcomeReport::from_response(ids, response);
        let _ = state.advance(report.status);
        Ok(report)
    }
}
