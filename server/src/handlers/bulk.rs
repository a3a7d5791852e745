//! Bulk mutation endpoint.
//!
//! One request applies a uniform operation across a selected id set. The
//! Postgres backend issues a single batched statement and reports per-id
//! outcomes, so one bad id never masks the rest of the batch.

use async_trait::async_trait;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trellis_engine::{
    BulkCoordinator, BulkOp, BulkRequest, BulkResponse, FailureKind, IdOutcome, MutationBackend,
    OutcomeReport, TransportError,
};

use crate::auth::AuthUser;
use crate::db::{self, Pool};
use crate::error::AppError;
use crate::AppState;

/// Which catalog table a bulk mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Categories,
    Products,
}

/// Request body for the bulk endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMutationRequest {
    pub entity: EntityKind,
    pub ids: Vec<String>,
    pub op: BulkOp,
}

/// Response body for the bulk endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMutationResponse {
    pub entity: EntityKind,
    pub report: OutcomeReport,
}

/// Mutation backend over the catalog tables.
///
/// Every operation runs as one batched statement returning the ids it
/// touched; requested ids the statement did not touch come back as
/// `NotFound`. Database errors fail the whole batch at the transport level.
pub struct PgBackend {
    pool: Pool,
    entity: EntityKind,
}

impl PgBackend {
    pub fn new(pool: Pool, entity: EntityKind) -> Self {
        Self { pool, entity }
    }

    async fn run(&self, request: &BulkRequest) -> Result<Vec<String>, sqlx::Error> {
        match (&request.op, self.entity) {
            (BulkOp::SetVisibility { visible }, EntityKind::Categories) => {
                db::set_category_visibility(&self.pool, &request.ids, *visible).await
            }
            (BulkOp::SetVisibility { visible }, EntityKind::Products) => {
                db::set_product_visibility(&self.pool, &request.ids, *visible).await
            }
            (BulkOp::MoveToCategory { target }, EntityKind::Categories) => {
                db::move_categories(&self.pool, &request.ids, target.as_deref()).await
            }
            (BulkOp::MoveToCategory { target }, EntityKind::Products) => {
                db::move_products(&self.pool, &request.ids, target.as_deref()).await
            }
            (BulkOp::Delete, EntityKind::Categories) => {
                db::delete_categories(&self.pool, &request.ids).await
            }
            (BulkOp::Delete, EntityKind::Products) => {
                db::delete_products(&self.pool, &request.ids).await
            }
        }
    }
}

#[async_trait]
impl MutationBackend for PgBackend {
    async fn execute(&self, request: &BulkRequest) -> Result<BulkResponse, TransportError> {
        if let BulkOp::MoveToCategory {
            target: Some(target),
        } = &request.op
        {
            let exists = db::category_exists(&self.pool, target)
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;

            if !exists {
                // The move target is missing for every id in the batch.
                let outcomes = request
                    .ids
                    .iter()
                    .map(|id| IdOutcome::failed(id, FailureKind::Conflict))
                    .collect();
                return Ok(BulkResponse::PerId(outcomes));
            }

            // A category cannot become its own parent.
            if self.entity == EntityKind::Categories && request.ids.contains(target) {
                let ids: Vec<String> = request
                    .ids
                    .iter()
                    .filter(|id| *id != target)
                    .cloned()
                    .collect();
                let mut affected = self
                    .run(&BulkRequest {
                        ids,
                        op: request.op.clone(),
                    })
                    .await
                    .map_err(|e| TransportError::Unreachable(e.to_string()))?;
                affected.sort();

                let outcomes = request
                    .ids
                    .iter()
                    .map(|id| {
                        if id == target {
                            IdOutcome::failed(id, FailureKind::Conflict)
                        } else if affected.binary_search(id).is_ok() {
                            IdOutcome::ok(id)
                        } else {
                            IdOutcome::failed(id, FailureKind::NotFound)
                        }
                    })
                    .collect();
                return Ok(BulkResponse::PerId(outcomes));
            }
        }

        let mut affected = self
            .run(request)
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        affected.sort();

        let outcomes = request
            .ids
            .iter()
            .map(|id| {
                if affected.binary_search(id).is_ok() {
                    IdOutcome::ok(id)
                } else {
                    IdOutcome::failed(id, FailureKind::NotFound)
                }
            })
            .collect();

        Ok(BulkResponse::PerId(outcomes))
    }
}

/// POST /bulk
pub async fn post_bulk(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<BulkMutationRequest>,
) -> Result<Json<BulkMutationResponse>, AppError> {
    let ids: BTreeSet<String> = body.ids.into_iter().collect();

    tracing::info!(
        "Bulk {:?} on {:?}: {} id(s)",
        body.op,
        body.entity,
        ids.len()
    );

    let backend = PgBackend::new(state.pool.clone(), body.entity);
    let coordinator = BulkCoordinator::new(backend);
    let report = coordinator.apply(&ids, body.op).await?;

    if !report.failed.is_empty() {
        tracing::warn!(
            "Bulk mutation finished {:?}: {} succeeded, {} failed",
            report.status,
            report.succeeded.len(),
            report.failed.len()
        );
    }

    Ok(Json(BulkMutationResponse {
        entity: body.entity,
        report,
    }))
}
