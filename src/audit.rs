use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde_json::Value;
use uuid::Uuid;

use crate::{entity::audit_logs::ActiveModel as AuditActive, error::AppResult, state::AppState};

/// Records a successful admin mutation. A no-op when no database is configured.
pub async fn log_audit(
    state: &AppState,
    action: &str,
    resource: &str,
    resource_id: Option<i64>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let Some(orm) = &state.orm else {
        tracing::debug!(action, resource, ?resource_id, "audit disabled");
        return Ok(());
    };

    AuditActive {
        id: Set(Uuid::new_v4()),
        action: Set(action.to_string()),
        resource: Set(Some(resource.to_string())),
        resource_id: Set(resource_id.map(|id| id.to_string())),
        metadata: Set(metadata),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    Ok(())
}

/// Audit failures never fail the mutation they describe.
pub async fn record(
    state: &AppState,
    action: &str,
    resource: &str,
    resource_id: Option<i64>,
    metadata: Value,
) {
    if let Err(err) = log_audit(state, action, resource, resource_id, Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
