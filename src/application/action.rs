// src/application/action.rs
//
// Result wrapper for the action boundary
//
// RULES:
// - Actions never panic and never propagate errors to the caller
// - Every failure is logged before it is returned
// - Store work runs on the blocking pool; a lost task becomes a generic failure

use std::future::Future;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{AppError, AppResult};

/// Outcome of an action as the rendering layer sees it.
///
/// Serialised as `{"success":true,"data":...}` or `{"success":false,"error":"..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> ActionResult<T> {
    pub fn success(data: T) -> Self {
        ActionResult::Success { data }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ActionResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ActionResult::Success { data } => Some(data),
            ActionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionResult::Success { .. } => None,
            ActionResult::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ActionResult::Success { data } => Ok(data),
            ActionResult::Failure { error } => Err(error),
        }
    }
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        match self {
            ActionResult::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            ActionResult::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// Run an action body and fold its outcome into an `ActionResult`.
///
/// `action` names the operation in the log line.
pub async fn safe_action<T, F, Fut>(action: &'static str, op: F) -> ActionResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    match op().await {
        Ok(data) => ActionResult::success(data),
        Err(err) => {
            log::error!(
                "event=action_failed module=action action={} store_failure={} error={}",
                action,
                err.is_store_failure(),
                err
            );
            ActionResult::failure(err.to_string())
        }
    }
}

/// Run synchronous store work on Tokio's blocking pool.
///
/// A panic or cancellation inside `work` surfaces as `AppError::Unexpected`.
pub async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(join_err) => {
            log::error!(
                "event=blocking_task_failed module=action panicked={} cancelled={}",
                join_err.is_panic(),
                join_err.is_cancelled()
            );
            Err(AppError::Unexpected)
        }
    }
}
