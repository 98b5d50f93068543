//! Shape checks for the homework status response.

use serde_json::Value;

use crate::error::ValidationError;

/// A validated response: work items most-recent first, plus the server cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub homeworks: Vec<Value>,
    pub current_date: Option<i64>,
}

impl StatusResponse {
    /// The newest work item, if any.
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Check that `response` is an object with a `homeworks` array.
///
/// `current_date` may be absent; when present it must be an integer.
pub fn check_response(response: &Value) -> Result<StatusResponse, ValidationError> {
    tracing::debug!("Checking response: {}", response);

    let body = response.as_object().ok_or(ValidationError::NotAnObject)?;

    let homeworks = match body.get("homeworks") {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            return Err(ValidationError::WrongType {
                key: "homeworks",
                expected: "an array",
            })
        }
        None => return Err(ValidationError::MissingKey("homeworks")),
    };

    let current_date = match body.get("current_date") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or(ValidationError::WrongType {
            key: "current_date",
            expected: "an integer",
        })?),
    };

    tracing::debug!("Response passed the check: {} homeworks", homeworks.len());
    Ok(StatusResponse {
        homeworks,
        current_date,
    })
}
