//! Review status codes and their chat verdicts.

use serde_json::Value;

use crate::error::FormatError;

/// Closed set of review states reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Build the chat message for a single homework record.
pub fn parse_status(homework: &Value) -> Result<String, FormatError> {
    let record = homework.as_object().ok_or(FormatError::NotAnObject)?;

    let name = match record.get("homework_name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => return Err(FormatError::MissingName),
    };

    let code = record.get("status").and_then(Value::as_str);
    let status = code
        .and_then(HomeworkStatus::from_code)
        .ok_or_else(|| FormatError::UnknownStatus(record.get("status").map(render_code)))?;

    tracing::debug!("Parsed status {} for {}", status.code(), name);
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

fn render_code(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
