//! Practicum homework API: client, response checks and status verdicts.

pub mod client;
pub mod response;
pub mod status;

pub use client::{HomeworkSource, PracticumClient};
pub use response::{check_response, StatusResponse};
pub use status::{parse_status, HomeworkStatus};
