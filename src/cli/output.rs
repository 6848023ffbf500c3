use serde::Serialize;

/// Envelope for `--format json` output.
#[derive(Debug, Serialize)]
pub struct CommandOutput<T>
where
    T: Serialize,
{
    pub status: String,
    pub result: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T: Serialize> CommandOutput<T> {
    pub fn passed(result: T) -> Self {
        Self {
            status: "passed".to_string(),
            result: Some(result),
            errors: None,
        }
    }

    pub fn failed(result: T, errors: Vec<String>) -> Self {
        Self {
            status: "failed".to_string(),
            result: Some(result),
            errors: Some(errors),
        }
    }
}
