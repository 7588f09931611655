use serde::{Deserialize, Serialize};

/// The `{success, data?, error?}` wrapper every JSON endpoint returns.
/// Constructed only through [`ApiEnvelope::ok`] and [`ApiEnvelope::err`],
/// so a success always carries data and a failure always carries an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Collapse into a `Result`, treating a success without data or a
    /// failure without a message as a malformed envelope.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            self.data
                .ok_or_else(|| "envelope marked success without data".to_string())
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "envelope marked failure without an error message".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_omits_error_field() {
        let value = serde_json::to_value(ApiEnvelope::ok(42)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn err_round_trips_to_a_message() {
        let envelope: ApiEnvelope<()> = ApiEnvelope::err("account not found");
        assert_eq!(
            envelope.into_result().unwrap_err(),
            "account not found".to_string()
        );
    }
}
