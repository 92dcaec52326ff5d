use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::CfError;

/// The `{success, data, error?}` wrapper every news endpoint returns.
#[derive(Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default)]
    pub(crate) success: bool,
    pub(crate) data: Option<T>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps `data`, turning `success: false` and a missing payload into errors.
    pub(crate) fn into_data(self, endpoint: &str) -> Result<T, CfError> {
        if !self.success {
            return Err(CfError::Api {
                endpoint: endpoint.to_string(),
                message: self.error.unwrap_or_else(|| "request was not successful".into()),
            });
        }
        self.data.ok_or_else(|| CfError::MissingData {
            endpoint: endpoint.to_string(),
        })
    }
}

pub(crate) fn parse_envelope<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, CfError> {
    let env: ApiEnvelope<T> = serde_json::from_str(body).map_err(CfError::Json)?;
    env.into_data(endpoint)
}
