//! Owner-facing share requests and responses.

use serde::{Deserialize, Serialize};

use crate::settings::{ShareSettings, SharingMode};
use crate::token::ShareToken;

/// Settings requested by the owner when sharing a report.
///
/// Every field is optional; [`validate_share_request`](crate::validate_share_request)
/// fills in defaults and normalizes the allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShareRequest {
    pub allow_comments: Option<bool>,
    pub require_auth: Option<bool>,
    pub expiry_date: Option<i64>,
    pub sharing_mode: Option<SharingMode>,
    pub allowed_viewers: Vec<String>,
}

impl ShareRequest {
    /// A request for an open link with every option defaulted.
    pub fn anyone() -> Self {
        Self {
            sharing_mode: Some(SharingMode::Anyone),
            ..Default::default()
        }
    }

    /// A request restricted to the given addresses.
    pub fn specific<I, E>(viewers: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self {
            sharing_mode: Some(SharingMode::Specific),
            allowed_viewers: viewers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_comments(mut self, allow: bool) -> Self {
        self.allow_comments = Some(allow);
        self
    }

    pub fn with_require_auth(mut self, require: bool) -> Self {
        self.require_auth = Some(require);
        self
    }

    pub fn with_expiry(mut self, expiry: i64) -> Self {
        self.expiry_date = Some(expiry);
        self
    }
}

/// Result of a successful share action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// Full link to hand out.
    pub share_url: String,

    /// The token part of the link.
    pub share_token: ShareToken,

    /// Settings as stored.
    #[serde(rename = "shareSettings")]
    pub settings: ShareSettings,
}

/// Build the public link for a token.
pub fn share_url(base_url: &str, token: &ShareToken) -> String {
    format!("{}/reports/share/{}", base_url.trim_end_matches('/'), token.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_decodes_from_partial_json() {
        let req: ShareRequest = serde_json::from_str(r#"{"allowComments":true}"#).unwrap();
        assert_eq!(req.allow_comments, Some(true));
        assert_eq!(req.require_auth, None);
        assert!(req.allowed_viewers.is_empty());
    }

    #[test]
    fn test_share_url() {
        let token = ShareToken::parse("abc").unwrap();
        assert_eq!(
            share_url("https://app.example.com/", &token),
            "https://app.example.com/reports/share/abc"
        );
    }

    #[test]
    fn test_response_uses_share_settings_key() {
        let resp = ShareResponse {
            share_url: "u".into(),
            share_token: ShareToken::parse("abc").unwrap(),
            settings: ShareSettings::default(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("shareSettings").is_some());
        assert_eq!(json["shareToken"], "abc");
    }
}
