//! Share request validation and normalization.

use std::collections::BTreeSet;

use crate::email::Email;
use crate::error::ValidationError;
use crate::request::ShareRequest;
use crate::settings::{ShareSettings, SharingMode};

/// Turn an owner's request into stored settings.
///
/// This performs:
/// - Defaulting (`allowComments = false`, `sharingMode = anyone`,
///   `requireAuth = default_require_auth`)
/// - Expiry check: an expiry at or before `now` is rejected
/// - Allow-list normalization: trimmed, lowercased, deduplicated; cleared
///   entirely unless the mode is `specific`
pub fn validate_share_request(
    request: &ShareRequest,
    default_require_auth: bool,
    now: i64,
) -> Result<ShareSettings, ValidationError> {
    if let Some(expiry) = request.expiry_date {
        if expiry <= now {
            return Err(ValidationError::ExpiryInPast { expiry, now });
        }
    }

    let sharing_mode = request.sharing_mode.unwrap_or_default();

    let allowed_viewers = match sharing_mode {
        SharingMode::Specific => request
            .allowed_viewers
            .iter()
            .map(|raw| Email::parse(raw))
            .collect::<Result<BTreeSet<_>, _>>()?,
        SharingMode::Anyone => BTreeSet::new(),
    };

    Ok(ShareSettings {
        allow_comments: request.allow_comments.unwrap_or(false),
        require_auth: request.require_auth.unwrap_or(default_require_auth),
        expiry_date: request.expiry_date,
        sharing_mode,
        allowed_viewers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = validate_share_request(&ShareRequest::default(), true, 0).unwrap();
        assert!(!settings.allow_comments);
        assert!(settings.require_auth);
        assert_eq!(settings.sharing_mode, SharingMode::Anyone);
        assert_eq!(settings.expiry_date, None);
    }

    #[test]
    fn test_explicit_require_auth_wins_over_default() {
        let req = ShareRequest::anyone().with_require_auth(false);
        let settings = validate_share_request(&req, true, 0).unwrap();
        assert!(!settings.require_auth);
    }

    #[test]
    fn test_viewers_normalized_and_deduplicated() {
        let req = ShareRequest::specific(["A@X.com", " a@x.COM ", "b@y.org"]);
        let settings = validate_share_request(&req, false, 0).unwrap();
        let viewers: Vec<_> = settings.allowed_viewers.iter().map(Email::as_str).collect();
        assert_eq!(viewers, vec!["a@x.com", "b@y.org"]);
    }

    #[test]
    fn test_viewers_cleared_in_anyone_mode() {
        let mut req = ShareRequest::anyone();
        req.allowed_viewers = vec!["a@x.com".into(), "not-an-email".into()];
        let settings = validate_share_request(&req, false, 0).unwrap();
        assert!(settings.allowed_viewers.is_empty());
    }

    #[test]
    fn test_invalid_viewer_rejected() {
        let req = ShareRequest::specific(["ok@x.com", "broken"]);
        assert_eq!(
            validate_share_request(&req, false, 0),
            Err(ValidationError::InvalidEmail("broken".into()))
        );
    }

    #[test]
    fn test_expiry_must_be_in_future() {
        let req = ShareRequest::anyone().with_expiry(1_000);
        assert!(validate_share_request(&req, false, 999).is_ok());
        assert_eq!(
            validate_share_request(&req, false, 1_000),
            Err(ValidationError::ExpiryInPast {
                expiry: 1_000,
                now: 1_000
            })
        );
    }
}
