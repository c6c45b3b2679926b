//! Proptest generators for property-based testing.

use proptest::prelude::*;

use report_share_core::{
    Email, ReportId, ShareRecord, ShareSettings, ShareToken, SharingMode, UserId, TOKEN_ALPHABET,
};
use report_share_policy::Requester;

/// Generate a well-formed email with mixed case.
pub fn email() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9.]{0,7}@[a-zA-Z]{1,8}\\.(com|org|io)".prop_map(String::from)
}

/// Generate a share token of 1 to 32 characters.
pub fn share_token() -> impl Strategy<Value = ShareToken> {
    prop::collection::vec(0..TOKEN_ALPHABET.len(), 1..=32).prop_map(|indices| {
        let raw: String = indices.iter().map(|&i| TOKEN_ALPHABET[i] as char).collect();
        ShareToken::parse(&raw).unwrap_or_else(|e| panic!("generated bad token {raw:?}: {e}"))
    })
}

/// Generate a reasonable timestamp (Unix milliseconds).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_000_000_000_000i64
}

/// Generate a SharingMode.
pub fn sharing_mode() -> impl Strategy<Value = SharingMode> {
    prop_oneof![Just(SharingMode::Anyone), Just(SharingMode::Specific)]
}

/// Generate a requester: anonymous, a user, or the owner.
pub fn requester() -> impl Strategy<Value = Requester> {
    prop_oneof![
        Just(Requester::Anonymous),
        email().prop_map(|e| Requester::user(&e)),
        email().prop_map(|e| Requester::owner(&e)),
    ]
}

/// Generate a non-owner requester.
pub fn visitor() -> impl Strategy<Value = Requester> {
    prop_oneof![
        Just(Requester::Anonymous),
        email().prop_map(|e| Requester::user(&e)),
    ]
}

/// Generate share settings with up to four allowed viewers.
pub fn share_settings() -> impl Strategy<Value = ShareSettings> {
    (
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(timestamp()),
        sharing_mode(),
        prop::collection::vec(email(), 0..4),
    )
        .prop_map(
            |(allow_comments, require_auth, expiry_date, sharing_mode, viewers)| ShareSettings {
                allow_comments,
                require_auth,
                expiry_date,
                sharing_mode,
                allowed_viewers: viewers.iter().map(|v| Email::normalize(v)).collect(),
            },
        )
}

/// Parameters for generating a share record.
///
/// `share_token` and `is_public` are generated independently, so records
/// that break the token/public invariant are included.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub report_id: String,
    pub owner_id: String,
    pub share_token: Option<ShareToken>,
    pub is_public: bool,
    pub settings: ShareSettings,
    pub updated_at: i64,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            "[a-z0-9]{1,12}",
            "[a-z0-9]{1,12}",
            proptest::option::of(share_token()),
            any::<bool>(),
            share_settings(),
            timestamp(),
        )
            .prop_map(
                |(report_id, owner_id, share_token, is_public, settings, updated_at)| {
                    RecordParams {
                        report_id,
                        owner_id,
                        share_token,
                        is_public,
                        settings,
                        updated_at,
                    }
                },
            )
            .boxed()
    }
}

/// Build a record from parameters.
pub fn record_from_params(params: &RecordParams) -> ShareRecord {
    ShareRecord {
        report_id: ReportId::new(params.report_id.clone()),
        owner_id: UserId::new(params.owner_id.clone()),
        share_token: params.share_token.clone(),
        is_public: params.is_public,
        settings: params.settings.clone(),
        updated_at: params.updated_at,
    }
}

/// Generate a shared, consistent record.
pub fn shared_record() -> impl Strategy<Value = ShareRecord> {
    (share_token(), share_settings(), timestamp()).prop_map(|(token, settings, now)| {
        let mut record = ShareRecord::unshared(ReportId::new("report"), UserId::new("owner"), now);
        record.share(token, settings, now);
        record
    })
}
