//! Reference scenarios for access and comment decisions.
//!
//! Each scenario pins a record (as it would arrive from the report store,
//! in camelCase JSON), a requester, and an evaluation time to the
//! decisions every evaluator must produce.

use report_share_core::ShareRecord;
use report_share_policy::{
    evaluate_access, evaluate_comment, AccessDecision, CommentAction, CommentDecision, Requester,
};

/// Evaluation time for every scenario: 2025-01-14T16:00:00Z.
pub const NOW: i64 = 1_736_870_400_000;

/// One day in milliseconds.
pub const DAY: i64 = 86_400_000;

/// Who is asking, in a form that can live in a static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Who {
    Anonymous,
    User(&'static str),
    Owner(&'static str),
}

impl Who {
    pub fn requester(self) -> Requester {
        match self {
            Who::Anonymous => Requester::anonymous(),
            Who::User(email) => Requester::user(email),
            Who::Owner(email) => Requester::owner(email),
        }
    }
}

/// A reference scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Human-readable name.
    pub name: &'static str,
    /// The record, as camelCase JSON.
    pub record: String,
    /// Who is asking.
    pub who: Who,
    /// Expected view decision.
    pub view: AccessDecision,
    /// Expected comment read decision.
    pub comment_read: CommentDecision,
    /// Expected comment write decision.
    pub comment_write: CommentDecision,
}

impl Scenario {
    /// Parse the scenario's record.
    pub fn parse_record(&self) -> serde_json::Result<ShareRecord> {
        serde_json::from_str(&self.record)
    }
}

/// Result of checking one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub view: AccessDecision,
    pub comment_read: CommentDecision,
    pub comment_write: CommentDecision,
}

impl ScenarioOutcome {
    pub fn matches(&self, scenario: &Scenario) -> bool {
        self.view == scenario.view
            && self.comment_read == scenario.comment_read
            && self.comment_write == scenario.comment_write
    }
}

fn record_json(share_token: Option<&str>, is_public: bool, settings: &str) -> String {
    let token = match share_token {
        Some(t) => format!("\"{}\"", t),
        None => "null".to_string(),
    };
    format!(
        r#"{{"reportId":"report-1","ownerId":"owner","shareToken":{},"isPublic":{},"settings":{},"updatedAt":{}}}"#,
        token,
        is_public,
        settings,
        NOW - 7 * DAY
    )
}

/// All reference scenarios.
pub fn all_scenarios() -> Vec<Scenario> {
    let yesterday = NOW - DAY;
    let tomorrow = NOW + DAY;

    vec![
        Scenario {
            name: "A: open link, anonymous, comments off",
            record: record_json(
                Some("abc"),
                true,
                r#"{"requireAuth":false,"sharingMode":"anyone","expiryDate":null,"allowComments":false}"#,
            ),
            who: Who::Anonymous,
            view: AccessDecision::Granted,
            comment_read: CommentDecision::DeniedCommentsDisabled,
            comment_write: CommentDecision::DeniedCommentsDisabled,
        },
        Scenario {
            name: "B: expired yesterday",
            record: record_json(
                Some("abc"),
                true,
                &format!(
                    r#"{{"requireAuth":false,"sharingMode":"anyone","expiryDate":{},"allowComments":false}}"#,
                    yesterday
                ),
            ),
            who: Who::Anonymous,
            view: AccessDecision::DeniedExpired,
            comment_read: CommentDecision::DeniedExpired,
            comment_write: CommentDecision::DeniedExpired,
        },
        Scenario {
            name: "C: specific, not on the list",
            record: record_json(
                Some("abc"),
                true,
                r#"{"sharingMode":"specific","allowedViewers":["owner2@co.com"],"allowComments":true}"#,
            ),
            who: Who::User("other@co.com"),
            view: AccessDecision::DeniedNotAllowed,
            comment_read: CommentDecision::DeniedNotAllowed,
            comment_write: CommentDecision::DeniedNotAllowed,
        },
        Scenario {
            name: "D: specific with an empty list",
            record: record_json(
                Some("abc"),
                true,
                r#"{"requireAuth":false,"sharingMode":"specific","allowedViewers":[]}"#,
            ),
            who: Who::User("anyone@co.com"),
            view: AccessDecision::Granted,
            comment_read: CommentDecision::DeniedCommentsDisabled,
            comment_write: CommentDecision::DeniedCommentsDisabled,
        },
        Scenario {
            name: "never shared",
            record: record_json(None, false, "{}"),
            who: Who::User("a@x.com"),
            view: AccessDecision::DeniedNotPublic,
            comment_read: CommentDecision::DeniedNotPublic,
            comment_write: CommentDecision::DeniedNotPublic,
        },
        Scenario {
            name: "token kept but not public",
            record: record_json(Some("abc"), false, r#"{"allowComments":true}"#),
            who: Who::Owner("owner@co.com"),
            view: AccessDecision::DeniedNotPublic,
            comment_read: CommentDecision::DeniedNotPublic,
            comment_write: CommentDecision::DeniedNotPublic,
        },
        Scenario {
            name: "owner past expiry and off the list",
            record: record_json(
                Some("abc"),
                true,
                &format!(
                    r#"{{"sharingMode":"specific","allowedViewers":["a@x.com"],"expiryDate":{},"allowComments":true}}"#,
                    yesterday
                ),
            ),
            who: Who::Owner("owner@co.com"),
            view: AccessDecision::Granted,
            comment_read: CommentDecision::Granted,
            comment_write: CommentDecision::Granted,
        },
        Scenario {
            name: "owner with comments off",
            record: record_json(Some("abc"), true, r#"{"allowComments":false}"#),
            who: Who::Owner("owner@co.com"),
            view: AccessDecision::Granted,
            comment_read: CommentDecision::DeniedCommentsDisabled,
            comment_write: CommentDecision::DeniedCommentsDisabled,
        },
        Scenario {
            name: "auth required, anonymous",
            record: record_json(
                Some("abc"),
                true,
                &format!(r#"{{"requireAuth":true,"expiryDate":{}}}"#, tomorrow),
            ),
            who: Who::Anonymous,
            view: AccessDecision::DeniedAuthRequired,
            comment_read: CommentDecision::DeniedAuthRequired,
            comment_write: CommentDecision::DeniedAuthRequired,
        },
        Scenario {
            name: "expiry exactly now still grants",
            record: record_json(
                Some("abc"),
                true,
                &format!(r#"{{"requireAuth":false,"expiryDate":{}}}"#, NOW),
            ),
            who: Who::Anonymous,
            view: AccessDecision::Granted,
            comment_read: CommentDecision::DeniedCommentsDisabled,
            comment_write: CommentDecision::DeniedCommentsDisabled,
        },
        Scenario {
            name: "anonymous may read comments but not write",
            record: record_json(
                Some("abc"),
                true,
                r#"{"requireAuth":false,"allowComments":true}"#,
            ),
            who: Who::Anonymous,
            view: AccessDecision::Granted,
            comment_read: CommentDecision::Granted,
            comment_write: CommentDecision::DeniedAuthRequired,
        },
        Scenario {
            name: "allow-list match ignores case",
            record: record_json(
                Some("abc"),
                true,
                r#"{"sharingMode":"specific","allowedViewers":["a@x.com"],"allowComments":true}"#,
            ),
            who: Who::User("A@X.COM"),
            view: AccessDecision::Granted,
            comment_read: CommentDecision::Granted,
            comment_write: CommentDecision::Granted,
        },
        Scenario {
            name: "anonymous on a specific list without auth",
            record: record_json(
                Some("abc"),
                true,
                r#"{"requireAuth":false,"sharingMode":"specific","allowedViewers":["a@x.com"]}"#,
            ),
            who: Who::Anonymous,
            view: AccessDecision::DeniedNotAllowed,
            comment_read: CommentDecision::DeniedNotAllowed,
            comment_write: CommentDecision::DeniedNotAllowed,
        },
    ]
}

/// Evaluate one scenario with the policy crate.
///
/// Panics if the scenario's record does not parse.
pub fn run_scenario(scenario: &Scenario) -> ScenarioOutcome {
    let record = scenario
        .parse_record()
        .unwrap_or_else(|e| panic!("scenario '{}' has a bad record: {}", scenario.name, e));
    let requester = scenario.who.requester();

    ScenarioOutcome {
        name: scenario.name,
        view: evaluate_access(&record, &requester, NOW),
        comment_read: evaluate_comment(&record, &requester, CommentAction::Read, NOW),
        comment_write: evaluate_comment(&record, &requester, CommentAction::Write, NOW),
    }
}

/// Run every scenario, returning the ones that did not match.
pub fn failing_scenarios() -> Vec<(Scenario, ScenarioOutcome)> {
    all_scenarios()
        .into_iter()
        .filter_map(|scenario| {
            let outcome = run_scenario(&scenario);
            if outcome.matches(&scenario) {
                None
            } else {
                Some((scenario, outcome))
            }
        })
        .collect()
}
