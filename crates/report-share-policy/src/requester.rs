//! Who is asking.

use report_share_core::Email;

/// The identity presented with a request against a shared report.
///
/// Ownership is decided by the caller (which knows the session's user ID
/// and the record's owner); the evaluator only reads the flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Requester {
    /// No session.
    Anonymous,

    /// A signed-in user.
    User {
        /// Normalized email of the session.
        email: Email,
        /// Whether this user authored the report.
        is_owner: bool,
    },
}

impl Requester {
    pub fn anonymous() -> Self {
        Requester::Anonymous
    }

    /// A signed-in user who does not own the report.
    pub fn user(email: &str) -> Self {
        Requester::User {
            email: Email::normalize(email),
            is_owner: false,
        }
    }

    /// The report's owner.
    pub fn owner(email: &str) -> Self {
        Requester::User {
            email: Email::normalize(email),
            is_owner: true,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Requester::Anonymous)
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, Requester::User { is_owner: true, .. })
    }

    /// The requester's email, if signed in.
    pub fn email(&self) -> Option<&Email> {
        match self {
            Requester::Anonymous => None,
            Requester::User { email, .. } => Some(email),
        }
    }
}
