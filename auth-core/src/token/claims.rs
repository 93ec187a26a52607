use serde::Deserialize;
use serde::Serialize;

/// Claim bundle embedded in every issued token.
///
/// Identity fields are a snapshot of the subject at issuance time; they do
/// not reflect later changes to the identity record. The bundle is signed,
/// not encrypted: anyone holding a token can read these fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier (the identity record's id).
    #[serde(rename = "nameidentifier")]
    pub subject_id: String,

    /// Subject display name.
    pub name: String,

    /// Subject email.
    pub email: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp). Always present.
    pub exp: i64,

    /// Issuer, fixed per deployment.
    pub iss: String,

    /// Audience, fixed per deployment.
    pub aud: String,
}

impl Claims {
    /// Check whether the bundle is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
