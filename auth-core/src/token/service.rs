use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenConfigError;
use super::errors::TokenError;

/// Signing algorithm, fixed per deployment. There is no per-token
/// negotiation: tokens presenting any other algorithm are rejected.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token service configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric signing secret. Should be at least 32 bytes for HS256;
    /// store in environment variables or a vault, never in code.
    pub secret: String,
    /// Issuer string embedded in every token.
    pub issuer: String,
    /// Audience string embedded in every token.
    pub audience: String,
    /// Minutes from issuance to expiry.
    pub lifetime_minutes: i64,
}

/// Identity snapshot a token is issued for.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Issues and validates signed, time-limited claim bundles.
///
/// Immutable once constructed; safe to share across concurrent requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service from configuration.
    ///
    /// # Errors
    /// * `MissingSecret` / `MissingIssuer` / `MissingAudience` - Required
    ///   setting absent or empty
    /// * `InvalidLifetime` - Lifetime is zero or negative
    pub fn new(config: TokenConfig) -> Result<Self, TokenConfigError> {
        if config.secret.is_empty() {
            return Err(TokenConfigError::MissingSecret);
        }
        if config.issuer.is_empty() {
            return Err(TokenConfigError::MissingIssuer);
        }
        if config.audience.is_empty() {
            return Err(TokenConfigError::MissingAudience);
        }
        if config.lifetime_minutes <= 0 {
            return Err(TokenConfigError::InvalidLifetime);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer,
            audience: config.audience,
            lifetime: Duration::minutes(config.lifetime_minutes),
        })
    }

    /// Issue a signed token for the given subject.
    ///
    /// Claims snapshot the subject's fields as of now; `exp` is the
    /// configured lifetime past `iat`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    fn issue_at(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at + self.lifetime;

        let claims = Claims {
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            email: subject.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a presented token and return its claim bundle.
    ///
    /// The signature is verified before any claim is deserialized or
    /// surfaced, so callers never see attacker-controlled claims from a
    /// mis-signed token. Issuer and audience are embedded but not enforced
    /// on validation; the algorithm is pinned to HS256.
    ///
    /// # Errors
    /// * `Malformed` - Not a parseable three-segment token
    /// * `BadSignature` - Signature does not verify under the current
    ///   secret, or the token claims a different algorithm
    /// * `Expired` - Current time is at or past `exp`
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        // No leeway: expired means expired.
        validation.leeway = 0;
        validation.validate_aud = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                _ => TokenError::Malformed,
            })?;

        // The library's exp check is exclusive (rejects only once exp < now),
        // which leaves the second where now == exp accepted. Expiry here is
        // inclusive: a token is invalid from its expiry instant onward.
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            issuer: "identity-service".to_string(),
            audience: "identity-clients".to_string(),
            lifetime_minutes: 60,
        }
    }

    fn test_subject() -> TokenSubject {
        TokenSubject {
            id: "user123".to_string(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new(test_config()).expect("Failed to create service");

        let token = service.issue(&test_subject()).expect("Failed to issue");
        let claims = service.validate(&token).expect("Failed to validate");

        assert_eq!(claims.subject_id, "user123");
        assert_eq!(claims.name, "Ann");
        assert_eq!(claims.email, "ann@example.com");
        assert_eq!(claims.iss, "identity-service");
        assert_eq!(claims.aud, "identity-clients");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_validate_expired_token() {
        let service = TokenService::new(test_config()).expect("Failed to create service");

        // Issued 61 minutes ago with a 60 minute lifetime.
        let issued_at = Utc::now() - Duration::minutes(61);
        let token = service
            .issue_at(&test_subject(), issued_at)
            .expect("Failed to issue");

        assert_eq!(service.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_validate_rejects_token_at_exact_expiry() {
        let service = TokenService::new(test_config()).expect("Failed to create service");

        // exp lands on the current second: the lifetime has elapsed exactly
        // now. Inclusive expiry means this token is already invalid.
        let issued_at = Utc::now() - Duration::minutes(60);
        let token = service
            .issue_at(&test_subject(), issued_at)
            .expect("Failed to issue");

        assert_eq!(service.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_validate_within_lifetime() {
        let service = TokenService::new(test_config()).expect("Failed to create service");

        // One minute short of expiry.
        let issued_at = Utc::now() - Duration::minutes(59);
        let token = service
            .issue_at(&test_subject(), issued_at)
            .expect("Failed to issue");

        assert!(service.validate(&token).is_ok());
    }

    #[test]
    fn test_validate_tampered_signature() {
        let service = TokenService::new(test_config()).expect("Failed to create service");

        let token = service.issue(&test_subject()).expect("Failed to issue");

        // Flip the last character of the signature segment to another
        // base64url character so the segment still decodes.
        let flipped = if token.ends_with('A') { "B" } else { "A" };
        let mut tampered = token[..token.len() - 1].to_string();
        tampered.push_str(flipped);

        assert_eq!(service.validate(&tampered), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_validate_tampered_payload() {
        let service = TokenService::new(test_config()).expect("Failed to create service");

        let token = service.issue(&test_subject()).expect("Failed to issue");
        let segments: Vec<&str> = token.split('.').collect();

        let mut payload: serde_json::Value = serde_json::from_slice(
            &URL_SAFE_NO_PAD
                .decode(segments[1])
                .expect("Failed to decode payload"),
        )
        .expect("Failed to parse payload");
        payload["nameidentifier"] = serde_json::json!("someone-else");

        let forged = format!(
            "{}.{}.{}",
            segments[0],
            URL_SAFE_NO_PAD.encode(payload.to_string()),
            segments[2]
        );

        assert_eq!(service.validate(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_validate_wrong_secret() {
        let service = TokenService::new(test_config()).expect("Failed to create service");
        let other = TokenService::new(TokenConfig {
            secret: "a-completely-different-secret-also-32-bytes!".to_string(),
            ..test_config()
        })
        .expect("Failed to create service");

        let token = service.issue(&test_subject()).expect("Failed to issue");

        assert_eq!(other.validate(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_validate_malformed_token() {
        let service = TokenService::new(test_config()).expect("Failed to create service");

        assert_eq!(service.validate(""), Err(TokenError::Malformed));
        assert_eq!(service.validate("garbage"), Err(TokenError::Malformed));
        assert_eq!(
            service.validate("not.a.token"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_rejects_empty_settings_at_construction() {
        assert_eq!(
            TokenService::new(TokenConfig {
                secret: String::new(),
                ..test_config()
            })
            .err(),
            Some(TokenConfigError::MissingSecret)
        );
        assert_eq!(
            TokenService::new(TokenConfig {
                issuer: String::new(),
                ..test_config()
            })
            .err(),
            Some(TokenConfigError::MissingIssuer)
        );
        assert_eq!(
            TokenService::new(TokenConfig {
                audience: String::new(),
                ..test_config()
            })
            .err(),
            Some(TokenConfigError::MissingAudience)
        );
        assert_eq!(
            TokenService::new(TokenConfig {
                lifetime_minutes: 0,
                ..test_config()
            })
            .err(),
            Some(TokenConfigError::InvalidLifetime)
        );
    }

    #[test]
    fn test_wire_form() {
        let service = TokenService::new(test_config()).expect("Failed to create service");
        let token = service.issue(&test_subject()).expect("Failed to issue");

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        let header: serde_json::Value = serde_json::from_slice(
            &URL_SAFE_NO_PAD
                .decode(segments[0])
                .expect("Failed to decode header"),
        )
        .expect("Failed to parse header");
        assert_eq!(header, serde_json::json!({"alg": "HS256", "typ": "JWT"}));

        let payload: serde_json::Value = serde_json::from_slice(
            &URL_SAFE_NO_PAD
                .decode(segments[1])
                .expect("Failed to decode payload"),
        )
        .expect("Failed to parse payload");
        assert_eq!(payload["nameidentifier"], "user123");
        assert_eq!(payload["name"], "Ann");
        assert_eq!(payload["email"], "ann@example.com");
        assert_eq!(payload["iss"], "identity-service");
        assert_eq!(payload["aud"], "identity-clients");
        assert!(payload["exp"].is_i64());
        assert!(payload["iat"].is_i64());

        // Signature segment decodes to 32 bytes (SHA-256 HMAC).
        let signature = URL_SAFE_NO_PAD
            .decode(segments[2])
            .expect("Failed to decode signature");
        assert_eq!(signature.len(), 32);
    }
}
