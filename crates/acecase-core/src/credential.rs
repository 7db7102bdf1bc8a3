//! Signed room access credentials.
//!
//! A credential is an HS256 JWT in the format the real-time server
//! expects: the API key as issuer, the participant identity as subject,
//! a video grant for the interview room, and a JSON metadata string that
//! tells the interviewer agent which case was selected.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::{LiveKitCredentials, LiveKitSettings};

type HmacSha256 = Hmac<Sha256>;

/// Random characters appended to the identity prefix.
const IDENTITY_SUFFIX_LEN: usize = 6;

/// JOSE header of every issued token.
const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Errors from issuing or verifying a credential.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The signing key was rejected by the MAC.
    #[error("invalid signing key: {0}")]
    Key(String),

    /// Claims could not be encoded or decoded.
    #[error("claims serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The token is not three base64url segments.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The signature does not match.
    #[error("signature mismatch")]
    BadSignature,

    /// The token is outside its validity window.
    #[error("token not valid at {now}: valid from {nbf} until {exp}")]
    Expired {
        /// Evaluation time (unix seconds).
        now: i64,
        /// Not-before (unix seconds).
        nbf: i64,
        /// Expiry (unix seconds).
        exp: i64,
    },
}

/// Permission to join a specific room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    /// Whether the bearer may join.
    pub room_join: bool,
    /// The room the grant applies to.
    pub room: String,
}

/// Session metadata the interviewer agent reads on join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// The `caseId` the candidate picked.
    #[serde(rename = "selectedCase")]
    pub selected_case: String,
}

/// JWT claims of a room credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// API key.
    pub iss: String,
    /// Participant identity.
    pub sub: String,
    /// Token id (same as identity).
    pub jti: String,
    /// Not valid before (unix seconds).
    pub nbf: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// JSON-encoded [`SessionMetadata`].
    pub metadata: String,
    /// Room permissions.
    pub video: VideoGrant,
}

impl AccessClaims {
    /// Decode the embedded [`SessionMetadata`].
    pub fn session_metadata(&self) -> Result<SessionMetadata, CredentialError> {
        Ok(serde_json::from_str(&self.metadata)?)
    }
}

/// A freshly signed credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    /// The compact JWT.
    pub token: String,
    /// The participant identity baked into it.
    pub identity: String,
    /// When it stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Signs room credentials for selected cases.
#[derive(Clone)]
pub struct CredentialIssuer {
    credentials: LiveKitCredentials,
    room: String,
    identity_prefix: String,
    ttl_secs: i64,
}

impl CredentialIssuer {
    /// Build an issuer from room settings and a key pair.
    pub fn new(settings: &LiveKitSettings, credentials: LiveKitCredentials) -> Self {
        Self {
            credentials,
            room: settings.room.clone(),
            identity_prefix: settings.identity_prefix.clone(),
            ttl_secs: i64::try_from(settings.token_ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// The room every credential grants.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Issue a credential for `case_id` with a random identity, valid from now.
    pub fn issue(&self, case_id: &str) -> Result<IssuedCredential, CredentialError> {
        let identity = self.random_identity();
        self.issue_at(case_id, &identity, Utc::now())
    }

    /// Issue a credential with an explicit identity and issue time.
    pub fn issue_at(
        &self,
        case_id: &str,
        identity: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedCredential, CredentialError> {
        let nbf = now.timestamp();
        let exp = nbf.saturating_add(self.ttl_secs);

        let metadata = serde_json::to_string(&SessionMetadata {
            selected_case: case_id.to_owned(),
        })?;

        let claims = AccessClaims {
            iss: self.credentials.api_key.clone(),
            sub: identity.to_owned(),
            jti: identity.to_owned(),
            nbf,
            exp,
            metadata,
            video: VideoGrant {
                room_join: true,
                room: self.room.clone(),
            },
        };

        let header = URL_SAFE_NO_PAD.encode(HEADER);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signing_input = format!("{header}.{payload}");
        let signature = URL_SAFE_NO_PAD.encode(self.sign(signing_input.as_bytes())?);

        Ok(IssuedCredential {
            token: format!("{signing_input}.{signature}"),
            identity: identity.to_owned(),
            expires_at: DateTime::from_timestamp(exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC),
        })
    }

    /// Check a token's signature and validity window against now.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, CredentialError> {
        self.verify_at(token, Utc::now())
    }

    /// Check a token's signature and validity window at `now`.
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, CredentialError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CredentialError::Malformed(String::from(
                "expected three segments",
            )));
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| CredentialError::Malformed(format!("signature: {e}")))?;

        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_e| CredentialError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| CredentialError::Malformed(format!("payload: {e}")))?;
        let claims: AccessClaims = serde_json::from_slice(&payload)?;

        let now = now.timestamp();
        if now < claims.nbf || now >= claims.exp {
            return Err(CredentialError::Expired {
                now,
                nbf: claims.nbf,
                exp: claims.exp,
            });
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, CredentialError> {
        HmacSha256::new_from_slice(self.credentials.api_secret.as_bytes())
            .map_err(|e| CredentialError::Key(e.to_string()))
    }

    fn sign(&self, input: &[u8]) -> Result<Vec<u8>, CredentialError> {
        let mut mac = self.mac()?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn random_identity(&self) -> String {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(IDENTITY_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("{}{suffix}", self.identity_prefix)
    }
}

impl std::fmt::Debug for CredentialIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialIssuer")
            .field("credentials", &self.credentials)
            .field("room", &self.room)
            .field("identity_prefix", &self.identity_prefix)
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}
