use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Url;
use serde::Deserialize;
use vocable_config::auth::AuthConfig;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("malformed id token")]
    MalformedToken,

    #[error("invalid hosted UI URL: {0}")]
    InvalidUrl(String),

    #[error("failed to decode token payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("failed to parse token claims: {0}")]
    Claims(#[from] serde_json::Error),
}

/// The identified current user.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Principal {
    /// Preferred identifier: email, then display name, then the opaque
    /// login subject.
    pub fn identifier(&self) -> &str {
        self.email
            .as_deref()
            .or(self.display_name.as_deref())
            .unwrap_or(&self.subject)
    }
}

/// Tokens handed back by the hosted provider after the redirect flow.
/// Exchange and refresh stay with the provider; we only hold the result.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub id_token: String,
    pub access_token: Option<String>,
}

/// Claims we care about from the id-token payload.
#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "cognito:username")]
    username: Option<String>,
}

/// Adapter around a redirect-based hosted login.
pub struct HostedIdentity {
    config: AuthConfig,
    tokens: Option<SessionTokens>,
    principal: Option<Principal>,
}

impl HostedIdentity {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            tokens: None,
            principal: None,
        }
    }

    /// Hosted-UI authorize URL that starts the external redirect.
    pub fn login_url(&self) -> Result<Url, AuthError> {
        let mut url = Url::parse(&format!("https://{}/oauth2/authorize", self.config.domain))
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("redirect_uri", &self.config.redirect_sign_in);
        Ok(url)
    }

    /// Hosted-UI logout URL.
    pub fn logout_url(&self) -> Result<Url, AuthError> {
        let mut url = Url::parse(&format!("https://{}/logout", self.config.domain))
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("logout_uri", &self.config.redirect_sign_out);
        Ok(url)
    }

    /// Install the tokens returned by the provider and derive the
    /// principal from the id-token claims.
    pub fn begin_session(&mut self, tokens: SessionTokens) -> Result<&Principal, AuthError> {
        let claims = decode_id_token(&tokens.id_token)?;

        let principal = Principal {
            subject: claims.sub,
            email: claims.email,
            display_name: claims.name.or(claims.username),
        };
        tracing::info!("session started for {}", principal.identifier());

        self.tokens = Some(tokens);
        Ok(self.principal.insert(principal))
    }

    /// Drop the local session. The provider-side sign-out is the
    /// redirect to [`Self::logout_url`].
    pub fn clear_session(&mut self) {
        self.tokens = None;
        self.principal = None;
    }

    pub fn current_principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Credential attached as `Authorization: Bearer` by API clients.
    pub fn bearer_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.id_token.as_str())
    }
}

fn decode_id_token(id_token: &str) -> Result<IdTokenClaims, AuthError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or(AuthError::MalformedToken)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}
