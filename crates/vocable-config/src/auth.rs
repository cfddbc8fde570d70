use std::env;

use serde::{Deserialize, Serialize};

fn default_scopes() -> Vec<String> {
    vec!["openid".into(), "email".into(), "profile".into()]
}

/// Hosted identity provider settings (Cognito-style hosted UI).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Hosted UI domain, e.g. `myapp.auth.eu-north-1.amazoncognito.com`.
    pub domain: String,
    pub client_id: String,
    pub redirect_sign_in: String,
    pub redirect_sign_out: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl AuthConfig {
    pub fn new() -> Self {
        let domain = env::var("AUTH_DOMAIN").unwrap_or_default();
        let client_id = env::var("AUTH_CLIENT_ID").unwrap_or_default();
        let redirect_sign_in = env::var("AUTH_REDIRECT_SIGN_IN")
            .unwrap_or_else(|_| "http://localhost:5174/callback".to_string());
        let redirect_sign_out = env::var("AUTH_REDIRECT_SIGN_OUT")
            .unwrap_or_else(|_| "http://localhost:5174".to_string());

        Self {
            domain,
            client_id,
            redirect_sign_in,
            redirect_sign_out,
            scopes: default_scopes(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            client_id: String::new(),
            redirect_sign_in: String::new(),
            redirect_sign_out: String::new(),
            scopes: default_scopes(),
        }
    }
}
