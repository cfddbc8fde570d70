use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::gateway::GatewayConfig;
use self::store::StoreConfig;
use self::ui::UiConfig;

pub mod auth;
pub mod gateway;
pub mod store;
pub mod ui;

#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub gateway: GatewayConfig,
    pub auth: AuthConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Assemble the full configuration from the environment.
    pub fn new() -> Self {
        Config {
            store: StoreConfig::new(),
            gateway: GatewayConfig::new(),
            auth: AuthConfig::new(),
            ui: UiConfig::new(),
        }
    }
}
