use bwg_common::Secret;
use log::*;

use crate::data_objects::CodeContext;

#[derive(Debug, Clone, Default)]
pub struct BadgeKitConfig {
    pub api_url: String,
    pub api_key: Secret<String>,
    pub system: String,
    pub issuer: Option<String>,
    pub program: Option<String>,
}

impl BadgeKitConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("BWG_BADGEKIT_API_URL").unwrap_or_else(|_| {
            warn!("BWG_BADGEKIT_API_URL not set, using http://localhost:8080 as default");
            "http://localhost:8080".to_string()
        });
        let api_key = Secret::new(std::env::var("BWG_BADGEKIT_API_KEY").unwrap_or_else(|_| {
            warn!("BWG_BADGEKIT_API_KEY not set, using a useless default");
            "00000000000000".to_string()
        }));
        let system = std::env::var("BWG_BADGEKIT_SYSTEM").unwrap_or_else(|_| {
            warn!("BWG_BADGEKIT_SYSTEM not set, using badges as default");
            "badges".to_string()
        });
        let issuer = std::env::var("BWG_BADGEKIT_ISSUER").ok();
        let program = std::env::var("BWG_BADGEKIT_PROGRAM").ok();
        Self { api_url, api_key, system, issuer, program }
    }

    /// The system/issuer/program slugs this deployment works under unless a request says otherwise.
    pub fn default_context(&self) -> CodeContext {
        CodeContext { system: self.system.clone(), issuer: self.issuer.clone(), program: self.program.clone() }
    }
}
