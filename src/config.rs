use crate::policy::FlowPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    #[serde(default)]
    pub flow: FlowConfig,
}

/// Which flow variant to run and with what overrides.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FlowConfig {
    /// "ledger" or "remittance"
    pub variant: String,
    pub currency: String,
    #[serde(default)]
    pub amount_ceiling: Option<Decimal>,
    #[serde(default)]
    pub default_country_code: Option<String>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            variant: "ledger".to_string(),
            currency: "USD".to_string(),
            amount_ceiling: None,
            default_country_code: None,
        }
    }
}

impl FlowConfig {
    /// Resolve the configured variant into a concrete policy.
    pub fn policy(&self) -> FlowPolicy {
        let mut policy = match self.variant.as_str() {
            "remittance" => FlowPolicy::remittance(),
            _ => FlowPolicy::ledger_transfer(),
        };
        if self.amount_ceiling.is_some() {
            policy.amount_ceiling = self.amount_ceiling;
        }
        if self.default_country_code.is_some() {
            policy.default_country_code = self.default_country_code.clone();
        }
        policy
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}
