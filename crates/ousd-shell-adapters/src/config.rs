use alloy::primitives::Address;
use thiserror::Error;

use ousd_shell_core::{ContractHandle, ContractRegistry, LinkResolver, OUSD_CONTRACT, STAKING_CONTRACT};

/// OUSD token on Ethereum mainnet.
pub const MAINNET_OUSD: Address =
    alloy::primitives::address!("2A8e1E676Ec238d8A992307B495b45B3fEAa5e86");
/// Legacy single-asset OGN staking on Ethereum mainnet.
pub const MAINNET_OGN_STAKING: Address =
    alloy::primitives::address!("501804B374EF06fa9C427476147ac09F1551B9A0");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: invalid address '{value}'")]
    InvalidAddress { key: &'static str, value: String },
    #[error("{key}: invalid value '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub runtime_profile: RuntimeProfile,
    pub eip1193_proxy_url: Option<String>,
    pub ousd_address: Address,
    pub staking_address: Address,
    pub asset_root: String,
    pub base_path: String,
    pub show_uniswap_notice: bool,
    pub request_timeout_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            eip1193_proxy_url: None,
            ousd_address: MAINNET_OUSD,
            staking_address: MAINNET_OGN_STAKING,
            asset_root: "https://ousd.com".to_owned(),
            base_path: String::new(),
            show_uniswap_notice: false,
            request_timeout_ms: 15_000,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset keys keep their defaults; set-but-malformed keys are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("OUSD_RUNTIME_PROFILE") {
            cfg.runtime_profile = match raw.trim().to_ascii_lowercase().as_str() {
                "development" | "dev" => RuntimeProfile::Development,
                "production" | "prod" => RuntimeProfile::Production,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "OUSD_RUNTIME_PROFILE",
                        value: raw,
                    })
                }
            };
        }
        cfg.eip1193_proxy_url = lookup("OUSD_EIP1193_PROXY_URL").filter(|s| !s.trim().is_empty());
        if let Some(address) = parse_address(&lookup, "OUSD_CONTRACT_ADDRESS")? {
            cfg.ousd_address = address;
        }
        if let Some(address) = parse_address(&lookup, "OUSD_STAKING_ADDRESS")? {
            cfg.staking_address = address;
        }
        if let Some(root) = lookup("OUSD_ASSET_ROOT") {
            cfg.asset_root = root;
        }
        if let Some(base) = lookup("OUSD_BASE_PATH") {
            cfg.base_path = base;
        }
        if let Some(raw) = lookup("OUSD_SHOW_UNISWAP_NOTICE") {
            cfg.show_uniswap_notice = match raw.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "OUSD_SHOW_UNISWAP_NOTICE",
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup("OUSD_REQUEST_TIMEOUT_MS") {
            cfg.request_timeout_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "OUSD_REQUEST_TIMEOUT_MS",
                value: raw.clone(),
            })?;
        }
        Ok(cfg)
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn link_resolver(&self) -> LinkResolver {
        LinkResolver::new(self.asset_root.clone(), self.base_path.clone())
    }

    pub fn contract_registry(&self) -> ContractRegistry {
        let mut registry = ContractRegistry::default();
        registry.insert(ContractHandle::new(OUSD_CONTRACT, self.ousd_address));
        registry.insert(ContractHandle::new(STAKING_CONTRACT, self.staking_address));
        registry
    }
}

fn parse_address(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<Address>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidAddress { key, value: raw }),
    }
}
