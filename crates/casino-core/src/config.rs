//! Node endpoints and house parameters.
//!
//! Every field has a default so a partial JSON document (or none at all)
//! yields a usable testnet configuration.

use std::str::FromStr;

use chain_xrs::{Address, LAMPORTS_PER_XRS};
use serde::{Deserialize, Serialize};

use crate::error::CasinoError;

pub const NODE_IP_ENV: &str = "XERIS_NODE_IP";
pub const TREASURY_ADDRESS_ENV: &str = "TREASURY_ADDRESS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct CasinoConfig {
    #[serde(default = "default_node_host")]
    pub node_host: String,
    /// JSON-RPC and explorer port.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,
    /// Transaction submission and faucet port.
    #[serde(default = "default_submit_port")]
    pub submit_port: u16,
    #[serde(default = "default_treasury_address")]
    pub treasury_address: String,
    #[serde(default = "default_lamports_per_xrs")]
    pub lamports_per_xrs: u64,
    /// How many times a bet transaction is looked up before giving up.
    #[serde(default = "default_confirm_attempts")]
    pub confirm_attempts: u32,
    #[serde(default = "default_confirm_interval_ms")]
    pub confirm_interval_ms: u64,
    /// Lottery ticket price in XRS.
    #[serde(default = "default_ticket_price")]
    pub ticket_price: f64,
}

fn default_node_host() -> String {
    "138.197.116.81".to_string()
}

fn default_rpc_port() -> u16 {
    50008
}

fn default_submit_port() -> u16 {
    56001
}

fn default_treasury_address() -> String {
    "6G4GroMrVsGjd3xhywxfzXDg7vPn1V2Mky4B3qsXVGHo".to_string()
}

fn default_lamports_per_xrs() -> u64 {
    LAMPORTS_PER_XRS
}

fn default_confirm_attempts() -> u32 {
    15
}

fn default_confirm_interval_ms() -> u64 {
    2_000
}

fn default_ticket_price() -> f64 {
    10.0
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            node_host: default_node_host(),
            rpc_port: default_rpc_port(),
            submit_port: default_submit_port(),
            treasury_address: default_treasury_address(),
            lamports_per_xrs: default_lamports_per_xrs(),
            confirm_attempts: default_confirm_attempts(),
            confirm_interval_ms: default_confirm_interval_ms(),
            ticket_price: default_ticket_price(),
        }
    }
}

impl CasinoConfig {
    pub fn from_json(json: &str) -> Result<Self, CasinoError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CasinoError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `XERIS_NODE_IP` and `TREASURY_ADDRESS`.
    pub fn from_env() -> Result<Self, CasinoError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CasinoError> {
        let mut config = Self::default();
        if let Some(host) = lookup(NODE_IP_ENV).filter(|v| !v.is_empty()) {
            config.node_host = host;
        }
        if let Some(treasury) = lookup(TREASURY_ADDRESS_ENV).filter(|v| !v.is_empty()) {
            config.treasury_address = treasury;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CasinoError> {
        if self.node_host.is_empty() {
            return Err(CasinoError::InvalidConfig("node_host is empty".into()));
        }
        Address::from_str(&self.treasury_address).map_err(|e| {
            CasinoError::InvalidConfig(format!("treasury_address: {e}"))
        })?;
        if self.lamports_per_xrs == 0 {
            return Err(CasinoError::InvalidConfig("lamports_per_xrs is zero".into()));
        }
        if self.confirm_attempts == 0 {
            return Err(CasinoError::InvalidConfig("confirm_attempts is zero".into()));
        }
        if !self.ticket_price.is_finite() || self.ticket_price <= 0.0 {
            return Err(CasinoError::InvalidConfig(format!(
                "ticket_price {} is not positive",
                self.ticket_price
            )));
        }
        Ok(())
    }

    /// Base URL of the node's HTTP API, which also serves the explorer.
    pub fn api_base(&self) -> String {
        format!("http://{}:{}", self.node_host, self.rpc_port)
    }

    pub fn rpc_url(&self) -> String {
        format!("{}/rpc", self.api_base())
    }

    pub fn submit_url(&self) -> String {
        format!("http://{}:{}/submit", self.node_host, self.submit_port)
    }

    pub fn faucet_url(&self, address: &str, xrs: u64) -> String {
        format!(
            "http://{}:{}/airdrop/{address}/{xrs}",
            self.node_host, self.submit_port
        )
    }

    pub fn explorer_tx_base(&self) -> String {
        format!("{}/v2/tx", self.api_base())
    }

    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!("{}/{signature}", self.explorer_tx_base())
    }

    pub fn explorer_account_url(&self, address: &str) -> String {
        format!("{}/v2/account/{address}", self.api_base())
    }
}
