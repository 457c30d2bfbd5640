//! Ledger-facing types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default node endpoint for a locally running ledger node.
pub const DEFAULT_NODE_ENDPOINT: &str = "http://localhost:57291";

/// A validated URL identifying the node a session connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(url::Url);

impl Endpoint {
    /// Parse and validate an endpoint URL.
    ///
    /// Only `http` and `https` URLs with a host are accepted.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let url = url::Url::parse(raw).map_err(|e| EndpointError {
            input: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(EndpointError {
                input: raw.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.host_str().is_none() {
            return Err(EndpointError {
                input: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self(url))
    }

    /// The underlying URL.
    pub fn url(&self) -> &url::Url {
        &self.0
    }

    /// The URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Rejected endpoint string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid endpoint '{input}': {reason}")]
pub struct EndpointError {
    pub input: String,
    pub reason: String,
}

/// Account storage policy, passed through to the ledger client untouched.
///
/// Values this layer does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStorageMode {
    #[default]
    Private,
    Public,
    Network,
    Other(String),
}

impl AccountStorageMode {
    pub fn as_str(&self) -> &str {
        match self {
            AccountStorageMode::Private => "private",
            AccountStorageMode::Public => "public",
            AccountStorageMode::Network => "network",
            AccountStorageMode::Other(raw) => raw,
        }
    }
}

impl From<String> for AccountStorageMode {
    fn from(raw: String) -> Self {
        // Only the canonical spellings map to named variants; anything else is
        // forwarded to the ledger client byte for byte.
        match raw.as_str() {
            "private" => AccountStorageMode::Private,
            "public" => AccountStorageMode::Public,
            "network" => AccountStorageMode::Network,
            _ => AccountStorageMode::Other(raw),
        }
    }
}

impl From<&str> for AccountStorageMode {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AccountStorageMode> for String {
    fn from(mode: AccountStorageMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for AccountStorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two kinds of account this front-end provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Wallet,
    Faucet,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Wallet => "wallet",
            AccountKind::Faucet => "faucet",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one account creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSpec {
    Wallet {
        storage_mode: AccountStorageMode,
        mutable: bool,
    },
    Faucet {
        storage_mode: AccountStorageMode,
        mutable: bool,
        token_symbol: String,
        decimals: u8,
        initial_supply: u64,
    },
}

impl AccountSpec {
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountSpec::Wallet { .. } => AccountKind::Wallet,
            AccountSpec::Faucet { .. } => AccountKind::Faucet,
        }
    }

    pub fn storage_mode(&self) -> &AccountStorageMode {
        match self {
            AccountSpec::Wallet { storage_mode, .. } | AccountSpec::Faucet { storage_mode, .. } => {
                storage_mode
            }
        }
    }
}

/// Opaque identifier of an account, exactly as the ledger client reported it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentifier(String);

impl AccountIdentifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AccountIdentifier> for String {
    fn from(id: AccountIdentifier) -> Self {
        id.0
    }
}

/// An account as reported back by the ledger client after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAccount {
    id: AccountIdentifier,
}

impl CreatedAccount {
    pub fn new(id: AccountIdentifier) -> Self {
        Self { id }
    }

    /// The identifier of the newly created account.
    pub fn id(&self) -> &AccountIdentifier {
        &self.id
    }
}

/// Errors raised by a ledger client implementation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The client could not establish a session with the node.
    #[error("cannot connect to {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    /// The node refused the request.
    #[error("request rejected by node: {0}")]
    Rejected(String),

    /// The request could not be delivered or its reply could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with something the client does not understand.
    #[error("invalid response from node: {0}")]
    InvalidResponse(String),
}

/// Result type for ledger client calls.
pub type LedgerResult<T> = Result<T, LedgerError>;
