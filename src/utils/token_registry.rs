use std::collections::HashSet;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::utils::deserialization_helpers::{
    string_or_number_to_u32, string_or_number_to_u64,
};

/// Largest `decimals` accepted anywhere; a u256 has at most 78 digits.
pub const MAX_DECIMALS: u32 = 77;

static ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap());

pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_REGEX.is_match(address)
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token does not match any known token shape: {0}")]
    InvalidShape(#[from] serde_json::Error),

    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    #[error("Token {0} has {1} decimals, more than the supported {max}", max = MAX_DECIMALS)]
    InvalidDecimals(String, u32),

    #[error("Token list is missing the \"tokens\" object")]
    MissingTokenList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Token {
    pub id: String,
    #[serde(deserialize_with = "string_or_number_to_u64")]
    pub chain_id: u64,
    pub address: String,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "string_or_number_to_u32")]
    pub decimals: u32,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IbcToken {
    pub id: String,
    #[serde(deserialize_with = "string_or_number_to_u64")]
    pub chain_id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "string_or_number_to_u32")]
    pub decimals: u32,
    pub icon: String,
    pub ibc_denom: String,
    pub native_name: String,
}

/// A token as listed in `tokens.json`. IBC entries are tried first since
/// they carry a superset of the shared fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Ibc(IbcToken),
    Erc20(Erc20Token),
}

impl Token {
    /// Parses and validates a single token object.
    pub fn from_value(value: &Value) -> Result<Self, TokenError> {
        let token: Token = serde_json::from_value(value.clone())?;
        if token.decimals() > MAX_DECIMALS {
            return Err(TokenError::InvalidDecimals(token.id().to_string(), token.decimals()));
        }
        if let Token::Erc20(erc20) = &token {
            if !is_valid_address(&erc20.address) {
                return Err(TokenError::InvalidAddress(erc20.address.clone()));
            }
        }
        Ok(token)
    }

    pub fn id(&self) -> &str {
        match self {
            Token::Erc20(t) => &t.id,
            Token::Ibc(t) => &t.id,
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Token::Erc20(t) => t.chain_id,
            Token::Ibc(t) => t.chain_id,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Token::Erc20(t) => &t.symbol,
            Token::Ibc(t) => &t.symbol,
        }
    }

    pub fn decimals(&self) -> u32 {
        match self {
            Token::Erc20(t) => t.decimals,
            Token::Ibc(t) => t.decimals,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Token::Erc20(t) => Some(&t.address),
            Token::Ibc(_) => None,
        }
    }

    /// `"chainId:address"` for ERC20 tokens, `"chainId:ibcDenom"` for IBC tokens.
    pub fn lookup_key(&self) -> String {
        match self {
            Token::Erc20(t) => lookup_key(t.chain_id, &t.address),
            Token::Ibc(t) => lookup_key(t.chain_id, &t.ibc_denom),
        }
    }
}

fn lookup_key(chain_id: u64, address: &str) -> String {
    format!("{}:{}", chain_id, address.to_lowercase())
}

pub fn is_erc20_token(value: &Value) -> bool {
    serde_json::from_value::<Erc20Token>(value.clone()).is_ok()
}

pub fn is_erc20_token_list(values: &[Value]) -> bool {
    values.iter().all(is_erc20_token)
}

pub fn is_ibc_token(value: &Value) -> bool {
    serde_json::from_value::<IbcToken>(value.clone()).is_ok()
}

/// Token metadata keyed by `"chainId:address"` for fast lookup.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: DashMap<String, Token>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: Token) {
        self.tokens.insert(token.lookup_key(), token);
    }

    pub fn get(&self, chain_id: u64, address: &str) -> Option<Token> {
        self.tokens.get(&lookup_key(chain_id, address)).map(|t| t.clone())
    }

    pub fn get_by_id(&self, id: &str) -> Option<Token> {
        self.tokens
            .iter()
            .find(|entry| entry.value().id() == id)
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens ordered by chain id, then symbol.
    pub fn all(&self) -> Vec<Token> {
        let mut tokens: Vec<Token> =
            self.tokens.iter().map(|entry| entry.value().clone()).collect();
        tokens.sort_by(|a, b| {
            a.chain_id()
                .cmp(&b.chain_id())
                .then_with(|| a.symbol().cmp(b.symbol()))
        });
        tokens
    }

    /// Replaces the registry contents with the tokens in a `tokens.json` document
    /// (`{"tokens": {"<chainId>": [token, ...]}}`). Invalid entries are skipped.
    /// Existing entries stay readable until their replacement is in place.
    pub fn replace_all(&self, document: &Value) -> Result<usize, TokenError> {
        let chains = document["tokens"].as_object().ok_or(TokenError::MissingTokenList)?;

        let mut fresh_keys = HashSet::new();
        for (chain_id, tokens_list) in chains {
            let Some(tokens_array) = tokens_list.as_array() else {
                warn!("Token list for chain {} is not an array, skipping", chain_id);
                continue;
            };
            for value in tokens_array {
                match Token::from_value(value) {
                    Ok(token) => {
                        fresh_keys.insert(token.lookup_key());
                        self.insert(token);
                    }
                    Err(e) => warn!("Skipping token on chain {}: {}", chain_id, e),
                }
            }
        }

        self.tokens.retain(|key, _| fresh_keys.contains(key));
        debug!("Token registry now holds {} tokens", self.tokens.len());
        Ok(fresh_keys.len())
    }
}
