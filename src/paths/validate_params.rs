//src/paths/validate_params.rs
use serde::{Deserialize, Serialize};

use crate::paths::utils::deserialization_helpers::{
    string_or_number_to_option_u32, string_or_number_to_option_u64,
};
use crate::utils::token_registry::{is_valid_address, TokenRegistry, MAX_DECIMALS};

/// How a request names the token whose decimals apply: either directly via
/// `decimals`, or by `chainId` + `tokenAddress` looked up in the registry.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenReference {
    #[serde(deserialize_with = "string_or_number_to_option_u32", default)]
    pub decimals: Option<u32>,
    #[serde(deserialize_with = "string_or_number_to_option_u64", default)]
    pub chain_id: Option<u64>,
    pub token_address: Option<String>,
}

pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    fn ok() -> Self {
        ValidationResult {
            valid: true,
            message: "Valid parameters".to_string(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            message: message.into(),
        }
    }
}

pub fn validate_token_reference(reference: &TokenReference) -> ValidationResult {
    match reference.decimals {
        Some(decimals) if decimals > MAX_DECIMALS => {
            let message = format!("Invalid decimals: must be at most {}", MAX_DECIMALS);
            return ValidationResult::fail(message);
        }
        Some(_) => return ValidationResult::ok(),
        None => {}
    }

    match (reference.chain_id, reference.token_address.as_deref()) {
        (None, _) | (Some(0), _) => {
            ValidationResult::fail("Missing mandatory parameter: decimals or chainId")
        }
        (_, None) => ValidationResult::fail("Missing mandatory parameter: tokenAddress"),
        (_, Some(address)) if !is_valid_address(address) => {
            ValidationResult::fail("Invalid address format")
        }
        _ => ValidationResult::ok(),
    }
}

/// Decimals for a validated reference: explicit value first, registry second.
pub fn resolve_decimals(reference: &TokenReference, tokens: &TokenRegistry) -> Result<u32, String> {
    if let Some(decimals) = reference.decimals {
        return Ok(decimals);
    }

    let chain_id = reference.chain_id.ok_or("Missing chainId")?;
    let address = reference.token_address.as_deref().ok_or("Missing tokenAddress")?;
    tokens
        .get(chain_id, address)
        .map(|token| token.decimals())
        .ok_or_else(|| format!("Unknown token {} on chain {}", address, chain_id))
}

pub fn validate_decimal_amount(amount: &str) -> ValidationResult {
    if amount.is_empty() {
        ValidationResult::fail("Missing mandatory parameter: amount")
    } else {
        ValidationResult::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "0x80b5a32E4F032B2a058b4F29EC95EEfEEB87aDcd";

    #[test]
    fn explicit_decimals_win() {
        let reference = TokenReference { decimals: Some(6), chain_id: None, token_address: None };
        assert!(validate_token_reference(&reference).valid);
        assert_eq!(resolve_decimals(&reference, &TokenRegistry::new()), Ok(6));
    }

    #[test]
    fn decimals_above_cap_are_rejected() {
        let at_cap = TokenReference { decimals: Some(MAX_DECIMALS), ..Default::default() };
        assert!(validate_token_reference(&at_cap).valid);

        let too_many = TokenReference { decimals: Some(MAX_DECIMALS + 1), ..Default::default() };
        let result = validate_token_reference(&too_many);
        assert!(!result.valid);
        assert!(result.message.starts_with("Invalid decimals"));
    }

    #[test]
    fn chain_without_address_is_rejected() {
        let reference = TokenReference { chain_id: Some(7700), ..Default::default() };
        let result = validate_token_reference(&reference);
        assert!(!result.valid);
        assert!(result.message.contains("tokenAddress"));
    }

    #[test]
    fn malformed_address_is_rejected() {
        let reference = TokenReference {
            decimals: None,
            chain_id: Some(7700),
            token_address: Some("0x1234".to_string()),
        };
        assert_eq!(validate_token_reference(&reference).message, "Invalid address format");
    }

    #[test]
    fn unknown_token_fails_to_resolve() {
        let reference = TokenReference {
            decimals: None,
            chain_id: Some(7700),
            token_address: Some(USDC.to_string()),
        };
        assert!(validate_token_reference(&reference).valid);
        let err = resolve_decimals(&reference, &TokenRegistry::new()).unwrap_err();
        assert!(err.contains("Unknown token"));
    }
}
