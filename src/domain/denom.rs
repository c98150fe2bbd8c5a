use crate::domain::model::BridgedDenominator;
use crate::foundation::{BridgeError, ForeignAddress, Result, VOUCHER_DENOM_HASH_LEN, VOUCHER_DENOM_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Local denomination of the voucher minted for a foreign token.
///
/// `peggy` followed by the first hex characters of `blake3("<contract>/<symbol>/")`.
pub fn voucher_denom(token_contract: &ForeignAddress, symbol: &str) -> String {
    let trace = format!("{}/{}/", token_contract, symbol);
    let digest = blake3::hash(trace.as_bytes()).to_hex();
    format!("{}{}", VOUCHER_DENOM_PREFIX, &digest.as_str()[..VOUCHER_DENOM_HASH_LEN])
}

/// Foreign tokens registered for bridging. One symbol per contract.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DenominatorRegistry {
    by_voucher: BTreeMap<String, BridgedDenominator>,
    voucher_by_contract: BTreeMap<ForeignAddress, String>,
}

impl DenominatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `(token_contract, symbol)`, returning the stored entry.
    ///
    /// Storing the same pair again is a no-op.
    pub fn store(&mut self, token_contract: ForeignAddress, symbol: &str) -> Result<BridgedDenominator> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(BridgeError::InvalidArgument("token symbol must not be empty".to_string()));
        }

        if let Some(existing) = self.by_contract(&token_contract) {
            if existing.symbol == symbol {
                return Ok(existing.clone());
            }
            return Err(BridgeError::DenominatorConflict {
                token_contract: token_contract.to_string(),
                existing: existing.symbol.clone(),
                attempted: symbol.to_string(),
            });
        }

        let denominator =
            BridgedDenominator { token_contract, symbol: symbol.to_string(), voucher_denom: voucher_denom(&token_contract, symbol) };
        if self.by_voucher.contains_key(&denominator.voucher_denom) {
            return Err(BridgeError::DenominatorConflict {
                token_contract: token_contract.to_string(),
                existing: denominator.voucher_denom.clone(),
                attempted: symbol.to_string(),
            });
        }
        self.voucher_by_contract.insert(token_contract, denominator.voucher_denom.clone());
        self.by_voucher.insert(denominator.voucher_denom.clone(), denominator.clone());
        Ok(denominator)
    }

    pub fn by_voucher(&self, voucher_denom: &str) -> Option<&BridgedDenominator> {
        self.by_voucher.get(voucher_denom)
    }

    pub fn by_contract(&self, token_contract: &ForeignAddress) -> Option<&BridgedDenominator> {
        self.voucher_by_contract.get(token_contract).and_then(|denom| self.by_voucher.get(denom))
    }

    /// Resolves a voucher denom or fails with `UnknownDenomination`.
    pub fn require(&self, voucher_denom: &str) -> Result<&BridgedDenominator> {
        self.by_voucher(voucher_denom).ok_or_else(|| BridgeError::UnknownDenomination(voucher_denom.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BridgedDenominator> {
        self.by_voucher.values()
    }

    pub fn len(&self) -> usize {
        self.by_voucher.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_voucher.is_empty()
    }
}
