use crate::domain::batch::history::BatchHistory;
use crate::domain::model::{BridgedDenominator, Coin, OutgoingBatch, OutgoingTransferIntent, ValidatorSetSnapshot};
use crate::domain::pool::OutgoingPool;
use crate::foundation::{BridgeError, Result};

/// Sum of element fees, denominated in `denom`.
pub fn total_fee(denom: &str, elements: &[OutgoingTransferIntent]) -> Result<Coin> {
    elements.iter().try_fold(Coin::zero(denom), |acc, element| acc.checked_add(&element.fee))
}

/// Moves the top `max_elements` entries of the denominator's voucher denom out of `pool` into a
/// new batch stored in `history`.
///
/// Every fallible step except the final bookkeeping runs before the pool is touched. The
/// caller's transaction discards the partial state if anything fails after that point.
pub fn build_batch(
    pool: &mut OutgoingPool,
    history: &mut BatchHistory,
    denominator: &BridgedDenominator,
    valset: ValidatorSetSnapshot,
    block: u64,
    max_elements: usize,
) -> Result<OutgoingBatch> {
    if max_elements == 0 {
        return Err(BridgeError::InvalidArgument("max batch elements must be > 0".to_string()));
    }
    let denom = denominator.voucher_denom.as_str();
    let selected = pool.peek_top(denom, max_elements);
    if selected.is_empty() {
        return Err(BridgeError::EmptyPool { denom: denom.to_string() });
    }

    let total_fee = total_fee(denom, &selected)?;
    let nonce = history.next_nonce(&denominator.token_contract)?;
    let ids: Vec<u64> = selected.iter().map(|e| e.id).collect();
    let elements = pool.remove(&ids)?;

    let batch = OutgoingBatch {
        nonce,
        block,
        elements,
        total_fee,
        bridged_denominator: denominator.clone(),
        valset,
        token_contract: denominator.token_contract,
    };
    history.insert(batch.clone())?;
    Ok(batch)
}
