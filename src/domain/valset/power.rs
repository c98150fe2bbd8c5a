use crate::foundation::{BridgeError, Result, MAX_POWER};

/// Scales raw voting weights onto `[0, MAX_POWER]`.
///
/// `power_i = floor(raw_i * MAX_POWER / sum(raw))`, computed in 128-bit arithmetic.
/// Equal weights map to equal powers and the result never sums above `MAX_POWER`.
pub fn normalize_powers(raw: &[u64]) -> Result<Vec<u32>> {
    let total: u128 = raw.iter().map(|p| u128::from(*p)).sum();
    if total == 0 {
        return Err(BridgeError::EmptyValidatorSet);
    }

    raw.iter()
        .map(|p| {
            let scaled = u128::from(*p) * u128::from(MAX_POWER) / total;
            u32::try_from(scaled).map_err(|_| BridgeError::overflow("power normalization"))
        })
        .collect()
}
