use crate::fixtures::{foreign, native};
use peggy_core::domain::batch::{build_batch, BatchHistory};
use peggy_core::domain::denom::voucher_denom;
use peggy_core::domain::pool::OutgoingPool;
use peggy_core::domain::{BridgedDenominator, Coin, ValidatorSetSnapshot};
use std::collections::BTreeSet;

fn next_u64(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn denominator() -> BridgedDenominator {
    let token_contract = foreign(0x42);
    BridgedDenominator { token_contract, symbol: "MAX".to_string(), voucher_denom: voucher_denom(&token_contract, "MAX") }
}

/// Fills a pool from `seed`, returning the fees in insertion order.
fn random_pool(seed: u64, denom: &str) -> (OutgoingPool, Vec<u64>) {
    let mut rng = seed ^ 0xA5A5_5A5A_DEAD_BEEF;
    let mut pool = OutgoingPool::new();
    let mut fees = Vec::new();
    let count = next_u64(&mut rng) % 30 + 1;
    for _ in 0..count {
        let fee = next_u64(&mut rng) % 5;
        let amount = next_u64(&mut rng) % 1_000 + 1;
        pool.insert(native(1), foreign(2), Coin::new(amount, denom), Coin::new(fee, denom)).expect("insert");
        fees.push(fee);
    }
    (pool, fees)
}

#[test]
fn ids_strictly_increase_across_extraction() {
    let denominator = denominator();
    for seed in 0u64..50 {
        let (mut pool, _) = random_pool(seed, &denominator.voucher_denom);
        let mut history = BatchHistory::new();
        let mut seen = BTreeSet::new();
        let mut last = pool.last_id();

        for round in 0..5u64 {
            let max = (seed % 4 + 1) as usize;
            if let Ok(batch) = build_batch(&mut pool, &mut history, &denominator, ValidatorSetSnapshot::empty(round), round, max) {
                for id in batch.element_ids() {
                    assert!(seen.insert(id), "seed={seed} id {id} batched twice");
                }
            }
            let denom = denominator.voucher_denom.as_str();
            let id = pool.insert(native(1), foreign(2), Coin::new(10, denom), Coin::new(1, denom)).expect("insert");
            assert!(id > last, "seed={seed} id={id} last={last}");
            last = id;
        }
    }
}

#[test]
fn batch_is_deterministic_and_fee_ordered() {
    let denominator = denominator();
    for seed in 0u64..50 {
        let max = (seed % 7 + 1) as usize;
        let (mut pool_a, fees) = random_pool(seed, &denominator.voucher_denom);
        let (mut pool_b, _) = random_pool(seed, &denominator.voucher_denom);

        let a = build_batch(&mut pool_a, &mut BatchHistory::new(), &denominator, ValidatorSetSnapshot::empty(1), 1, max)
            .expect("batch a");
        let b = build_batch(&mut pool_b, &mut BatchHistory::new(), &denominator, ValidatorSetSnapshot::empty(1), 1, max)
            .expect("batch b");
        assert_eq!(a, b, "seed={seed}");

        // reference selection: sort (fee desc, id asc), take max
        let mut expected: Vec<(u64, u64)> = fees.iter().enumerate().map(|(i, fee)| (*fee, i as u64 + 1)).collect();
        expected.sort_by(|x, y| y.0.cmp(&x.0).then(x.1.cmp(&y.1)));
        let expected_ids: Vec<u64> = expected.iter().take(max).map(|(_, id)| *id).collect();
        assert_eq!(a.element_ids(), expected_ids, "seed={seed}");

        let fee_sum: u64 = a.elements.iter().map(|e| e.fee.amount).sum();
        assert_eq!(a.total_fee.amount, fee_sum);
        assert_eq!(pool_a.len(), fees.len() - a.elements.len());
    }
}
