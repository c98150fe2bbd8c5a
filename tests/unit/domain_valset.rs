use crate::fixtures::{foreign, native};
use peggy_core::domain::ports::AddressRegistry;
use peggy_core::domain::valset::{build_snapshot, normalize_powers, ValsetHistory};
use peggy_core::domain::ValidatorPower;
use peggy_core::foundation::{BridgeError, ForeignAddress, NativeAddress, Result, MAX_POWER};
use peggy_core::infrastructure::chain::MemoryAddressRegistry;

fn next_u64(state: &mut u64) -> u64 {
    // LCG parameters from Numerical Recipes; fine for deterministic test coverage.
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

struct EveryoneRegistered;

impl AddressRegistry for EveryoneRegistered {
    fn foreign_address(&self, validator: &NativeAddress) -> Result<Option<ForeignAddress>> {
        Ok(Some(ForeignAddress::new(*validator.as_bytes())))
    }
}

#[test]
fn normalized_power_never_exceeds_max_and_is_monotonic() {
    for seed in 0u64..200 {
        let mut rng = seed ^ 0x5eed_cafe_f00d_0001;
        let count = (next_u64(&mut rng) % 12 + 1) as usize;
        let raw: Vec<u64> = (0..count).map(|_| next_u64(&mut rng) >> (next_u64(&mut rng) % 64)).collect();
        if raw.iter().all(|p| *p == 0) {
            continue;
        }

        let powers = normalize_powers(&raw).expect("normalize");
        let sum: u64 = powers.iter().map(|p| u64::from(*p)).sum();
        assert!(sum <= MAX_POWER, "seed={seed} sum={sum}");

        for i in 0..count {
            for j in 0..count {
                if raw[i] >= raw[j] {
                    assert!(powers[i] >= powers[j], "seed={seed} raw[{i}]={} raw[{j}]={}", raw[i], raw[j]);
                }
            }
        }
    }
}

#[test]
fn equal_weights_get_floor_share() {
    let registry = EveryoneRegistered;
    for n in 1..=6u8 {
        let powers: Vec<ValidatorPower> = (1..=n).map(|i| ValidatorPower::new(native(i), 1_000)).collect();
        let snapshot = build_snapshot(100, &powers, &registry).expect("snapshot");
        assert_eq!(snapshot.members.len(), n as usize);
        for member in &snapshot.members {
            assert_eq!(u64::from(member.power), MAX_POWER / u64::from(n));
        }
    }
}

#[test]
fn six_and_two_member_sets_match_known_powers() {
    let registry = EveryoneRegistered;
    let six: Vec<ValidatorPower> = (1..=6).map(|i| ValidatorPower::new(native(i), 1)).collect();
    let snapshot = build_snapshot(1, &six, &registry).expect("snapshot");
    assert!(snapshot.members.iter().all(|m| m.power == 715827882));

    let two: Vec<ValidatorPower> = (1..=2).map(|i| ValidatorPower::new(native(i), 1)).collect();
    let snapshot = build_snapshot(2, &two, &registry).expect("snapshot");
    assert!(snapshot.members.iter().all(|m| m.power == 2147483647));
}

#[test]
fn unregistered_validators_do_not_dilute_power() {
    let registry = MemoryAddressRegistry::new();
    registry.set_foreign_address(native(1), foreign(1)).expect("register");
    let powers = vec![ValidatorPower::new(native(1), 5), ValidatorPower::new(native(2), 5)];

    let snapshot = build_snapshot(9, &powers, &registry).expect("snapshot");
    assert_eq!(snapshot.members.len(), 1);
    assert_eq!(u64::from(snapshot.members[0].power), MAX_POWER);
    assert_eq!(snapshot.members[0].foreign_address, foreign(1));
}

#[test]
fn member_order_is_power_desc_then_address_asc() {
    let registry = EveryoneRegistered;
    let powers = vec![
        ValidatorPower::new(native(9), 10),
        ValidatorPower::new(native(3), 10),
        ValidatorPower::new(native(5), 30),
        ValidatorPower::new(native(1), 0),
    ];
    let snapshot = build_snapshot(1, &powers, &registry).expect("snapshot");
    let order: Vec<u8> = snapshot.members.iter().map(|m| m.foreign_address.as_bytes()[0]).collect();
    assert_eq!(order, vec![5, 3, 9, 1]);
    assert_eq!(snapshot.members[3].power, 0);
}

#[test]
fn all_zero_power_is_empty_set() {
    let registry = EveryoneRegistered;
    let powers = vec![ValidatorPower::new(native(1), 0)];
    assert!(matches!(build_snapshot(1, &powers, &registry), Err(BridgeError::EmptyValidatorSet)));
}

#[test]
fn history_keeps_every_snapshot() {
    let mut history = ValsetHistory::new();
    for nonce in [3u64, 8, 21] {
        history.insert(peggy_core::domain::ValidatorSetSnapshot::empty(nonce)).expect("insert");
    }
    assert_eq!(history.len(), 3);
    assert!(history.get(8).is_some());
    assert_eq!(history.latest().map(|s| s.nonce), Some(21));
    assert_eq!(history.signer_set_for(21).map(|s| s.nonce), Some(8));
}
