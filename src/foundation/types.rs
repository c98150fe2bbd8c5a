use crate::foundation::constants::NATIVE_ADDRESS_PREFIX;
use crate::foundation::util::encoding::{parse_hex_20bytes, ADDRESS_LEN};
use crate::foundation::util::hex_fmt::hx;
use crate::foundation::BridgeError;
use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub type Address20 = [u8; ADDRESS_LEN];

macro_rules! define_address_type {
    ($name:ident, $kind:literal) => {
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
        pub struct $name(Address20);

        impl $name {
            pub const fn new(value: Address20) -> Self {
                Self(value)
            }

            pub fn as_bytes(&self) -> &Address20 {
                &self.0
            }

            pub const fn kind() -> &'static str {
                $kind
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                if serializer.is_human_readable() {
                    serializer.collect_str(self)
                } else {
                    self.0.serialize(serializer)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                if deserializer.is_human_readable() {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                } else {
                    let bytes = Address20::deserialize(deserializer)?;
                    Ok(Self(bytes))
                }
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Address20> for $name {
            fn from(value: Address20) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Address20 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_address_type!(NativeAddress, "native");
define_address_type!(ForeignAddress, "foreign");

/// Bridge-chain account address, rendered as bech32 with the `cosmos` prefix.
impl fmt::Display for NativeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = bech32::encode(NATIVE_ADDRESS_PREFIX, self.0.to_base32(), Variant::Bech32).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromStr for NativeAddress {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| BridgeError::invalid_address(Self::kind(), s, reason);
        let (hrp, data, variant) = bech32::decode(s.trim()).map_err(|err| invalid(err.to_string()))?;
        if hrp != NATIVE_ADDRESS_PREFIX {
            return Err(invalid(format!("expected prefix {NATIVE_ADDRESS_PREFIX}, got {hrp}")));
        }
        if variant != Variant::Bech32 {
            return Err(invalid("expected bech32 variant".to_string()));
        }
        let bytes = Vec::<u8>::from_base32(&data).map_err(|err| invalid(err.to_string()))?;
        let array = Address20::try_from(bytes.as_slice())
            .map_err(|_| invalid(format!("expected {ADDRESS_LEN} bytes, got {}", bytes.len())))?;
        Ok(Self(array))
    }
}

/// Foreign-chain (EVM style) address, rendered as `0x`-prefixed lowercase hex.
impl fmt::Display for ForeignAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", hx(&self.0))
    }
}

impl FromStr for ForeignAddress {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = parse_hex_20bytes(s).map_err(|err| BridgeError::invalid_address(Self::kind(), s, err.to_string()))?;
        Ok(Self(bytes))
    }
}
