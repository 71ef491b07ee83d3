//! Value amounts in the smallest indivisible unit.
//!
//! Amounts are plain unsigned integers, never floating point. The width is 128 bits so that
//! source chains with fine-grained units do not overflow intermediate arithmetic.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A fee rate expressed in basis points (1/100th of a percent).
pub type BasisPoints = u32;

/// Number of basis points in the whole.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// An amount of value in the smallest indivisible unit of the source asset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(self.0)
    }
}

// Config formats whose integers are narrower than 128 bits (TOML's are i64) hand the value to
// the visitor in whatever width they have, so every integer shape is accepted here.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a non-negative integer amount")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
                Ok(Amount(value as u128))
            }

            fn visit_u128<E: de::Error>(self, value: u128) -> Result<Amount, E> {
                Ok(Amount(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
                u128::try_from(value)
                    .map(Amount)
                    .map_err(|_| E::custom("amount must be non-negative"))
            }

            fn visit_i128<E: de::Error>(self, value: i128) -> Result<Amount, E> {
                u128::try_from(value)
                    .map(Amount)
                    .map_err(|_| E::custom("amount must be non-negative"))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from a raw unit count.
    pub const fn from_units(units: u128) -> Self {
        Amount(units)
    }

    /// Returns the raw unit count.
    pub const fn to_units(self) -> u128 {
        self.0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Computes `floor(self * bps / 10_000)` without overflowing intermediate products.
    ///
    /// Splitting the amount into its quotient and remainder modulo the denominator keeps every
    /// intermediate value within `u128` for any `bps <= 10_000`, which the fee-rate ceiling
    /// guarantees.
    pub fn fee_with_bps(self, bps: BasisPoints) -> Amount {
        let bps = bps as u128;
        let quotient = self.0 / BPS_DENOMINATOR;
        let remainder = self.0 % BPS_DENOMINATOR;
        Amount(quotient * bps + remainder * bps / BPS_DENOMINATOR)
    }

    /// Splits this amount into `(net, fee)` at the given fee rate.
    ///
    /// `net + fee` always reconstructs the original amount exactly.
    pub fn split_fee(self, bps: BasisPoints) -> (Amount, Amount) {
        let fee = self.fee_with_bps(bps);
        // fee <= self for any bps <= 10_000, so the subtraction cannot underflow.
        (Amount(self.0 - fee.0), fee)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
