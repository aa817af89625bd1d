//! Token amounts.
//!
//! All encoders take [`Amount`], an exact count of the smallest PAL unit.
//! Conversions from whole tokens, wide integers and decimal strings happen
//! here, at the caller-facing edge, and fail instead of truncating.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::PAL_DECIMALS;
use crate::error::SdkError;

const UNITS_PER_TOKEN: u64 = 10u64.pow(PAL_DECIMALS);

/// An amount in the smallest token unit (10^-9 PAL).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_base_units(units: u64) -> Self {
        Self(units)
    }

    /// Whole tokens, scaled by 10^9.
    pub fn from_tokens(tokens: u64) -> Result<Self, SdkError> {
        tokens
            .checked_mul(UNITS_PER_TOKEN)
            .map(Self)
            .ok_or_else(|| SdkError::InvalidAmount(format!("{tokens} tokens overflows u64 base units")))
    }

    pub const fn base_units(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl TryFrom<u128> for Amount {
    type Error = SdkError;

    fn try_from(units: u128) -> Result<Self, Self::Error> {
        u64::try_from(units)
            .map(Self)
            .map_err(|_| SdkError::InvalidAmount(format!("{units} exceeds u64 base units")))
    }
}

impl TryFrom<i128> for Amount {
    type Error = SdkError;

    fn try_from(units: i128) -> Result<Self, Self::Error> {
        if units < 0 {
            return Err(SdkError::InvalidAmount(format!("{units} is negative")));
        }
        Self::try_from(units as u128)
    }
}

impl FromStr for Amount {
    type Err = SdkError;

    /// Parse a decimal token amount such as `"42"` or `"0.000000001"`.
    ///
    /// At most 9 fractional digits are accepted; no rounding takes place.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| SdkError::InvalidAmount(format!("{s:?}: {why}"));

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if whole.is_empty() || (s.contains('.') && frac.is_empty()) {
            return Err(invalid("expected digits around the decimal point"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("only decimal digits are allowed"));
        }
        if frac.len() > PAL_DECIMALS as usize {
            return Err(invalid("more than 9 fractional digits"));
        }

        let whole: u64 = whole.parse().map_err(|_| invalid("overflows u64"))?;
        let mut frac_units: u64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| invalid("bad fraction"))?
        };
        frac_units *= 10u64.pow(PAL_DECIMALS - frac.len() as u32);

        whole
            .checked_mul(UNITS_PER_TOKEN)
            .and_then(|units| units.checked_add(frac_units))
            .map(Self)
            .ok_or_else(|| invalid("overflows u64 base units"))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNITS_PER_TOKEN;
        let frac = self.0 % UNITS_PER_TOKEN;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let frac = format!("{frac:09}");
        write!(f, "{whole}.{}", frac.trim_end_matches('0'))
    }
}
