// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use color::{Color, GREY, LAVENDER};

pub mod color;

#[cfg(test)]
pub(crate) mod testing;

/// Decodes a hex string with or without a leading `0x`.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    hex::decode(text)
}

/// Bumps a gas amount by a percentage, rounding up.
pub fn bump_gas(gas: u64, bump_percent: u64) -> u64 {
    let bumped = (u128::from(gas) * u128::from(100 + bump_percent)).div_ceil(100);
    u64::try_from(bumped).unwrap_or(u64::MAX)
}

/// Pretty-prints an amount of gas.
pub fn format_gas(gas: u64) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// Pretty-prints a gas amount alongside its unbuffered estimate.
pub fn format_gas_bump(gas: u64, raw: u64, bump_percent: u64) -> String {
    format!(
        "{} {GREY}(originally {}{GREY} with {LAVENDER}{bump_percent}%{GREY} bump)",
        format_gas(gas),
        format_gas(raw),
    )
}
