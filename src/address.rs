use ethers_core::{types::Address, utils::to_checksum};
use std::str::FromStr;
use thiserror::Error;

const ADDRESS_PREFIX: &str = "0x";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must start with '0x'")]
    MissingPrefix,
    #[error("address must contain 40 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex character '{character}' at position {position}")]
    InvalidHex { character: char, position: usize },
}

/// Parses `0x`-prefixed 20-byte hex address.
///
/// Letter case is not checked against the EIP-55 checksum:
/// any mix of upper and lower case digits is accepted.
pub fn parse_address(value: &str) -> Result<Address, AddressError> {
    let digits = value
        .strip_prefix(ADDRESS_PREFIX)
        .ok_or(AddressError::MissingPrefix)?;
    if let Some((position, character)) = digits
        .char_indices()
        .find(|(_, character)| !character.is_ascii_hexdigit())
    {
        return Err(AddressError::InvalidHex {
            character,
            position: position + ADDRESS_PREFIX.len(),
        });
    }
    // Only hex digits are left, so the length is the only thing that may be wrong.
    Address::from_str(digits).map_err(|_| AddressError::InvalidLength(digits.len()))
}

pub fn checksummed(address: &Address) -> String {
    to_checksum(address, None)
}

/// Validates the address and returns its canonical (checksummed) representation.
pub fn canonicalize(value: &str) -> Result<String, AddressError> {
    parse_address(value).map(|address| checksummed(&address))
}
