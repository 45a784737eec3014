use crate::{Error, Result};

/// Validate an EVM address (0x + 40 hex chars) and return it lowercased.
pub fn validate_address(address: &str) -> Result<String> {
    if !address.starts_with("0x") {
        return Err(Error::InvalidWalletAddress(
            "Address must start with 0x".to_string(),
        ));
    }

    if address.len() != 42 {
        return Err(Error::InvalidWalletAddress(
            "Address must be 42 characters (0x + 40 hex)".to_string(),
        ));
    }

    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidWalletAddress(
            "Address must contain only hexadecimal characters".to_string(),
        ));
    }

    Ok(address.to_lowercase())
}

/// Shorten an address for user-facing messages: `0x6e43…b423`.
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address_lowercases() {
        let result = validate_address("0x55d398326f99059fF775485246999027B3197955");
        assert_eq!(
            result.unwrap(),
            "0x55d398326f99059ff775485246999027b3197955"
        );
    }

    #[test]
    fn test_validate_address_invalid_prefix() {
        assert!(validate_address("55d398326f99059fF775485246999027B319795500").is_err());
    }

    #[test]
    fn test_validate_address_invalid_length() {
        assert!(validate_address("0x55d398").is_err());
    }

    #[test]
    fn test_validate_address_invalid_chars() {
        assert!(validate_address("0x55d398326f99059fF775485246999027B319795Z").is_err());
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x6e43a6b55b3abbf0a98cc41025f5be44a7afb423"),
            "0x6e43…b423"
        );
        assert_eq!(short_address("0x1234"), "0x1234");
    }
}
