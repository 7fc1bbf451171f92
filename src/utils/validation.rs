use anyhow::{anyhow, Result};

/// Longest note a user may store, counted in characters.
pub const MAX_NOTE_CHARS: usize = 500;

/// Longest host name accepted for a ping check.
pub const MAX_ADDRESS_LEN: usize = 253;

pub fn validate_note_text(text: &str) -> Result<()> {
    let chars = text.chars().count();

    if chars > MAX_NOTE_CHARS {
        return Err(anyhow!(
            "Note has {} characters, the limit is {}",
            chars,
            MAX_NOTE_CHARS
        ));
    }

    Ok(())
}

/// Checks an address before it is handed to the ping utility as an argument.
pub fn validate_ping_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(anyhow!("Address cannot be empty"));
    }

    if address.len() > MAX_ADDRESS_LEN {
        return Err(anyhow!(
            "Address cannot be longer than {} characters",
            MAX_ADDRESS_LEN
        ));
    }

    // A leading dash would be parsed by ping as an option
    if address.starts_with('-') {
        return Err(anyhow!("Address cannot start with '-'"));
    }

    if address.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(anyhow!("Address cannot contain spaces or control characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_within_limit() {
        assert!(validate_note_text("buy milk").is_ok());
        assert!(validate_note_text("").is_ok());
        assert!(validate_note_text(&"a".repeat(MAX_NOTE_CHARS)).is_ok());
    }

    #[test]
    fn test_note_over_limit() {
        let result = validate_note_text(&"a".repeat(MAX_NOTE_CHARS + 1));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("501"));
    }

    #[test]
    fn test_note_limit_counts_characters_not_bytes() {
        // 500 two-byte characters
        let accented = "é".repeat(MAX_NOTE_CHARS);
        assert!(accented.len() > MAX_NOTE_CHARS);
        assert!(validate_note_text(&accented).is_ok());
    }

    #[test]
    fn test_valid_addresses() {
        assert!(validate_ping_address("8.8.8.8").is_ok());
        assert!(validate_ping_address("example.com").is_ok());
        assert!(validate_ping_address("::1").is_ok());
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(validate_ping_address("").is_err());
        assert!(validate_ping_address("-f").is_err());
        assert!(validate_ping_address("--help").is_err());
        assert!(validate_ping_address("example.com; rm -rf /").is_err());
        assert!(validate_ping_address("host\nname").is_err());
        assert!(validate_ping_address(&"a".repeat(MAX_ADDRESS_LEN + 1)).is_err());
    }
}
