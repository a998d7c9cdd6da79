/// Error types for the netblock library
use std::fmt;

/// Result type alias for netblock operations
pub type Result<T> = std::result::Result<T, NetblockError>;

/// Main error type for netblock operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetblockError {
    /// Query text is not a valid IPv4 or IPv6 address
    InvalidAddress(String),

    /// Catalogue entry is not a valid CIDR network
    InvalidSubnet(String),

    /// Catalogue source is structurally malformed (not JSON, wrong shape)
    Catalogue(String),

    /// I/O errors
    Io(String),
}

impl fmt::Display for NetblockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetblockError::InvalidAddress(msg) => write!(f, "Invalid IP address: {}", msg),
            NetblockError::InvalidSubnet(msg) => write!(f, "Invalid subnet: {}", msg),
            NetblockError::Catalogue(msg) => write!(f, "Malformed catalogue: {}", msg),
            NetblockError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for NetblockError {}

impl From<std::io::Error> for NetblockError {
    fn from(err: std::io::Error) -> Self {
        NetblockError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NetblockError {
    fn from(err: serde_json::Error) -> Self {
        // Reader failures surface through serde_json too; keep them as I/O
        if err.is_io() {
            NetblockError::Io(err.to_string())
        } else {
            NetblockError::Catalogue(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = NetblockError::InvalidAddress("invalid_ip".to_string());
        assert_eq!(err.to_string(), "Invalid IP address: invalid_ip");

        let err = NetblockError::InvalidSubnet("10.0.0.0/33".to_string());
        assert_eq!(err.to_string(), "Invalid subnet: 10.0.0.0/33");
    }

    #[test]
    fn test_json_syntax_error_is_catalogue_error() {
        let err: NetblockError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, NetblockError::Catalogue(_)));
    }
}
