use thiserror::Error;

/// Result type alias for request validation
pub type Result<T> = std::result::Result<T, RequestError>;

/// Reasons an envelope fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Name is not a well-formed DNS domain name
    #[error("invalid DNS name: {0:?}")]
    InvalidName(String),

    /// Address is not an IPv4 or IPv6 literal
    #[error("invalid IP address: {0:?}")]
    InvalidAddress(String),

    /// Prefix is not valid CIDR notation
    #[error("invalid CIDR block: {0:?}")]
    InvalidCidr(String),

    /// ASN record carries no prefix
    #[error("empty network prefix")]
    EmptyPrefix,

    /// Subdomain was never observed (`times == 0`)
    #[error("subdomain {0:?} has never been observed")]
    NeverObserved(String),

    /// Required field is empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
