use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("resource data missing field {field:?}")]
    MissingField { field: String },

    #[error("expected a single {field:?} block, found {count}")]
    MultipleBlocks { field: String, count: usize },

    #[error("field {field:?} must be a {expected}, found {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("required fields are unset: [{}]", .0.join(" "))]
    RequiredFieldsUnset(Vec<String>),

    #[error("invalid value {value:?} for {field:?}, expected one of {allowed:?}")]
    InvalidValue {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("fields {first:?} and {second:?} are mutually exclusive")]
    ConflictingFields { first: String, second: String },

    #[error("login parameters requested before init")]
    NotInitialized,

    #[error("{field:?} is not set")]
    FieldNotSet { field: String },

    #[error("failed to parse {field:?} value {value:?}: {source}")]
    InvalidAddress {
        field: String,
        value: String,
        #[source]
        source: AddressError,
    },

    #[error("no login method configured")]
    NoLoginMethod,

    #[error("multiple login methods configured: {}", .0.join(", "))]
    MultipleLoginMethods(Vec<String>),

    #[error("{method} login has no direct login path, an external helper must drive it")]
    HelperRequired { method: String },

    #[error("Vault not detected: VAULT_ADDR not set")]
    VaultNotDetected,

    #[error("Vault request error: {0}")]
    Request(String),

    #[error("Vault client error ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("Invalid login response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a redirect address could not be decomposed into scheme, host and port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("missing scheme, expected <scheme>://<host>:<port>")]
    MissingScheme,

    #[error("missing host")]
    MissingHost,

    #[error("invalid port")]
    InvalidPort,

    #[error("missing port")]
    MissingPort,

    #[error("malformed address: {0}")]
    Malformed(String),
}
