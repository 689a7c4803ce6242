//! vault-auth - login configuration for HashiCorp Vault
//!
//! Resolves a declarative `auth_login_*` block into login parameters:
//! 1. select the one configured scheme (userpass, aws, cert, gcp, kerberos,
//!    radius, oci, oidc, jwt, azure, or the generic `auth_login` block)
//! 2. `init` the scheme from the block, validating required fields
//! 3. derive the login path and the wire parameters
//!
//! Submitting the parameters is left to a [`LoginTransport`];
//! [`HttpLoginTransport`] talks to the Vault HTTP API.

pub mod auth;
mod config;
pub mod consts;
mod error;
mod plan;
mod token_info;
mod transport;

pub use auth::{AuthLogin, ParamStore, ParamValue, RedirectAddress, Scheme, TlsSettings};
pub use config::{ConfigBlock, ConfigReader, ConfigValue, JsonConfig};
pub use error::{AddressError, AuthError};
pub use plan::{login, resolve, select_scheme, LoginPlan};
pub use token_info::TokenInfo;
pub use transport::{HttpLoginTransport, HttpLoginTransportBuilder, LoginRequest, LoginTransport};
