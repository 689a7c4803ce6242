use crate::auth::TlsSettings;
use crate::consts::{ENV_VAULT_ADDR, ENV_VAULT_NAMESPACE, FIELD_AUTHORIZATION, FIELD_MOUNT};
use crate::{AuthError, TokenInfo};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Input of a login transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRequest {
    /// Submit `params` to a single login endpoint
    Path {
        namespace: Option<String>,
        path: String,
        params: HashMap<String, String>,
    },
    /// No single endpoint, an external helper drives the login
    Helper {
        namespace: Option<String>,
        method: String,
        mount: String,
        params: HashMap<String, String>,
    },
}

/// Trait for login transports
#[async_trait]
pub trait LoginTransport: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<TokenInfo, AuthError>;
}

pub struct HttpLoginTransportBuilder {
    base_url: Option<String>,
    namespace: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    tls: Option<TlsSettings>,
}

impl Default for HttpLoginTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpLoginTransportBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            namespace: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            tls: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Namespace used when the login itself names none
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn tls(mut self, tls: TlsSettings) -> Self {
        self.tls = Some(tls);
        self
    }

    fn resolve_config(&self) -> Result<ResolvedConfig, AuthError> {
        let base_url = self
            .base_url
            .clone()
            .or_else(|| std::env::var(ENV_VAULT_ADDR).ok())
            .filter(|url| !url.is_empty())
            .ok_or(AuthError::VaultNotDetected)?;

        let namespace = self
            .namespace
            .clone()
            .or_else(|| std::env::var(ENV_VAULT_NAMESPACE).ok())
            .filter(|ns| !ns.is_empty());

        Ok(ResolvedConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            namespace,
        })
    }

    pub fn build(self) -> Result<HttpLoginTransport, AuthError> {
        let config = self.resolve_config()?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(tls) = &self.tls {
            builder = apply_tls(builder, tls)?;
        }
        let client = builder
            .build()
            .map_err(|e| AuthError::Request(e.to_string()))?;

        Ok(HttpLoginTransport {
            client,
            base_url: config.base_url,
            namespace: config.namespace,
        })
    }
}

struct ResolvedConfig {
    base_url: String,
    namespace: Option<String>,
}

fn apply_tls(
    mut builder: reqwest::ClientBuilder,
    tls: &TlsSettings,
) -> Result<reqwest::ClientBuilder, AuthError> {
    if !tls.cert_file.is_empty() && !tls.key_file.is_empty() {
        let mut pem = std::fs::read(&tls.cert_file)?;
        pem.push(b'\n');
        pem.extend(std::fs::read(&tls.key_file)?);
        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|e| AuthError::Request(format!("Invalid client certificate: {}", e)))?;
        builder = builder.identity(identity);
    }

    if !tls.ca_cert_file.is_empty() {
        builder = builder.add_root_certificate(read_certificate(Path::new(&tls.ca_cert_file))?);
    }

    if !tls.ca_cert_dir.is_empty() {
        for entry in std::fs::read_dir(&tls.ca_cert_dir)? {
            let path = entry?.path();
            let is_pem = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| matches!(ext, "pem" | "crt"));
            if is_pem {
                builder = builder.add_root_certificate(read_certificate(&path)?);
            }
        }
    }

    if tls.skip_tls_verify {
        tracing::warn!("TLS certificate verification disabled for login");
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder)
}

fn read_certificate(path: &Path) -> Result<reqwest::Certificate, AuthError> {
    let pem = std::fs::read(path)?;
    reqwest::Certificate::from_pem(&pem).map_err(|e| {
        AuthError::Request(format!("Invalid CA certificate {}: {}", path.display(), e))
    })
}

/// Submits login requests to the Vault HTTP API
pub struct HttpLoginTransport {
    client: reqwest::Client,
    base_url: String,
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: Option<AuthData>,
}

#[derive(Deserialize)]
struct AuthData {
    client_token: String,
    lease_duration: u64,
    renewable: bool,
}

impl HttpLoginTransport {
    pub fn builder() -> HttpLoginTransportBuilder {
        HttpLoginTransportBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LoginTransport for HttpLoginTransport {
    async fn login(&self, request: &LoginRequest) -> Result<TokenInfo, AuthError> {
        let (namespace, path, params) = match request {
            LoginRequest::Path {
                namespace,
                path,
                params,
            } => (namespace, path, params),
            LoginRequest::Helper { method, .. } => {
                return Err(AuthError::HelperRequired {
                    method: method.clone(),
                });
            }
        };

        // the mount is already part of the path
        let mut body = params.clone();
        body.remove(FIELD_MOUNT);
        let authorization = body.remove(FIELD_AUTHORIZATION);

        let url = format!("{}/v1/{}", self.base_url, path.trim_start_matches('/'));
        let mut http_request = self.client.post(&url).json(&body);

        if let Some(namespace) = namespace.as_ref().or(self.namespace.as_ref()) {
            http_request = http_request.header(NAMESPACE_HEADER, namespace);
        }
        if let Some(authorization) = authorization {
            http_request = http_request.header(reqwest::header::AUTHORIZATION, authorization);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(path = %path, status, "Vault login rejected");
            return Err(AuthError::Client {
                status,
                message: body,
            });
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        let auth = login
            .auth
            .ok_or_else(|| AuthError::InvalidResponse("response has no auth data".to_string()))?;

        tracing::info!(path = %path, lease_duration = auth.lease_duration, "Vault login succeeded");

        Ok(TokenInfo::new(
            auth.client_token,
            Duration::from_secs(auth.lease_duration),
            auth.renewable,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = HttpLoginTransportBuilder::new();
        assert!(builder.base_url.is_none());
        assert!(builder.namespace.is_none());
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_chain() {
        let builder = HttpLoginTransportBuilder::new()
            .base_url("http://vault:8200/")
            .namespace("team-a")
            .timeout(Duration::from_secs(5));

        assert_eq!(builder.base_url, Some("http://vault:8200/".to_string()));
        assert_eq!(builder.namespace, Some("team-a".to_string()));
        assert_eq!(builder.timeout, Duration::from_secs(5));

        let config = builder.resolve_config().unwrap();
        assert_eq!(config.base_url, "http://vault:8200");
        assert_eq!(config.namespace, Some("team-a".to_string()));
    }

    #[test]
    fn test_missing_tls_files_fail_build() {
        let result = HttpLoginTransport::builder()
            .base_url("https://vault:8200")
            .tls(TlsSettings {
                cert_file: "/nonexistent/client.pem".to_string(),
                key_file: "/nonexistent/client-key.pem".to_string(),
                ..TlsSettings::default()
            })
            .build();
        assert!(matches!(result, Err(AuthError::Io(_))));
    }
}
