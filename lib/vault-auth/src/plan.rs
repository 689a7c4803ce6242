use crate::auth::{AuthLogin, Scheme, TlsSettings};
use crate::config::ConfigReader;
use crate::transport::{LoginRequest, LoginTransport};
use crate::{AuthError, TokenInfo};
use std::collections::HashMap;
use std::fmt;

/// Find the one configured login scheme
pub fn select_scheme(reader: &dyn ConfigReader) -> Result<Scheme, AuthError> {
    let configured: Vec<Scheme> = Scheme::ALL
        .into_iter()
        .filter(|scheme| reader.get(scheme.field()).is_present())
        .collect();

    match configured.as_slice() {
        [] => Err(AuthError::NoLoginMethod),
        [scheme] => Ok(*scheme),
        many => {
            let mut fields: Vec<String> = many.iter().map(|s| s.field().to_string()).collect();
            fields.sort();
            Err(AuthError::MultipleLoginMethods(fields))
        }
    }
}

/// Resolve the configured scheme into a ready-to-submit login
pub fn resolve(reader: &dyn ConfigReader) -> Result<LoginPlan, AuthError> {
    let scheme = select_scheme(reader)?;
    tracing::debug!(scheme = %scheme, "Selected login method");

    let mut login = scheme.login();
    login.init(reader, scheme.field())?;
    let params = login.auth_params()?;

    let mut keys: Vec<&str> = params.keys().map(String::as_str).collect();
    keys.sort_unstable();
    tracing::debug!(scheme = %scheme, mount = login.mount(), params = ?keys, "Resolved login parameters");

    Ok(LoginPlan { login, params })
}

/// Resolve the configuration and submit it through `transport`
pub async fn login(
    reader: &dyn ConfigReader,
    transport: &dyn LoginTransport,
) -> Result<TokenInfo, AuthError> {
    let plan = resolve(reader)?;
    transport.login(&plan.request()).await
}

/// An initialized login together with its wire parameters
pub struct LoginPlan {
    login: Box<dyn AuthLogin>,
    params: HashMap<String, String>,
}

impl LoginPlan {
    pub fn scheme(&self) -> Scheme {
        self.login.scheme()
    }

    pub fn mount(&self) -> &str {
        self.login.mount()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.login.namespace()
    }

    pub fn login_path(&self) -> String {
        self.login.login_path()
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn tls(&self) -> Option<TlsSettings> {
        self.login.tls()
    }

    pub fn request(&self) -> LoginRequest {
        let namespace = self.namespace().map(str::to_string);
        let path = self.login_path();
        if path.is_empty() {
            LoginRequest::Helper {
                namespace,
                method: self.scheme().to_string(),
                mount: self.mount().to_string(),
                params: self.params.clone(),
            }
        } else {
            LoginRequest::Path {
                namespace,
                path,
                params: self.params.clone(),
            }
        }
    }
}

impl fmt::Debug for LoginPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.params.keys().collect();
        keys.sort();
        f.debug_struct("LoginPlan")
            .field("scheme", &self.scheme())
            .field("login_path", &self.login_path())
            .field("params", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    fn isolated(value: serde_json::Value) -> JsonConfig {
        JsonConfig::from_value(value)
            .unwrap()
            .with_environ(HashMap::new())
    }

    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<LoginRequest>>,
    }

    #[async_trait]
    impl LoginTransport for RecordingTransport {
        async fn login(&self, request: &LoginRequest) -> Result<TokenInfo, AuthError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(TokenInfo::new(
                "hvs.test".to_string(),
                Duration::from_secs(60),
                true,
            ))
        }
    }

    #[test]
    fn test_select_scheme() {
        let config = isolated(json!({"auth_login_jwt": [{"role": "app"}], "address": "x"}));
        assert_eq!(select_scheme(&config).unwrap(), Scheme::Jwt);
    }

    #[test]
    fn test_select_scheme_none() {
        let config = isolated(json!({"auth_login_jwt": []}));
        assert!(matches!(select_scheme(&config), Err(AuthError::NoLoginMethod)));
    }

    #[test]
    fn test_select_scheme_many() {
        let config = isolated(json!({
            "auth_login_oidc": [{"role": "dev"}],
            "auth_login_aws": [{"role": "app"}]
        }));
        match select_scheme(&config) {
            Err(AuthError::MultipleLoginMethods(fields)) => {
                assert_eq!(fields, vec!["auth_login_aws", "auth_login_oidc"])
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resolve_path_request() {
        let config = isolated(json!({
            "auth_login_userpass": [{"username": "bob", "password": "pw", "namespace": "ns1"}]
        }));
        let plan = resolve(&config).unwrap();

        assert_eq!(plan.scheme(), Scheme::Userpass);
        match plan.request() {
            LoginRequest::Path {
                namespace,
                path,
                params,
            } => {
                assert_eq!(namespace.as_deref(), Some("ns1"));
                assert_eq!(path, "auth/userpass/login/bob");
                assert_eq!(params["password"], "pw");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resolve_generic_block() {
        let config = isolated(json!({
            "auth_login": [{
                "path": "auth/approle/login",
                "method": "approle",
                "parameters": {"role_id": "r-1", "secret_id": "s-1"}
            }]
        }));
        assert_eq!(select_scheme(&config).unwrap(), Scheme::Generic);

        let plan = resolve(&config).unwrap();
        match plan.request() {
            LoginRequest::Path { path, params, .. } => {
                assert_eq!(path, "auth/approle/login");
                assert_eq!(params["role_id"], "r-1");
                assert_eq!(params["secret_id"], "s-1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_generic_block_counts_as_a_login_method() {
        let config = isolated(json!({
            "auth_login": [{"path": "auth/approle/login"}],
            "auth_login_jwt": [{"role": "ci", "jwt": "tok"}]
        }));
        match select_scheme(&config) {
            Err(AuthError::MultipleLoginMethods(fields)) => {
                assert_eq!(fields, vec!["auth_login", "auth_login_jwt"])
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resolve_oidc_needs_helper() {
        let config = isolated(json!({
            "auth_login_oidc": [{"role": "dev", "callback_listener_address": "tcp://localhost:8250"}]
        }));
        let plan = resolve(&config).unwrap();

        assert_eq!(plan.login_path(), "");
        match plan.request() {
            LoginRequest::Helper {
                method,
                mount,
                params,
                ..
            } => {
                assert_eq!(method, "oidc");
                assert_eq!(mount, "oidc");
                assert_eq!(params["port"], "8250");
                assert_eq!(params["skip_browser"], "true");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resolve_surfaces_address_errors() {
        let config = isolated(json!({
            "auth_login_oidc": [{"role": "dev", "callback_address": "http://localhost:port"}]
        }));
        assert!(matches!(
            resolve(&config),
            Err(AuthError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_plan_debug_hides_values() {
        let config = isolated(json!({
            "auth_login_jwt": [{"role": "ci", "jwt": "very-secret-token"}]
        }));
        let plan = resolve(&config).unwrap();
        let printed = format!("{:?}", plan);
        assert!(printed.contains("jwt"));
        assert!(!printed.contains("very-secret-token"));
    }

    #[tokio::test]
    async fn test_login_submits_plan() {
        let config = isolated(json!({"auth_login_jwt": [{"role": "ci", "jwt": "tok"}]}));
        let transport = RecordingTransport::default();

        let token = login(&config, &transport).await.unwrap();
        assert_eq!(token.token, "hvs.test");

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(matches!(&requests[0], LoginRequest::Path { path, .. } if path == "auth/jwt/login"));
    }
}
