use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_ROLE),
    FieldSpec::string(FIELD_JWT).or_env(ENV_AZURE_AUTH_JWT),
    FieldSpec::string(FIELD_SUBSCRIPTION_ID),
    FieldSpec::string(FIELD_RESOURCE_GROUP_NAME),
    FieldSpec::string(FIELD_VM_NAME),
    FieldSpec::string(FIELD_VMSS_NAME),
    FieldSpec::string(FIELD_TENANT_ID),
    FieldSpec::string(FIELD_CLIENT_ID),
    FieldSpec::string(FIELD_SCOPE).or_value(DEFAULT_AZURE_SCOPE),
];

const REQUIRED: &[&str] = &[
    FIELD_ROLE,
    FIELD_JWT,
    FIELD_SUBSCRIPTION_ID,
    FIELD_RESOURCE_GROUP_NAME,
];

const SENT: &[&str] = &[
    FIELD_ROLE,
    FIELD_JWT,
    FIELD_SUBSCRIPTION_ID,
    FIELD_RESOURCE_GROUP_NAME,
    FIELD_VM_NAME,
    FIELD_VMSS_NAME,
];

pub(crate) const WIRE_FIELDS: &[&str] = &[
    FIELD_MOUNT,
    FIELD_ROLE,
    FIELD_JWT,
    FIELD_SUBSCRIPTION_ID,
    FIELD_RESOURCE_GROUP_NAME,
    FIELD_VM_NAME,
    FIELD_VMSS_NAME,
];

/// Azure managed identity login.
///
/// `tenant_id`, `client_id` and `scope` describe how the identity token is
/// obtained and stay in the parameter store.
#[derive(Debug, Default, Clone)]
pub struct AzureLogin {
    params: ParamStore,
}

impl AzureLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for AzureLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Azure
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        let mut store = common::extract(reader, field, MOUNT_TYPE_AZURE, FIELDS)?;
        common::require(&store, REQUIRED)?;

        if store.is_set(FIELD_VM_NAME) && store.is_set(FIELD_VMSS_NAME) {
            return Err(AuthError::ConflictingFields {
                first: FIELD_VM_NAME.to_string(),
                second: FIELD_VMSS_NAME.to_string(),
            });
        }

        store.mark_initialized();
        self.params = store;
        Ok(())
    }

    fn login_path(&self) -> String {
        format!("auth/{}/login", self.mount())
    }

    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError> {
        self.params.ready()?;
        Ok(common::wire_params(&self.params, self.mount(), SENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use serde_json::json;

    fn config(extra: serde_json::Value) -> JsonConfig {
        let mut block = json!({
            "role": "web",
            "jwt": "eyJ0eXAi",
            "subscription_id": "sub-1",
            "resource_group_name": "rg-web",
            "tenant_id": "tenant-1"
        });
        if let (Some(block), Some(extra)) = (block.as_object_mut(), extra.as_object()) {
            block.extend(extra.clone());
        }
        JsonConfig::from_value(json!({ "auth_login_azure": [block] })).unwrap()
    }

    #[test]
    fn test_vm_login() {
        let mut login = AzureLogin::new();
        login
            .init(&config(json!({"vm_name": "web-01"})), FIELD_AUTH_LOGIN_AZURE)
            .unwrap();

        assert_eq!(login.params().get_str(FIELD_SCOPE), DEFAULT_AZURE_SCOPE);
        let params = login.auth_params().unwrap();
        assert_eq!(params.len(), 6);
        assert_eq!(params["vm_name"], "web-01");
        assert!(!params.contains_key(FIELD_TENANT_ID));
        assert!(!params.contains_key(FIELD_SCOPE));
    }

    #[test]
    fn test_vm_and_vmss_conflict() {
        let err = AzureLogin::new()
            .init(
                &config(json!({"vm_name": "web-01", "vmss_name": "web"})),
                FIELD_AUTH_LOGIN_AZURE,
            )
            .unwrap_err();
        assert!(matches!(err, AuthError::ConflictingFields { .. }));
    }
}
