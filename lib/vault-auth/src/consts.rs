//! Field names, mount types and environment variables shared by the login schemes.

// common fields
pub const FIELD_NAMESPACE: &str = "namespace";
pub const FIELD_MOUNT: &str = "mount";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_NAME: &str = "name";
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_PASSWORD_FILE: &str = "password_file";
pub const FIELD_JWT: &str = "jwt";

// scheme blocks
pub const FIELD_AUTH_LOGIN_GENERIC: &str = "auth_login";
pub const FIELD_AUTH_LOGIN_USERPASS: &str = "auth_login_userpass";
pub const FIELD_AUTH_LOGIN_AWS: &str = "auth_login_aws";
pub const FIELD_AUTH_LOGIN_CERT: &str = "auth_login_cert";
pub const FIELD_AUTH_LOGIN_GCP: &str = "auth_login_gcp";
pub const FIELD_AUTH_LOGIN_KERBEROS: &str = "auth_login_kerberos";
pub const FIELD_AUTH_LOGIN_RADIUS: &str = "auth_login_radius";
pub const FIELD_AUTH_LOGIN_OCI: &str = "auth_login_oci";
pub const FIELD_AUTH_LOGIN_OIDC: &str = "auth_login_oidc";
pub const FIELD_AUTH_LOGIN_JWT: &str = "auth_login_jwt";
pub const FIELD_AUTH_LOGIN_AZURE: &str = "auth_login_azure";

// generic
pub const FIELD_PATH: &str = "path";
pub const FIELD_METHOD: &str = "method";
pub const FIELD_PARAMETERS: &str = "parameters";

// aws
pub const FIELD_IAM_HTTP_REQUEST_METHOD: &str = "iam_http_request_method";
pub const FIELD_IAM_HTTP_REQUEST_URL: &str = "iam_http_request_url";
pub const FIELD_IAM_HTTP_REQUEST_BODY: &str = "iam_http_request_body";
pub const FIELD_IAM_HTTP_REQUEST_HEADERS: &str = "iam_http_request_headers";
pub const FIELD_HEADER_VALUE: &str = "header_value";
pub const FIELD_AWS_REGION: &str = "aws_region";
pub const FIELD_AWS_ROLE_ARN: &str = "aws_role_arn";
pub const FIELD_AWS_ROLE_SESSION_NAME: &str = "aws_role_session_name";
pub const FIELD_AWS_STS_ENDPOINT: &str = "aws_sts_endpoint";

// cert
pub const FIELD_CERT_FILE: &str = "cert_file";
pub const FIELD_KEY_FILE: &str = "key_file";
pub const FIELD_CA_CERT_FILE: &str = "ca_cert_file";
pub const FIELD_CA_CERT_DIR: &str = "ca_cert_dir";
pub const FIELD_TLS_SERVER_NAME: &str = "tls_server_name";
pub const FIELD_SKIP_TLS_VERIFY: &str = "skip_tls_verify";

// gcp
pub const FIELD_CREDENTIALS: &str = "credentials";
pub const FIELD_SERVICE_ACCOUNT: &str = "service_account";

// kerberos
pub const FIELD_TOKEN: &str = "token";
pub const FIELD_SERVICE: &str = "service";
pub const FIELD_REALM: &str = "realm";
pub const FIELD_KEYTAB_PATH: &str = "keytab_path";
pub const FIELD_KRB5CONF_PATH: &str = "krb5conf_path";
pub const FIELD_DISABLE_FAST_NEGOTIATION: &str = "disable_fast_negotiation";
pub const FIELD_REMOVE_INSTANCE_NAME: &str = "remove_instance_name";
pub const FIELD_AUTHORIZATION: &str = "authorization";

// oci
pub const FIELD_AUTH_TYPE: &str = "auth_type";

// oidc
pub const FIELD_CALLBACK_ADDRESS: &str = "callback_address";
pub const FIELD_CALLBACK_LISTENER_ADDRESS: &str = "callback_listener_address";
pub const FIELD_SKIP_BROWSER: &str = "skip_browser";
pub const FIELD_LISTEN_ADDRESS: &str = "listen_address";
pub const FIELD_PORT: &str = "port";
pub const FIELD_CALLBACK_HOST: &str = "callback_host";
pub const FIELD_CALLBACK_PORT: &str = "callback_port";
pub const FIELD_CALLBACK_METHOD: &str = "callback_method";

// azure
pub const FIELD_SUBSCRIPTION_ID: &str = "subscription_id";
pub const FIELD_RESOURCE_GROUP_NAME: &str = "resource_group_name";
pub const FIELD_VM_NAME: &str = "vm_name";
pub const FIELD_VMSS_NAME: &str = "vmss_name";
pub const FIELD_TENANT_ID: &str = "tenant_id";
pub const FIELD_CLIENT_ID: &str = "client_id";
pub const FIELD_SCOPE: &str = "scope";

pub const MOUNT_TYPE_GENERIC: &str = "generic";
pub const MOUNT_TYPE_USERPASS: &str = "userpass";
pub const MOUNT_TYPE_AWS: &str = "aws";
pub const MOUNT_TYPE_CERT: &str = "cert";
pub const MOUNT_TYPE_GCP: &str = "gcp";
pub const MOUNT_TYPE_KERBEROS: &str = "kerberos";
pub const MOUNT_TYPE_RADIUS: &str = "radius";
pub const MOUNT_TYPE_OCI: &str = "oci";
pub const MOUNT_TYPE_OIDC: &str = "oidc";
pub const MOUNT_TYPE_JWT: &str = "jwt";
pub const MOUNT_TYPE_AZURE: &str = "azure";

pub const ENV_VAULT_ADDR: &str = "VAULT_ADDR";
pub const ENV_VAULT_NAMESPACE: &str = "VAULT_NAMESPACE";
pub const ENV_USERNAME: &str = "VAULT_AUTH_USERNAME";
pub const ENV_PASSWORD: &str = "VAULT_AUTH_PASSWORD";
pub const ENV_PASSWORD_FILE: &str = "VAULT_AUTH_PASSWORD_FILE";
pub const ENV_GCP_AUTH_JWT: &str = "VAULT_AUTH_GCP_JWT";
pub const ENV_GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ENV_AUTH_JWT: &str = "VAULT_AUTH_JWT";
pub const ENV_AZURE_AUTH_JWT: &str = "VAULT_AUTH_AZURE_JWT";
pub const ENV_KRB_SPNEGO_TOKEN: &str = "KRB_SPNEGO_TOKEN";
pub const ENV_KRB5_CONF: &str = "KRB5_CONFIG";
pub const ENV_KRB_KEYTAB: &str = "KRB_KEYTAB";
pub const ENV_RADIUS_USERNAME: &str = "RADIUS_USERNAME";
pub const ENV_RADIUS_PASSWORD: &str = "RADIUS_PASSWORD";

pub const DEFAULT_AZURE_SCOPE: &str = "https://management.azure.com/";
pub const OCI_AUTH_TYPES: &[&str] = &["apikey", "instance"];
