use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_ROLE),
    FieldSpec::string(FIELD_IAM_HTTP_REQUEST_METHOD),
    FieldSpec::string(FIELD_IAM_HTTP_REQUEST_URL),
    FieldSpec::string(FIELD_IAM_HTTP_REQUEST_BODY),
    FieldSpec::string(FIELD_IAM_HTTP_REQUEST_HEADERS),
    FieldSpec::string(FIELD_HEADER_VALUE),
    FieldSpec::string(FIELD_AWS_REGION),
    FieldSpec::string(FIELD_AWS_ROLE_ARN),
    FieldSpec::string(FIELD_AWS_ROLE_SESSION_NAME),
    FieldSpec::string(FIELD_AWS_STS_ENDPOINT),
];

const REQUIRED: &[&str] = &[
    FIELD_ROLE,
    FIELD_IAM_HTTP_REQUEST_METHOD,
    FIELD_IAM_HTTP_REQUEST_URL,
    FIELD_IAM_HTTP_REQUEST_BODY,
    FIELD_IAM_HTTP_REQUEST_HEADERS,
];

const SENT: &[&str] = &[
    FIELD_ROLE,
    FIELD_IAM_HTTP_REQUEST_METHOD,
    FIELD_IAM_HTTP_REQUEST_URL,
    FIELD_IAM_HTTP_REQUEST_BODY,
    FIELD_IAM_HTTP_REQUEST_HEADERS,
    FIELD_HEADER_VALUE,
];

pub(crate) const WIRE_FIELDS: &[&str] = &[
    FIELD_MOUNT,
    FIELD_ROLE,
    FIELD_IAM_HTTP_REQUEST_METHOD,
    FIELD_IAM_HTTP_REQUEST_URL,
    FIELD_IAM_HTTP_REQUEST_BODY,
    FIELD_IAM_HTTP_REQUEST_HEADERS,
    FIELD_HEADER_VALUE,
];

/// AWS IAM login.
///
/// The signed `sts:GetCallerIdentity` request is produced outside this crate
/// and passed in through the `iam_http_request_*` fields. The `aws_*` fields
/// are kept for the signer and never sent.
#[derive(Debug, Default, Clone)]
pub struct AwsLogin {
    params: ParamStore,
}

impl AwsLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for AwsLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Aws
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        self.params = common::init(reader, field, MOUNT_TYPE_AWS, FIELDS, REQUIRED)?;
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
