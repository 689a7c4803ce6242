#![warn(rust_2018_idioms)]

use std::env;

use serde_json::json;
use tracing_appender::non_blocking::WorkerGuard;
use vault_auth::{HttpLoginTransport, JsonConfig, LoginPlan, LoginTransport};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const USAGE: &str = "usage: vault-login <config.json> [--login]";
const MASK: &str = "******";
const SECRET_PARAMS: &[&str] = &[
    "password",
    "jwt",
    "authorization",
    "iam_http_request_body",
    "iam_http_request_headers",
    "secret_id",
];

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logger()?;

    let (config_path, submit) = parse_args(env::args().skip(1))?;
    let config = JsonConfig::from_file(&config_path)?;
    let plan = vault_auth::resolve(&config)?;

    println!("{}", serde_json::to_string_pretty(&describe(&plan))?);

    if submit {
        let mut builder = HttpLoginTransport::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(tls) = plan.tls() {
            builder = builder.tls(tls);
        }
        let transport = builder.build()?;

        let token = transport.login(&plan.request()).await?;
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "lease_duration": token.lease_duration.as_secs(),
                "renewable": token.renewable,
            }))?
        );
    }

    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<(String, bool)> {
    let mut config_path = None;
    let mut submit = false;

    for arg in args {
        match arg.as_str() {
            "--login" => submit = true,
            "-h" | "--help" => return Err(USAGE.into()),
            _ if config_path.is_none() => config_path = Some(arg),
            _ => return Err(format!("unexpected argument {:?}\n{}", arg, USAGE).into()),
        }
    }

    let config_path = config_path.ok_or(USAGE)?;
    Ok((config_path, submit))
}

fn describe(plan: &LoginPlan) -> serde_json::Value {
    let params: serde_json::Map<String, serde_json::Value> = plan
        .params()
        .iter()
        .map(|(name, value)| {
            let shown = if SECRET_PARAMS.contains(&name.as_str()) {
                MASK
            } else {
                value.as_str()
            };
            (name.clone(), json!(shown))
        })
        .collect();

    json!({
        "method": plan.scheme().to_string(),
        "mount": plan.mount(),
        "namespace": plan.namespace(),
        "login_path": plan.login_path(),
        "params": params,
    })
}

fn init_logger() -> Result<Option<WorkerGuard>> {
    use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
    use tracing_log::LogTracer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::{EnvFilter, Registry};

    if !env::var("JSON_LOG").map_or(false, |s| s.parse().unwrap_or_default()) {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    // Redirect the logs from log library to tracing's subscribers.
    LogTracer::init()?;

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();

    // Non-blocking stderr writer, stdout carries the plan
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking_writer);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(Some(guard))
}
