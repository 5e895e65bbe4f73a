//! Binary entrypoint for the Dineboard API server.
use dineboard_analytics::AnalyticsProfile;
use dineboard_api::run;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Default listen address can be overridden with DINEBOARD_ADDR
    let addr = std::env::var("DINEBOARD_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());

    // DINEBOARD_PROFILE is a YAML path or a preset name
    let profile = match std::env::var("DINEBOARD_PROFILE") {
        Ok(value) if value.ends_with(".yaml") || value.ends_with(".yml") => {
            AnalyticsProfile::from_yaml_file(&value)?
        }
        Ok(value) => AnalyticsProfile::for_name(&value),
        Err(_) => AnalyticsProfile::standard(),
    };

    run(&addr, profile).await
}
