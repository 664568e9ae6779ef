use std::process::ExitCode;

use drop_common::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drop_announcer=info,drop_common=info".into()),
        )
        .json()
        .init();

    tracing::info!("==== Daily drop announcer starting ====");

    let outcome = announce().await;

    let exit = match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Daily drop run failed");
            ExitCode::FAILURE
        }
    };

    tracing::info!("==== Daily drop announcer finished ====");
    exit
}

/// One complete run: load config, fetch the code, announce it.
async fn announce() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let code = drop_announcer::run(&config).await?;
    tracing::info!(code = %code, "Successfully posted daily drop code");
    Ok(())
}
