//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use bmi_advisor::adapters::ai::{GeminiAdapter, MockAdviceAdapter};
use bmi_advisor::adapters::ui::tui::TuiInputPort;
use bmi_advisor::ports::{AdviceProvider, InputPort};
use bmi_advisor::shared::config::{AiProvider, AppConfig};
use bmi_advisor::usecases::CalculatorService;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Default to warn so log lines do not interleave with the form; stderr keeps stdout for the UI.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed; using defaults");
        AppConfig::default()
    });

    // --- Advice provider ---
    let advice: Arc<dyn AdviceProvider> = match cfg.ai_provider_or_default() {
        AiProvider::Gemini => {
            if cfg.api_key().is_none() {
                warn!("no Gemini API key set; advice requests will fail and only BMI is shown");
            }
            info!(
                model = %cfg.model_or_default(),
                url = %cfg.api_url_or_default(),
                language = %cfg.advice_language_or_default(),
                "advice enabled with Gemini adapter"
            );
            Arc::new(GeminiAdapter::new(
                cfg.api_url_or_default(),
                cfg.api_key.clone(),
                cfg.model_or_default(),
                cfg.advice_language_or_default(),
            ))
        }
        AiProvider::Mock => {
            info!(
                delay_ms = cfg.mock_delay_ms_or_default(),
                "using mock advice adapter"
            );
            Arc::new(MockAdviceAdapter::with_delay(cfg.mock_delay_ms_or_default()))
        }
    };

    bmi_advisor::adapters::ui::init_ui();

    // --- Services ---
    let calculator = CalculatorService::new(advice);
    let mut input_port: Box<dyn InputPort> = Box::new(TuiInputPort::new(calculator));

    // --- Run (form -> result -> advice -> again?) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
