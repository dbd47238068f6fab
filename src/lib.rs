pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod forms;
pub mod models;
pub mod session;

use api::auth::HttpAuthClient;
use api::chat::HttpQuestionClient;
use api::ApiClient;
use app::terminal::LineReader;
use app::App;
use cli::Args;
use config::theme::ThemeState;
use config::AppConfig;
use log::info;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("API Base URL: {}", config.api.base_url());
    info!(
        "Request Timeout: {}",
        config.api
            .timeout()
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );
    info!("Theme: {}", config.theme);
    info!("Start Route: {}", config.start_route.path());
    info!("Login Prefilled: {}", config.login.is_some());
    info!("-------------------------");

    let api = Arc::new(ApiClient::new(config.api.clone())?);
    let auth = Arc::new(HttpAuthClient::new(api.clone()));
    let questions = Arc::new(HttpQuestionClient::new(api));

    let mut app = App::new(auth, questions, ThemeState::new(config.theme)).with_login(
        config.login.clone()
    );
    let mut input = LineReader::stdin();
    app.run(config.start_route.clone(), &mut input).await?;

    info!("Bye. Theme on exit: {}", app.theme().name());
    Ok(())
}
