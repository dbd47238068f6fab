use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Backend Args ---
    /// Base URL of the Check Docs API (e.g., http://localhost:8080/api/v1)
    #[arg(long, env = "CHECKDOCS_API_URL", default_value = "http://localhost:8080/api/v1")]
    pub api_url: String,

    /// Per-request timeout in seconds. 0 waits for the server indefinitely.
    #[arg(long, env = "CHECKDOCS_REQUEST_TIMEOUT_SECS", default_value = "0")]
    pub request_timeout_secs: u64,

    // --- Session Args ---
    /// Screen to open first (/login, /register, /chat)
    #[arg(long, env = "CHECKDOCS_START_ROUTE", default_value = "/chat")]
    pub start_route: String,

    /// Email used to prefill the login screen
    #[arg(long, env = "CHECKDOCS_EMAIL")]
    pub email: Option<String>,

    /// Password used to prefill the login screen
    #[arg(long, env = "CHECKDOCS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    // --- General App Args ---
    /// Color theme (light, dark)
    #[arg(long, env = "CHECKDOCS_THEME", default_value = "light")]
    pub theme: String,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}
