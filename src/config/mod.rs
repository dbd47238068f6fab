pub mod theme;

use crate::api::{ ApiConfig, ApiError };
use crate::app::Route;
use crate::cli::Args;
use crate::forms::LoginForm;
use self::theme::{ ParseThemeError, ThemeName };
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Theme(#[from] ParseThemeError),
}

/// Validated start-up configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub theme: ThemeName,
    pub start_route: Route,
    pub login: Option<LoginForm>,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let timeout = match args.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let api = ApiConfig::new(&args.api_url, timeout)?;
        let theme = args.theme.parse::<ThemeName>()?;

        let login = match (&args.email, &args.password) {
            (None, None) => None,
            (email, password) =>
                Some(LoginForm {
                    email: email.clone().unwrap_or_default(),
                    password: password.clone().unwrap_or_default(),
                }),
        };

        Ok(Self {
            api,
            theme,
            start_route: Route::parse(&args.start_route),
            login,
        })
    }
}
