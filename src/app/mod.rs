pub mod auth_view;
pub mod chat_view;
pub mod terminal;

use crate::api::auth::AuthClient;
use crate::api::chat::QuestionClient;
use crate::config::theme::ThemeState;
use crate::forms::LoginForm;
use crate::session::ChatSession;
use colored::Colorize;
use log::info;
use std::error::Error;
use std::sync::Arc;
use terminal::LineReader;
use tokio::io::AsyncBufRead;

pub type ViewResult = Result<Navigation, Box<dyn Error + Send + Sync>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Chat,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match normalized {
            "/" | "/login" => Route::Login,
            "/register" => Route::Register,
            "/chat" => Route::Chat,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Chat => "/chat",
            Route::NotFound(path) => path,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Route::Chat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Goto(Route),
    Exit,
}

pub struct App {
    auth: Arc<dyn AuthClient>,
    questions: Arc<dyn QuestionClient>,
    theme: ThemeState,
    prefill: Option<LoginForm>,
}

impl App {
    pub fn new(
        auth: Arc<dyn AuthClient>,
        questions: Arc<dyn QuestionClient>,
        theme: ThemeState
    ) -> Self {
        Self { auth, questions, theme, prefill: None }
    }

    pub fn with_login(mut self, form: Option<LoginForm>) -> Self {
        self.prefill = form;
        self
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Private routes are only reachable with a live session; everything
    /// else passes through untouched.
    pub async fn guard(&self, route: Route) -> Route {
        if route.is_private() && !self.auth.is_authenticated().await {
            info!("Not authenticated, redirecting {} to /login", route.path());
            return Route::Login;
        }
        route
    }

    pub async fn run<R>(&mut self, start: Route, input: &mut LineReader<R>) -> Result<(), Box<dyn Error + Send + Sync>>
        where R: AsyncBufRead + Unpin
    {
        let mut route = start;
        loop {
            route = self.guard(route).await;
            info!("Navigating to {}", route.path());

            let next = match &route {
                Route::Login => {
                    let prefill = self.prefill.take();
                    auth_view::login(self.auth.as_ref(), prefill, self.theme.palette(), input).await?
                }
                Route::Register => {
                    auth_view::register(self.auth.as_ref(), self.theme.palette(), input).await?
                }
                Route::Chat => {
                    let session = Arc::new(ChatSession::new(self.questions.clone()));
                    chat_view::run(session, &mut self.theme, self.auth.as_ref(), input).await?
                }
                Route::NotFound(path) => {
                    let palette = self.theme.palette();
                    println!("{}", palette.paint(&format!("404 {}", path), palette.error).bold());
                    Navigation::Exit
                }
            };

            match next {
                Navigation::Goto(target) => {
                    route = target;
                }
                Navigation::Exit => {
                    return Ok(());
                }
            }
        }
    }
}
