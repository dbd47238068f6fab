use super::{ terminal::LineReader, Navigation, Route, ViewResult };
use crate::api::auth::{ failure_message, AuthClient, LOGIN_FAILED, REGISTER_FAILED };
use crate::config::theme::Palette;
use crate::forms::{ FieldError, LoginForm, RegisterForm };
use colored::Colorize;
use log::warn;
use tokio::io::AsyncBufRead;

const TO_REGISTER: &str = "/register";
const TO_LOGIN: &str = "/login";

fn print_field_errors(errors: &[FieldError], palette: &Palette) {
    for error in errors {
        println!("  {}", palette.paint(&error.to_string(), palette.error));
    }
}

fn print_failure(message: &str, palette: &Palette) {
    println!("{}", palette.paint(message, palette.error).bold());
}

pub async fn login<R>(
    auth: &dyn AuthClient,
    prefill: Option<LoginForm>,
    palette: Palette,
    input: &mut LineReader<R>
) -> ViewResult
    where R: AsyncBufRead + Unpin
{
    println!();
    println!("{}", palette.paint("Entre na sua conta", palette.primary).bold());
    println!(
        "{}",
        palette.paint(
            &format!("Não tem uma conta? Digite {} no campo de email.", TO_REGISTER),
            palette.text_secondary
        )
    );

    let mut seed = prefill.unwrap_or_default();
    loop {
        let email = if seed.email.is_empty() {
            match input.prompt("Email").await? {
                Some(line) if line.trim() == TO_REGISTER => {
                    return Ok(Navigation::Goto(Route::Register));
                }
                Some(line) => line,
                None => {
                    return Ok(Navigation::Exit);
                }
            }
        } else {
            std::mem::take(&mut seed.email)
        };
        let password = if seed.password.is_empty() {
            match input.prompt_secret("Senha").await? {
                Some(line) => line,
                None => {
                    return Ok(Navigation::Exit);
                }
            }
        } else {
            std::mem::take(&mut seed.password)
        };

        let request = match (LoginForm { email, password }).validate() {
            Ok(request) => request,
            Err(errors) => {
                print_field_errors(&errors, &palette);
                continue;
            }
        };

        println!("{}", palette.paint("Entrando...", palette.text_secondary));
        match auth.login(&request).await {
            Ok(()) => {
                return Ok(Navigation::Goto(Route::Chat));
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                print_failure(&failure_message(&e, LOGIN_FAILED), &palette);
            }
        }
    }
}

pub async fn register<R>(
    auth: &dyn AuthClient,
    palette: Palette,
    input: &mut LineReader<R>
) -> ViewResult
    where R: AsyncBufRead + Unpin
{
    println!();
    println!("{}", palette.paint("Registrar", palette.primary).bold());
    println!(
        "{}",
        palette.paint(
            &format!("Já tem uma conta? Digite {} no campo de nome.", TO_LOGIN),
            palette.text_secondary
        )
    );

    loop {
        let Some(name) = input.prompt("Nome").await? else {
            return Ok(Navigation::Exit);
        };
        if name.trim() == TO_LOGIN {
            return Ok(Navigation::Goto(Route::Login));
        }
        let Some(email) = input.prompt("Email").await? else {
            return Ok(Navigation::Exit);
        };
        let Some(password) = input.prompt_secret("Senha").await? else {
            return Ok(Navigation::Exit);
        };
        let Some(confirm_password) = input.prompt_secret("Confirmar senha").await? else {
            return Ok(Navigation::Exit);
        };

        let form = RegisterForm { name, email, password, confirm_password };
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => {
                print_field_errors(&errors, &palette);
                continue;
            }
        };

        println!("{}", palette.paint("Registrando...", palette.text_secondary));
        match auth.register(&request).await {
            Ok(()) => {
                return Ok(Navigation::Goto(Route::Chat));
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                print_failure(&failure_message(&e, REGISTER_FAILED), &palette);
            }
        }
    }
}
