use super::{ terminal::LineReader, Navigation, Route, ViewResult };
use crate::api::auth::AuthClient;
use crate::config::theme::{ Palette, ThemeState };
use crate::models::chat::{ Message, Sender };
use crate::session::{ ChatSession, Rejection, SessionEvent, SessionStatus, SubmitOutcome };
use chrono::{ DateTime, Local };
use colored::Colorize;
use log::{ debug, info };
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Theme,
    Logout,
    Quit,
    Help,
}

impl ChatCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "/theme" => Some(ChatCommand::Theme),
            "/logout" => Some(ChatCommand::Logout),
            "/quit" | "/exit" => Some(ChatCommand::Quit),
            "/help" => Some(ChatCommand::Help),
            _ => None,
        }
    }
}

pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "Você",
        Sender::Bot => "Check Docs",
    }
}

fn render_message(message: &Message, palette: &Palette) {
    let time = DateTime::from_timestamp(message.timestamp, 0)
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default();
    let color = match message.sender {
        Sender::User => palette.primary,
        Sender::Bot => palette.secondary,
    };
    println!(
        "{} {} {}",
        palette.paint(&time, palette.text_secondary),
        palette.paint(&format!("{} ›", sender_label(message.sender)), color).bold(),
        palette.paint(&message.text, palette.text_primary)
    );
}

fn render_event(event: &SessionEvent, palette: &Palette) {
    match event {
        SessionEvent::Appended(message) => render_message(message, palette),
        SessionEvent::PendingChanged(true) => {
            println!("{}", palette.paint("Check Docs está digitando...", palette.text_secondary).italic());
        }
        SessionEvent::PendingChanged(false) => {}
    }
}

fn drain_events(events: &mut mpsc::UnboundedReceiver<SessionEvent>, palette: &Palette) {
    while let Ok(event) = events.try_recv() {
        render_event(&event, palette);
    }
}

fn render_held_draft(draft: &str, palette: &Palette) {
    println!(
        "{}",
        palette.paint(
            &format!("Rascunho \"{}\" não enviado. Tecle Enter para enviar.", draft.trim()),
            palette.info
        )
    );
}

fn render_header(palette: &Palette) {
    println!();
    println!("{}", palette.paint("Check Docs AI", palette.primary).bold());
    println!("{}", palette.paint("Envie uma pergunta para começar.", palette.text_secondary));
    render_help(palette);
}

fn render_help(palette: &Palette) {
    println!(
        "{}",
        palette.paint("/theme trocar tema · /logout sair · /quit fechar", palette.info)
    );
}

/// Runs one mounted chat view over `session`.
///
/// A line typed while a question is in flight is refused and kept as the
/// draft; an empty line sends the held draft once the session is idle again.
/// Leaving through a command aborts a question still in flight and its
/// reply is dropped. Closed input instead waits for that reply so piped
/// questions still get answered.
pub async fn run<R>(
    session: Arc<ChatSession>,
    theme: &mut ThemeState,
    auth: &dyn AuthClient,
    input: &mut LineReader<R>
) -> ViewResult
    where R: AsyncBufRead + Unpin
{
    let mut events = session.subscribe();
    let mut in_flight: Option<JoinHandle<SubmitOutcome>> = None;
    render_header(&theme.palette());

    let navigation = loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else {
                    if session.status() == SessionStatus::Awaiting {
                        debug!("Input closed, waiting for the pending answer");
                    }
                    if let Some(task) = in_flight.take() {
                        if let Err(e) = task.await {
                            debug!("Pending question did not settle: {}", e);
                        }
                    }
                    drain_events(&mut events, &theme.palette());
                    break Navigation::Exit;
                };

                match ChatCommand::parse(&line) {
                    Some(ChatCommand::Theme) => {
                        let name = theme.toggle();
                        info!("Theme switched to {}", name);
                        let palette = theme.palette();
                        println!("{}", palette.paint(&format!("Tema: {}", name), palette.info));
                    }
                    Some(ChatCommand::Logout) => {
                        auth.logout()?;
                        break Navigation::Goto(Route::Login);
                    }
                    Some(ChatCommand::Quit) => break Navigation::Exit,
                    Some(ChatCommand::Help) => render_help(&theme.palette()),
                    None => {
                        if !line.trim().is_empty() {
                            session.set_draft(&line);
                        }
                        match session.begin_draft() {
                            Ok(submission) => {
                                debug!("Sending question: {}", submission.question());
                                let session = session.clone();
                                in_flight = Some(
                                    tokio::spawn(async move { session.complete(submission).await })
                                );
                            }
                            Err(Rejection::Busy) => {
                                info!("Question held as draft while another is answered");
                                let palette = theme.palette();
                                println!(
                                    "{}",
                                    palette.paint("Aguarde a resposta anterior.", palette.text_secondary)
                                );
                                render_held_draft(&session.draft(), &palette);
                            }
                            Err(Rejection::Blank) => {}
                        }
                    }
                }
            }
            Some(event) = events.recv() => {
                let palette = theme.palette();
                render_event(&event, &palette);
                if event == SessionEvent::PendingChanged(false) && session.can_send() {
                    render_held_draft(&session.draft(), &palette);
                }
            }
        }
    };

    if let Some(task) = in_flight.take() {
        task.abort();
    }
    Ok(navigation)
}
