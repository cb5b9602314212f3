//! The interactive loop.
//!
//! rustyline blocks, so it runs on its own thread and feeds lines into a
//! channel. The async side owns the [`PortalUseCase`] and applies input
//! lines and realtime events one at a time.

use anyhow::Result;
use colored::Colorize;
use portal_application::PortalUseCase;
use portal_core::dashboard::{DashboardState, Section};
use portal_core::realtime::RealtimeEvent;
use portal_interaction::RealtimeSubscription;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::commands::{self, Command};
use crate::helper::PortalHelper;
use crate::render;

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

/// Spawns the blocking readline thread.
fn spawn_reader() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || {
        let mut rl: Editor<PortalHelper, DefaultHistory> = match Editor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", format!("Cannot open terminal: {err}").red());
                let _ = tx.blocking_send(Input::Closed);
                return;
            }
        };
        rl.set_helper(Some(PortalHelper));

        loop {
            let input = match rl.readline(">> ") {
                Ok(line) => {
                    if !line.trim().is_empty() && !commands::is_sensitive(&line) {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    Input::Line(line)
                }
                Err(ReadlineError::Interrupted) => Input::Interrupted,
                Err(ReadlineError::Eof) => Input::Closed,
                Err(err) => {
                    warn!("Readline failed: {}", err);
                    Input::Closed
                }
            };
            let closed = matches!(input, Input::Closed);
            if tx.blocking_send(input).is_err() || closed {
                break;
            }
        }
    });
    rx
}

async fn next_event(realtime: &mut Option<RealtimeSubscription>) -> Option<RealtimeEvent> {
    match realtime.as_mut() {
        Some(subscription) => subscription.recv().await,
        None => std::future::pending().await,
    }
}

pub async fn run(mut portal: PortalUseCase, mut realtime: Option<RealtimeSubscription>) -> Result<()> {
    println!("{}", "=== 特教協作平台 ===".bright_magenta().bold());

    if portal.init()? {
        show_dashboard(&portal);
    } else {
        println!(
            "{}",
            "Type '/login <user> <password>' to sign in, '/help' for commands.".bright_black()
        );
    }

    let mut lines = spawn_reader();

    loop {
        tokio::select! {
            input = lines.recv() => match input {
                Some(Input::Line(line)) => {
                    if !handle_line(&mut portal, &line).await {
                        break;
                    }
                }
                Some(Input::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                }
                Some(Input::Closed) | None => {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            },
            event = next_event(&mut realtime) => match event {
                Some(event) => {
                    if portal.handle_realtime(&event)
                        && let Some(line) = portal.view().chat.lines.last()
                    {
                        render::chat_line(line);
                    }
                    if matches!(event, RealtimeEvent::Disconnected { .. }) {
                        realtime = None;
                    }
                }
                None => {
                    debug!("Realtime queue closed");
                    realtime = None;
                }
            },
        }
    }

    Ok(())
}

/// Applies one input line. Returns false when the user asked to quit.
async fn handle_line(portal: &mut PortalUseCase, line: &str) -> bool {
    let command = match commands::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return true,
        Err(message) => {
            println!("{}", message.yellow());
            return true;
        }
    };

    if !matches!(command, Command::Login { .. } | Command::Help | Command::Quit)
        && portal.state() == DashboardState::LoggedOut
    {
        println!("{}", "Please /login first.".yellow());
        return true;
    }

    // Failures are already reported through the notifier; the result only
    // decides what to redraw.
    match command {
        Command::Login { username, password } => {
            if portal.login(&username, &password).await.is_ok() {
                show_dashboard(portal);
            }
        }
        Command::Logout => match portal.logout() {
            Ok(()) => println!("{}", "Logged out.".bright_black()),
            Err(e) => eprintln!("{}", format!("Logout failed: {e}").red()),
        },
        Command::Go(section) => {
            if !element_shown(portal, &format!("nav-{section}")) {
                println!("{}", format!("{} is not available for your role.", section.title()).yellow());
                return true;
            }
            if portal.show_section(section).await.is_ok() {
                render::section(section, portal.view());
            }
        }
        Command::Say(text) => {
            if !portal.state().is_visible(Section::Messages) {
                println!("{}", "Open the message board first: /go messages".yellow());
                return true;
            }
            portal.set_input(text);
            if let Err(e) = portal.send_message().await {
                debug!("Send failed: {}", e);
            }
        }
        Command::Summary => {
            if element_shown(portal, "btn-ai-summary") && portal.get_ai_summary().await.is_ok() {
                render::summary(portal.view());
            }
        }
        Command::Record(content) => {
            if !element_shown(portal, "btn-new-record") {
                println!("{}", "Only therapists can add records.".yellow());
                return true;
            }
            if let Ok(true) = portal.create_record(&content).await
                && portal.state().is_visible(Section::Records)
            {
                render::records(&portal.view().records);
            }
        }
        Command::Reply { id, text } => {
            if let Ok(true) = portal.reply_record(&id, &text).await {
                render::records(&portal.view().records);
            }
        }
        Command::Help => render::help(),
        Command::Quit => {
            println!("{}", "Goodbye!".bright_green());
            return false;
        }
    }
    true
}

fn element_shown(portal: &PortalUseCase, element_id: &str) -> bool {
    portal
        .view()
        .dashboard
        .as_ref()
        .is_some_and(|dashboard| dashboard.shows(element_id))
}

fn show_dashboard(portal: &PortalUseCase) {
    if let Some(dashboard) = &portal.view().dashboard {
        render::dashboard(dashboard, portal.controller().elements());
    }
}
