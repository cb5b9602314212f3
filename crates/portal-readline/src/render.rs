//! Terminal rendering of the portal views.

use colored::{ColoredString, Colorize};
use portal_core::dashboard::{Section, UiElement};
use portal_core::view::{
    ChatLine, DashboardView, MessageStyle, PortalView, RecordItem, RecordListView, ReplyBlock,
    WAITING_NOTICE,
};

pub fn dashboard(view: &DashboardView, elements: &[UiElement]) {
    println!(
        "{}",
        format!("=== {} {} ===", view.user_name, view.role_label)
            .bright_magenta()
            .bold()
    );
    let nav: Vec<String> = elements
        .iter()
        .filter(|el| view.shows(el.id))
        .map(|el| match el.target {
            Some(section) => format!("{} (/go {section})", el.label),
            None => el.label.to_string(),
        })
        .collect();
    println!("{}", nav.join(" | ").bright_black());
}

pub fn section(section: Section, view: &PortalView) {
    println!("{}", format!("-- {} --", section.title()).bright_cyan());
    match section {
        Section::Messages => {
            for line in &view.chat.lines {
                chat_line(line);
            }
        }
        Section::Records => records(&view.records),
        Section::Iep | Section::Questions => {}
    }
}

pub fn chat_line(line: &ChatLine) {
    println!("{}", style(line.style, &line.header).bold());
    for body in line.body.lines() {
        println!("  {body}");
    }
}

fn style(style: MessageStyle, text: &str) -> ColoredString {
    match style {
        MessageStyle::Teacher => text.bright_blue(),
        MessageStyle::Parents => text.bright_green(),
        MessageStyle::Therapist => text.bright_yellow(),
    }
}

pub fn records(list: &RecordListView) {
    if let Some(notice) = list.notice() {
        println!("{}", notice.bright_black());
        return;
    }
    if *list == RecordListView::Loading {
        println!("{}", "...".bright_black());
        return;
    }
    for item in list.items() {
        record_item(item);
    }
}

fn record_item(item: &RecordItem) {
    println!(
        "{} {}",
        format!("[{}]", item.id).bright_black(),
        item.title.bold()
    );
    println!("  {}", item.therapist_name.bright_yellow());
    for line in item.content.lines() {
        println!("  {line}");
    }
    match &item.reply {
        ReplyBlock::Reply(text) => println!("  {} {}", "↳".bright_blue(), text.bright_blue()),
        ReplyBlock::ReplyAction => println!(
            "  {}",
            format!("/reply {} <text>", item.id).bright_cyan()
        ),
        ReplyBlock::Waiting => println!("  {}", WAITING_NOTICE.bright_black()),
    }
}

pub fn summary(view: &PortalView) {
    if view.summary.visible {
        println!("{}", "AI 摘要".bright_magenta().bold());
        for line in view.summary.content.lines() {
            println!("  {}", line.bright_magenta());
        }
    }
}

pub fn help() {
    let rows = [
        ("/login <user> <password>", "sign in"),
        ("/logout", "sign out"),
        ("/go <section>", "records | iep | messages | questions"),
        ("/say <text> or plain text", "post to the message board"),
        ("/summary", "AI summary of the conversation"),
        ("/record <content>", "add a therapy record"),
        ("/reply <id> <text>", "reply to a therapy record"),
        ("/quit", "exit"),
    ];
    for (command, text) in rows {
        println!("  {:<28} {}", command.bright_cyan(), text.bright_black());
    }
}
