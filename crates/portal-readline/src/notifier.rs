use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use portal_core::notifier::{Notice, NoticeLevel, Notifier};

/// Prints dialogs to the terminal.
///
/// The busy indicator is an unterminated status line; closing it (or any
/// dialog that replaces it) ends the line.
#[derive(Default)]
pub struct TerminalNotifier {
    busy: AtomicBool,
}

impl TerminalNotifier {
    fn end_busy_line(&self) {
        if self.busy.swap(false, Ordering::SeqCst) {
            println!();
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        self.end_busy_line();
        let line = notice.to_string();
        match notice.level {
            NoticeLevel::Success => println!("{}", line.bright_green()),
            NoticeLevel::Info => println!("{}", line.bright_blue()),
            NoticeLevel::Warning => println!("{}", line.yellow()),
            NoticeLevel::Error => eprintln!("{}", line.red()),
        }
    }

    fn busy(&self, title: &str, text: &str) {
        self.end_busy_line();
        print!("{}", format!("{title} {text}").bright_black());
        let _ = std::io::stdout().flush();
        self.busy.store(true, Ordering::SeqCst);
    }

    fn close_busy(&self) {
        self.end_busy_line();
    }
}
