//! Terminal front-end for the chat widget
//!
//! Collects the user-info form on stdin, then relays each line to the chat
//! service. Point it at a service with `CHAT_WIDGET_HOST` (a `.env` file works).
//!
//! Run with: cargo run --example console_chat

use chat_widget::prelude::*;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Prints entries as they appear or change, keeping state in an [`InMemoryView`]
struct ConsoleView {
    inner: InMemoryView,
}

impl ConsoleView {
    fn print(&self, id: EntryId) {
        if let Some(entry) = self.inner.entry(id) {
            let who = match entry.role.icon() {
                Some(icon) => format!("Bot [{}]", icon),
                None => "You".to_string(),
            };
            let marker = if entry.is_error { " (!)" } else { "" };
            println!("{}{}: {}", who, marker, entry.text);
        }
    }
}

impl ChatView for ConsoleView {
    fn append_entry(&self, entry: ChatEntry) -> EntryId {
        let id = self.inner.append_entry(entry);
        self.print(id);
        id
    }

    fn set_entry_text(&self, id: EntryId, text: &str) {
        self.inner.set_entry_text(id, text);
        self.print(id);
    }

    fn mark_entry_error(&self, id: EntryId) {
        self.inner.mark_entry_error(id);
    }

    fn set_visible(&self, panel: Panel, visible: bool) {
        self.inner.set_visible(panel, visible);
    }

    fn is_visible(&self, panel: Panel) -> bool {
        self.inner.is_visible(panel)
    }

    fn input_value(&self) -> String {
        self.inner.input_value()
    }

    fn set_input_value(&self, value: &str) {
        self.inner.set_input_value(value);
    }

    fn input_content_height(&self) -> u32 {
        self.inner.input_content_height()
    }

    fn set_input_height(&self, height: u32) {
        self.inner.set_input_height(height);
    }

    fn scroll_to_bottom(&self) {
        self.inner.scroll_to_bottom();
    }

    fn notify(&self, message: &str) {
        eprintln!("[!] {}", message);
    }
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, label: &str) -> anyhow::Result<String> {
    loop {
        print!("{}: ", label);
        io::stdout().flush()?;
        let line = lines.next().ok_or_else(|| anyhow::anyhow!("stdin closed"))??;
        let value = line.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let view = Arc::new(ConsoleView {
        inner: InMemoryView::new(),
    });
    let widget = ChatWidget::connect(ApiConfig::default(), WidgetConfig::default(), view.clone())?;
    widget.toggle_panel();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Chat Widget Console");
    println!("===================");

    while !widget.session().is_established() {
        let info = UserInfo::new(
            prompt(&mut lines, "Name")?,
            prompt(&mut lines, "Phone")?,
            prompt(&mut lines, "Email")?,
            prompt(&mut lines, "Address")?,
        );
        if widget.submit_user_info(info).await.is_err() {
            println!("Please try again.\n");
        }
    }

    match widget.list_sessions().await {
        Ok(sessions) => println!("Service holds {} session(s).", sessions.len()),
        Err(e) => eprintln!("Could not list sessions: {}", e),
    }

    println!("\nType a message and press Enter. /quit exits.\n");

    while let Some(line) = lines.next() {
        let line = line?;
        if line.trim() == "/quit" {
            break;
        }

        view.set_input_value(&line);
        if let KeyAction::Submitted(Some(exchange)) =
            widget.controller().handle_keydown(KeyPress::enter(), 1024)
        {
            exchange.await?;
        }
    }

    widget.close_panel();
    Ok(())
}
