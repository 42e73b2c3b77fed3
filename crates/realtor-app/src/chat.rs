//! `realtor chat`: the chat widget on a terminal.
//!
//! The transcript prints to stdout as entries arrive. Stdin lines become
//! widget actions; EOF or Ctrl-C shuts the widget down.

use std::sync::Arc;

use anyhow::{Context, Result};
use realtor_chat::runtime::{WidgetAction, run_widget};
use realtor_chat::transport::event_channel;
use realtor_chat::{
    ChatMessage, ChatWidget, GatewayLocator, Transcript, TranscriptView, WebSocketConnector,
};
use realtor_core::KeyValueStore;
use realtor_settings::RealtorSettings;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

/// Prints each transcript entry as it is appended.
struct TerminalView;

impl TranscriptView for TerminalView {
    fn render(&mut self, _index: usize, message: &ChatMessage) {
        println!("{message}");
    }
}

/// Run the chat widget until `/quit`, EOF or Ctrl-C.
pub async fn run(
    settings: &RealtorSettings,
    store: Arc<dyn KeyValueStore>,
    gateway: Option<String>,
    page_url: Option<&str>,
) -> Result<()> {
    let locator = resolve_locator(settings, gateway, page_url)?;
    info!(
        endpoint = %locator.endpoint(),
        overridden = locator.is_overridden(),
        "starting chat widget"
    );

    let (events_tx, events_rx) = event_channel();
    let widget = ChatWidget::from_settings(
        &settings.chat,
        store.as_ref(),
        &locator,
        WebSocketConnector::new(),
        events_tx,
        Transcript::with_view(Box::new(TerminalView)),
    )
    .context("Failed to set up chat widget")?;

    let (actions_tx, actions_rx) = mpsc::channel(32);
    actions_tx
        .send(WidgetAction::Open)
        .await
        .context("Chat loop stopped before opening")?;
    let input = tokio::spawn(read_commands(actions_tx));

    let widget = run_widget(widget, events_rx, actions_rx).await;
    input.abort();
    info!(entries = widget.transcript().len(), "chat widget closed");
    Ok(())
}

/// Settings default, then the page's `gateway` query parameter, then the flag.
fn resolve_locator(
    settings: &RealtorSettings,
    gateway: Option<String>,
    page_url: Option<&str>,
) -> Result<GatewayLocator> {
    let mut locator = GatewayLocator::from_settings(&settings.chat);
    if let Some(page) = page_url {
        let parsed = Url::parse(page).with_context(|| format!("Invalid page URL: {page}"))?;
        locator = locator.with_query(parsed.query().unwrap_or_default());
    }
    if gateway.is_some() {
        locator = locator.with_override(gateway);
    }
    Ok(locator)
}

async fn read_commands(actions: mpsc::Sender<WidgetAction>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => Ok(None),
        };
        let batch = match line {
            Ok(Some(line)) => parse_command(&line),
            Ok(None) => vec![WidgetAction::Shutdown],
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                vec![WidgetAction::Shutdown]
            }
        };
        let stop = batch.contains(&WidgetAction::Shutdown);
        for action in batch {
            if actions.send(action).await.is_err() {
                return;
            }
        }
        if stop {
            return;
        }
    }
}

/// Map one stdin line to widget actions.
fn parse_command(line: &str) -> Vec<WidgetAction> {
    match line.trim() {
        "" => Vec::new(),
        "/open" => vec![WidgetAction::Open],
        "/close" => vec![WidgetAction::Close],
        "/quit" => vec![WidgetAction::Shutdown],
        _ => vec![WidgetAction::Input(line.to_string()), WidgetAction::Submit],
    }
}
