//! Single-task event loop for the chat widget.
//!
//! Transport events and user actions arrive on two channels; [`run_widget`]
//! applies them to the widget one at a time, so no two state transitions
//! ever run concurrently. Pending transport events are drained before the
//! next user action.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::transport::{Connector, EventReceiver};
use crate::widget::{ChatWidget, KeyPress};

/// A user action for the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetAction {
    /// Toggle the panel open (connects if needed).
    Open,
    /// Toggle the panel closed.
    Close,
    /// Replace the input buffer.
    Input(String),
    /// A key press in the input field.
    Key(KeyPress),
    /// Submit the input field.
    Submit,
    /// Close the connection and stop the loop.
    Shutdown,
}

/// Drive `widget` until the action channel closes or [`WidgetAction::Shutdown`]
/// arrives. Returns the widget for inspection.
pub async fn run_widget<C: Connector>(
    mut widget: ChatWidget<C>,
    mut events: EventReceiver,
    mut actions: mpsc::Receiver<WidgetAction>,
) -> ChatWidget<C> {
    loop {
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                widget.handle_transport_event(event);
            }
            action = actions.recv() => {
                let Some(action) = action else {
                    debug!("action channel closed");
                    break;
                };
                if !apply_action(&mut widget, action) {
                    break;
                }
            }
        }
    }

    info!("chat widget loop stopped");
    widget
}

/// Apply one action. Returns `false` when the loop should stop.
fn apply_action<C: Connector>(widget: &mut ChatWidget<C>, action: WidgetAction) -> bool {
    match action {
        WidgetAction::Open => widget.open(),
        WidgetAction::Close => widget.close(),
        WidgetAction::Input(text) => widget.set_input(text),
        WidgetAction::Key(key) => {
            let _ = widget.key_press(key);
        }
        WidgetAction::Submit => {
            let _ = widget.submit();
        }
        WidgetAction::Shutdown => {
            widget.shutdown();
            return false;
        }
    }
    true
}
