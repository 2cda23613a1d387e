use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kotoba_core::types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::{input_loop, print_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // log lines and result batches
            ui_to_app: kanal::bounded_async(64),  // user commands
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    fn spawn_core(&self, tasks: &mut JoinSet<anyhow::Result<()>>, interactive: bool) {
        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Output
        tasks.spawn(print_loop(self.channels.app_to_ui.1.clone(), interactive));
    }

    /// Interactive session reading commands from stdin
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let interactive = atty::is(atty::Stream::Stdin);

        self.spawn_core(&mut tasks, interactive);

        // Input
        tasks.spawn(input_loop(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Handle `events` in order without reading stdin, then stop
    pub async fn run_once(&self, events: Vec<AppEvent>) -> anyhow::Result<()> {
        let mut tasks = JoinSet::new();
        self.spawn_core(&mut tasks, false);

        let tx = &self.channels.ui_to_app.0;
        for event in events {
            tx.send(event).await?;
        }
        tx.send(AppEvent::Quit).await?;

        join_all(tasks).await
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Wait for every task, returning the first failure
pub async fn join_all(mut tasks: JoinSet<anyhow::Result<()>>) -> anyhow::Result<()> {
    let mut first_error = None;

    while let Some(result) = tasks.join_next().await {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => Err(anyhow::anyhow!("task panicked: {e}")),
        };
        if let Err(e) = outcome {
            tracing::error!("task exited with error: {e:#}");
            first_error.get_or_insert(e);
        }
    }

    first_error.map_or(Ok(()), Err)
}
