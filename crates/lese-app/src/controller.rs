use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lese_types::{AppEvent, Size};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::console::console_loop;
use crate::events::event_loop;
use crate::io::watcher_io;
use crate::render::render_loop;
use crate::services::Services;
use crate::state::AppState;
use crate::status::playback_status_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // overlay state bursts
            ui_to_app: kanal::bounded_async(64),  // text blocks and interactions
        }
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

    pub async fn spawn_tasks(
        &self,
        services: Services,
        console_lines: AsyncReceiver<String>,
    ) -> JoinSet<anyhow::Result<()>> {
        let viewport = {
            let config = self.state.config.read().await;
            Size::new(config.tooltip.viewport_width, config.tooltip.viewport_height)
        };
        let mut tasks = JoinSet::new();

        tasks.spawn(playback_status_loop(
            services.playback.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Event loop owns shutdown
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            services,
            self.cancel_token.clone(),
        ));

        tasks.spawn(render_loop(
            self.channels.app_to_ui.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks.spawn(console_loop(
            console_lines,
            self.channels.ui_to_app.0.clone(),
            viewport,
            self.cancel_token.child_token(),
        ));

        tasks.spawn(watcher_io(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
