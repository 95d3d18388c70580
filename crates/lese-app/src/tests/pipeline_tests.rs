//! Text block -> annotation -> overlay interaction, through the app's event handling

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender, unbounded_async};
use lese_config::Config;
use lese_core::{GuardedPronouncer, PlaybackSlot, SpeechBackend, SpeechError, TooltipTiming};
use lese_types::{AppEvent, OverlayView, Size, TextSource, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::console::anchor_for;
use crate::events::handle_events;
use crate::services::{OfflineWordInfo, Services, annotation_engine};
use crate::session::ReadingSession;
use crate::state::AppState;
use crate::status::playback_status_loop;

struct SilentBackend;

#[async_trait]
impl SpeechBackend for SilentBackend {
    async fn play(&self, _text: &str, _language_tag: &str) -> Result<(), SpeechError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(())
    }
}

fn services(state: &AppState) -> Services {
    let playback = PlaybackSlot::new();
    Services {
        engine: Arc::new(annotation_engine()),
        word_info: Arc::new(OfflineWordInfo {
            sentences: state.sentences.clone(),
        }),
        pronunciation: Arc::new(GuardedPronouncer::with_slot(SilentBackend, playback.clone())),
        vocabulary: None,
        playback,
        language_tag: "nb-NO".to_string(),
    }
}

struct Harness {
    state: AppState,
    services: Services,
    session: ReadingSession,
    tx: AsyncSender<AppEvent>,
    rx: AsyncReceiver<AppEvent>,
}

impl Harness {
    fn new() -> Self {
        let state = AppState::new(Config::default());
        let services = services(&state);
        let session = ReadingSession::new(&services, TooltipTiming::default());
        let (tx, rx) = unbounded_async();
        Self {
            state,
            services,
            session,
            tx,
            rx,
        }
    }

    async fn handle(&mut self, event: AppEvent) -> bool {
        handle_events(&self.state, &mut self.session, &self.tx, event)
            .await
            .unwrap()
    }

    async fn read(&mut self, text: &str) -> (String, Vec<String>) {
        assert!(
            self.handle(AppEvent::RawTextInput {
                text: text.to_string(),
                source: TextSource::Stdin,
            })
            .await
        );
        match self.rx.recv().await.unwrap() {
            AppEvent::ShowAnnotated { markup, words, .. } => (markup, words),
            other => panic!("expected ShowAnnotated, got {other:?}"),
        }
    }

    fn drain(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn overlays(&self) -> Vec<OverlayView> {
        self.drain()
            .into_iter()
            .filter_map(|event| match event {
                AppEvent::OverlayChanged(view) => Some(view),
                _ => None,
            })
            .collect()
    }
}

fn enter(span: usize) -> AppEvent {
    let viewport = Size::new(1280.0, 800.0);
    AppEvent::UiEvent(UiEvent::PointerEnter {
        span,
        anchor: anchor_for(span, viewport),
        viewport,
    })
}

#[tokio::test(start_paused = true)]
async fn text_block_is_annotated_and_indexed() {
    let mut harness = Harness::new();

    let (markup, words) = harness.read("Jeg liker hunden. Hunden sover!").await;

    assert_eq!(words, vec!["hunden", "Hunden", "sover"]);
    assert!(markup.starts_with(r#"Jeg liker <span class="lese-word" data-word="hunden" data-span="0">hunden</span>."#));
    assert_eq!(harness.state.sentences.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn hovering_a_word_opens_its_overlay() {
    let mut harness = Harness::new();
    harness.read("Jeg liker hunden.").await;

    assert!(harness.handle(enter(0)).await);
    tokio::time::sleep(Duration::from_millis(350)).await;

    let last = harness.overlays().pop().expect("overlay updates");
    assert!(last.visible);
    assert!(!last.loading);
    assert_eq!(last.word, "hunden");
    // offline provider: fallback text, example from what was just read
    assert_eq!(last.translation.as_deref(), Some("word: hunden"));
    assert_eq!(last.example.as_deref(), Some("Jeg liker hunden."));
}

#[tokio::test(start_paused = true)]
async fn new_text_replaces_the_block_and_its_overlays() {
    let mut harness = Harness::new();
    harness.read("Jeg liker hunden.").await;
    harness.handle(enter(0)).await;
    tokio::time::sleep(Duration::from_millis(350)).await;
    let first_block = harness.session.block_id();
    harness.drain();

    let (_, words) = harness.read("Katten sover.").await;
    assert_eq!(words, vec!["Katten", "sover"]);
    assert_ne!(harness.session.block_id(), first_block);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(harness.overlays().iter().all(|view| Some(view.block_id) == harness.session.block_id()));
}

#[tokio::test(start_paused = true)]
async fn unknown_word_number_reports_a_status() {
    let mut harness = Harness::new();
    harness.read("Jeg liker hunden.").await;

    assert!(harness.handle(enter(7)).await);
    match harness.rx.recv().await.unwrap() {
        AppEvent::StatusUpdate { status, speaking } => {
            assert_eq!(status, "no word 7 (this text has 1)");
            assert!(!speaking);
        }
        other => panic!("expected StatusUpdate, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn close_and_shutdown_stop_the_loop() {
    let mut harness = Harness::new();
    assert!(!harness.handle(AppEvent::UiEvent(UiEvent::Close)).await);
    assert!(!harness.handle(AppEvent::Shutdown).await);
    assert!(harness.handle(AppEvent::BackendReady).await);
}

#[tokio::test(start_paused = true)]
async fn config_update_changes_timing_of_new_blocks() {
    let mut harness = Harness::new();

    harness
        .handle(AppEvent::ConfigUpdate {
            field: "show_delay_ms".to_string(),
            value: "50".to_string(),
        })
        .await;
    harness
        .handle(AppEvent::ConfigUpdate {
            field: "gap".to_string(),
            value: "-3".to_string(),
        })
        .await;

    let statuses: Vec<String> = harness
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            AppEvent::StatusUpdate { status, .. } => Some(status),
            _ => None,
        })
        .collect();
    assert_eq!(statuses[0], "show_delay_ms = 50 (from the next text on)");
    assert!(statuses[1].contains("non-negative"));
    assert_eq!(harness.state.config.read().await.tooltip.show_delay_ms, 50);
    assert_eq!(harness.state.config.read().await.tooltip.gap, 8.0);

    harness.read("Jeg liker hunden.").await;
    harness.handle(enter(0)).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(harness.overlays().iter().any(|view| view.visible));
}

#[tokio::test(start_paused = true)]
async fn playback_status_follows_the_slot() {
    let mut harness = Harness::new();
    let cancel = CancellationToken::new();
    let status = tokio::spawn(playback_status_loop(
        harness.services.playback.clone(),
        harness.tx.clone(),
        cancel.clone(),
    ));

    harness.read("Jeg liker hunden.").await;
    harness.handle(enter(0)).await;
    tokio::time::sleep(Duration::from_millis(350)).await;
    harness.handle(AppEvent::UiEvent(UiEvent::Listen { span: 0 })).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let speaking: Vec<bool> = harness
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            AppEvent::StatusUpdate { speaking, .. } => Some(speaking),
            _ => None,
        })
        .collect();
    assert_eq!(speaking, vec![true, false]);

    cancel.cancel();
    status.await.unwrap().unwrap();
}
