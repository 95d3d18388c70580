use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lese_types::{Rect, Size, WordInfo};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinError, JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use super::state::{ListenState, LoadState, TooltipState, Visibility};
use super::{TooltipInput, TooltipServices};
use crate::adapters::SpeakOutcome;
use crate::error::SpeechError;
use crate::position::OverlayPositioner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Show,
    Hide,
}

enum Message {
    Input(TooltipInput),
    Timer { kind: TimerKind, generation: u64 },
    Fetched { cycle: u64, info: WordInfo },
    Spoken { cycle: u64, result: Result<SpeakOutcome, SpeechError> },
}

/// Host-side handle of one mounted overlay
///
/// Dropping the handle unmounts the overlay: timers and in-flight lookups are cancelled and the
/// published state goes back to hidden before `drop` returns.
pub struct TooltipHandle {
    word: String,
    inbox: AsyncSender<Message>,
    state: watch::Receiver<TooltipState>,
    publisher: Arc<watch::Sender<TooltipState>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TooltipHandle {
    /// Spawn the controller for `word` on the current tokio runtime
    pub fn mount(word: impl Into<String>, services: TooltipServices) -> Self {
        let word = word.into();
        let (inbox_tx, inbox_rx) = kanal::unbounded_async();
        let (publisher, state) = watch::channel(TooltipState::default());
        let publisher = Arc::new(publisher);
        let cancel = CancellationToken::new();

        let controller = Controller::new(word.clone(), services, publisher.clone(), inbox_tx.clone());
        let task = tokio::spawn(controller.run(inbox_rx, cancel.clone()));

        Self {
            word,
            inbox: inbox_tx,
            state,
            publisher,
            cancel,
            task: Some(task),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Queue host input; false once the overlay is unmounted
    pub fn send(&self, input: TooltipInput) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.inbox.try_send(Message::Input(input)).unwrap_or(false)
    }

    pub fn state(&self) -> TooltipState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TooltipState> {
        self.state.clone()
    }

    /// Unmount and wait until the controller has finished its cleanup
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TooltipHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.publisher.send_replace(TooltipState::default());
    }
}

/// State machine owned by the controller task
struct Controller {
    word: String,
    services: TooltipServices,
    positioner: OverlayPositioner,
    state: TooltipState,
    publisher: Arc<watch::Sender<TooltipState>>,
    inbox: AsyncSender<Message>,
    tasks: JoinSet<()>,
    timer: Option<AbortHandle>,
    timer_generation: u64,
    fetch: Option<AbortHandle>,
    speech: Option<AbortHandle>,
    /// Bumped whenever the overlay closes; results from an older cycle are ignored
    cycle: u64,
    anchor: Rect,
    viewport: Size,
    overlay: Size,
}

impl Controller {
    fn new(
        word: String,
        services: TooltipServices,
        publisher: Arc<watch::Sender<TooltipState>>,
        inbox: AsyncSender<Message>,
    ) -> Self {
        let timing = services.timing;
        Self {
            word,
            positioner: OverlayPositioner::new(timing.gap),
            services,
            state: TooltipState::default(),
            publisher,
            inbox,
            tasks: JoinSet::new(),
            timer: None,
            timer_generation: 0,
            fetch: None,
            speech: None,
            cycle: 0,
            anchor: Rect::default(),
            viewport: Size::default(),
            overlay: timing.overlay,
        }
    }

    async fn run(mut self, inbox: AsyncReceiver<Message>, cancel: CancellationToken) {
        tracing::debug!("Tooltip for '{}' mounted", self.word);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                message = inbox.recv() => match message {
                    Ok(message) => self.handle(message),
                    Err(_) => break,
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => self.reap(joined),
            }
        }

        self.tasks.abort_all();
        self.publisher.send_replace(TooltipState::default());
        tracing::debug!("Tooltip for '{}' unmounted", self.word);
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Input(input) => self.on_input(input),
            Message::Timer { kind, generation } => {
                if generation != self.timer_generation || self.timer.is_none() {
                    return;
                }
                self.timer = None;
                match (kind, self.state.visibility) {
                    (TimerKind::Show, Visibility::PendingShow) => self.show(),
                    (TimerKind::Hide, Visibility::PendingHide) => self.hide(),
                    _ => {}
                }
            }
            Message::Fetched { cycle, info } => {
                if cycle != self.cycle || self.state.load != LoadState::Loading {
                    return;
                }
                self.fetch = None;
                self.apply_word_info(info);
            }
            Message::Spoken { cycle, result } => {
                if cycle != self.cycle {
                    return;
                }
                self.speech = None;
                self.state.listen = match result {
                    Ok(SpeakOutcome::Played) | Ok(SpeakOutcome::Skipped) => ListenState::Idle,
                    Err(e) => {
                        tracing::warn!("Could not pronounce '{}': {}", self.word, e);
                        ListenState::Failed
                    }
                };
                self.publish();
            }
        }
    }

    fn on_input(&mut self, input: TooltipInput) {
        match input {
            TooltipInput::PointerEnter { anchor, viewport }
            | TooltipInput::TouchStart { anchor, viewport } => self.enter(anchor, viewport),
            TooltipInput::PointerLeave | TooltipInput::TouchEnd => self.leave(),
            TooltipInput::Dismiss => {
                if self.state.visibility != Visibility::Hidden {
                    self.hide();
                }
            }
            TooltipInput::OverlayMeasured(size) => {
                self.overlay = size;
                if self.state.is_visible() {
                    self.place();
                    self.publish();
                }
            }
            TooltipInput::Listen => self.listen(),
            TooltipInput::AddToVocabulary => self.add_to_vocabulary(),
        }
    }

    fn enter(&mut self, anchor: Rect, viewport: Size) {
        match self.state.visibility {
            Visibility::Hidden => {
                self.anchor = anchor;
                self.viewport = viewport;
                self.state.visibility = Visibility::PendingShow;
                self.arm(TimerKind::Show, self.services.timing.show_delay);
                self.publish();
            }
            Visibility::PendingShow => {
                self.anchor = anchor;
                self.viewport = viewport;
            }
            Visibility::PendingHide => {
                self.cancel_timer();
                self.state.visibility = Visibility::Shown;
                self.publish();
            }
            Visibility::Shown => {}
        }
    }

    fn leave(&mut self) {
        match self.state.visibility {
            Visibility::PendingShow => {
                self.cancel_timer();
                self.state.visibility = Visibility::Hidden;
                self.publish();
            }
            Visibility::Shown => {
                self.state.visibility = Visibility::PendingHide;
                self.arm(TimerKind::Hide, self.services.timing.hide_delay);
                self.publish();
            }
            Visibility::Hidden | Visibility::PendingHide => {}
        }
    }

    fn show(&mut self) {
        self.state.visibility = Visibility::Shown;
        self.place();
        if self.state.load == LoadState::Idle {
            self.start_fetch();
        }
        self.publish();
    }

    /// Close immediately, discarding everything loaded for this cycle
    fn hide(&mut self) {
        self.cancel_timer();
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
        // a running pronunciation finishes on its own; its result belongs to the old cycle
        self.speech = None;
        self.cycle += 1;
        self.state.reset();
        self.publish();
    }

    fn place(&mut self) {
        let placement = self.positioner.place(self.anchor, self.overlay, self.viewport);
        self.state.position = placement.position;
        self.state.below = placement.below;
    }

    fn start_fetch(&mut self) {
        self.state.load = LoadState::Loading;

        let provider = self.services.word_info.clone();
        let inbox = self.inbox.clone();
        let word = self.word.clone();
        let cycle = self.cycle;

        tracing::debug!("Fetching word info for '{}'", word);
        self.fetch = Some(self.tasks.spawn(async move {
            let info = provider.word_info(&word).await;
            let _ = inbox.send(Message::Fetched { cycle, info }).await;
        }));
    }

    fn apply_word_info(&mut self, info: WordInfo) {
        if info.success {
            self.state.load = LoadState::Loaded;
            self.state.word_info = Some(info);
        } else {
            tracing::warn!("No translation for '{}', showing fallback", self.word);
            self.state.load = LoadState::Error;
            self.state.word_info = Some(if info.translation.is_empty() {
                WordInfo::fallback(&self.word)
            } else {
                info
            });
        }
        self.publish();
    }

    fn listen(&mut self) {
        if !self.state.is_visible() || self.speech.is_some() {
            return;
        }
        self.state.listen = ListenState::Speaking;
        self.publish();

        let pronunciation = self.services.pronunciation.clone();
        let language_tag = self.services.language_tag.clone();
        let inbox = self.inbox.clone();
        let word = self.word.clone();
        let cycle = self.cycle;

        self.speech = Some(self.tasks.spawn(async move {
            let result = pronunciation.speak(&word, &language_tag).await;
            let _ = inbox.send(Message::Spoken { cycle, result }).await;
        }));
    }

    fn add_to_vocabulary(&mut self) {
        if !self.state.is_visible() || self.state.load != LoadState::Loaded {
            return;
        }
        let Some(info) = self.state.word_info.clone() else {
            return;
        };
        let Some(vocabulary) = self.services.vocabulary.clone() else {
            tracing::warn!("Vocabulary store not configured, '{}' not added", info.word);
            return;
        };

        self.state.added = true;
        self.publish();

        // Detached: an add must complete even if the overlay unmounts meanwhile
        tokio::spawn(async move {
            let example = (!info.example.is_empty()).then_some(info.example.as_str());
            match vocabulary.add_word(&info.word, &info.translation, example).await {
                Ok(()) => tracing::info!("Added '{}' to vocabulary", info.word),
                Err(e) => tracing::warn!("Failed to add '{}' to vocabulary: {}", info.word, e),
            }
        });
    }

    fn arm(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel_timer();
        let generation = self.timer_generation;
        let inbox = self.inbox.clone();

        self.timer = Some(self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = inbox.send(Message::Timer { kind, generation }).await;
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.timer_generation += 1;
    }

    /// A panicking lookup or speech task degrades like a failed one
    fn reap(&mut self, joined: Result<(), JoinError>) {
        let Err(e) = joined else {
            return;
        };
        if !e.is_panic() {
            return;
        }
        tracing::error!("Tooltip task for '{}' panicked: {}", self.word, e);

        if self.state.load == LoadState::Loading && self.fetch.as_ref().is_some_and(AbortHandle::is_finished) {
            self.fetch = None;
            self.apply_word_info(WordInfo::fallback(&self.word));
        }
        if self.state.listen == ListenState::Speaking
            && self.speech.as_ref().is_some_and(AbortHandle::is_finished)
        {
            self.speech = None;
            self.state.listen = ListenState::Failed;
            self.publish();
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use lese_types::Point;

    use super::*;
    use crate::adapters::{PronunciationAdapter, VocabularyAdapter, WordInfoProvider};
    use crate::error::VocabularyError;
    use crate::tooltip::TooltipTiming;

    struct Lookup {
        calls: AtomicUsize,
        delay: Duration,
        success: bool,
    }

    impl Lookup {
        fn new(delay_ms: u64, success: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay: Duration::from_millis(delay_ms),
                success,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WordInfoProvider for Lookup {
        async fn word_info(&self, word: &str) -> WordInfo {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.success {
                WordInfo::found(word.to_lowercase(), "the dog", "Hunden sover.")
            } else {
                WordInfo {
                    word: word.to_string(),
                    translation: String::new(),
                    example: String::new(),
                    success: false,
                }
            }
        }
    }

    #[derive(Default)]
    struct Speech {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PronunciationAdapter for Speech {
        async fn speak(&self, _text: &str, _language_tag: &str) -> Result<SpeakOutcome, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            if self.fail {
                Err(SpeechError::Backend("no audio device".to_string()))
            } else {
                Ok(SpeakOutcome::Played)
            }
        }

        fn is_speaking(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct Vocabulary {
        added: Mutex<Vec<(String, String, Option<String>)>>,
    }

    #[async_trait]
    impl VocabularyAdapter for Vocabulary {
        async fn add_word(
            &self,
            norwegian: &str,
            english: &str,
            example: Option<&str>,
        ) -> Result<(), VocabularyError> {
            self.added.lock().unwrap().push((
                norwegian.to_string(),
                english.to_string(),
                example.map(str::to_string),
            ));
            Ok(())
        }
    }

    fn services(lookup: Arc<Lookup>, speech: Arc<Speech>, vocabulary: Arc<Vocabulary>) -> TooltipServices {
        TooltipServices {
            word_info: lookup,
            pronunciation: speech,
            vocabulary: Some(vocabulary),
            timing: TooltipTiming::default(),
            language_tag: "nb-NO".to_string(),
        }
    }

    fn mount(lookup: &Arc<Lookup>) -> TooltipHandle {
        TooltipHandle::mount(
            "Hunden",
            services(lookup.clone(), Arc::new(Speech::default()), Arc::new(Vocabulary::default())),
        )
    }

    fn enter() -> TooltipInput {
        TooltipInput::PointerEnter {
            anchor: Rect::new(180.0, 400.0, 40.0, 20.0),
            viewport: Size::new(400.0, 800.0),
        }
    }

    async fn elapse(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_before_the_show_delay_fetches_nothing() {
        let lookup = Lookup::new(0, true);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(100).await;
        assert_eq!(tooltip.state().visibility, Visibility::PendingShow);

        tooltip.send(TooltipInput::PointerLeave);
        elapse(1000).await;

        assert_eq!(tooltip.state().visibility, Visibility::Hidden);
        assert_eq!(tooltip.state().load, LoadState::Idle);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn show_fetches_exactly_once_while_loading() {
        let lookup = Lookup::new(1000, true);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(350).await;
        let state = tooltip.state();
        assert_eq!(state.visibility, Visibility::Shown);
        assert_eq!(state.load, LoadState::Loading);

        tooltip.send(enter());
        tooltip.send(TooltipInput::TouchStart {
            anchor: Rect::new(0.0, 0.0, 10.0, 10.0),
            viewport: Size::new(400.0, 800.0),
        });
        elapse(100).await;
        assert_eq!(lookup.calls(), 1);

        elapse(1000).await;
        let state = tooltip.state();
        assert_eq!(state.load, LoadState::Loaded);
        assert_eq!(state.translation(), Some("the dog"));
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shown_overlay_is_placed_above_its_anchor() {
        let lookup = Lookup::new(0, true);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(350).await;

        let state = tooltip.state();
        // 260x150 default overlay centered on x=200, 8px above y=400
        assert_eq!(state.position, Point::new(70.0, 242.0));
        assert!(!state.below);

        tooltip.send(TooltipInput::OverlayMeasured(Size::new(200.0, 100.0)));
        elapse(1).await;
        assert_eq!(tooltip.state().position, Point::new(100.0, 292.0));
    }

    #[tokio::test(start_paused = true)]
    async fn reentering_during_hide_delay_keeps_the_overlay() {
        let lookup = Lookup::new(0, true);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(350).await;
        tooltip.send(TooltipInput::PointerLeave);
        elapse(200).await;
        assert_eq!(tooltip.state().visibility, Visibility::PendingHide);

        tooltip.send(enter());
        elapse(1000).await;
        let state = tooltip.state();
        assert_eq!(state.visibility, Visibility::Shown);
        assert_eq!(state.load, LoadState::Loaded);
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hidden_overlay_discards_data_and_refetches() {
        let lookup = Lookup::new(0, true);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(350).await;
        tooltip.send(TooltipInput::TouchEnd);
        elapse(600).await;

        let state = tooltip.state();
        assert_eq!(state.visibility, Visibility::Hidden);
        assert!(state.word_info.is_none());

        tooltip.send(enter());
        elapse(350).await;
        assert_eq!(tooltip.state().load, LoadState::Loaded);
        assert_eq!(lookup.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_skips_the_hide_delay() {
        let lookup = Lookup::new(0, true);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(350).await;
        tooltip.send(TooltipInput::Dismiss);
        elapse(1).await;

        assert_eq!(tooltip.state(), TooltipState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_lookup_shows_fallback_text() {
        let lookup = Lookup::new(10, false);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(400).await;

        let state = tooltip.state();
        assert_eq!(state.visibility, Visibility::Shown);
        assert_eq!(state.load, LoadState::Error);
        assert_eq!(state.translation(), Some("word: Hunden"));
    }

    #[tokio::test(start_paused = true)]
    async fn late_lookup_after_hide_is_ignored() {
        let lookup = Lookup::new(2000, true);
        let tooltip = mount(&lookup);

        tooltip.send(enter());
        elapse(350).await;
        tooltip.send(TooltipInput::Dismiss);
        elapse(3000).await;

        let state = tooltip.state();
        assert_eq!(state.visibility, Visibility::Hidden);
        assert!(state.word_info.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_resets_state_and_ignores_late_lookup() {
        let lookup = Lookup::new(2000, true);
        let tooltip = mount(&lookup);
        let mut state = tooltip.subscribe();

        tooltip.send(enter());
        elapse(350).await;
        assert!(state.borrow_and_update().is_visible());

        tooltip.unmount().await;
        assert_eq!(*state.borrow(), TooltipState::default());

        elapse(3000).await;
        assert_eq!(*state.borrow(), TooltipState::default());
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_hides_synchronously() {
        let lookup = Lookup::new(0, true);
        let tooltip = mount(&lookup);
        let state = tooltip.subscribe();

        tooltip.send(enter());
        elapse(350).await;
        assert!(state.borrow().is_visible());

        drop(tooltip);
        assert_eq!(*state.borrow(), TooltipState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn listen_reports_failure_on_the_control() {
        let lookup = Lookup::new(0, true);
        let speech = Arc::new(Speech {
            fail: true,
            ..Speech::default()
        });
        let tooltip = TooltipHandle::mount(
            "Hunden",
            services(lookup, speech.clone(), Arc::new(Vocabulary::default())),
        );

        tooltip.send(TooltipInput::Listen);
        elapse(1).await;
        assert_eq!(speech.calls.load(Ordering::SeqCst), 0);

        tooltip.send(enter());
        elapse(350).await;
        tooltip.send(TooltipInput::Listen);
        elapse(1).await;
        assert_eq!(tooltip.state().listen, ListenState::Speaking);

        elapse(200).await;
        assert_eq!(tooltip.state().listen, ListenState::Failed);
        assert_eq!(speech.calls.load(Ordering::SeqCst), 1);
        assert_eq!(tooltip.state().visibility, Visibility::Shown);
    }

    #[tokio::test(start_paused = true)]
    async fn add_to_vocabulary_requires_loaded_data() {
        let lookup = Lookup::new(500, true);
        let vocabulary = Arc::new(Vocabulary::default());
        let tooltip = TooltipHandle::mount(
            "Hunden",
            services(lookup, Arc::new(Speech::default()), vocabulary.clone()),
        );

        tooltip.send(enter());
        elapse(350).await;
        tooltip.send(TooltipInput::AddToVocabulary);
        elapse(1).await;
        assert!(!tooltip.state().added);

        elapse(600).await;
        tooltip.send(TooltipInput::AddToVocabulary);
        tooltip.send(TooltipInput::AddToVocabulary);
        elapse(1).await;

        assert!(tooltip.state().added);
        let added = vocabulary.added.lock().unwrap().clone();
        assert_eq!(added.len(), 2);
        assert_eq!(
            added[0],
            ("hunden".to_string(), "the dog".to_string(), Some("Hunden sover.".to_string()))
        );
    }
}
