//! Async runtime driving a [`SearchSelect`] against a [`LookupSource`].
//!
//! The runtime is a single tokio task that owns the field state. Commands
//! arrive through a [`SearchSelectHandle`]; debounce timers, searches and
//! lookups-by-id run on spawned tasks that report back over an internal
//! channel. Superseded tasks are cancelled as soon as the state machine asks
//! for it, and the generation check in [`SearchSelect`] drops anything that
//! slips through.
//!
//! The runtime stops when every handle has been dropped.

use std::future::Future;
use std::sync::Arc;

use crm_lookup::LookupSource;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::SearchSelectConfig;
use crate::error::Closed;
use crate::field::{FieldChange, FieldProps};
use crate::message::{Effect, Message};
use crate::select::SearchSelect;
use crate::view::Snapshot;

/// Starts a search-select field on the current tokio runtime.
///
/// `on_change` is the parent's change callback. It runs on the runtime task,
/// once per effective edit, pick or clear, and never for prop updates.
///
/// Returns the handle used to drive the field and the runtime's join handle.
pub fn spawn_search_select<S, F>(
    source: S,
    props: FieldProps,
    config: SearchSelectConfig,
    on_change: F,
) -> (SearchSelectHandle, JoinHandle<()>)
where
    S: LookupSource,
    F: FnMut(&FieldChange) + Send + 'static,
{
    let (field, initial) = SearchSelect::new(props, config);
    let (snapshot_tx, snapshot_rx) = watch::channel(field.snapshot());
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (results_tx, results_rx) = mpsc::unbounded_channel();

    let mut runtime = Runtime {
        field,
        source: Arc::new(source),
        on_change,
        results: results_tx,
        snapshot: snapshot_tx,
        pending: None,
        resolving: None,
    };

    let task = tokio::spawn(async move {
        runtime.apply(initial);
        runtime.publish();
        runtime.run(commands_rx, results_rx).await;
    });

    let handle = SearchSelectHandle {
        commands: commands_tx,
        snapshot: snapshot_rx,
    };
    (handle, task)
}

// =============================================================================
// Handle
// =============================================================================

/// Cloneable handle to a running search-select field.
#[derive(Debug, Clone)]
pub struct SearchSelectHandle {
    commands: mpsc::UnboundedSender<Message>,
    snapshot: watch::Receiver<Snapshot>,
}

impl SearchSelectHandle {
    /// Sends a raw message to the field.
    pub fn send(&self, message: Message) -> Result<(), Closed> {
        self.commands.send(message).map_err(|_| Closed)
    }

    /// The user typed; `text` is the full new input value.
    pub fn input(&self, text: impl Into<String>) -> Result<(), Closed> {
        self.send(Message::InputChanged(text.into()))
    }

    /// The clear button was pressed.
    pub fn clear(&self) -> Result<(), Closed> {
        self.send(Message::Cleared)
    }

    /// The suggestion at `index` was clicked.
    pub fn pick(&self, index: usize) -> Result<(), Closed> {
        self.send(Message::SuggestionPicked(index))
    }

    /// The input gained focus.
    pub fn focus(&self) -> Result<(), Closed> {
        self.send(Message::FocusGained)
    }

    /// The input lost focus.
    pub fn blur(&self) -> Result<(), Closed> {
        self.send(Message::FocusLost)
    }

    /// Moves the highlight down, wrapping at the end.
    pub fn highlight_next(&self) -> Result<(), Closed> {
        self.send(Message::HighlightNext)
    }

    /// Moves the highlight up, wrapping at the start.
    pub fn highlight_previous(&self) -> Result<(), Closed> {
        self.send(Message::HighlightPrevious)
    }

    /// Picks the highlighted suggestion.
    pub fn confirm(&self) -> Result<(), Closed> {
        self.send(Message::ConfirmHighlighted)
    }

    /// Closes the list without changing the value.
    pub fn dismiss(&self) -> Result<(), Closed> {
        self.send(Message::Dismiss)
    }

    /// Pushes new props from the parent form.
    pub fn set_props(&self, props: FieldProps) -> Result<(), Closed> {
        self.send(Message::PropsChanged(props))
    }

    /// Resets the field to empty, as when the parent form resets.
    pub fn reset(&self) -> Result<(), Closed> {
        self.send(Message::Reset)
    }

    /// Latest published view model.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// A receiver notified whenever the view model changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.clone()
    }

    /// Waits until the view model satisfies `predicate`, then returns it.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&Snapshot) -> bool,
    ) -> Result<Snapshot, Closed> {
        self.snapshot
            .wait_for(predicate)
            .await
            .map(|snapshot| Snapshot::clone(&snapshot))
            .map_err(|_| Closed)
    }

    /// Whether the runtime has stopped.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

// =============================================================================
// Runtime task
// =============================================================================

/// A spawned background task that can be cancelled.
struct PendingTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PendingTask {
    fn cancel(self) {
        self.token.cancel();
        self.handle.abort();
    }
}

struct Runtime<S, F> {
    field: SearchSelect,
    source: Arc<S>,
    on_change: F,
    results: mpsc::UnboundedSender<Message>,
    snapshot: watch::Sender<Snapshot>,
    /// Debounce timer or search for the current text.
    pending: Option<PendingTask>,
    /// Lookup-by-id for the selected identifier.
    resolving: Option<PendingTask>,
}

impl<S, F> Runtime<S, F>
where
    S: LookupSource,
    F: FnMut(&FieldChange) + Send + 'static,
{
    async fn run(
        &mut self,
        mut commands: mpsc::UnboundedReceiver<Message>,
        mut results: mpsc::UnboundedReceiver<Message>,
    ) {
        loop {
            let message = tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(message) => message,
                    None => break,
                },
                Some(result) = results.recv() => result,
            };

            let effects = self.field.update(message);
            self.apply(effects);
            self.publish();
        }

        debug!("All handles dropped; stopping search-select runtime");
        self.cancel_all();
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            trace!(?effect, "Applying effect");
            match effect {
                Effect::StartDebounce { generation, delay } => {
                    let task = self.spawn(async move {
                        tokio::time::sleep(delay).await;
                        Message::DebounceElapsed { generation }
                    });
                    replace(&mut self.pending, task);
                }
                Effect::Search { generation, query } => {
                    let source = Arc::clone(&self.source);
                    let task = self.spawn(async move {
                        debug!(generation, %query, "Searching candidates");
                        let result = source.search(&query).await;
                        Message::SearchCompleted { generation, result }
                    });
                    replace(&mut self.pending, task);
                }
                Effect::Resolve { ticket, id } => {
                    let source = Arc::clone(&self.source);
                    let task = self.spawn(async move {
                        let result = source.fetch_by_id(&id).await;
                        Message::ResolveCompleted { ticket, result }
                    });
                    replace(&mut self.resolving, task);
                }
                Effect::CancelPending => {
                    if let Some(task) = self.pending.take() {
                        task.cancel();
                    }
                }
                Effect::Notify(change) => (self.on_change)(&change),
            }
        }
    }

    fn spawn<Fut>(&self, work: Fut) -> PendingTask
    where
        Fut: Future<Output = Message> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let results = self.results.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                message = work => {
                    // The runtime may already be gone.
                    let _ = results.send(message);
                }
            }
        });

        PendingTask { token, handle }
    }

    fn publish(&self) {
        let snapshot = self.field.snapshot();
        self.snapshot.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    fn cancel_all(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
        if let Some(task) = self.resolving.take() {
            task.cancel();
        }
    }
}

fn replace(slot: &mut Option<PendingTask>, task: PendingTask) {
    if let Some(previous) = slot.replace(task) {
        previous.cancel();
    }
}
