//! Lag-then-settle debouncing on a tokio timer.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use super::DebounceConfig;

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

struct Slot<T> {
    /// Latest value not yet emitted.
    pending: Option<T>,
    /// When the first still-pending value arrived.
    first_pending: Option<Instant>,
    /// Last value handed to the sink.
    settled: Option<T>,
    /// Bumped on every push, flush and cancel. A timer only settles the
    /// generation it was armed for.
    generation: u64,
}

impl<T> Slot<T> {
    fn take_pending(&mut self) -> Option<T> {
        self.generation = self.generation.wrapping_add(1);
        self.first_pending = None;
        self.pending.take()
    }
}

/// Forwards the latest pushed value to a sink once pushes stop for a quiet period.
///
/// Every value, including the first, waits a full quiet period. A push while
/// a timer is pending aborts that timer and starts a new one, so at most one
/// emission is ever outstanding. Dropping the gate cancels the pending
/// emission.
///
/// Timers are spawned on the ambient tokio runtime. Outside a runtime the
/// gate degrades to emitting every push immediately.
pub struct DebounceGate<T> {
    config: DebounceConfig,
    sink: Sink<T>,
    slot: Arc<Mutex<Slot<T>>>,
    timer: Option<JoinHandle<()>>,
}

impl<T> fmt::Debug for DebounceGate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceGate")
            .field("config", &self.config)
            .field("timer_armed", &self.timer.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> DebounceGate<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(config: DebounceConfig, sink: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            config,
            sink: Arc::new(sink),
            slot: Arc::new(Mutex::new(Slot {
                pending: None,
                first_pending: None,
                settled: None,
                generation: 0,
            })),
            timer: None,
        }
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Offer a new value, restarting the quiet period.
    pub fn push(&mut self, value: T) {
        if !self.config.enabled {
            emit(&self.slot, &self.sink, value);
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No tokio runtime, emitting without debounce");
            emit(&self.slot, &self.sink, value);
            return;
        };

        self.abort_timer();
        let now = Instant::now();
        let (deadline, generation) = {
            let mut slot = lock(&self.slot);
            slot.generation = slot.generation.wrapping_add(1);
            slot.pending = Some(value);
            let first = *slot.first_pending.get_or_insert(now);
            (self.config.deadline(first, now), slot.generation)
        };

        let slot = Arc::clone(&self.slot);
        let sink = Arc::clone(&self.sink);
        self.timer = Some(runtime.spawn(async move {
            sleep_until(deadline).await;
            settle(&slot, &sink, generation);
        }));
    }

    /// Emit the pending value now instead of waiting for the quiet period.
    ///
    /// Returns whether anything was pending.
    pub fn flush(&mut self) -> bool {
        self.abort_timer();
        let value = lock(&self.slot).take_pending();
        match value {
            Some(value) => {
                emit(&self.slot, &self.sink, value);
                true
            }
            None => false,
        }
    }

    /// Drop the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.abort_timer();
        lock(&self.slot).take_pending();
    }

    /// Whether a value is waiting to be emitted.
    pub fn is_pending(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }

    /// The last value handed to the sink.
    pub fn settled(&self) -> Option<T> {
        lock(&self.slot).settled.clone()
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for DebounceGate<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

fn lock<T>(slot: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Emit the pending value if no push, flush or cancel happened since the
/// timer for `generation` was armed.
fn settle<T: Clone>(slot: &Mutex<Slot<T>>, sink: &Sink<T>, generation: u64) {
    let value = {
        let mut slot = lock(slot);
        if slot.generation != generation {
            return;
        }
        slot.take_pending()
    };
    if let Some(value) = value {
        emit(slot, sink, value);
    }
}

fn emit<T: Clone>(slot: &Mutex<Slot<T>>, sink: &Sink<T>, value: T) {
    lock(slot).settled = Some(value.clone());
    sink(value);
}
