//! Delivery pipeline
//!
//! Owns the delivery mode, the bounded event queue, the single drain
//! thread, the recycling pool, and the shared delivery procedure. The
//! pipeline starts synchronous: `submit` delivers inline on the caller's
//! thread. `start` switches to buffered mode, where producers enqueue
//! without blocking and one drain thread delivers in order. On a full
//! queue the producer falls back to inline delivery — buffered events are
//! never dropped. `stop` drains everything enqueued before it returns.

use super::error::Result;
use super::event::Event;
use super::formatter::Formatter;
use super::hooks::LevelHooks;
use super::metrics::LoggerMetrics;
use super::pool::EventPool;
use crate::sinks::Sink;
use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;

/// Default bounded queue capacity for buffered delivery.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

const MODE_SYNCHRONOUS: u8 = 0;
const MODE_RUNNING: u8 = 1;
const MODE_STOPPED: u8 = 2;

enum Command {
    Stop,
}

/// Configuration snapshot taken per delivery under a read lock: hooks fire
/// first, then the formatter runs, then the sink is written.
pub(crate) struct DeliveryConfig {
    pub(crate) hooks: LevelHooks,
    pub(crate) formatter: Box<dyn Formatter>,
    pub(crate) sink: Box<dyn Sink>,
}

struct PipeChannels {
    events: Sender<Box<Event>>,
    control: Sender<Command>,
    done: Receiver<()>,
    drain: Option<thread::JoinHandle<()>>,
}

enum Enqueue {
    Queued,
    Full(Box<Event>),
    Closed(Box<Event>),
}

pub(crate) struct Pipeline {
    mode: AtomicU8,
    channels: RwLock<Option<PipeChannels>>,
    config: Arc<RwLock<DeliveryConfig>>,
    pool: Arc<EventPool>,
    metrics: Arc<LoggerMetrics>,
}

impl Pipeline {
    pub(crate) fn new(config: DeliveryConfig) -> Self {
        Self {
            mode: AtomicU8::new(MODE_SYNCHRONOUS),
            channels: RwLock::new(None),
            config: Arc::new(RwLock::new(config)),
            pool: Arc::new(EventPool::new()),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub(crate) fn config(&self) -> &RwLock<DeliveryConfig> {
        &self.config
    }

    pub(crate) fn pool(&self) -> &EventPool {
        &self.pool
    }

    pub(crate) fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Switch to buffered delivery. Legal from the synchronous or stopped
    /// state; a no-op while already running. Allocates a fresh queue and
    /// spawns the single drain thread.
    pub(crate) fn start(&self, capacity: usize) {
        if self
            .mode
            .compare_exchange(
                MODE_SYNCHRONOUS,
                MODE_RUNNING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
            && self
                .mode
                .compare_exchange(
                    MODE_STOPPED,
                    MODE_RUNNING,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_err()
        {
            return;
        }

        let (event_tx, event_rx) = bounded(capacity.max(1));
        let (control_tx, control_rx) = bounded(1);
        let (done_tx, done_rx) = bounded(1);

        let config = Arc::clone(&self.config);
        let pool = Arc::clone(&self.pool);
        let metrics = Arc::clone(&self.metrics);

        let spawned = thread::Builder::new()
            .name("logflow-drain".to_string())
            .spawn(move || drain_loop(event_rx, control_rx, done_tx, &config, &pool, &metrics));

        match spawned {
            Ok(handle) => {
                *self.channels.write() = Some(PipeChannels {
                    events: event_tx,
                    control: control_tx,
                    done: done_rx,
                    drain: Some(handle),
                });
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] failed to spawn drain thread: {}", e);
                self.mode.store(MODE_SYNCHRONOUS, Ordering::Release);
            }
        }
    }

    /// Stop buffered delivery. Blocks until the drain thread has delivered
    /// every event enqueued before the stop request, then joins it. A
    /// no-op unless running.
    pub(crate) fn stop(&self) {
        if self
            .mode
            .compare_exchange(
                MODE_RUNNING,
                MODE_STOPPED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return;
        }

        let channels = self.channels.write().take();
        if let Some(mut channels) = channels {
            let _ = channels.control.send(Command::Stop);
            let _ = channels.done.recv();
            if let Some(handle) = channels.drain.take() {
                let _ = handle.join();
            }
        }
    }

    /// Accept a committed event. Synchronous mode delivers inline; running
    /// mode enqueues without blocking, falling back to inline delivery on
    /// a full queue; a stopped pipeline recycles the event and loses the
    /// message.
    pub(crate) fn submit(&self, event: Box<Event>) {
        match self.mode.load(Ordering::Acquire) {
            MODE_RUNNING => match self.try_enqueue(event) {
                Enqueue::Queued => {}
                Enqueue::Full(event) => self.deliver(event),
                Enqueue::Closed(event) => self.discard(event),
            },
            MODE_STOPPED => self.discard(event),
            _ => self.deliver(event),
        }
    }

    fn try_enqueue(&self, event: Box<Event>) -> Enqueue {
        let guard = self.channels.read();
        match guard.as_ref() {
            Some(channels) => match channels.events.try_send(event) {
                Ok(()) => Enqueue::Queued,
                Err(TrySendError::Full(event)) => {
                    self.metrics.record_queue_full();
                    Enqueue::Full(event)
                }
                Err(TrySendError::Disconnected(event)) => Enqueue::Closed(event),
            },
            // start() won the mode CAS but has not installed the queue yet
            None => Enqueue::Full(event),
        }
    }

    pub(crate) fn deliver(&self, event: Box<Event>) {
        deliver_event(&self.config, &self.pool, &self.metrics, event);
    }

    fn discard(&self, event: Box<Event>) {
        self.metrics.record_stopped_drop();
        self.pool.put(event);
    }

    pub(crate) fn flush(&self) -> Result<()> {
        self.config.read().sink.flush()
    }
}

/// The shared delivery procedure, one atomic unit per event: fire hooks,
/// format, recycle the event, write to the sink. Failures go to stderr
/// and the metrics counters, never to the caller.
fn deliver_event(
    config: &RwLock<DeliveryConfig>,
    pool: &EventPool,
    metrics: &LoggerMetrics,
    mut event: Box<Event>,
) {
    let config = config.read();

    if let Err(e) = config.hooks.fire(event.level, &mut event) {
        metrics.record_hook_failure();
        eprintln!("[LOGGER ERROR] failed to fire hook: {}", e);
    }

    let formatted = config.formatter.format(&event);
    // Recycle before the sink write so a slow sink never delays reuse
    pool.put(event);

    let bytes = match formatted {
        Ok(bytes) => bytes,
        Err(e) => {
            metrics.record_format_failure();
            eprintln!("[LOGGER ERROR] failed to format event: {}", e);
            return;
        }
    };

    if let Err(e) = config.sink.write(&bytes) {
        metrics.record_sink_failure();
        eprintln!(
            "[LOGGER ERROR] failed to write to sink '{}': {}",
            config.sink.name(),
            e
        );
    } else {
        metrics.record_delivered();
    }
}

/// The single drain routine. Delivers queued events in order until a stop
/// command arrives, then performs a final synchronous sweep of the queue,
/// confirms completion, and exits.
fn drain_loop(
    events: Receiver<Box<Event>>,
    control: Receiver<Command>,
    done: Sender<()>,
    config: &RwLock<DeliveryConfig>,
    pool: &EventPool,
    metrics: &LoggerMetrics,
) {
    loop {
        select! {
            recv(events) -> msg => match msg {
                Ok(event) => deliver_event(config, pool, metrics, event),
                // All senders gone and the queue is empty
                Err(_) => break,
            },
            recv(control) -> msg => {
                match msg {
                    Ok(Command::Stop) | Err(_) => {}
                }
                while let Ok(event) = events.try_recv() {
                    deliver_event(config, pool, metrics, event);
                }
                let _ = done.send(());
                break;
            }
        }
    }
}
