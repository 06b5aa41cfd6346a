//! # Flow Controller
//!
//! Drives one verification pipeline per submission: digest the identity,
//! look it up, and — when a certificate is registered — fetch and stamp
//! it. All state lives behind one mutex and changes only through the
//! transition table, tagged with a generation number so a superseded
//! submission can never publish into the snapshot.
//!
//! Within a single submission the two network stages run strictly in
//! sequence (fetch starts only after the lookup resolves) and the
//! watermark computation is synchronous; no lock is held across an
//! await.

use certmark_core::{Digest, DocumentId, Identity};
use parking_lot::Mutex;

use crate::error::FlowError;
use crate::state::{FlowEvent, FlowState};
use crate::traits::{DocumentSource, Registry, Stamper};

/// What the presentation boundary sees: the current state plus whatever
/// artifacts the pipeline has produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    /// Current flow state.
    pub state: FlowState,
    /// Digest of the last submitted identity, if any.
    pub digest: Option<Digest>,
    /// Identifier the registry resolved, sentinel included.
    pub record: Option<DocumentId>,
    /// Watermarked document bytes, present only in `Rendered`.
    pub rendered: Option<Vec<u8>>,
    /// Descriptive message of the failure that led to `Error`.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct FlowInner {
    state: FlowState,
    digest: Option<Digest>,
    record: Option<DocumentId>,
    rendered: Option<Vec<u8>>,
    error: Option<FlowError>,
    generation: u64,
}

impl FlowInner {
    fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            state: self.state,
            digest: self.digest,
            record: self.record.clone(),
            rendered: self.rendered.clone(),
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// The finite-state orchestrator of the verification pipeline.
///
/// Generic over its collaborators; see [`crate::traits`] for the
/// production implementations.
#[derive(Debug)]
pub struct FlowController<R, S, W> {
    registry: R,
    source: S,
    stamper: W,
    inner: Mutex<FlowInner>,
}

impl<R, S, W> FlowController<R, S, W>
where
    R: Registry,
    S: DocumentSource,
    W: Stamper,
{
    /// Build a controller in `Idle` over an established registry
    /// session, a document source, and a stamper.
    pub fn new(registry: R, source: S, stamper: W) -> Self {
        Self {
            registry,
            source,
            stamper,
            inner: Mutex::new(FlowInner::default()),
        }
    }

    /// The current state and artifacts.
    pub fn snapshot(&self) -> FlowSnapshot {
        self.inner.lock().snapshot()
    }

    /// Return to `Idle`, clearing digest, record, rendered bytes, and
    /// error. Reachable from every state. Also supersedes any in-flight
    /// submission: its completions will arrive stale and be discarded.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        let generation = inner.generation + 1;
        *inner = FlowInner {
            generation,
            ..FlowInner::default()
        };
        tracing::debug!(generation, "flow reset");
    }

    /// Run one verification for `identity` and return the resulting
    /// snapshot.
    ///
    /// An empty identity is a no-op: no digest, no lookup, state
    /// unchanged. Otherwise the previous result is cleared, the digest
    /// is recomputed fresh (no cross-submission caching), and the
    /// pipeline runs to a terminal state. If a newer submission or a
    /// reset supersedes this one mid-flight, its completions are
    /// silently discarded and the snapshot of the newer generation wins.
    pub async fn submit(&self, identity: &Identity) -> FlowSnapshot {
        if identity.is_empty() {
            tracing::debug!("empty identity submitted; ignoring");
            return self.snapshot();
        }

        let digest = Digest::of_identity(identity);
        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.state = inner.state.apply(FlowEvent::Submit { empty: false });
            inner.digest = Some(digest);
            inner.record = None;
            inner.rendered = None;
            inner.error = None;
            tracing::info!(generation = inner.generation, digest = %digest, "verification submitted");
            inner.generation
        };

        let record = match self.registry.lookup(&digest).await {
            Ok(record) => record,
            Err(e) => {
                self.fail(generation, FlowError::RegistryCallFailed(e));
                return self.snapshot();
            }
        };

        if record.is_sentinel() {
            self.apply(generation, FlowEvent::LookupResolved { sentinel: true }, |inner| {
                inner.record = Some(record.clone());
            });
            return self.snapshot();
        }

        let live = self.apply(
            generation,
            FlowEvent::LookupResolved { sentinel: false },
            |inner| inner.record = Some(record.clone()),
        );
        if !live {
            return self.snapshot();
        }

        let raw = match self.source.fetch(&record).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.fail(generation, FlowError::DocumentFetchFailed(e));
                return self.snapshot();
            }
        };

        let stamped = match self.stamper.stamp(&raw, record.as_str()) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.fail(generation, FlowError::WatermarkFailed(e));
                return self.snapshot();
            }
        };

        self.apply(generation, FlowEvent::FetchCompleted, |inner| {
            inner.rendered = Some(stamped);
        });
        self.snapshot()
    }

    /// Apply an event for a given generation. Returns false — and
    /// changes nothing — when the generation has been superseded.
    fn apply(
        &self,
        generation: u64,
        event: FlowEvent,
        update: impl FnOnce(&mut FlowInner),
    ) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            tracing::debug!(
                stale = generation,
                current = inner.generation,
                ?event,
                "discarding stale completion"
            );
            return false;
        }
        inner.state = inner.state.apply(event);
        update(&mut inner);
        true
    }

    fn fail(&self, generation: u64, error: FlowError) {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            tracing::debug!(stale = generation, %error, "discarding stale failure");
            return;
        }
        tracing::warn!(%error, "verification flow failed");
        inner.state = inner.state.apply(FlowEvent::OperationFailed);
        inner.error = Some(error);
    }
}
