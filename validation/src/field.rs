use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::{sync::watch, task::AbortHandle};
use tracing::Instrument;

use crate::{UsernameSource, ValidationErrors, check};

#[derive(Debug)]
pub enum FieldStatus<E> {
    Idle,
    Pending,
    Valid,
    Invalid(ValidationErrors),
    Failed(Arc<E>),
}

impl<E> FieldStatus<E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, FieldStatus::Pending)
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            FieldStatus::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl<E> Clone for FieldStatus<E> {
    fn clone(&self) -> Self {
        match self {
            FieldStatus::Idle => FieldStatus::Idle,
            FieldStatus::Pending => FieldStatus::Pending,
            FieldStatus::Valid => FieldStatus::Valid,
            FieldStatus::Invalid(errors) => FieldStatus::Invalid(errors.clone()),
            FieldStatus::Failed(err) => FieldStatus::Failed(Arc::clone(err)),
        }
    }
}

/// What a [`UsernameField`] currently shows, and for which value.
#[derive(Debug)]
pub struct FieldState<E> {
    pub generation: u64,
    pub value: String,
    pub status: FieldStatus<E>,
}

impl<E> Clone for FieldState<E> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            value: self.value.clone(),
            status: self.status.clone(),
        }
    }
}

impl<E> Default for FieldState<E> {
    fn default() -> Self {
        Self {
            generation: 0,
            value: String::new(),
            status: FieldStatus::Idle,
        }
    }
}

/// A username input whose uniqueness is re-checked every time its value changes.
///
/// Each new value gets a new generation. A check only publishes its result if
/// the field is still on the generation the check was started for, and the
/// comparison happens under the channel's lock, so a superseded check can never
/// overwrite a newer state. Superseded checks are also aborted, which drops
/// their in-flight fetch.
///
/// Spawns onto the current tokio runtime.
pub struct UsernameField<S: UsernameSource> {
    source: Arc<S>,
    state: Arc<watch::Sender<FieldState<S::Error>>>,
    inflight: Mutex<Option<AbortHandle>>,
}

impl<S> UsernameField<S>
where
    S: UsernameSource + Send + Sync + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        let (state, _) = watch::channel(FieldState::default());

        Self {
            source,
            state: Arc::new(state),
            inflight: Mutex::new(None),
        }
    }

    pub fn state(&self) -> FieldState<S::Error> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FieldState<S::Error>> {
        self.state.subscribe()
    }

    /// Sets a new value and starts checking it. Returns the new generation.
    pub fn set_value(&self, value: impl Into<String>) -> u64 {
        let value = value.into();

        // bump, spawn and swap under one lock, or a slower caller could abort a newer check
        let mut inflight = self.lock_inflight();
        let generation = self.advance(value.clone(), FieldStatus::Pending);

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        let task = tokio::spawn(
            async move {
                let status = match check(&value, &*source).await {
                    Ok(None) => FieldStatus::Valid,
                    Ok(Some(conflict)) => FieldStatus::Invalid(conflict.into()),
                    Err(err) => FieldStatus::Failed(Arc::new(err)),
                };

                state.send_if_modified(|current| {
                    if current.generation != generation {
                        tracing::debug!(current = current.generation, "discarding stale result");
                        return false;
                    }

                    current.status = status;
                    true
                });
            }
            .instrument(tracing::debug_span!("username_field", generation)),
        );

        if let Some(previous) = inflight.replace(task.abort_handle()) {
            previous.abort();
        }

        generation
    }

    /// Abandons the pending check, if any, and returns the field to `Idle`.
    pub fn cancel(&self) -> u64 {
        let mut inflight = self.lock_inflight();

        if let Some(previous) = inflight.take() {
            previous.abort();
        }

        let value = self.state.borrow().value.clone();
        self.advance(value, FieldStatus::Idle)
    }

    /// Waits until the current generation has a result.
    pub async fn settled(&self) -> FieldState<S::Error> {
        let mut receiver = self.state.subscribe();

        match receiver.wait_for(|state| !state.status.is_pending()).await {
            Ok(state) => state.clone(),
            // the sender lives as long as `self`
            Err(_) => self.state(),
        }
    }

    fn advance(&self, value: String, status: FieldStatus<S::Error>) -> u64 {
        let mut generation = 0;

        self.state.send_modify(|state| {
            state.generation += 1;
            state.value = value;
            state.status = status;
            generation = state.generation;
        });

        generation
    }

    fn lock_inflight(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: UsernameSource> Drop for UsernameField<S> {
    fn drop(&mut self) {
        if let Some(task) = self
            .inflight
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}
