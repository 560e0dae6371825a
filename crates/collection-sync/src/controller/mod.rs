//! Collection Sync Controller
//!
//! Mediates between a form/table view and one remote collection. The
//! controller owns the client snapshot, the edit session and the form
//! values; every successful mutation is followed by a full reload instead
//! of patching the snapshot locally.
//!
//! State lives behind `RefCell`s and is never borrowed across an `.await`,
//! so overlapping calls on the UI event loop are safe. Overlapping loads
//! are ordered by [`LoadGate`]; overlapping mutations are refused with
//! [`SyncError::Busy`].

mod events;
mod session;
mod snapshot;


use std::cell::RefCell;
use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT;
use crate::domain::{Draft, EntitySchema, FieldErrors, FormValues, Resource};
use crate::error::{RequestError, SyncError, SyncResult};
use crate::repository::RemoteCollection;
use crate::timeout::with_timeout;

use events::Emitter;
use snapshot::LoadGate;

pub use events::{ListenerId, SyncEvent};
pub use session::SessionState;
pub use snapshot::{Row, Snapshot};

/// Delete prompt for an item that is not in the snapshot
pub const DELETE_PROMPT: &str = "Are you sure?";

/// Delete prompt naming the item
pub fn delete_prompt(label: &str) -> String {
    format!("Are you sure to delete [{label}]?")
}

/// Yes/no question asked before a destructive call
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ConfirmPrompt for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { len: usize },
    /// A newer load already settled; this response was discarded
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    /// The prompt was declined and no request was issued
    Declined,
}

/// Form values bound to the view plus their inline errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
}

/// Dismissible failure message for the view
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub retryable: bool,
}

impl Notice {
    fn from_error(action: &str, err: &SyncError) -> Self {
        let retryable = err.is_retryable();
        let message = if err.is_rejected_by_server() {
            format!("Could not {action}: {err}. Your changes are kept, check them and try again.")
        } else if retryable {
            format!("Could not {action}: {err}. Your changes are kept, please try again.")
        } else {
            format!("Could not {action}: {err}")
        };
        Self { message, retryable }
    }
}

pub struct CollectionController<T: Resource, R> {
    remote: R,
    timeout: Duration,
    snapshot: RefCell<Snapshot<T>>,
    gate: RefCell<LoadGate>,
    load_error: RefCell<Option<RequestError>>,
    session: RefCell<SessionState<T>>,
    form: RefCell<FormState>,
    notice: RefCell<Option<Notice>>,
    events: Emitter<SyncEvent>,
}

impl<T: Resource, R: RemoteCollection<T>> CollectionController<T, R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            timeout: DEFAULT_TIMEOUT,
            snapshot: RefCell::new(Snapshot::default()),
            gate: RefCell::new(LoadGate::default()),
            load_error: RefCell::new(None),
            session: RefCell::new(SessionState::Idle),
            form: RefCell::new(FormState {
                values: T::schema().defaults(),
                errors: FieldErrors::default(),
            }),
            notice: RefCell::new(None),
            events: Emitter::new(),
        }
    }

    /// Bound applied to every remote call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn schema(&self) -> &'static EntitySchema {
        T::schema()
    }

    // ========================
    // Observers
    // ========================

    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    pub fn session(&self) -> SessionState<T> {
        self.session.borrow().clone()
    }

    pub fn editing(&self) -> Option<T> {
        self.session.borrow().editing().cloned()
    }

    pub fn is_submitting(&self) -> bool {
        self.session.borrow().is_submitting()
    }

    pub fn is_loading(&self) -> bool {
        self.gate.borrow().is_loading()
    }

    /// Error of the most recent settled load, cleared by the next success
    pub fn load_error(&self) -> Option<RequestError> {
        self.load_error.borrow().clone()
    }

    pub fn form(&self) -> FormState {
        self.form.borrow().clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.borrow().clone()
    }

    pub fn on_change(&self, listener: impl Fn(&SyncEvent) + 'static) -> ListenerId {
        self.events.on(listener)
    }

    pub fn off(&self, id: ListenerId) {
        self.events.off(id);
    }

    // ========================
    // Snapshot
    // ========================

    /// Fetch the whole collection and replace the snapshot.
    ///
    /// A response is applied only if no later-issued load has settled
    /// first. On failure the current snapshot is kept and the error is
    /// available through [`Self::load_error`].
    pub async fn load(&self) -> SyncResult<LoadOutcome> {
        let seq = self.gate.borrow_mut().issue();
        self.events.emit(&SyncEvent::LoadStarted);

        let result = with_timeout(self.timeout, self.remote.list()).await;

        if !self.gate.borrow_mut().admit(seq) {
            log::warn!(
                "discarding stale {} list response (request #{})",
                T::schema().path,
                seq
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(items) => {
                let snapshot = Snapshot::build(items, seq);
                let len = snapshot.len();
                *self.snapshot.borrow_mut() = snapshot;
                *self.load_error.borrow_mut() = None;
                log::info!("{} snapshot #{} applied: {} items", T::schema().path, seq, len);
                self.events.emit(&SyncEvent::SnapshotReplaced { seq, len });
                Ok(LoadOutcome::Applied { len })
            }
            Err(err) => {
                log::warn!("{} list request #{} failed: {}", T::schema().path, seq, err);
                *self.load_error.borrow_mut() = Some(err.clone());
                self.events.emit(&SyncEvent::LoadFailed);
                Err(err.into())
            }
        }
    }

    /// Fetch a single item for a detail view; the snapshot is not touched.
    pub async fn fetch(&self, id: &str) -> SyncResult<T> {
        Ok(with_timeout(self.timeout, self.remote.get(id)).await?)
    }

    // ========================
    // Edit Session
    // ========================

    /// Start editing `item`, pre-populating the form with its values.
    pub fn begin_edit(&self, item: &T) -> SyncResult<()> {
        self.session.borrow_mut().begin_edit(item.clone())?;
        *self.form.borrow_mut() = FormState {
            values: item.to_form(),
            errors: FieldErrors::default(),
        };
        self.events.emit(&SyncEvent::SessionChanged);
        self.events.emit(&SyncEvent::FormChanged);
        Ok(())
    }

    /// Leave edit mode and reset the form to its defaults.
    pub fn cancel_edit(&self) -> SyncResult<()> {
        self.session.borrow_mut().cancel()?;
        self.reset_form();
        self.events.emit(&SyncEvent::SessionChanged);
        Ok(())
    }

    /// Update one form value. A pending inline error on that field is
    /// cleared until the next submit.
    pub fn set_field(&self, name: &str, value: impl Into<String>) {
        {
            let mut form = self.form.borrow_mut();
            form.values.set(name, value);
            form.errors.remove(name);
        }
        self.events.emit(&SyncEvent::FormChanged);
    }

    pub fn dismiss_notice(&self) {
        self.set_notice(None);
    }

    // ========================
    // Mutations
    // ========================

    /// Form submit handler: validate the form, then update the item being
    /// edited or create a new one.
    pub async fn submit(&self) -> SyncResult<()> {
        if self.is_submitting() {
            return Err(SyncError::Busy);
        }
        let values = self.form.borrow().values.clone();
        let draft = match T::Draft::from_form(&values) {
            Ok(draft) => draft,
            Err(errors) => {
                self.form.borrow_mut().errors = errors.clone();
                self.events.emit(&SyncEvent::FormChanged);
                return Err(SyncError::Validation(errors));
            }
        };

        let editing = self.session.borrow().editing().is_some();
        if editing {
            self.update(draft).await
        } else {
            self.create(draft).await
        }
    }

    /// `POST` a new item, then reload. No optimistic insert: the snapshot
    /// only changes once the reload settles.
    pub async fn create(&self, draft: T::Draft) -> SyncResult<()> {
        Self::validate(&draft)?;
        if let Some(id) = draft.id() {
            return Err(SyncError::UnexpectedIdentifier(id.to_string()));
        }

        self.start_submit()?;
        let result = with_timeout(self.timeout, self.remote.create(&draft)).await;
        self.finish_mutation("create", result.map(|_| ()), true).await
    }

    /// `PUT` the item being edited, then clear the session and reload.
    pub async fn update(&self, draft: T::Draft) -> SyncResult<()> {
        Self::validate(&draft)?;
        let found = draft.id().ok_or(SyncError::MissingIdentifier)?.to_string();
        {
            let session = self.session.borrow();
            if session.is_submitting() {
                return Err(SyncError::Busy);
            }
            let target = session.editing().ok_or(SyncError::NotEditing)?;
            if target.id() != found {
                return Err(SyncError::IdentifierMismatch {
                    expected: target.id().to_string(),
                    found,
                });
            }
        }

        self.start_submit()?;
        let result = with_timeout(self.timeout, self.remote.update(&draft)).await;
        self.finish_mutation("update", result.map(|_| ()), true).await
    }

    /// Ask `prompt` (naming the item when it is in the snapshot), then
    /// `DELETE` the item and reload.
    ///
    /// A failed delete is not retried. Deleting the item being edited ends
    /// the edit session; any other edit in progress is kept.
    pub async fn remove(&self, id: &str, prompt: &impl ConfirmPrompt) -> SyncResult<Removal> {
        if self.is_submitting() {
            return Err(SyncError::Busy);
        }
        let message = self
            .snapshot
            .borrow()
            .get(id)
            .map(|item| delete_prompt(item.label()))
            .unwrap_or_else(|| DELETE_PROMPT.to_string());
        if !prompt.confirm(&message) {
            log::debug!("delete of {} {} declined", T::schema().path, id);
            return Ok(Removal::Declined);
        }

        self.start_submit()?;
        let ends_session = self
            .session
            .borrow()
            .target()
            .map_or(false, |item| item.id() == id);
        let result = with_timeout(self.timeout, self.remote.delete(id)).await;
        self.finish_mutation("delete", result, ends_session).await?;
        Ok(Removal::Deleted)
    }

    // ========================
    // Internals
    // ========================

    fn validate(draft: &T::Draft) -> SyncResult<()> {
        T::schema()
            .validate(&draft.to_form())
            .map_err(SyncError::Validation)
    }

    fn start_submit(&self) -> SyncResult<()> {
        self.session.borrow_mut().start_submit()?;
        self.events.emit(&SyncEvent::SessionChanged);
        Ok(())
    }

    /// Settle a submission. Success clears the session (when `clear`) and
    /// reloads; failure restores the prior session and keeps the form.
    async fn finish_mutation(
        &self,
        action: &str,
        result: Result<(), RequestError>,
        clear: bool,
    ) -> SyncResult<()> {
        match result {
            Ok(()) => {
                log::info!("{} {} succeeded", T::schema().path, action);
                self.session.borrow_mut().finish(clear);
                if clear {
                    self.reset_form();
                }
                self.set_notice(None);
                self.events.emit(&SyncEvent::SessionChanged);

                // The mutation stands even if the reload fails; the load
                // error is kept for the view.
                if let Err(err) = self.load().await {
                    log::warn!("reload after {} {} failed: {}", T::schema().path, action, err);
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("{} {} failed: {}", T::schema().path, action, err);
                let err = SyncError::from(err);
                self.session.borrow_mut().finish(false);
                self.set_notice(Some(Notice::from_error(action, &err)));
                self.events.emit(&SyncEvent::SessionChanged);
                Err(err)
            }
        }
    }

    fn reset_form(&self) {
        *self.form.borrow_mut() = FormState {
            values: T::schema().defaults(),
            errors: FieldErrors::default(),
        };
        self.events.emit(&SyncEvent::FormChanged);
    }

    fn set_notice(&self, notice: Option<Notice>) {
        let changed = *self.notice.borrow() != notice;
        if changed {
            *self.notice.borrow_mut() = notice;
            self.events.emit(&SyncEvent::NoticeChanged);
        }
    }
}
