//! Edit and confirmation dialogs.
//!
//! Two dialog flavors back every moderation flow. [`EditDialog`] loads a
//! single record, accepts a draft, and hands the server's updated record
//! to an `on_save` hook so the owning list can patch itself in place.
//! [`ConfirmDialog`] guards destructive actions; it closes as soon as the
//! admin commits, never waiting for the action to finish.

use std::fmt;
use std::future::Future;

use thiserror::Error;

use crate::market::ApiError;

/// Errors from dialog interactions.
#[derive(Debug, Error)]
pub enum DialogError {
    /// A save or confirm was attempted with no dialog open.
    #[error("no dialog is open")]
    NotOpen,

    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Loads and updates the single record behind an [`EditDialog`].
pub trait DetailSource {
    /// Identifier type of the record.
    type Id: Clone + fmt::Display + Send + Sync;
    /// The record being edited.
    type Entity: Clone;
    /// The editable subset submitted on save.
    type Draft: Sync;

    /// Fetch the current record.
    fn fetch_one(&self, id: &Self::Id)
    -> impl Future<Output = Result<Self::Entity, ApiError>> + Send;

    /// Submit the draft and return the server's updated record.
    fn submit(
        &self,
        id: &Self::Id,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self::Entity, ApiError>> + Send;
}

/// State machine for a single-record edit dialog.
pub struct EditDialog<S: DetailSource> {
    source: S,
    open_id: Option<S::Id>,
    record: Option<S::Entity>,
    loading: bool,
    error: Option<String>,
    on_save: Option<Box<dyn FnMut(S::Entity) + Send>>,
}

impl<S: DetailSource> EditDialog<S> {
    /// A closed dialog over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            open_id: None,
            record: None,
            loading: false,
            error: None,
            on_save: None,
        }
    }

    /// Register the hook invoked with the server's record after each
    /// successful save. Lists use this to patch themselves in place.
    #[must_use]
    pub fn on_save(mut self, hook: impl FnMut(S::Entity) + Send + 'static) -> Self {
        self.on_save = Some(Box::new(hook));
        self
    }

    /// Open the dialog on `id` and load the record.
    ///
    /// The dialog is visible immediately; a load failure keeps it open
    /// with the error surfaced via [`error`](Self::error).
    pub async fn open(&mut self, id: S::Id) {
        self.open_id = Some(id.clone());
        self.record = None;
        self.error = None;
        self.loading = true;
        match self.source.fetch_one(&id).await {
            Ok(record) => self.record = Some(record),
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    /// Submit `draft` for the open record.
    ///
    /// On success the dialog closes, the `on_save` hook fires with the
    /// server's updated record, and that record is returned. On failure
    /// the dialog stays open with the error surfaced, and the error is
    /// also returned for the caller to act on.
    ///
    /// # Errors
    ///
    /// [`DialogError::NotOpen`] if no record is open, or the API error
    /// from the submission.
    pub async fn save(&mut self, draft: &S::Draft) -> Result<S::Entity, DialogError> {
        let id = self.open_id.clone().ok_or(DialogError::NotOpen)?;
        self.loading = true;
        let outcome = self.source.submit(&id, draft).await;
        self.loading = false;
        match outcome {
            Ok(updated) => {
                if let Some(hook) = &mut self.on_save {
                    hook(updated.clone());
                }
                self.close();
                Ok(updated)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Close the dialog, dropping any loaded record and error.
    pub fn close(&mut self) {
        self.open_id = None;
        self.record = None;
        self.error = None;
    }

    /// Whether the dialog is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open_id.is_some()
    }

    /// The loaded record, once the open fetch has succeeded.
    #[must_use]
    pub const fn record(&self) -> Option<&S::Entity> {
        self.record.as_ref()
    }

    /// Whether a load or save is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last load or save error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<S: DetailSource + fmt::Debug> fmt::Debug for EditDialog<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditDialog")
            .field("source", &self.source)
            .field("open_id", &self.open_id.as_ref().map(ToString::to_string))
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// What a confirmation dialog is asking about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    /// Identifier of the record the action applies to.
    pub id: String,
    /// One-line description shown in the prompt.
    pub summary: String,
}

impl ActionTarget {
    /// A target for `id`, described by `summary`.
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
        }
    }
}

/// State machine for a destructive-action confirmation prompt.
///
/// The target is taken out of the dialog before the action runs, so the
/// prompt is already closed however the action ends. A second click while
/// the action is in flight has nothing left to act on.
#[derive(Debug, Default)]
pub struct ConfirmDialog {
    target: Option<ActionTarget>,
    busy: bool,
}

impl ConfirmDialog {
    /// A closed prompt.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target: None,
            busy: false,
        }
    }

    /// Open the prompt on `target`. Ignored while an action is in flight.
    pub fn open(&mut self, target: ActionTarget) {
        if !self.busy {
            self.target = Some(target);
        }
    }

    /// Dismiss the prompt without acting. Ignored while an action is in
    /// flight.
    pub fn cancel(&mut self) {
        if !self.busy {
            self.target = None;
        }
    }

    /// Run `action` against the open target.
    ///
    /// # Errors
    ///
    /// [`DialogError::NotOpen`] if no target is open, or the API error
    /// from the action itself.
    pub async fn confirm<T, Fut>(
        &mut self,
        action: impl FnOnce(ActionTarget) -> Fut,
    ) -> Result<T, DialogError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let target = self.target.take().ok_or(DialogError::NotOpen)?;
        self.busy = true;
        let outcome = action(target).await;
        self.busy = false;
        outcome.map_err(Into::into)
    }

    /// The target awaiting confirmation.
    #[must_use]
    pub const fn target(&self) -> Option<&ActionTarget> {
        self.target.as_ref()
    }

    /// Whether the prompt is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Whether a confirmed action is still running.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the confirm button should be enabled.
    #[must_use]
    pub const fn can_confirm(&self) -> bool {
        self.target.is_some() && !self.busy
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
        body: String,
    }

    /// Echoes drafts back as saved records; errors on demand.
    #[derive(Debug)]
    struct Echo {
        fail_submit: bool,
    }

    impl DetailSource for Echo {
        type Id = u32;
        type Entity = Note;
        type Draft = String;

        async fn fetch_one(&self, id: &u32) -> Result<Note, ApiError> {
            if *id == 404 {
                return Err(ApiError::NotFound(format!("/notes/{id}")));
            }
            Ok(Note {
                id: *id,
                body: "original".to_owned(),
            })
        }

        async fn submit(&self, id: &u32, draft: &String) -> Result<Note, ApiError> {
            if self.fail_submit {
                return Err(ApiError::Api {
                    status: 422,
                    message: "rejected".to_owned(),
                });
            }
            Ok(Note {
                id: *id,
                body: draft.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_open_loads_record() {
        let mut dialog = EditDialog::new(Echo { fail_submit: false });
        dialog.open(7).await;
        assert!(dialog.is_open());
        assert_eq!(dialog.record().unwrap().body, "original");
        assert!(dialog.error().is_none());
    }

    #[tokio::test]
    async fn test_open_failure_keeps_dialog_open() {
        let mut dialog = EditDialog::new(Echo { fail_submit: false });
        dialog.open(404).await;
        assert!(dialog.is_open());
        assert!(dialog.record().is_none());
        assert!(dialog.error().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_save_fires_hook_and_closes() {
        let saved = std::sync::Arc::new(Mutex::new(None));
        let sink = std::sync::Arc::clone(&saved);

        let mut dialog = EditDialog::new(Echo { fail_submit: false })
            .on_save(move |note: Note| *sink.lock().unwrap() = Some(note));
        dialog.open(7).await;

        let updated = dialog.save(&"edited".to_owned()).await.unwrap();
        assert_eq!(updated.body, "edited");
        assert_eq!(saved.lock().unwrap().as_ref().unwrap().body, "edited");
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_dialog_open() {
        let mut dialog = EditDialog::new(Echo { fail_submit: true });
        dialog.open(7).await;

        let result = dialog.save(&"edited".to_owned()).await;
        assert!(matches!(result, Err(DialogError::Api(_))));
        assert!(dialog.is_open());
        assert!(dialog.error().unwrap().contains("rejected"));
    }

    #[tokio::test]
    async fn test_save_without_open_dialog() {
        let mut dialog = EditDialog::new(Echo { fail_submit: false });
        let result = dialog.save(&"edited".to_owned()).await;
        assert!(matches!(result, Err(DialogError::NotOpen)));
    }

    #[tokio::test]
    async fn test_confirm_hands_target_to_action() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ActionTarget::new("ORD001", "Cancel order ORD001"));
        assert!(dialog.can_confirm());

        // The action owns the target, so the prompt is closed before the
        // action even starts.
        let result = dialog
            .confirm(|target| async move {
                assert_eq!(target.id, "ORD001");
                Ok(target.id.len())
            })
            .await;
        assert_eq!(result.unwrap(), 6);
        assert!(!dialog.is_open());
        assert!(!dialog.is_busy());
    }

    #[tokio::test]
    async fn test_confirm_closes_even_when_action_fails() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ActionTarget::new("ST010", "Reject store ST010"));

        let result: Result<(), DialogError> = dialog
            .confirm(|_| async {
                Err(ApiError::Api {
                    status: 409,
                    message: "store not pending".to_owned(),
                })
            })
            .await;
        assert!(result.is_err());
        assert!(!dialog.is_open(), "prompt must close on failure too");
        assert!(!dialog.is_busy());
    }

    #[tokio::test]
    async fn test_confirm_without_target() {
        let mut dialog = ConfirmDialog::new();
        let result: Result<(), DialogError> = dialog.confirm(|_| async { Ok(()) }).await;
        assert!(matches!(result, Err(DialogError::NotOpen)));
    }

    #[tokio::test]
    async fn test_reopen_replaces_target() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ActionTarget::new("A", "first"));
        dialog.open(ActionTarget::new("B", "second"));
        assert_eq!(dialog.target().unwrap().id, "B");

        dialog.cancel();
        assert!(!dialog.is_open());
        assert!(!dialog.can_confirm());
    }

    #[tokio::test]
    async fn test_double_confirm_second_sees_not_open() {
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        let mut dialog = ConfirmDialog::new();
        dialog.open(ActionTarget::new("REQ007", "Approve request"));

        let counter = std::sync::Arc::clone(&calls);
        let first: Result<(), DialogError> = dialog
            .confirm(|_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            })
            .await;
        assert!(first.is_ok());

        let counter = std::sync::Arc::clone(&calls);
        let second: Result<(), DialogError> = dialog
            .confirm(|_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            })
            .await;
        assert!(matches!(second, Err(DialogError::NotOpen)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
