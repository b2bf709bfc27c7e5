//! Create/edit screen hosting a [`DynamicForm`].
//!
//! The screen owns what the engine does not: fetching the record to edit,
//! calling the backend with the submitted payload and reporting the outcome
//! through transient notifications. Navigation after success or cancel is
//! left to the caller.

use tracing::{debug, info, warn};

use crate::error::BackendError;
use crate::fields::FieldDescriptor;
use crate::form::{DynamicForm, FormEvent, Payload, Record};

/// Backend operations of one resource (members, products, suppliers...).
pub trait RecordBackend {
    /// Fetches a record by identifier.
    fn fetch(&mut self, id: &str) -> Result<Record, BackendError>;

    /// Creates a record from a submitted payload.
    fn create(&mut self, payload: &Payload) -> Result<Record, BackendError>;

    /// Updates a record from a submitted payload.
    fn update(&mut self, id: &str, payload: &Payload) -> Result<Record, BackendError>;
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message shown to the user (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Receives notifications.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Whether the screen creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenMode {
    Create,
    Edit(String),
}

/// Result of a user action on the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    /// The backend stored the record.
    Saved(Record),
    /// Validation blocked the submission; errors are now visible.
    Invalid,
    /// The backend rejected the request.
    Failed(BackendError),
    /// The user dismissed the form.
    Cancelled,
}

/// A create/edit screen for one resource.
pub struct CreateEditScreen<B, N> {
    resource: String,
    mode: ScreenMode,
    form: DynamicForm,
    backend: B,
    notifier: N,
}

impl<B: RecordBackend, N: Notifier> CreateEditScreen<B, N> {
    /// Creates a screen. `resource` is the human-readable name used in
    /// notifications, e.g. "Member".
    pub fn new(
        resource: impl Into<String>,
        mode: ScreenMode,
        fields: Vec<FieldDescriptor>,
        backend: B,
        notifier: N,
    ) -> Self {
        let mut form = DynamicForm::new(fields, None);
        form.set_submit_label(match mode {
            ScreenMode::Create => "Create",
            ScreenMode::Edit(_) => "Save changes",
        });
        form.set_loading(matches!(mode, ScreenMode::Edit(_)));

        Self {
            resource: resource.into(),
            mode,
            form,
            backend,
            notifier,
        }
    }

    /// Returns whether the screen creates or edits.
    pub fn mode(&self) -> &ScreenMode {
        &self.mode
    }

    /// Returns the hosted form.
    pub fn form(&self) -> &DynamicForm {
        &self.form
    }

    /// Gives access to the form for user edits.
    pub fn form_mut(&mut self) -> &mut DynamicForm {
        &mut self.form
    }

    /// Returns the record backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Loads the record to edit and re-initializes the form with it.
    ///
    /// Does nothing in create mode. On failure the form stays empty and an
    /// error notification is shown.
    pub fn load(&mut self) -> Result<(), BackendError> {
        let ScreenMode::Edit(id) = &self.mode else {
            return Ok(());
        };

        self.form.set_loading(true);
        let fetched = self.backend.fetch(id);
        self.form.set_loading(false);

        match fetched {
            Ok(record) => {
                debug!(resource = %self.resource, id = %id, "record loaded");
                self.form.reinitialize(Some(&record));
                Ok(())
            }
            Err(err) => {
                warn!(resource = %self.resource, id = %id, error = %err, "failed to load record");
                self.notifier.notify(Notification::error(format!(
                    "Could not load {}: {err}",
                    self.resource.to_lowercase()
                )));
                Err(err)
            }
        }
    }

    /// Submits the form and stores the payload through the backend.
    pub fn submit(&mut self) -> ScreenOutcome {
        match self.form.on_submit() {
            Some(event) => self.handle(event),
            None => ScreenOutcome::Invalid,
        }
    }

    /// Cancels editing.
    pub fn cancel(&mut self) -> ScreenOutcome {
        let event = self.form.on_cancel();
        self.handle(event)
    }

    /// Reacts to an event emitted by the form.
    pub fn handle(&mut self, event: FormEvent) -> ScreenOutcome {
        let payload = match event {
            FormEvent::Cancel => return ScreenOutcome::Cancelled,
            FormEvent::Submit(payload) => payload,
        };

        self.form.set_submitting(true);
        let result = match &self.mode {
            ScreenMode::Create => self.backend.create(&payload),
            ScreenMode::Edit(id) => self.backend.update(id, &payload),
        };
        self.form.set_submitting(false);

        let verb = match self.mode {
            ScreenMode::Create => "created",
            ScreenMode::Edit(_) => "updated",
        };

        match result {
            Ok(record) => {
                info!(resource = %self.resource, verb, "record saved");
                self.notifier
                    .notify(Notification::success(format!("{} {verb}", self.resource)));
                ScreenOutcome::Saved(record)
            }
            Err(err) => {
                warn!(resource = %self.resource, error = %err, "failed to save record");
                self.notifier.notify(Notification::error(format!(
                    "{} could not be {verb}: {err}",
                    self.resource
                )));
                ScreenOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::text_field;

    #[derive(Default)]
    struct Toasts(Vec<Notification>);

    impl Notifier for Toasts {
        fn notify(&mut self, notification: Notification) {
            self.0.push(notification);
        }
    }

    struct Offline;

    impl RecordBackend for Offline {
        fn fetch(&mut self, _id: &str) -> Result<Record, BackendError> {
            Err(BackendError::Transport("connection refused".to_string()))
        }

        fn create(&mut self, _payload: &Payload) -> Result<Record, BackendError> {
            Err(BackendError::Transport("connection refused".to_string()))
        }

        fn update(&mut self, _id: &str, _payload: &Payload) -> Result<Record, BackendError> {
            Err(BackendError::Transport("connection refused".to_string()))
        }
    }

    fn screen(mode: ScreenMode) -> CreateEditScreen<Offline, Toasts> {
        CreateEditScreen::new(
            "Supplier",
            mode,
            vec![text_field("name", "Name", 80, true)],
            Offline,
            Toasts::default(),
        )
    }

    #[test]
    fn test_submit_labels_by_mode() {
        assert_eq!(screen(ScreenMode::Create).form().options().submit_label, "Create");
        let edit = screen(ScreenMode::Edit("7".to_string()));
        assert_eq!(edit.form().options().submit_label, "Save changes");
        assert!(edit.form().options().loading);
    }

    #[test]
    fn test_create_mode_load_is_noop() {
        let mut screen = screen(ScreenMode::Create);
        assert!(screen.load().is_ok());
        assert!(screen.notifier().0.is_empty());
    }

    #[test]
    fn test_load_failure_notifies() {
        let mut screen = screen(ScreenMode::Edit("7".to_string()));
        assert!(screen.load().is_err());
        assert!(!screen.form().options().loading);
        assert_eq!(
            screen.notifier().0,
            [Notification::error(
                "Could not load supplier: transport error: connection refused"
            )]
        );
    }

    #[test]
    fn test_invalid_submit_skips_backend() {
        let mut screen = screen(ScreenMode::Create);
        assert_eq!(screen.submit(), ScreenOutcome::Invalid);
        assert!(screen.notifier().0.is_empty());
        assert!(screen.form().is_invalid("name"));
    }

    #[test]
    fn test_cancel() {
        let mut screen = screen(ScreenMode::Create);
        assert_eq!(screen.cancel(), ScreenOutcome::Cancelled);
    }
}
