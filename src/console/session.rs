//! Edit session controller
//!
//! Tracks whether the modal form is closed, creating a record, or editing
//! one, together with the form's current values. Submitting is split in
//! two: [`EditSession::prepare_submit`] validates and hands back the payload
//! to send, [`EditSession::complete_submit`] applies the server's answer.
//! Every open and close bumps an epoch, so an answer that arrives after the
//! form was closed is recognised and dropped.

use crate::core::error::{ConsoleError, TransportError};
use crate::core::resource::{FormMode, FormValues, Record, RecordId, Resource};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<R> {
    Idle,
    Creating,
    Editing(Record<R>),
}

/// Answer to "are you sure?" before a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(yes: bool) -> Self {
        if yes { Self::Confirmed } else { Self::Declined }
    }
}

/// What a validated submit asks the client to do
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction<R> {
    Create(R),
    Update(RecordId, R),
}

/// A validated submit waiting for the server
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit<R> {
    pub action: SubmitAction<R>,
    epoch: u64,
}

impl<R> PendingSubmit<R> {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_create(&self) -> bool {
        matches!(self.action, SubmitAction::Create(_))
    }
}

/// What [`EditSession::complete_submit`] did with an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Saved; the session is idle again
    Closed,
    /// The call failed; form and state are untouched
    KeptOpen,
    /// The form was closed or reopened meanwhile; nothing changed
    Ignored,
}

#[derive(Debug, Clone)]
pub struct EditSession<R> {
    state: SessionState<R>,
    form: FormValues,
    epoch: u64,
}

impl<R: Resource> Default for EditSession<R> {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            form: FormValues::new(),
            epoch: 0,
        }
    }
}

impl<R: Resource> EditSession<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState<R> {
        &self.state
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, SessionState::Idle)
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Creating => Some(FormMode::Create),
            SessionState::Editing(_) => Some(FormMode::Edit),
        }
    }

    /// Open an empty form
    pub fn open_create(&mut self) -> Result<(), ConsoleError> {
        self.ensure_idle()?;
        self.form = R::blank_form();
        self.state = SessionState::Creating;
        self.epoch += 1;
        Ok(())
    }

    /// Open the form pre-populated from `record`, secret fields left blank
    pub fn open_edit(&mut self, record: Record<R>) -> Result<(), ConsoleError> {
        self.ensure_idle()?;
        let mut form = record.data.to_form();
        for field in R::SECRET_FIELDS {
            form.set(*field, "");
        }
        self.form = form;
        self.state = SessionState::Editing(record);
        self.epoch += 1;
        Ok(())
    }

    pub fn set_field(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ConsoleError> {
        if !self.is_open() {
            return Err(ConsoleError::InvalidState(
                "no form is open to edit".to_string(),
            ));
        }
        self.form.set(field, value);
        Ok(())
    }

    /// Close the form and discard its values. Returns whether it was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.close();
        was_open
    }

    /// Validate the form. The session is not changed either way.
    pub fn prepare_submit(&self) -> Result<PendingSubmit<R>, ConsoleError> {
        let action = match &self.state {
            SessionState::Idle => {
                return Err(ConsoleError::InvalidState(
                    "no form is open to submit".to_string(),
                ));
            }
            SessionState::Creating => {
                SubmitAction::Create(R::from_form(&self.form, FormMode::Create)?)
            }
            SessionState::Editing(record) => SubmitAction::Update(
                record.id.clone(),
                R::from_form(&self.form, FormMode::Edit)?,
            ),
        };

        Ok(PendingSubmit {
            action,
            epoch: self.epoch,
        })
    }

    /// Apply the client's answer to a submit prepared earlier
    pub fn complete_submit<T>(
        &mut self,
        pending: &PendingSubmit<R>,
        outcome: &Result<T, TransportError>,
    ) -> Completion {
        if pending.epoch != self.epoch || !self.is_open() {
            tracing::debug!(
                resource = R::KIND.path(),
                epoch = pending.epoch,
                current = self.epoch,
                "ignoring late submit response"
            );
            return Completion::Ignored;
        }

        match outcome {
            Ok(_) => {
                self.close();
                Completion::Closed
            }
            Err(_) => Completion::KeptOpen,
        }
    }

    fn close(&mut self) {
        self.state = SessionState::Idle;
        self.form = FormValues::new();
        self.epoch += 1;
    }

    fn ensure_idle(&self) -> Result<(), ConsoleError> {
        if self.is_open() {
            return Err(ConsoleError::InvalidState(format!(
                "a {} form is already open",
                R::KIND.label()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::Operation;
    use crate::entities::{Sale, User};

    fn user_record() -> Record<User> {
        Record::new(
            "u-1",
            User {
                first_name: "Ishara".to_string(),
                last_name: "Perera".to_string(),
                user_type: "Admin".to_string(),
                phone: "0711111111".to_string(),
                email: "ishara@station.lk".to_string(),
                password: None,
                address: "Matara".to_string(),
            },
        )
    }

    fn network_error() -> TransportError {
        TransportError::Network {
            resource: "sales",
            operation: Operation::Create,
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_create_flow() {
        let mut session: EditSession<Sale> = EditSession::new();
        session.open_create().unwrap();
        assert_eq!(session.state(), &SessionState::Creating);
        assert_eq!(session.mode(), Some(FormMode::Create));

        for (field, value) in [
            ("productId", "p-1"),
            ("volume", "2"),
            ("totalSalePrice", "10"),
            ("paymentMethod", "Cash"),
            ("date", "2024-06-10"),
        ] {
            session.set_field(field, value).unwrap();
        }

        let pending = session.prepare_submit().unwrap();
        assert!(pending.is_create());

        let outcome: Result<(), TransportError> = Ok(());
        assert_eq!(session.complete_submit(&pending, &outcome), Completion::Closed);
        assert!(!session.is_open());
        assert!(session.form().is_empty());
    }

    #[test]
    fn test_invalid_form_stays_open_with_values() {
        let mut session: EditSession<Sale> = EditSession::new();
        session.open_create().unwrap();
        session.set_field("volume", "abc").unwrap();

        let err = session.prepare_submit().unwrap_err();
        match err {
            ConsoleError::Validation(v) => assert!(v.has("volume")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.state(), &SessionState::Creating);
        assert_eq!(session.form().get("volume"), "abc");
    }

    #[test]
    fn test_edit_never_prepopulates_secret_fields() {
        let mut record = user_record();
        record.data.password = Some("hunter2".to_string());

        let mut session = EditSession::new();
        session.open_edit(record.clone()).unwrap();

        assert_eq!(session.form().get("firstName"), "Ishara");
        assert_eq!(session.form().get("password"), "");
        assert_eq!(session.state(), &SessionState::Editing(record));
    }

    #[test]
    fn test_edit_submits_update_for_same_id() {
        let mut session = EditSession::new();
        session.open_edit(user_record()).unwrap();
        session.set_field("lastName", "Silva").unwrap();

        let pending = session.prepare_submit().unwrap();
        match &pending.action {
            SubmitAction::Update(id, user) => {
                assert_eq!(id.as_str(), "u-1");
                assert_eq!(user.last_name, "Silva");
                assert_eq!(user.password, None);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_keeps_session() {
        let mut session = EditSession::new();
        session.open_edit(user_record()).unwrap();
        let pending = session.prepare_submit().unwrap();

        let outcome: Result<(), TransportError> = Err(network_error());
        assert_eq!(session.complete_submit(&pending, &outcome), Completion::KeptOpen);
        assert!(matches!(session.state(), SessionState::Editing(_)));
        assert_eq!(session.form().get("firstName"), "Ishara");
    }

    #[test]
    fn test_late_response_after_cancel_is_ignored() {
        let mut session = EditSession::new();
        session.open_edit(user_record()).unwrap();
        let pending = session.prepare_submit().unwrap();

        assert!(session.cancel());

        // reopening does not revive the old submit
        session.open_create().unwrap();
        let outcome: Result<(), TransportError> = Ok(());
        assert_eq!(session.complete_submit(&pending, &outcome), Completion::Ignored);
        assert_eq!(session.state(), &SessionState::Creating);
    }

    #[test]
    fn test_cannot_open_twice_or_submit_idle() {
        let mut session: EditSession<Sale> = EditSession::new();
        assert!(session.prepare_submit().is_err());
        assert!(session.set_field("volume", "1").is_err());
        assert!(!session.cancel());

        session.open_create().unwrap();
        let err = session.open_create().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");
    }

    #[test]
    fn test_confirmation_from_bool() {
        assert_eq!(Confirmation::from(true), Confirmation::Confirmed);
        assert_eq!(Confirmation::from(false), Confirmation::Declined);
    }
}
