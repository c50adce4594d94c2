//! One resource's complete CRUD workflow

use super::list::{ListController, SortDirection};
use super::notify::{Notification, Notifier, TracingNotifier};
use super::session::{Completion, Confirmation, EditSession, SubmitAction};
use crate::core::error::{ConsoleError, TransportError};
use crate::core::resource::{NameIndex, Record, RecordId, Resource};
use crate::core::service::ResourceClient;
use crate::report::format::dollars;
use crate::report::render::Renderer;
use crate::report::tabular::Tabular;
use async_trait::async_trait;
use chrono::Utc;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of a [`NameIndex`] for foreign-key search keys
#[async_trait]
pub trait LookupSource: Send + Sync {
    async fn fetch_index(&self) -> Result<NameIndex, TransportError>;
}

/// Builds a [`NameIndex`] from another resource's collection, keyed by id
/// and named by [`Resource::label`]
pub struct ResourceLookup<L, C> {
    client: C,
    _resource: PhantomData<fn() -> L>,
}

impl<L: Resource, C: ResourceClient<L>> ResourceLookup<L, C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<L: Resource, C: ResourceClient<L>> LookupSource for ResourceLookup<L, C> {
    async fn fetch_index(&self) -> Result<NameIndex, TransportError> {
        let records = self.client.list().await?;
        Ok(NameIndex::from_records(&records))
    }
}

/// Client, list, session and notifier for one resource.
///
/// Every action reports its outcome through the notifier and also returns
/// it, so callers that are not a UI can act on the error. A failed action
/// leaves the list and session as they were.
pub struct Screen<R, C> {
    client: C,
    list: ListController<R>,
    session: EditSession<R>,
    notifier: Arc<dyn Notifier>,
    lookup: Option<Arc<dyn LookupSource>>,
}

impl<R: Tabular, C: ResourceClient<R>> Screen<R, C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            list: ListController::new(),
            session: EditSession::new(),
            notifier: Arc::new(TracingNotifier),
            lookup: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Resolve foreign keys through another resource (sales → products)
    pub fn with_lookup<L, LC>(mut self, client: LC) -> Self
    where
        L: Resource,
        LC: ResourceClient<L> + 'static,
    {
        self.lookup = Some(Arc::new(ResourceLookup::<L, LC>::new(client)));
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn list(&self) -> &ListController<R> {
        &self.list
    }

    pub fn session(&self) -> &EditSession<R> {
        &self.session
    }

    pub fn visible(&self) -> &[Record<R>] {
        self.list.visible()
    }

    /// Fetch the collection (and the lookup index, if any).
    ///
    /// The index is only installed together with a successfully fetched
    /// list, so a failed load leaves the view untouched.
    pub async fn load(&mut self) -> Result<usize, ConsoleError> {
        let index = match &self.lookup {
            Some(lookup) => match lookup.fetch_index().await {
                Ok(index) => Some(index),
                Err(e) => {
                    tracing::warn!(resource = R::KIND.path(), error = %e, "lookup refresh failed");
                    None
                }
            },
            None => None,
        };

        match self.list.refresh_with(&self.client, index).await {
            Ok(count) => Ok(count),
            Err(e) => {
                tracing::warn!(resource = R::KIND.path(), error = %e, "list refresh failed");
                self.notify(Notification::error(format!(
                    "Failed to load {}.",
                    R::KIND.plural_label()
                )));
                Err(e.into())
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<usize, ConsoleError> {
        self.load().await
    }

    /// Filter the visible rows; never touches the network
    pub fn search(&mut self, query: impl Into<String>) {
        self.list.set_query(query);
    }

    pub fn sort_by(&mut self, column: &str, direction: SortDirection) -> bool {
        self.list.sort_by(column, direction)
    }

    pub fn add(&mut self) -> Result<(), ConsoleError> {
        self.session.open_create()
    }

    pub fn edit(&mut self, id: &RecordId) -> Result<(), ConsoleError> {
        let record = self.list.find(id).cloned().ok_or_else(|| {
            ConsoleError::InvalidState(format!("no {} with id '{}'", R::KIND.label(), id))
        })?;
        self.session.open_edit(record)
    }

    pub fn set_field(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ConsoleError> {
        self.session.set_field(field, value)
    }

    pub fn cancel(&mut self) -> bool {
        self.session.cancel()
    }

    /// Validate, send, then refresh the list and close the form.
    ///
    /// Invalid input never reaches the client. A client failure keeps the
    /// form open with its values.
    pub async fn submit(&mut self) -> Result<Record<R>, ConsoleError> {
        let pending = match self.session.prepare_submit() {
            Ok(pending) => pending,
            Err(e) => {
                self.notify_save_failure(&e);
                return Err(e);
            }
        };

        let outcome = match &pending.action {
            SubmitAction::Create(payload) => self.client.create(payload).await,
            SubmitAction::Update(id, payload) => self.client.update(id, payload).await,
        };

        let completion = self.session.complete_submit(&pending, &outcome);
        let record = match outcome {
            Ok(record) => record,
            Err(e) => {
                let e = ConsoleError::from(e);
                self.notify_save_failure(&e);
                return Err(e);
            }
        };

        if completion == Completion::Ignored {
            return Ok(record);
        }

        let verb = if pending.is_create() { "created" } else { "updated" };
        tracing::info!(resource = R::KIND.path(), id = %record.id, verb, "record saved");
        self.notify(Notification::success(format!(
            "{} {} successfully!",
            R::KIND.title(),
            verb
        )));

        // The save went through; a failed refresh is reported on its own
        let _ = self.load().await;
        Ok(record)
    }

    /// Delete after an explicit confirmation. Returns whether a delete was
    /// sent and succeeded.
    pub async fn delete(
        &mut self,
        id: &RecordId,
        confirmation: Confirmation,
    ) -> Result<bool, ConsoleError> {
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }

        if let Err(e) = self.client.delete(id).await {
            tracing::warn!(resource = R::KIND.path(), %id, error = %e, "delete failed");
            self.notify(Notification::error(format!(
                "Failed to delete {}.",
                R::KIND.label()
            )));
            return Err(e.into());
        }

        self.notify(Notification::success(format!(
            "{} deleted successfully!",
            R::KIND.title()
        )));
        let _ = self.load().await;
        Ok(true)
    }

    /// Render the report for the visible rows into `out_dir`
    pub fn report(
        &self,
        renderer: &dyn Renderer,
        out_dir: &Path,
    ) -> Result<PathBuf, ConsoleError> {
        let doc = R::report(self.list.visible(), self.list.index(), Utc::now());
        match renderer.write(&doc, out_dir) {
            Ok(path) => {
                self.notify(Notification::success(format!(
                    "Report saved to {}",
                    path.display()
                )));
                Ok(path)
            }
            Err(e) => {
                self.notify(Notification::error(format!(
                    "Failed to generate {} report.",
                    R::KIND.label()
                )));
                Err(e.into())
            }
        }
    }

    /// Sum a numeric column over the visible rows and announce it
    pub fn total_amount(&self, column: &str) -> f64 {
        let total = self.list.total(column);
        self.notify(Notification::success(format!(
            "Total Amount: {}",
            dollars(total)
        )));
        total
    }

    /// Count the visible rows and announce it
    pub fn total_count(&self) -> usize {
        let count = self.list.count();
        self.notify(Notification::success(format!(
            "Total {}: {}",
            R::KIND.plural_title(),
            count
        )));
        count
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn notify_save_failure(&self, err: &ConsoleError) {
        self.notify(Notification::error(format!(
            "Failed to save {}: {}",
            R::KIND.label(),
            err
        )));
    }
}
