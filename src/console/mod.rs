//! The per-resource workflow: list/search, edit session and screen actions

pub mod list;
pub mod notify;
pub mod screen;
pub mod session;

pub use list::{ColumnSort, ListController, SortDirection};
pub use notify::{Level, Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use screen::{LookupSource, ResourceLookup, Screen};
pub use session::{Completion, Confirmation, EditSession, PendingSubmit, SessionState, SubmitAction};
