//! Core module containing the fundamental traits and types of the console

pub mod error;
pub mod resource;
pub mod service;
pub mod validation;

pub use error::{
    ConfigError, ConsoleError, FieldViolation, ReportError, TransportError, ValidationError,
};
pub use resource::{FormMode, FormValues, NameIndex, Record, RecordId, Resource, ResourceKind};
pub use service::{Operation, ResourceClient};
