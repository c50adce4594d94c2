//! # Station Console
//!
//! Client-side administration for a vehicle service station: appointments,
//! employees, products, salaries, sales, users and utility expenses, all
//! managed through one generic CRUD workflow against a REST API.
//!
//! ## Features
//!
//! - **One workflow, many resources**: list, search, create, edit, delete and
//!   report are written once over the [`Resource`](core::resource::Resource) trait
//! - **Validation before the wire**: every violated field is reported and
//!   invalid input never reaches the server
//! - **Explicit session state**: `Idle`, `Creating` or `Editing(record)`, with
//!   late responses after cancel ignored
//! - **Reports**: per-resource tables plus a statistical report for utility
//!   expenses, written as paginated text
//! - **Configuration-Based**: API location and path overrides via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use station::prelude::*;
//!
//! let config = ConsoleConfig::default();
//! let http = config.http_client()?;
//! let client = HttpResourceClient::<Sale>::from_config(http.clone(), &config);
//! let products = HttpResourceClient::<Product>::from_config(http, &config);
//!
//! let mut screen = Screen::new(client).with_lookup::<Product, _>(products);
//! screen.load().await?;
//! screen.search("oil");
//!
//! screen.add()?;
//! screen.set_field("productId", "p-1")?;
//! screen.set_field("volume", "4")?;
//! // ...
//! screen.submit().await?;
//!
//! screen.report(&TextRenderer, &config.reports.output_dir)?;
//! ```

pub mod client;
pub mod config;
pub mod console;
pub mod core;
pub mod entities;
pub mod report;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        error::{
            ConfigError, ConsoleError, FieldViolation, ReportError, TransportError,
            ValidationError,
        },
        resource::{FormMode, FormValues, NameIndex, Record, RecordId, Resource, ResourceKind},
        service::{Operation, ResourceClient},
    };

    // === Macros ===
    pub use crate::dispatch_resource;

    // === Entities ===
    pub use crate::entities::{
        AnyRecord, Appointment, Employee, Product, Salary, Sale, User, UtilityExpense,
    };

    // === Clients ===
    pub use crate::client::{HttpResourceClient, InMemoryResourceClient};

    // === Workflow ===
    pub use crate::console::{
        Confirmation, EditSession, ListController, Notification, Notifier, RecordingNotifier,
        Screen, SessionState, SortDirection, TracingNotifier,
    };

    // === Reports ===
    pub use crate::report::{Document, Renderer, Tabular, TextRenderer};

    // === Config ===
    pub use crate::config::ConsoleConfig;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
