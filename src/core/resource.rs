//! Resource traits defining the core abstraction for all managed record types

use crate::core::error::ValidationError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Server-assigned record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A persisted record: the server id plus the resource's fields
///
/// On the wire the id is `_id` and the fields sit next to it in the same
/// JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<R> {
    #[serde(rename = "_id")]
    pub id: RecordId,

    #[serde(flatten)]
    pub data: R,
}

impl<R> Record<R> {
    pub fn new(id: impl Into<RecordId>, data: R) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// The closed set of managed resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Appointment,
    Employee,
    Product,
    Salary,
    Sale,
    User,
    UtilityExpense,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Appointment,
        ResourceKind::Employee,
        ResourceKind::Product,
        ResourceKind::Salary,
        ResourceKind::Sale,
        ResourceKind::User,
        ResourceKind::UtilityExpense,
    ];

    /// Collection path segment (`/<path>`)
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "appointments",
            ResourceKind::Employee => "employees",
            ResourceKind::Product => "products",
            ResourceKind::Salary => "salaries",
            ResourceKind::Sale => "sales",
            ResourceKind::User => "users",
            ResourceKind::UtilityExpense => "utility-expenses",
        }
    }

    /// Lowercase singular label used in messages ("sale", "utility expense")
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "appointment",
            ResourceKind::Employee => "employee",
            ResourceKind::Product => "product",
            ResourceKind::Salary => "salary",
            ResourceKind::Sale => "sale",
            ResourceKind::User => "user",
            ResourceKind::UtilityExpense => "utility expense",
        }
    }

    /// Lowercase plural label ("sales", "utility expenses")
    pub fn plural_label(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "appointments",
            ResourceKind::Employee => "employees",
            ResourceKind::Product => "products",
            ResourceKind::Salary => "salaries",
            ResourceKind::Sale => "sales",
            ResourceKind::User => "users",
            ResourceKind::UtilityExpense => "utility expenses",
        }
    }

    /// Sentence-case singular label ("Sale", "Utility expense")
    pub fn title(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Title-case plural label ("Employees", "Utility Expenses")
    pub fn plural_title(&self) -> String {
        self.plural_label()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Deterministic report file name
    pub fn report_file_name(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "appointments_report.txt",
            ResourceKind::Employee => "employee_report.txt",
            ResourceKind::Product => "product_report.txt",
            ResourceKind::Salary => "salary_report.txt",
            ResourceKind::Sale => "sales_report.txt",
            ResourceKind::User => "user_report.txt",
            ResourceKind::UtilityExpense => "enhanced_utility_expenses_report.txt",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.path() == wanted || kind.label().replace(' ', "-") == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.path()).collect();
                format!("unknown resource '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Whether a form is being submitted for a new record or an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Raw, untrimmed form input keyed by wire field name
///
/// Values are kept as typed by the user; the resource schema is the only
/// place that turns them into numbers and dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(IndexMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// The raw value, or `""` when the field was never set
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Blank the field while keeping its position in the form
    pub fn clear(&mut self, field: &str) {
        if let Some(value) = self.0.get_mut(field) {
            value.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Id → display name lookup for resolving foreign keys client-side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIndex(HashMap<RecordId, String>);

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index records by their [`Resource::label`]
    pub fn from_records<R: Resource>(records: &[Record<R>]) -> Self {
        Self(
            records
                .iter()
                .map(|r| (r.id.clone(), r.data.label()))
                .collect(),
        )
    }

    pub fn insert(&mut self, id: RecordId, name: impl Into<String>) {
        self.0.insert(id, name.into());
    }

    pub fn get(&self, id: &RecordId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trait for every managed record type.
///
/// A resource is the set of fields a record carries without its id. The
/// trait ties those fields to their endpoint, their validation schema and
/// their search behaviour so the list, session and report machinery can stay
/// generic.
pub trait Resource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Which resource this is
    const KIND: ResourceKind;

    /// Fields that are never copied from a stored record into a form
    const SECRET_FIELDS: &'static [&'static str] = &[];

    /// Columns [`Resource::compare_by`] can order on
    const SORTABLE_COLUMNS: &'static [&'static str] = &[];

    /// Initial values for a fresh "add" form
    fn blank_form() -> FormValues;

    /// Pre-populate a form from this record
    fn to_form(&self) -> FormValues;

    /// Validate raw form input and normalize it into a record.
    ///
    /// Reports every violated field, not just the first.
    fn from_form(form: &FormValues, mode: FormMode) -> Result<Self, ValidationError>;

    /// Values the search box is matched against
    fn search_keys(&self, index: &NameIndex) -> Vec<String>;

    /// Human-readable name of this record
    fn label(&self) -> String;

    /// Numeric value of a column, for totals
    fn amount(&self, _column: &str) -> Option<f64> {
        None
    }

    /// Compare two records on a sortable column; `None` if the column is not sortable
    fn compare_by(&self, _other: &Self, _column: &str) -> Option<Ordering> {
        None
    }

    /// Case-insensitive substring match of `query` against the search keys
    fn matches(&self, query: &str, index: &NameIndex) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.search_keys(index)
            .iter()
            .any(|key| key.to_lowercase().contains(&needle))
    }
}
