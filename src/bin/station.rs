//! `station`: the service station admin console on the command line.
//!
//! Each subcommand drives one screen action against the configured API.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use station::entities::json_to_form;
use station::prelude::*;

/// Service station admin console.
#[derive(Parser, Debug)]
#[command(name = "station", version, about = "Vehicle service station admin console")]
struct Cli {
    /// Path to a YAML config file.
    #[arg(long, global = true, env = "STATION_CONFIG")]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List records, optionally filtered and sorted.
    List {
        /// Resource (e.g. sales, utility-expenses).
        resource: ResourceKind,
        /// Case-insensitive search on the resource's search key.
        #[arg(long, short = 'q')]
        query: Option<String>,
        /// Sort by a column (employees: name).
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending.
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Write the report for the (filtered) collection.
    Report {
        resource: ResourceKind,
        #[arg(long, short = 'q')]
        query: Option<String>,
        /// Output directory (default: reports.output_dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Create a record.
    Create {
        resource: ResourceKind,
        /// Field assignment, repeatable.
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Fields as a JSON object.
        #[arg(long)]
        json: Option<String>,
    },

    /// Replace a record; unspecified fields keep their stored values.
    Update {
        resource: ResourceKind,
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        #[arg(long)]
        json: Option<String>,
    },

    /// Delete a record.
    Delete {
        resource: ResourceKind,
        id: String,
        /// Skip confirmation.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Sum a numeric column over the (filtered) collection.
    Total {
        resource: ResourceKind,
        /// Column to sum (default: amount).
        #[arg(default_value = "amount")]
        column: String,
        #[arg(long, short = 'q')]
        query: Option<String>,
    },

    /// Count the records in the (filtered) collection.
    Count {
        resource: ResourceKind,
        #[arg(long, short = 'q')]
        query: Option<String>,
    },

    /// Validate a JSON payload and print the request body, without sending.
    Validate {
        resource: ResourceKind,
        /// The JSON object to check.
        json: String,
        /// Validate as an edit (optional secret fields).
        #[arg(long)]
        edit: bool,
    },
}

impl Command {
    fn resource(&self) -> ResourceKind {
        match self {
            Command::List { resource, .. }
            | Command::Report { resource, .. }
            | Command::Create { resource, .. }
            | Command::Update { resource, .. }
            | Command::Delete { resource, .. }
            | Command::Total { resource, .. }
            | Command::Count { resource, .. }
            | Command::Validate { resource, .. } => *resource,
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    if field.trim().is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((field.trim().to_string(), value.to_string()))
}

/// Prints notifications for a person at a terminal
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_error() {
            eprintln!("{}", notification);
        } else {
            println!("{}", notification);
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ConsoleConfig> {
    let config = match &cli.config {
        Some(path) => ConsoleConfig::from_yaml_file(path)?,
        None => ConsoleConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Form values from `--json` then `--set`, later ones winning
fn field_input(json: Option<&str>, set: &[(String, String)]) -> anyhow::Result<FormValues> {
    let mut form = FormValues::new();
    if let Some(raw) = json {
        let value: Value = serde_json::from_str(raw).context("--json is not valid JSON")?;
        for (field, v) in json_to_form(&value)?.iter() {
            form.set(field, v);
        }
    }
    for (field, value) in set {
        form.set(field.as_str(), value.as_str());
    }
    Ok(form)
}

fn print_table<R: Tabular>(records: &[Record<R>], index: &NameIndex) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut head = vec!["Id"];
    head.extend_from_slice(R::columns());
    table.set_header(head);

    for record in records {
        let mut row = vec![record.id.to_string()];
        row.extend(record.data.row(index));
        table.add_row(row);
    }
    println!("{table}");
}

fn confirm(prompt: &str) -> anyhow::Result<Confirmation> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes").into())
}

async fn run<R: Tabular>(
    command: Command,
    config: &ConsoleConfig,
    http: reqwest::Client,
) -> anyhow::Result<()> {
    let client = HttpResourceClient::<R>::from_config(http.clone(), config);
    let mut screen = Screen::new(client).with_notifier(Arc::new(TerminalNotifier));
    if R::KIND == ResourceKind::Sale {
        let products = HttpResourceClient::<Product>::from_config(http, config);
        screen = screen.with_lookup::<Product, _>(products);
    }

    screen.load().await?;

    match command {
        Command::List {
            query, sort, desc, ..
        } => {
            screen.search(query.unwrap_or_default());
            if let Some(column) = sort {
                let direction = if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                if !screen.sort_by(&column, direction) {
                    bail!("{} cannot be sorted by '{}'", R::KIND.plural_label(), column);
                }
            }
            print_table(screen.visible(), screen.list().index());
        }
        Command::Report { query, out, .. } => {
            screen.search(query.unwrap_or_default());
            let out_dir = out.unwrap_or_else(|| config.reports.output_dir.clone());
            screen.report(&TextRenderer, &out_dir)?;
        }
        Command::Create { set, json, .. } => {
            let input = field_input(json.as_deref(), &set)?;
            screen.add()?;
            for (field, value) in input.iter() {
                screen.set_field(field, value)?;
            }
            let record = screen.submit().await?;
            println!("{}", record.id);
        }
        Command::Update { id, set, json, .. } => {
            let input = field_input(json.as_deref(), &set)?;
            screen.edit(&RecordId::new(id))?;
            for (field, value) in input.iter() {
                screen.set_field(field, value)?;
            }
            screen.submit().await?;
        }
        Command::Delete { id, yes, .. } => {
            let confirmation = if yes {
                Confirmation::Confirmed
            } else {
                confirm(&format!(
                    "Are you sure you want to delete this {}?",
                    R::KIND.label()
                ))?
            };
            if !screen.delete(&RecordId::new(id), confirmation).await? {
                println!("Cancelled.");
            }
        }
        Command::Total { column, query, .. } => {
            screen.search(query.unwrap_or_default());
            screen.total_amount(&column);
        }
        Command::Count { query, .. } => {
            screen.search(query.unwrap_or_default());
            screen.total_count();
        }
        Command::Validate {
            resource,
            json,
            edit,
        } => validate(resource, &json, edit)?,
    }

    Ok(())
}

fn validate(kind: ResourceKind, raw: &str, edit: bool) -> anyhow::Result<()> {
    let value: Value = serde_json::from_str(raw).context("payload is not valid JSON")?;
    let mode = if edit { FormMode::Edit } else { FormMode::Create };
    let record = AnyRecord::from_json(kind, &value, mode)?;
    println!("{}", serde_json::to_string_pretty(&record.to_json())?);
    Ok(())
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let kind = cli.command.resource();

    if let Command::Validate { json, edit, .. } = &cli.command {
        return validate(kind, json, *edit);
    }

    let config = load_config(&cli)?;
    let http = config.http_client()?;
    tracing::debug!(base_url = %config.api.base_url, resource = %kind, "starting");

    dispatch_resource!(kind, R => run::<R>(cli.command, &config, http).await)
}

/// Filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    match execute(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<ConsoleError>()
                .map(ConsoleError::error_code)
                .unwrap_or("ERROR");
            eprintln!("error [{}]: {:#}", code, e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("volume=4").unwrap(),
            ("volume".to_string(), "4".to_string())
        );
        assert_eq!(
            parse_assignment("description=a=b").unwrap(),
            ("description".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("volume").is_err());
        assert!(parse_assignment("=4").is_err());
    }

    #[test]
    fn test_set_overrides_json() {
        let set = vec![("volume".to_string(), "9".to_string())];
        let form = field_input(Some(r#"{"volume": 4, "paymentMethod": "Cash"}"#), &set).unwrap();
        assert_eq!(form.get("volume"), "9");
        assert_eq!(form.get("paymentMethod"), "Cash");
    }

    #[test]
    fn test_default_log_filter_is_info() {
        assert_eq!(DEFAULT_LOG_FILTER, "info");
        assert!(DEFAULT_LOG_FILTER.parse::<tracing_subscriber::EnvFilter>().is_ok());
    }

    #[test]
    fn test_cli_parses_resources() {
        let cli = Cli::try_parse_from(["station", "list", "utility_expenses", "-q", "water"]).unwrap();
        assert_eq!(cli.command.resource(), ResourceKind::UtilityExpense);

        assert!(Cli::try_parse_from(["station", "list", "invoices"]).is_err());

        let cli = Cli::try_parse_from(["station", "count", "employees", "-q", "mal"]).unwrap();
        assert_eq!(cli.command.resource(), ResourceKind::Employee);
        assert!(matches!(cli.command, Command::Count { query: Some(ref q), .. } if q == "mal"));
    }
}
