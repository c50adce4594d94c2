//! Report generation through the screen, written to temp directories

use anyhow::Result;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use station::prelude::*;
use station::report::render::PAGE_BREAK;

fn expense(kind: &str, amount: f64, day: u32) -> UtilityExpense {
    UtilityExpense {
        kind: kind.to_string(),
        amount,
        date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        description: Some(format!("{} bill", kind)),
    }
}

async fn expense_screen(
    expenses: Vec<UtilityExpense>,
) -> Result<Screen<UtilityExpense, InMemoryResourceClient<UtilityExpense>>> {
    let client = InMemoryResourceClient::new();
    for e in &expenses {
        client.create(e).await?;
    }
    let mut screen = Screen::new(client);
    screen.load().await?;
    Ok(screen)
}

#[tokio::test]
async fn test_statistical_report_file() -> Result<()> {
    let screen = expense_screen(vec![
        expense("Water", 10.0, 3),
        expense("Water", 20.0, 1),
        expense("Gas", 30.0, 2),
    ])
    .await?;
    let dir = tempfile::tempdir()?;

    let path = screen.report(&TextRenderer, dir.path())?;

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("enhanced_utility_expenses_report.txt")
    );
    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("Utility Expenses Detailed Report"));
    assert!(text.contains("Total Expenses: $60.00"));
    assert!(text.contains("Average Expense: $20.00"));
    assert!(text.contains("Highest Expense: $30.00"));
    assert!(text.contains("Lowest Expense: $10.00"));
    assert!(text.contains("Water: $30.00 (50.00%)"));
    assert!(text.contains("Gas: $30.00 (50.00%)"));
    assert!(text.contains("Expenses Over Time"));
    assert!(text.contains("Expense Distribution by Type"));
    assert_eq!(text.matches(PAGE_BREAK).count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_report_covers_filtered_view_only() -> Result<()> {
    let mut screen = expense_screen(vec![
        expense("Water", 10.0, 1),
        expense("Electricity", 90.0, 2),
    ])
    .await?;
    screen.search("water");
    let dir = tempfile::tempdir()?;

    let path = screen.report(&TextRenderer, dir.path())?;
    let text = std::fs::read_to_string(path)?;

    assert!(text.contains("Total Expenses: $10.00"));
    assert!(!text.contains("Electricity"));
    Ok(())
}

#[tokio::test]
async fn test_empty_statistical_report_says_no_data() -> Result<()> {
    let screen = expense_screen(vec![]).await?;
    let dir = tempfile::tempdir()?;

    let text = std::fs::read_to_string(screen.report(&TextRenderer, dir.path())?)?;

    assert!(text.contains("No data"));
    assert!(!text.contains("Average Expense"));
    assert!(!text.contains("NaN"));
    assert!(!text.contains("inf"));
    Ok(())
}

#[tokio::test]
async fn test_tabular_report_for_sales_resolves_products() -> Result<()> {
    let products = InMemoryResourceClient::with_records(vec![Record::new(
        "p-1",
        Product {
            name: "Coolant".to_string(),
            category: "Fluids".to_string(),
            quantity: 4,
            price_per_unit: 6.0,
            last_restock_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        },
    )]);
    let sales = InMemoryResourceClient::with_records(vec![
        Record::new(
            "s-1",
            Sale {
                product_id: RecordId::new("p-1"),
                volume: 2,
                total_sale_price: 12.0,
                payment_method: "Cash".to_string(),
                date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            },
        ),
        Record::new(
            "s-2",
            Sale {
                product_id: RecordId::new("p-404"),
                volume: 1,
                total_sale_price: 3.0,
                payment_method: "Card".to_string(),
                date: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
            },
        ),
    ]);

    let notifier = RecordingNotifier::new();
    let mut screen = Screen::new(sales)
        .with_lookup::<Product, _>(products)
        .with_notifier(Arc::new(notifier.clone()));
    screen.load().await?;
    let dir = tempfile::tempdir()?;

    let path = screen.report(&TextRenderer, dir.path())?;
    let text = std::fs::read_to_string(&path)?;

    assert!(path.ends_with("sales_report.txt"));
    assert!(text.starts_with("Sales Report"));
    assert!(text.contains("Coolant"));
    assert!(text.contains("Unknown"));
    assert!(text.contains("12.00"));
    assert!(
        notifier
            .last()
            .is_some_and(|n| n.message.starts_with("Report saved to"))
    );
    Ok(())
}

#[tokio::test]
async fn test_unwritable_output_is_report_error() -> Result<()> {
    let screen = expense_screen(vec![expense("Gas", 1.0, 1)]).await?;
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file")?;

    let err = screen.report(&TextRenderer, &blocker).unwrap_err();

    assert_eq!(err.error_code(), "REPORT_ERROR");
    Ok(())
}
