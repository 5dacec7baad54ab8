mod dashboard;
mod data;
mod state;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use dashboard::DashboardView;
use state::DashboardState;

const USAGE: &str = "usage: salesboard [--json] [--status S] [--payment P] \
                     [--city C] [--from YYYY-MM-DD] [--to YYYY-MM-DD] <orders.csv|orders.json>";

fn main() -> Result<()> {
    env_logger::init();

    let mut json = false;
    let mut path: Option<PathBuf> = None;
    let mut status: Option<String> = None;
    let mut payment: Option<String> = None;
    let mut city: Option<String> = None;
    let mut from: Option<NaiveDate> = None;
    let mut to: Option<NaiveDate> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| -> Result<String> {
            args.next().with_context(|| format!("{flag} needs a value"))
        };
        match arg.as_str() {
            "--json" => json = true,
            "--status" => status = Some(value("--status")?),
            "--payment" => payment = Some(value("--payment")?),
            "--city" => city = Some(value("--city")?),
            "--from" => from = Some(parse_date(&value("--from")?)?),
            "--to" => to = Some(parse_date(&value("--to")?)?),
            other if other.starts_with("--") => bail!("unknown flag {other}\n{USAGE}"),
            other => path = Some(PathBuf::from(other)),
        }
    }
    let Some(path) = path else {
        bail!("{USAGE}");
    };

    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    if dataset.is_empty() {
        log::warn!("{} contains no order rows", path.display());
    }
    log::info!(
        "dataset: {} rows, {} cities, {} payment types",
        dataset.len(),
        dataset.seller_cities.len(),
        dataset.payment_types.len()
    );

    let mut state = DashboardState::default();
    state.set_dataset(dataset);

    // Narrow the default match-all criteria with whatever flags were given.
    let mut criteria = state
        .criteria
        .clone()
        .context("criteria missing after dataset load")?;
    criteria.order_status = status;
    criteria.payment_type = payment;
    criteria.seller_city = city;
    if let Some(start) = from {
        criteria.date_range.start = start;
    }
    if let Some(end) = to {
        criteria.date_range.end = end;
    }
    state.set_criteria(criteria);

    let now = Local::now().naive_local();
    let view = state
        .render(now)
        .context("rendering with no dataset loaded")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_summary(&view);
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

/// Plain-text rendition of the view for terminal runs; a chart/table layer
/// would consume the same `DashboardView` as JSON.
fn print_summary(view: &DashboardView) {
    println!("== Sales Dashboard ==");
    println!("filtered rows: {}", view.filtered_rows);

    let card = &view.scorecard;
    println!(
        "orders: {}  revenue: {:.2}  customers: {}  sellers: {}  AOV: {:.2}",
        card.total_orders,
        card.total_revenue,
        card.total_customers,
        card.total_sellers,
        card.average_order_value
    );

    println!("\npayment types:");
    for share in &view.payment_distribution {
        println!("  {:<16} {}", share.payment_type, share.rows);
    }

    println!("\nmonthly orders:");
    for point in &view.monthly_trend {
        println!("  {}  {}", point.month, point.rows);
    }

    println!("\ntop customers by recency:");
    for r in &view.top_recency {
        println!("  {:<24} {} days", r.customer_id, r.recency_days);
    }
    println!("top customers by frequency:");
    for r in &view.top_frequency {
        println!("  {:<24} {} rows", r.customer_id, r.frequency);
    }
    println!("top customers by monetary:");
    for r in &view.top_monetary {
        println!("  {:<24} {:.2}", r.customer_id, r.monetary);
    }

    println!("\ntop cities (unfiltered):");
    for city in &view.top_cities {
        println!("  {:<24} {} orders", city.city, city.orders);
    }
    if let Some(city) = &view.leading_city {
        println!("\nbest-selling categories in {city}:");
        for cat in &view.top_categories {
            println!("  {:<24} {}", cat.category, cat.products);
        }
    }
}
