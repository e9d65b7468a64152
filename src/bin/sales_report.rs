use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, filter, layer::SubscriberExt, util::SubscriberInitExt};

use venmol::{
    InventoryStatistics, Product, Sale, SalesConfig, SalesDashboard, SalesSession, format_currency,
    group_by_brand, parse_collection,
};

/// Prints the sales screen of venmol for an export of the store's collections.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON export of the `ventas` collection.
    #[arg(long)]
    sales: PathBuf,

    /// File path to a JSON export of the `productos` collection.
    #[arg(long)]
    products: Option<PathBuf>,

    /// Only list the sales of this brand.
    #[arg(long)]
    brand: Option<String>,

    /// The canonical name of the local timezone, e.g. "America/El_Salvador".
    ///
    /// Overrides `VENMOL_TIMEZONE`.
    #[arg(long)]
    timezone: Option<String>,

    /// Products with fewer units than this are low on stock.
    ///
    /// Overrides `VENMOL_LOW_STOCK_THRESHOLD`.
    #[arg(long)]
    low_stock_threshold: Option<u32>,

    /// Print the screen as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let mut config = SalesConfig::from_env()?;
    if let Some(timezone) = args.timezone {
        config.local_timezone = timezone;
    }
    if let Some(threshold) = args.low_stock_threshold {
        config.low_stock_threshold = threshold;
    }

    let now = OffsetDateTime::now_utc();
    let local_offset = config.local_offset(now)?;
    let today = now.to_offset(local_offset).date();

    let mut session = SalesSession::new();
    let ticket = session.begin_load();
    match load_sales(&args.sales, now) {
        Ok(sales) => {
            session.finish_load(ticket, sales)?;
        }
        Err(error) => session.fail_load(ticket, &error.to_string())?,
    }

    if let Some(brand) = &args.brand {
        session.select_brand(brand)?;
    }

    let dashboard = SalesDashboard::new(&session, today, local_offset);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print_dashboard(&dashboard);
    }

    if let Some(path) = &args.products {
        let products = load_products(path)?;
        print_inventory(&products, config.low_stock_threshold);
    }

    Ok(())
}

/// Read the sales export, newest first like the store's query.
fn load_sales(path: &Path, now: OffsetDateTime) -> Result<Vec<Sale>, venmol::Error> {
    let text = fs::read_to_string(path)
        .map_err(|error| venmol::Error::InvalidRecordFile(format!("{path:?}: {error}")))?;

    let mut sales: Vec<Sale> = parse_collection(&text)?
        .iter()
        .map(|(id, document)| Sale::from_record(id, document, now))
        .collect();
    sales.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

    Ok(sales)
}

fn load_products(path: &Path) -> Result<Vec<Product>, venmol::Error> {
    let text = fs::read_to_string(path)
        .map_err(|error| venmol::Error::InvalidRecordFile(format!("{path:?}: {error}")))?;

    Ok(parse_collection(&text)?
        .iter()
        .map(|(id, document)| Product::from_record(id, document))
        .collect())
}

fn print_dashboard(dashboard: &SalesDashboard) {
    println!("Ventas ({})", dashboard.subtitle);

    if dashboard.empty_state {
        match &dashboard.error_message {
            Some(message) => println!("Error al cargar ventas: {message}"),
            None => println!("No hay ventas registradas"),
        }
        return;
    }

    println!("  Total de ventas:  {}", dashboard.total_amount);
    println!("  Ventas de hoy:    {}", dashboard.today_amount);
    println!("  Productos:        {}", dashboard.total_quantity);
    if let Some(top_product) = &dashboard.top_product {
        println!("  Más vendido:      {} ({})", top_product.name, top_product.units_sold);
    }

    let chips: Vec<String> = dashboard
        .chips
        .iter()
        .map(|chip| {
            if chip.checked {
                format!("[{}]", chip.label)
            } else {
                chip.label.clone()
            }
        })
        .collect();
    println!();
    println!("{}", chips.join("  "));
    println!();
    println!("{}", dashboard.section_title);

    for row in &dashboard.rows {
        println!(
            "  {} {} {:<20} {} {:<16} {:<14} {:>12} {}",
            row.avatar,
            row.date,
            row.client,
            row.product,
            row.brand,
            row.quantity,
            row.total,
            row.badge.symbol()
        );
    }
}

fn print_inventory(products: &[Product], low_stock_threshold: u32) {
    let statistics = InventoryStatistics::compute(products, low_stock_threshold);

    println!();
    println!("Inventario");
    println!("  Unidades:     {}", statistics.total_quantity);
    println!("  Valor total:  {}", format_currency(statistics.total_value));
    println!("  Bajo stock:   {}", statistics.low_stock_count);
    if let Some(alert) = statistics.low_stock_alert() {
        println!("  {alert}");
    }

    for group in group_by_brand(products) {
        println!("  {} ({})", group.brand, group.products.len());
        for product in group.products {
            println!(
                "    {:<24} {:>6} x {}",
                product.name,
                product.quantity,
                format_currency(product.price)
            );
        }
    }
}

fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    let env_filter = EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(env_filter)
        .init();
}
