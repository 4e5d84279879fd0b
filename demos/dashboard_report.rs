use sales_dashboard::{DashboardConfig, SalesDashboard};

/// Usage: dashboard_report [ledger.csv] [config.json] [--json]
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    let mut paths = args.iter().filter(|a| !a.starts_with("--"));

    let ledger = paths
        .next()
        .cloned()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/ledger.csv").to_string());
    let config = match paths.next() {
        Some(path) => DashboardConfig::from_json_path(path)?,
        None => DashboardConfig::default(),
    };

    let dashboard = SalesDashboard::from_csv_path(&ledger, config)?;
    println!(
        "Loaded {} rows for {} companies from {}",
        dashboard.dataset().len(),
        dashboard.companies().len(),
        ledger
    );

    let bundle = dashboard.session().start();
    if as_json {
        println!("{}", bundle.to_json()?);
    } else {
        println!("{}", bundle.to_markdown());
    }

    Ok(())
}
