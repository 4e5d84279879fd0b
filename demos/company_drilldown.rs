use sales_dashboard::{split_by_region, DashboardConfig, SalesDashboard, ViewModelBundle};

fn print_company_panels(bundle: &ViewModelBundle) {
    for vm in &bundle.company_rankings {
        if vm.is_placeholder() {
            println!("  [{}] {}", vm.id, vm.title);
            continue;
        }

        let bars: Vec<String> = vm
            .bars()
            .iter()
            .map(|g| format!("{} ({:.2})", g.key, g.total))
            .collect();
        println!(
            "  [{}] {} for {}: {}",
            vm.id,
            vm.title,
            vm.company.as_deref().unwrap_or("-"),
            if bars.is_empty() { "no data".to_string() } else { bars.join(", ") }
        );
    }
}

fn main() -> anyhow::Result<()> {
    let ledger = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/ledger.csv");
    let dashboard = SalesDashboard::from_csv_path(ledger, DashboardConfig::default())?;
    let mut session = dashboard.session();

    println!("Companies: {}", dashboard.companies().join(", "));

    let initial = session.start();
    println!("\n{:?}", session.state());
    print_company_panels(&initial);

    println!("\nSales evolution by region:");
    for line in split_by_region(initial.sales_evolution.points()) {
        let points: Vec<String> = line
            .points
            .iter()
            .map(|(year, total)| format!("{}: {:.2}", year, total))
            .collect();
        println!("  {:<6} {}", line.region, points.join(" | "));
    }

    for company in dashboard.companies().into_iter().chain(["Acme Deutschland"]) {
        let bundle = session.select_company(Some(company));
        println!("\n{:?}", session.state());
        print_company_panels(&bundle);
    }

    let cleared = session.clear_selection();
    println!("\n{:?}", session.state());
    print_company_panels(&cleared);

    Ok(())
}
