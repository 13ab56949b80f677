use std::env;
use std::error::Error;
use std::process;

use chrono::Utc;

use salon_manager::{report, Store};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data_dir = env::var("SALON_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    log::info!("Opening salon data in {data_dir}");
    let store = Store::open(&data_dir)?;

    let today = Utc::now().date_naive();
    let stamp = today.format("%Y-%m-%d").to_string();

    let clients = store.clients();
    let services = store.services()?;
    let appointments = store.appointments();
    let payments = store.payments();

    let todays = report::appointments_on(&appointments, &stamp);

    println!("Tableau de bord — {stamp}");
    println!("  Clientes         {}", clients.len());
    println!("  Prestations      {}", services.len());
    println!("  RDV aujourd'hui  {}", todays.len());
    println!(
        "  CA du jour       {}",
        report::format_mad(report::revenue_on(&payments, &stamp))
    );

    if !todays.is_empty() {
        println!();
        println!("Rendez-vous du jour:");
        for rdv in &todays {
            let client = clients
                .iter()
                .find(|c| c.id == rdv.client_id)
                .map(|c| c.name.as_str())
                .unwrap_or(report::UNKNOWN_LABEL);
            let service = services
                .iter()
                .find(|s| s.id == rdv.service_id)
                .map(|s| s.name.as_str())
                .unwrap_or(report::UNKNOWN_LABEL);
            println!("  {}  {client} — {service} ({})", rdv.time, rdv.status.label());
        }
    }

    let top = report::top_services(&appointments, &services);
    if !top.is_empty() {
        println!();
        println!("Top prestations:");
        for entry in &top {
            println!("  {:<24} {} rdv", entry.name, entry.count);
        }
    }

    println!();
    println!("Revenus (7 derniers jours):");
    for point in report::weekly_revenue(&payments, today) {
        println!("  {:<6} {}", point.day, report::format_mad(point.total));
    }

    Ok(())
}
