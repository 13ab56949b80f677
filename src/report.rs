//! Read-only aggregates over the four collections. Nothing here mutates the
//! store; the reference day is always passed in so callers (and tests) decide
//! what "today" means.

use chrono::{Duration, Locale, NaiveDate};

use crate::models::{Appointment, Client, Payment, Service};

/// Label shown when a soft reference points at a deleted record.
pub const UNKNOWN_LABEL: &str = "Inconnu";

const TOP_SERVICES_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenuePoint {
    /// Localized short weekday name.
    pub day: String,
    pub total: f64,
}

/// Appointments on `date`, sorted by slot time. `HH:mm` strings sort
/// chronologically as plain strings.
pub fn appointments_on(appointments: &[Appointment], date: &str) -> Vec<Appointment> {
    let mut day: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.date == date)
        .cloned()
        .collect();
    day.sort_by(|a, b| a.time.cmp(&b.time));
    day
}

pub fn revenue_on(payments: &[Payment], date: &str) -> f64 {
    payments
        .iter()
        .filter(|p| p.date == date)
        .map(|p| p.amount)
        .sum()
}

/// Most-booked services across all appointments, top five, ties kept in
/// encounter order. Dangling service ids resolve to [`UNKNOWN_LABEL`].
pub fn top_services(appointments: &[Appointment], services: &[Service]) -> Vec<ServiceCount> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for appointment in appointments {
        match counts
            .iter_mut()
            .find(|(id, _)| *id == appointment.service_id)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((&appointment.service_id, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_SERVICES_LIMIT);
    counts
        .into_iter()
        .map(|(id, count)| ServiceCount {
            name: services
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            count,
        })
        .collect()
}

/// Revenue per day over the last seven days, oldest first, `today` last.
pub fn weekly_revenue(payments: &[Payment], today: NaiveDate) -> Vec<RevenuePoint> {
    (0..7)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let stamp = day.format("%Y-%m-%d").to_string();
            RevenuePoint {
                day: day.format_localized("%a", Locale::fr_FR).to_string(),
                total: revenue_on(payments, &stamp),
            }
        })
        .collect()
}

/// Amount with French thousands grouping and the fixed currency suffix,
/// e.g. `1 500 MAD`. Cents are shown only when the amount has any.
pub fn format_mad(amount: f64) -> String {
    let negative = amount < 0.0;
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if cents > 0 {
        out.push_str(&format!(",{cents:02}"));
    }
    out.push_str(" MAD");
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{202f}');
        }
        out.push(ch);
    }
    out
}

/// Case-insensitive name match or phone substring match. An empty query
/// returns the full roster.
pub fn search_clients(clients: &[Client], query: &str) -> Vec<Client> {
    let query = query.trim();
    if query.is_empty() {
        return clients.to_vec();
    }
    let needle = query.to_lowercase();
    clients
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.phone.contains(query))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPrefill {
    pub client_id: String,
    /// Price of the linked service, when it still exists.
    pub amount: Option<f64>,
}

/// Resolves an appointment to the client and price a payment form should
/// start from. Returns `None` when the appointment id dangles.
pub fn payment_prefill(
    appointments: &[Appointment],
    services: &[Service],
    appointment_id: &str,
) -> Option<PaymentPrefill> {
    let appointment = appointments.iter().find(|a| a.id == appointment_id)?;
    let amount = services
        .iter()
        .find(|s| s.id == appointment.service_id)
        .map(|s| s.price);
    Some(PaymentPrefill {
        client_id: appointment.client_id.clone(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, PaymentMethod};

    fn rdv(id: &str, date: &str, time: &str, service_id: &str) -> Appointment {
        Appointment {
            id: id.into(),
            client_id: "c1".into(),
            date: date.into(),
            time: time.into(),
            service_id: service_id.into(),
            status: AppointmentStatus::Confirmed,
            internal_note: None,
        }
    }

    fn payment(amount: f64, date: &str) -> Payment {
        Payment {
            id: "p".into(),
            client_id: "c1".into(),
            appointment_id: None,
            amount,
            method: PaymentMethod::Cash,
            date: date.into(),
        }
    }

    fn service(id: &str, name: &str, price: f64) -> Service {
        Service {
            id: id.into(),
            name: name.into(),
            duration_min: 30,
            price,
            description: None,
            category: None,
        }
    }

    #[test]
    fn appointments_on_filters_and_sorts_by_time() {
        let appointments = vec![
            rdv("a", "2024-01-01", "14:00", "s1"),
            rdv("b", "2024-01-02", "09:00", "s1"),
            rdv("c", "2024-01-01", "09:30", "s1"),
        ];
        let day = appointments_on(&appointments, "2024-01-01");
        let ids: Vec<&str> = day.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn revenue_counts_only_the_given_day() {
        let payments = vec![
            payment(100.0, "2024-01-02"),
            payment(200.0, "2024-01-02"),
            payment(50.0, "2024-01-01"),
        ];
        assert_eq!(revenue_on(&payments, "2024-01-02"), 300.0);
        assert_eq!(revenue_on(&payments, "2024-01-01"), 50.0);
        assert_eq!(revenue_on(&payments, "2024-01-03"), 0.0);
    }

    #[test]
    fn top_services_sorts_by_count_with_stable_ties() {
        let appointments = vec![
            rdv("1", "2024-01-01", "09:00", "b"),
            rdv("2", "2024-01-01", "10:00", "a"),
            rdv("3", "2024-01-01", "11:00", "a"),
            rdv("4", "2024-01-02", "09:00", "a"),
            rdv("5", "2024-01-02", "10:00", "c"),
        ];
        let services = vec![service("a", "Coloration", 300.0), service("b", "Brushing", 100.0)];
        let top = top_services(&appointments, &services);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0], ServiceCount { name: "Coloration".into(), count: 3 });
        // b and c are tied; b was encountered first.
        assert_eq!(top[1], ServiceCount { name: "Brushing".into(), count: 1 });
        assert_eq!(top[2], ServiceCount { name: UNKNOWN_LABEL.into(), count: 1 });
    }

    #[test]
    fn top_services_truncates_to_five() {
        let appointments: Vec<Appointment> = (0..7)
            .map(|i| rdv(&i.to_string(), "2024-01-01", "09:00", &format!("s{i}")))
            .collect();
        assert_eq!(top_services(&appointments, &[]).len(), 5);
    }

    #[test]
    fn weekly_revenue_runs_oldest_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(); // a Monday
        let payments = vec![
            payment(100.0, "2024-01-08"),
            payment(40.0, "2024-01-02"),
            payment(10.0, "2024-01-01"), // out of the window
        ];
        let series = weekly_revenue(&payments, today);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].total, 40.0);
        assert_eq!(series[6].total, 100.0);
        assert_eq!(series[1..6].iter().map(|p| p.total).sum::<f64>(), 0.0);
        // Monday in fr_FR.
        assert!(series[6].day.starts_with("lun"));
        assert!(series[0].day.starts_with("mar"));
    }

    #[test]
    fn format_mad_groups_thousands() {
        assert_eq!(format_mad(1500.0), "1\u{202f}500 MAD");
        assert_eq!(format_mad(999.0), "999 MAD");
        assert_eq!(format_mad(1234567.0), "1\u{202f}234\u{202f}567 MAD");
        assert_eq!(format_mad(0.0), "0 MAD");
        assert_eq!(format_mad(99.5), "99,50 MAD");
    }

    #[test]
    fn search_matches_name_or_phone() {
        let clients = vec![
            Client {
                id: "c1".into(),
                name: "Amina Berrada".into(),
                phone: "0612345678".into(),
                email: None,
                birth_date: None,
                notes: None,
                created_on: "2024-01-01".into(),
            },
            Client {
                id: "c2".into(),
                name: "Sara".into(),
                phone: "0700000000".into(),
                email: None,
                birth_date: None,
                notes: None,
                created_on: "2024-01-01".into(),
            },
        ];
        assert_eq!(search_clients(&clients, "berrada").len(), 1);
        assert_eq!(search_clients(&clients, "0700").len(), 1);
        assert_eq!(search_clients(&clients, "").len(), 2);
        assert!(search_clients(&clients, "karim").is_empty());
    }

    #[test]
    fn prefill_resolves_client_and_price() {
        let appointments = vec![rdv("r1", "2024-01-01", "09:00", "s1")];
        let services = vec![service("s1", "Coupe femme", 150.0)];

        let prefill = payment_prefill(&appointments, &services, "r1").unwrap();
        assert_eq!(prefill.client_id, "c1");
        assert_eq!(prefill.amount, Some(150.0));

        // Dangling service id: client still resolves, price does not.
        let prefill = payment_prefill(&appointments, &[], "r1").unwrap();
        assert_eq!(prefill.amount, None);

        assert!(payment_prefill(&appointments, &services, "nope").is_none());
    }
}
