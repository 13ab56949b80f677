//! Write-time checks the presentation layer runs before handing a record to
//! the store. The store itself never rejects anything.

use thiserror::Error;

use crate::models::{Appointment, AppointmentStatus, NewAppointment, NewClient, NewPayment};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("slot {date} {time} is already taken by a non-cancelled appointment")]
    SlotConflict { date: String, time: String },
    #[error("a client must be selected")]
    MissingClient,
    #[error("a service must be selected")]
    MissingService,
    #[error("name and phone are required")]
    MissingContact,
    #[error("amount must be positive")]
    InvalidAmount,
}

/// First appointment occupying the exact `(date, time)` slot. Cancelled
/// appointments free their slot. The match is exact string equality on the
/// time; a service's duration does not block adjacent slots.
pub fn find_conflict<'a>(
    appointments: &'a [Appointment],
    date: &str,
    time: &str,
) -> Option<&'a Appointment> {
    appointments
        .iter()
        .find(|a| a.date == date && a.time == time && a.status != AppointmentStatus::Cancelled)
}

pub fn check_slot(appointments: &[Appointment], date: &str, time: &str) -> Result<(), BookingError> {
    match find_conflict(appointments, date, time) {
        Some(_) => Err(BookingError::SlotConflict {
            date: date.to_string(),
            time: time.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_appointment(
    new: &NewAppointment,
    existing: &[Appointment],
) -> Result<(), BookingError> {
    if new.client_id.trim().is_empty() {
        return Err(BookingError::MissingClient);
    }
    if new.service_id.trim().is_empty() {
        return Err(BookingError::MissingService);
    }
    check_slot(existing, &new.date, &new.time)
}

pub fn validate_client(new: &NewClient) -> Result<(), BookingError> {
    if new.name.trim().is_empty() || new.phone.trim().is_empty() {
        return Err(BookingError::MissingContact);
    }
    Ok(())
}

pub fn validate_payment(new: &NewPayment) -> Result<(), BookingError> {
    if new.client_id.trim().is_empty() {
        return Err(BookingError::MissingClient);
    }
    if new.amount <= 0.0 {
        return Err(BookingError::InvalidAmount);
    }
    Ok(())
}
