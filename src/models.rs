//! Entity records as they are persisted. Serialized field names and enum
//! strings match the existing stored data and must not change.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "dateAnniversaire", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "dateCreation")]
    pub created_on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(rename = "nom")]
    pub name: String,
    /// Duration in minutes.
    #[serde(rename = "duree")]
    pub duration_min: u32,
    #[serde(rename = "prix")]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "categorie", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(rename = "clienteId")]
    pub client_id: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Slot time, `HH:mm`.
    #[serde(rename = "heure")]
    pub time: String,
    #[serde(rename = "prestationId")]
    pub service_id: String,
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
    #[serde(rename = "noteInterne", skip_serializing_if = "Option::is_none")]
    pub internal_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    #[serde(rename = "clienteId")]
    pub client_id: String,
    #[serde(rename = "rendezVousId", skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(rename = "montant")]
    pub amount: f64,
    #[serde(rename = "modePaiement")]
    pub method: PaymentMethod,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "confirme")]
    Confirmed,
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "annule")]
    Cancelled,
    #[serde(rename = "termine")]
    Completed,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmé",
            AppointmentStatus::Pending => "En attente",
            AppointmentStatus::Cancelled => "Annulé",
            AppointmentStatus::Completed => "Terminé",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "especes")]
    Cash,
    #[serde(rename = "carte")]
    Card,
    #[serde(rename = "virement")]
    Transfer,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Espèces",
            PaymentMethod::Card => "Carte",
            PaymentMethod::Transfer => "Virement",
        }
    }
}

// Creation payloads: everything but the store-assigned fields.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewClient {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    pub email: Option<String>,
    #[serde(rename = "dateAnniversaire")]
    pub birth_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewService {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "duree")]
    pub duration_min: u32,
    #[serde(rename = "prix")]
    pub price: f64,
    pub description: Option<String>,
    #[serde(rename = "categorie")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    #[serde(rename = "clienteId")]
    pub client_id: String,
    pub date: String,
    #[serde(rename = "heure")]
    pub time: String,
    #[serde(rename = "prestationId")]
    pub service_id: String,
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
    #[serde(rename = "noteInterne")]
    pub internal_note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    #[serde(rename = "clienteId")]
    pub client_id: String,
    #[serde(rename = "rendezVousId")]
    pub appointment_id: Option<String>,
    #[serde(rename = "montant")]
    pub amount: f64,
    #[serde(rename = "modePaiement")]
    pub method: PaymentMethod,
    pub date: String,
}

// Patches: `Some` replaces the field, `None` leaves it untouched.

#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub duration_min: Option<u32>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub client_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub service_id: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub internal_note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub client_id: Option<String>,
    pub appointment_id: Option<String>,
    pub amount: Option<f64>,
    pub method: Option<PaymentMethod>,
    pub date: Option<String>,
}

impl Client {
    pub fn apply(&mut self, patch: ClientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = Some(birth_date);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }
}

impl Service {
    pub fn apply(&mut self, patch: ServicePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(duration_min) = patch.duration_min {
            self.duration_min = duration_min;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
    }
}

impl Appointment {
    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(service_id) = patch.service_id {
            self.service_id = service_id;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(internal_note) = patch.internal_note {
            self.internal_note = Some(internal_note);
        }
    }
}

impl Payment {
    pub fn apply(&mut self, patch: PaymentPatch) {
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(appointment_id) = patch.appointment_id {
            self.appointment_id = Some(appointment_id);
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(method) = patch.method {
            self.method = method;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}
