//! Whole-collection CRUD over a [`Storage`] backing. Every operation is a
//! synchronous read-modify-write of the full collection; last writer wins.

use std::io;
use std::path::Path;

use chrono::Utc;
use log::warn;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    Appointment, AppointmentPatch, Client, ClientPatch, NewAppointment, NewClient, NewPayment,
    NewService, Payment, PaymentPatch, Service, ServicePatch,
};
use crate::storage::{FileStorage, Storage, StorageError};

pub const KEY_CLIENTS: &str = "salon_clientes";
pub const KEY_SERVICES: &str = "salon_prestations";
pub const KEY_APPOINTMENTS: &str = "salon_rendezvous";
pub const KEY_PAYMENTS: &str = "salon_paiements";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct Store<S> {
    storage: S,
}

impl Store<FileStorage> {
    /// Opens a file-backed store rooted at `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(FileStorage::open(dir)?))
    }
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    // Reads are fail-open: a missing or unreadable collection is an empty
    // one. Writes propagate their errors.

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("reading collection {key} failed, treating as empty: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!("collection {key} is unreadable, treating as empty: {err}");
                Vec::new()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.storage.set(key, &raw)?;
        Ok(())
    }

    // Clients

    pub fn clients(&self) -> Vec<Client> {
        self.load(KEY_CLIENTS)
    }

    pub fn add_client(&self, new: NewClient) -> Result<Client, StoreError> {
        let client = Client {
            id: new_id(),
            name: new.name,
            phone: new.phone,
            email: new.email,
            birth_date: new.birth_date,
            notes: new.notes,
            created_on: today_stamp(),
        };
        let mut clients = self.clients();
        clients.push(client.clone());
        self.save(KEY_CLIENTS, &clients)?;
        Ok(client)
    }

    pub fn update_client(&self, id: &str, patch: ClientPatch) -> Result<(), StoreError> {
        let mut clients = self.clients();
        if let Some(client) = clients.iter_mut().find(|c| c.id == id) {
            client.apply(patch);
        }
        self.save(KEY_CLIENTS, &clients)
    }

    pub fn delete_client(&self, id: &str) -> Result<(), StoreError> {
        let clients: Vec<Client> = self.clients().into_iter().filter(|c| c.id != id).collect();
        self.save(KEY_CLIENTS, &clients)
    }

    // Services

    /// Lists the service catalog, materializing the default catalog on first
    /// use so the application never starts empty.
    pub fn services(&self) -> Result<Vec<Service>, StoreError> {
        let services: Vec<Service> = self.load(KEY_SERVICES);
        if !services.is_empty() {
            return Ok(services);
        }
        let defaults = default_services();
        self.save(KEY_SERVICES, &defaults)?;
        Ok(defaults)
    }

    pub fn add_service(&self, new: NewService) -> Result<Service, StoreError> {
        let service = Service {
            id: new_id(),
            name: new.name,
            duration_min: new.duration_min,
            price: new.price,
            description: new.description,
            category: new.category,
        };
        let mut services = self.services()?;
        services.push(service.clone());
        self.save(KEY_SERVICES, &services)?;
        Ok(service)
    }

    pub fn update_service(&self, id: &str, patch: ServicePatch) -> Result<(), StoreError> {
        let mut services = self.services()?;
        if let Some(service) = services.iter_mut().find(|s| s.id == id) {
            service.apply(patch);
        }
        self.save(KEY_SERVICES, &services)
    }

    pub fn delete_service(&self, id: &str) -> Result<(), StoreError> {
        let services: Vec<Service> = self
            .services()?
            .into_iter()
            .filter(|s| s.id != id)
            .collect();
        self.save(KEY_SERVICES, &services)
    }

    // Appointments

    pub fn appointments(&self) -> Vec<Appointment> {
        self.load(KEY_APPOINTMENTS)
    }

    pub fn add_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let appointment = Appointment {
            id: new_id(),
            client_id: new.client_id,
            date: new.date,
            time: new.time,
            service_id: new.service_id,
            status: new.status,
            internal_note: new.internal_note,
        };
        let mut appointments = self.appointments();
        appointments.push(appointment.clone());
        self.save(KEY_APPOINTMENTS, &appointments)?;
        Ok(appointment)
    }

    pub fn update_appointment(&self, id: &str, patch: AppointmentPatch) -> Result<(), StoreError> {
        let mut appointments = self.appointments();
        if let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) {
            appointment.apply(patch);
        }
        self.save(KEY_APPOINTMENTS, &appointments)
    }

    pub fn delete_appointment(&self, id: &str) -> Result<(), StoreError> {
        let appointments: Vec<Appointment> = self
            .appointments()
            .into_iter()
            .filter(|a| a.id != id)
            .collect();
        self.save(KEY_APPOINTMENTS, &appointments)
    }

    // Payments

    pub fn payments(&self) -> Vec<Payment> {
        self.load(KEY_PAYMENTS)
    }

    pub fn add_payment(&self, new: NewPayment) -> Result<Payment, StoreError> {
        let payment = Payment {
            id: new_id(),
            client_id: new.client_id,
            appointment_id: new.appointment_id,
            amount: new.amount,
            method: new.method,
            date: new.date,
        };
        let mut payments = self.payments();
        payments.push(payment.clone());
        self.save(KEY_PAYMENTS, &payments)?;
        Ok(payment)
    }

    pub fn update_payment(&self, id: &str, patch: PaymentPatch) -> Result<(), StoreError> {
        let mut payments = self.payments();
        if let Some(payment) = payments.iter_mut().find(|p| p.id == id) {
            payment.apply(patch);
        }
        self.save(KEY_PAYMENTS, &payments)
    }

    pub fn delete_payment(&self, id: &str) -> Result<(), StoreError> {
        let payments: Vec<Payment> = self.payments().into_iter().filter(|p| p.id != id).collect();
        self.save(KEY_PAYMENTS, &payments)
    }
}

/// Millisecond timestamp in base 36 plus a short random suffix. Practically
/// unique for a single-operator workload, not a cryptographic guarantee.
pub fn new_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut id = base36(millis);
    let mut rng = rand::thread_rng();
    for _ in 0..ID_SUFFIX_LEN {
        id.push(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char);
    }
    id
}

fn base36(mut value: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(ID_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

fn today_stamp() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn default_services() -> Vec<Service> {
    let defaults = [
        ("Coupe femme", 45, 150.0, "Coupe"),
        ("Brushing", 30, 100.0, "Coiffure"),
        ("Coloration", 90, 300.0, "Couleur"),
        ("Mèches / Balayage", 120, 450.0, "Couleur"),
        ("Soin kératine", 60, 500.0, "Soin"),
        ("Coupe + Brushing", 60, 200.0, "Coupe"),
    ];
    defaults
        .into_iter()
        .map(|(name, duration_min, price, category)| Service {
            id: new_id(),
            name: name.to_string(),
            duration_min,
            price,
            description: None,
            category: Some(category.to_string()),
        })
        .collect()
}
