//! Sample data set: a handful of members, the usual livestock categories
//! and a few transactions between them.
//!
//! Used by the `seed` binary and by the CLI's `--offline` mode.

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::error::{RemoteError, RemoteResult};
use crate::remote::Remote;
use crate::store::InsertOutcome;
use ganadera_core::{Money, NewCategory, NewMember, NewTransaction};

/// (nombre, apellido, cedula, telefono, direccion, email)
const MEMBERS: &[(&str, &str, &str, &str, &str, Option<&str>)] = &[
    ("Ana", "Pérez", "1-1234-0567", "8888-1234", "Upala, Alajuela", Some("ana.perez@correo.cr")),
    ("Luis", "Mora", "2-0444-0555", "8765-4321", "San Carlos, Alajuela", None),
    ("María", "Jiménez", "5-0321-0987", "8701-2233", "Nicoya, Guanacaste", Some("mjimenez@correo.cr")),
    ("Jorge", "Solís", "7-0111-0222", "8333-4455", "Guápiles, Limón", None),
];

/// (nombre, descripcion)
const CATEGORIES: &[(&str, Option<&str>)] = &[
    ("Bovino", Some("Ganado vacuno de carne y leche")),
    ("Porcino", Some("Cerdos de engorde")),
    ("Ovino", None),
    ("Caprino", Some("Cabras lecheras")),
    ("Equino", None),
];

/// (member index, category index, cantidad, precio unitario en céntimos, días atrás)
const TRANSACTIONS: &[(usize, usize, i64, i64, i64)] = &[
    (0, 0, 3, 45_000_00, 20),
    (0, 1, 10, 8_500_50, 12),
    (1, 0, 5, 42_750_00, 9),
    (2, 3, 8, 6_000_00, 5),
    (3, 2, 12, 5_250_25, 2),
    (1, 1, 4, 9_100_00, 1),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub members: usize,
    pub categories: usize,
    pub transactions: usize,
}

fn inserted<T>(outcome: InsertOutcome<T>, what: &str) -> RemoteResult<T> {
    match outcome {
        InsertOutcome::Inserted(row) => Ok(row),
        InsertOutcome::NoRowReturned => Err(RemoteError::not_found(what, "inserted row")),
        InsertOutcome::ServiceError(err) => Err(err),
    }
}

/// Inserts the sample data set through `remote`.
///
/// Skips everything if the store already has active members.
pub async fn seed_sample_data(remote: &Remote) -> RemoteResult<SeedReport> {
    let existing = remote.members().list_active().await?;
    if !existing.is_empty() {
        warn!(count = existing.len(), "Store already has members; skipping seed");
        return Ok(SeedReport::default());
    }

    let now = Utc::now();
    let mut report = SeedReport::default();

    let mut member_ids = Vec::with_capacity(MEMBERS.len());
    for (i, (nombre, apellido, cedula, telefono, direccion, email)) in MEMBERS.iter().enumerate() {
        let new = NewMember {
            first_name: nombre.to_string(),
            last_name: apellido.to_string(),
            national_id: cedula.to_string(),
            phone: telefono.to_string(),
            address: direccion.to_string(),
            email: email.map(str::to_string),
            registered_at: now - Duration::days(30 - i as i64),
            active: true,
        };
        let member = inserted(remote.members().insert(&new).await, "member")?;
        member_ids.push(member.id);
        report.members += 1;
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (nombre, descripcion) in CATEGORIES {
        let new = NewCategory {
            name: nombre.to_string(),
            description: descripcion.map(str::to_string),
            active: true,
        };
        let category = inserted(remote.categories().insert(&new).await, "category")?;
        category_ids.push(category.id);
        report.categories += 1;
    }

    for &(member, category, quantity, price_cents, days_ago) in TRANSACTIONS {
        let unit_price = Money::from_cents(price_cents);
        let new = NewTransaction {
            member_id: member_ids[member].clone(),
            category_id: category_ids[category].clone(),
            quantity,
            registered_at: now - Duration::days(days_ago),
            notes: None,
            unit_price: Some(unit_price),
            total: unit_price.multiply_quantity(quantity),
        };
        inserted(remote.transactions().insert(&new).await, "transaction")?;
        report.transactions += 1;
    }

    info!(
        members = report.members,
        categories = report.categories,
        transactions = report.transactions,
        "Sample data inserted"
    );
    Ok(report)
}
