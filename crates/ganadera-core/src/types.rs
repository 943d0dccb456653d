//! # Domain Types
//!
//! Core domain types used throughout the registry.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │  Member         │   │ LivestockCategory│   │  Transaction     │     │
//! │  │  (socios)       │   │  (tipos_ganado)  │   │  (registros)     │     │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────  │     │
//! │  │  id             │◄──┼──────────────────┼───│  socio_id (FK)   │     │
//! │  │  nombre         │   │  id          ◄───┼───│  tipo_ganado_id  │     │
//! │  │  cedula         │   │  nombre          │   │  cantidad        │     │
//! │  │  activo         │   │  activo          │   │  total           │     │
//! │  └─────────────────┘   └──────────────────┘   └──────────────────┘     │
//! │                                                                         │
//! │  EnrichedTransaction = Transaction + Related<Member>                   │
//! │                                    + Related<LivestockCategory>        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Rust fields are English; the remote tables use the Spanish column names,
//! mapped with `#[serde(rename)]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Label rendered wherever a referenced row could not be found.
pub const MISSING_REFERENCE_LABEL: &str = "N/A";

fn default_active() -> bool {
    true
}

// =============================================================================
// Member
// =============================================================================

/// A cooperative member ("socio").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Member {
    /// Server-assigned identifier.
    pub id: String,

    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellido")]
    pub last_name: String,

    /// National id ("cédula"). Intended unique; only the store can enforce it.
    #[serde(rename = "cedula")]
    pub national_id: String,

    #[serde(rename = "telefono")]
    pub phone: String,

    #[serde(rename = "direccion")]
    pub address: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "fecha_registro", default, with = "crate::timestamp::option")]
    #[ts(as = "Option<String>")]
    pub registered_at: Option<DateTime<Utc>>,

    /// Soft-delete marker. Inactive members never enter the working set.
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

impl Member {
    /// "Nombre Apellido".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Label used by the member picker: "Nombre Apellido - cédula".
    pub fn picker_label(&self) -> String {
        format!("{} - {}", self.full_name(), self.national_id)
    }
}

/// Insert payload for a member (no id; the store assigns it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewMember {
    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellido")]
    pub last_name: String,

    #[serde(rename = "cedula")]
    pub national_id: String,

    #[serde(rename = "telefono")]
    pub phone: String,

    #[serde(rename = "direccion")]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "fecha_registro", with = "crate::timestamp")]
    #[ts(as = "String")]
    pub registered_at: DateTime<Utc>,

    #[serde(rename = "activo")]
    pub active: bool,
}

// =============================================================================
// Livestock Category
// =============================================================================

/// A livestock category ("tipo de ganado").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LivestockCategory {
    pub id: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

/// Insert payload for a livestock category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "activo")]
    pub active: bool,
}

// =============================================================================
// Transaction
// =============================================================================

/// A livestock transaction ("registro").
///
/// `total` is written once by the client (quantity × unit price at submit
/// time) and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: String,

    #[serde(rename = "socio_id")]
    pub member_id: String,

    #[serde(rename = "tipo_ganado_id")]
    pub category_id: String,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "fecha_registro", with = "crate::timestamp")]
    #[ts(as = "String")]
    pub registered_at: DateTime<Utc>,

    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,

    #[serde(rename = "precio_unitario", default)]
    pub unit_price: Option<Money>,

    #[serde(default)]
    pub total: Option<Money>,
}

/// Insert payload for a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewTransaction {
    #[serde(rename = "socio_id")]
    pub member_id: String,

    #[serde(rename = "tipo_ganado_id")]
    pub category_id: String,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "fecha_registro", with = "crate::timestamp")]
    #[ts(as = "String")]
    pub registered_at: DateTime<Utc>,

    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(rename = "precio_unitario", default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Money>,
}

// =============================================================================
// Enriched Transaction
// =============================================================================

/// Outcome of resolving a foreign key during the transaction join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Related<T> {
    /// The referenced row was found.
    Found(T),
    /// No row with this id came back from the lookup.
    Missing(String),
}

impl<T> Related<T> {
    /// Returns the resolved row, if any.
    pub fn found(&self) -> Option<&T> {
        match self {
            Related::Found(row) => Some(row),
            Related::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Related::Missing(_))
    }

    /// Renders the row with `f`, or [`MISSING_REFERENCE_LABEL`].
    pub fn label_with(&self, f: impl FnOnce(&T) -> String) -> String {
        match self {
            Related::Found(row) => f(row),
            Related::Missing(_) => MISSING_REFERENCE_LABEL.to_string(),
        }
    }
}

/// A transaction joined with the member and category it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(rename = "socio")]
    pub member: Related<Member>,

    #[serde(rename = "tipo_ganado")]
    pub category: Related<LivestockCategory>,
}

impl EnrichedTransaction {
    pub fn member_label(&self) -> String {
        self.member.label_with(Member::full_name)
    }

    pub fn category_label(&self) -> String {
        self.category.label_with(|c| c.name.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
