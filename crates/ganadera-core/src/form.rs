//! # Form Drafts
//!
//! Raw text state for the three entry forms, and the rules that turn a
//! draft into an insert payload.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TransactionForm { member_id, category_id, quantity, unit_price, .. }   │
//! │       │                                                                 │
//! │       ├── can_submit(busy)?  ── no ──► CoreError::SubmitDisabled       │
//! │       │                                                                 │
//! │       ├── to_new(now)        ── bad input ──► CoreError::Validation    │
//! │       │      precio_unitario = price or 0                               │
//! │       │      total           = quantity × price                         │
//! │       │                                                                 │
//! │       └── reset()  ──► blank draft, payload handed to the registry     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Drafts are cleared once a payload has been built, whatever the remote
//! store later answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{NewCategory, NewMember, NewTransaction};
use crate::validation::{
    optional_text, parse_optional_price, parse_quantity, validate_email, validate_required,
    validate_text_length,
};
use crate::MAX_NOTES_LENGTH;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn disabled(missing: &[&'static str], busy: bool) -> CoreError {
    if busy {
        CoreError::SubmitDisabled("operation in progress".to_string())
    } else {
        CoreError::SubmitDisabled(format!("missing {}", missing.join(", ")))
    }
}

// =============================================================================
// Member Form
// =============================================================================

/// Draft for a new member. Every field except email is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemberForm {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub address: String,
    pub email: String,
}

impl MemberForm {
    /// Names of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("nombre", &self.first_name),
            ("apellido", &self.last_name),
            ("cedula", &self.national_id),
            ("telefono", &self.phone),
            ("direccion", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn can_submit(&self, busy: bool) -> bool {
        !busy && self.missing_fields().is_empty()
    }

    /// Builds the insert payload: active, registered at `now`.
    pub fn to_new(&self, now: DateTime<Utc>) -> CoreResult<NewMember> {
        let email = optional_text(&self.email);
        if let Some(email) = &email {
            validate_email(email)?;
        }

        Ok(NewMember {
            first_name: validate_required("nombre", &self.first_name)?,
            last_name: validate_required("apellido", &self.last_name)?,
            national_id: validate_required("cedula", &self.national_id)?,
            phone: validate_required("telefono", &self.phone)?,
            address: validate_required("direccion", &self.address)?,
            email,
            registered_at: now,
            active: true,
        })
    }

    /// Checks the submit gate, builds the payload and clears the draft.
    pub fn submit(&mut self, busy: bool, now: DateTime<Utc>) -> CoreResult<NewMember> {
        if !self.can_submit(busy) {
            return Err(disabled(&self.missing_fields(), busy));
        }
        let new = self.to_new(now)?;
        self.reset();
        Ok(new)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Category Form
// =============================================================================

/// Draft for a new livestock category (the modal dialog).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn can_submit(&self, busy: bool) -> bool {
        !busy && !is_blank(&self.name)
    }

    pub fn to_new(&self) -> CoreResult<NewCategory> {
        let description = optional_text(&self.description);
        if let Some(description) = &description {
            validate_text_length("descripcion", description, MAX_NOTES_LENGTH)?;
        }

        Ok(NewCategory {
            name: validate_required("nombre", &self.name)?,
            description,
            active: true,
        })
    }

    pub fn submit(&mut self, busy: bool) -> CoreResult<NewCategory> {
        if !self.can_submit(busy) {
            return Err(disabled(&["nombre"], busy));
        }
        let new = self.to_new()?;
        self.reset();
        Ok(new)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Transaction Form
// =============================================================================

/// Draft for a new transaction.
///
/// `member_id` and `category_id` hold the ids picked from the loaded
/// collections; empty means nothing selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionForm {
    pub member_id: String,
    pub category_id: String,
    pub quantity: String,
    pub unit_price: String,
    pub notes: String,
}

impl TransactionForm {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("socio", &self.member_id),
            ("tipo de ganado", &self.category_id),
            ("cantidad", &self.quantity),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }

    /// Member, category and quantity must be filled, and the create
    /// operation must be idle.
    pub fn can_submit(&self, busy: bool) -> bool {
        !busy && self.missing_fields().is_empty()
    }

    /// Live total shown under the form.
    ///
    /// `None` until both quantity and unit price have input, and when the
    /// product does not fit. Unparseable input counts as zero, so the
    /// preview never errors.
    pub fn preview_total(&self) -> Option<Money> {
        if is_blank(&self.quantity) || is_blank(&self.unit_price) {
            return None;
        }
        let qty = self.quantity.trim().parse::<i64>().unwrap_or(0);
        let price = Money::parse(&self.unit_price).unwrap_or_default();
        price.multiply_quantity(qty)
    }

    /// Builds the insert payload.
    ///
    /// A blank unit price is sent as 0, so the stored total is 0 too.
    pub fn to_new(&self, now: DateTime<Utc>) -> CoreResult<NewTransaction> {
        let member_id = validate_required("socio", &self.member_id)?;
        let category_id = validate_required("tipo de ganado", &self.category_id)?;
        let quantity = parse_quantity(&self.quantity)?;
        let unit_price = parse_optional_price(&self.unit_price)?.unwrap_or_default();
        let total = unit_price.multiply_quantity(quantity).ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "total".to_string(),
                reason: "quantity × unit price is too large".to_string(),
            }
        })?;

        let notes = optional_text(&self.notes);
        if let Some(notes) = &notes {
            validate_text_length("observaciones", notes, MAX_NOTES_LENGTH)?;
        }

        Ok(NewTransaction {
            member_id,
            category_id,
            quantity,
            registered_at: now,
            notes,
            unit_price: Some(unit_price),
            total: Some(total),
        })
    }

    pub fn submit(&mut self, busy: bool, now: DateTime<Utc>) -> CoreResult<NewTransaction> {
        if !self.can_submit(busy) {
            return Err(disabled(&self.missing_fields(), busy));
        }
        let new = self.to_new(now)?;
        self.reset();
        Ok(new)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
