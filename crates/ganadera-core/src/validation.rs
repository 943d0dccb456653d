//! # Validation Module
//!
//! Input checks for the registry forms.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Forms (ganadera-core::form)                                  │
//! │  ├── Required fields present                                           │
//! │  └── THIS MODULE: quantity, price, email shape                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Remote store (PostgREST / Postgres)                          │
//! │  ├── UNIQUE (cedula)                                                   │
//! │  └── Foreign keys (socio_id, tipo_ganado_id)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ganadera_core::validation::{parse_quantity, validate_required};
//!
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(validate_required("nombre", "  ").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Requires a non-blank value. Returns the trimmed text.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Caps free text (notes, descriptions) at `max` characters.
pub fn validate_text_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Checks the shape of an email address: `local@domain.tld`, no spaces.
///
/// Same strictness as a browser `type="email"` input, nothing more.
///
/// ## Example
/// ```rust
/// use ganadera_core::validation::validate_email;
///
/// assert!(validate_email("ana@coop.cr").is_ok());
/// assert!(validate_email("ana@coop").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "expected name@domain".to_string(),
    };

    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Normalizes an optional text field: blank becomes `None`.
pub fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses the quantity field.
///
/// ## Rules
/// - Must not be empty
/// - Whole number (`step="1"`)
/// - At least 1, at most [`MAX_QUANTITY`]
///
/// ## Example
/// ```rust
/// use ganadera_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
/// assert!(parse_quantity("0").is_err());
/// assert!(parse_quantity("2.5").is_err());
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    let qty: i64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a whole number".to_string(),
    })?;
    validate_quantity(qty)?;
    Ok(qty)
}

/// Range check for an already-parsed quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Parses the optional unit price field. Blank means "not given".
///
/// At most [`MAX_UNIT_PRICE`].
pub fn parse_optional_price(input: &str) -> ValidationResult<Option<Money>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let price = Money::parse(input)?;
    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE.major(),
        });
    }
    Ok(Some(price))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("nombre", "  Ana ").unwrap(), "Ana");
        assert_eq!(
            validate_required("nombre", "   "),
            Err(ValidationError::Required {
                field: "nombre".to_string()
            })
        );
    }

    #[test]
    fn test_validate_text_length() {
        assert!(validate_text_length("observaciones", "corto", 10).is_ok());
        assert!(validate_text_length("observaciones", &"x".repeat(11), 10).is_err());
        // counted in characters, not bytes
        assert!(validate_text_length("descripcion", "ñññññ", 5).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@coop.cr").is_ok());
        assert!(validate_email("luis.mora@mail.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("@coop.cr").is_err());
        assert!(validate_email("ana@coop").is_err());
        assert!(validate_email("ana@coop..cr").is_err());
        assert!(validate_email("ana maria@coop.cr").is_err());
        assert!(validate_email("a@b@c.cr").is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" nota "), Some("nota".to_string()));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert!(matches!(
            parse_quantity(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_quantity("0"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("-4"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("1.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_quantity(&(MAX_QUANTITY + 1).to_string()).is_err());
    }

    #[test]
    fn test_parse_optional_price() {
        assert_eq!(parse_optional_price("").unwrap(), None);
        assert_eq!(
            parse_optional_price("10.50").unwrap(),
            Some(Money::from_cents(1050))
        );
        assert!(parse_optional_price("-1").is_err());

        assert_eq!(parse_optional_price("100000000").unwrap(), Some(MAX_UNIT_PRICE));
        assert!(matches!(
            parse_optional_price("100000000.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_optional_price("100000000000000"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
