//! # Member Commands
//!
//! Listing and registering cooperative members.
//!
//! ```text
//! MemberForm (raw text) ──► submit(busy, now) ──► NewMember
//!                                                    │
//!                                 RegistryState::create_member
//!                                                    │
//!                          Inserted ──► MemberDto    │  NoRowReturned / ServiceError
//!                                                    └──► ApiError (banner set)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{Operation, RegistryState};
use ganadera_core::{Member, MemberForm};

/// Member DTO for display and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: String,
    pub full_name: String,
    pub national_id: String,
    pub phone: String,
    pub address: String,
    pub email: Option<String>,
    pub registered_at: Option<DateTime<Utc>>,
    /// "Nombre Apellido - cédula", as the member picker shows it.
    pub picker_label: String,
}

impl From<Member> for MemberDto {
    fn from(m: Member) -> Self {
        MemberDto {
            full_name: m.full_name(),
            picker_label: m.picker_label(),
            id: m.id,
            national_id: m.national_id,
            phone: m.phone,
            address: m.address,
            email: m.email,
            registered_at: m.registered_at,
        }
    }
}

/// The loaded members, as they stand.
pub fn list_members(state: &RegistryState) -> Vec<MemberDto> {
    state.members().into_iter().map(MemberDto::from).collect()
}

/// Submits the member form.
///
/// The draft is cleared as soon as the payload is built, whatever the
/// service answers. A blocked submit keeps it.
pub async fn create_member(
    state: &RegistryState,
    form: &mut MemberForm,
) -> Result<MemberDto, ApiError> {
    let busy = state.is_busy(Operation::CreateMember);
    let new = form.submit(busy, Utc::now())?;
    debug!(cedula = %new.national_id, "Submitting member");

    let member = ApiError::from_outcome(state.create_member(&new).await)?;
    Ok(member.into())
}

/// Finds a loaded member by id or cédula.
pub fn resolve_member(state: &RegistryState, key: &str) -> Result<Member, ApiError> {
    let key = key.trim();
    state
        .members()
        .into_iter()
        .find(|m| m.id == key || m.national_id == key)
        .ok_or_else(|| ApiError::not_found("Member", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use ganadera_remote::{MemoryStore, Remote};

    fn filled_form(cedula: &str) -> MemberForm {
        MemberForm {
            first_name: "Luis".to_string(),
            last_name: "Mora".to_string(),
            national_id: cedula.to_string(),
            phone: "8765-4321".to_string(),
            address: "San Carlos".to_string(),
            email: "luis@correo.cr".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_member_clears_form() {
        let state = RegistryState::new(Remote::in_memory(MemoryStore::new()));
        let mut form = filled_form("2-0444-0555");

        let dto = create_member(&state, &mut form).await.unwrap();
        assert_eq!(dto.full_name, "Luis Mora");
        assert_eq!(dto.picker_label, "Luis Mora - 2-0444-0555");
        assert_eq!(dto.email.as_deref(), Some("luis@correo.cr"));
        assert_eq!(form, MemberForm::default());
        assert_eq!(list_members(&state).len(), 1);
    }

    #[tokio::test]
    async fn test_blank_required_field_blocks_submit() {
        let state = RegistryState::new(Remote::in_memory(MemoryStore::new()));
        let mut form = filled_form("");

        let err = create_member(&state, &mut form).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmitDisabled);
        assert_eq!(form.phone, "8765-4321");
        assert!(list_members(&state).is_empty());
    }

    #[tokio::test]
    async fn test_service_error_keeps_message() {
        let store = MemoryStore::new();
        let state = RegistryState::new(Remote::in_memory(store.clone()));
        store.fail_next("duplicate key value violates unique constraint \"socios_cedula_key\"");

        let err = create_member(&state, &mut filled_form("1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceError);
        assert!(err.message.contains("socios_cedula_key"));
        assert_eq!(state.error(), Some(err.message));
    }

    #[tokio::test]
    async fn test_resolve_by_id_or_cedula() {
        let state = RegistryState::new(Remote::in_memory(MemoryStore::new()));
        let dto = create_member(&state, &mut filled_form("5-0321")).await.unwrap();

        assert_eq!(resolve_member(&state, "5-0321").unwrap().id, dto.id);
        assert_eq!(resolve_member(&state, &dto.id).unwrap().national_id, "5-0321");
        assert_eq!(
            resolve_member(&state, "9-9999").unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
