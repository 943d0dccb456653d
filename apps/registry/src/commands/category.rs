//! # Category Commands
//!
//! Livestock categories. New ones are entered through the category
//! dialog, opened from the categories view or the new-transaction form.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{NavigationState, Operation, RegistryState, EMPTY_CELL};
use ganadera_core::{CategoryForm, LivestockCategory};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl CategoryDto {
    pub fn description_or_dash(&self) -> &str {
        self.description.as_deref().unwrap_or(EMPTY_CELL)
    }
}

impl From<LivestockCategory> for CategoryDto {
    fn from(c: LivestockCategory) -> Self {
        CategoryDto {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

pub fn list_categories(state: &RegistryState) -> Vec<CategoryDto> {
    state.categories().into_iter().map(CategoryDto::from).collect()
}

/// Submits the category dialog. Closes it on success; on failure it stays
/// open with the banner set.
pub async fn create_category(
    state: &RegistryState,
    nav: &NavigationState,
    form: &mut CategoryForm,
) -> Result<CategoryDto, ApiError> {
    let busy = state.is_busy(Operation::CreateCategory);
    let new = form.submit(busy)?;
    debug!(nombre = %new.name, "Submitting category");

    let category = ApiError::from_outcome(state.create_category(&new).await)?;
    nav.with_nav_mut(|n| n.close_category_modal());
    Ok(category.into())
}

/// Finds a loaded category by id or by name (case-insensitive).
pub fn resolve_category(state: &RegistryState, key: &str) -> Result<LivestockCategory, ApiError> {
    let key = key.trim();
    state
        .categories()
        .into_iter()
        .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| ApiError::not_found("Livestock category", key))
}
