use crate::commands::MemberDto;
use crate::state::{DisplayConfig, EMPTY_CELL};
use crate::views::{section, TextTable};

pub const EMPTY_MESSAGE: &str = "No members registered";

pub fn render(members: &[MemberDto], display: &DisplayConfig) -> String {
    let mut table = TextTable::new(["Name", "Cédula", "Phone", "Email", "Registered"]);
    for m in members {
        table.add_row(vec![
            m.full_name.clone(),
            m.national_id.clone(),
            m.phone.clone(),
            m.email.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
            display.format_optional_date(m.registered_at.as_ref()),
        ]);
    }
    section("Members", &table, EMPTY_MESSAGE)
}
