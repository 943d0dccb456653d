use crate::commands::CategoryDto;
use crate::views::{section, TextTable};

pub const EMPTY_MESSAGE: &str = "No livestock categories registered";

pub fn render(categories: &[CategoryDto]) -> String {
    let mut table = TextTable::new(["Name", "Description"]);
    for c in categories {
        table.add_row(vec![c.name.clone(), c.description_or_dash().to_string()]);
    }
    section("Livestock categories", &table, EMPTY_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let rows = [
            CategoryDto {
                id: "c-1".to_string(),
                name: "Bovino".to_string(),
                description: Some("Ganado vacuno".to_string()),
            },
            CategoryDto {
                id: "c-2".to_string(),
                name: "Ovino".to_string(),
                description: None,
            },
        ];
        let out = render(&rows);
        assert!(out.contains("Bovino  Ganado vacuno"));
        assert!(out.ends_with("Ovino   -"));
    }
}
