use serde::Serialize;

/// A selectable category shown by clients. Entries store the plain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const DEFAULT_CATEGORIES: &[Category] = &[
    Category { name: "Apartments", icon: "building" },
    Category { name: "Mansions", icon: "house-user" },
    Category { name: "Single-Family", icon: "home" },
    Category { name: "Townhouses", icon: "city" },
    Category { name: "Condominiums", icon: "building" },
    Category { name: "Duplexes", icon: "home" },
    Category { name: "Bungalows", icon: "home" },
    Category { name: "Villas", icon: "hotel" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_category_names_are_unique() {
        let mut names: Vec<_> = DEFAULT_CATEGORIES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DEFAULT_CATEGORIES.len());
        assert!(names.contains(&"Single-Family"));
    }
}
