use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Categories highlighted on the home page, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumIter, Display, AsRefStr)]
pub enum PopularCategory {
    Programming,
    Design,
    Business,
}

impl PopularCategory {
    /// Category names as stored on course records
    pub fn names() -> Vec<String> {
        Self::iter().map(|category| category.to_string()).collect()
    }
}

#[cfg(test)]
mod test {
    use super::PopularCategory;

    #[test]
    fn test_popular_category_order() {
        assert_eq!(
            PopularCategory::names(),
            vec!["Programming", "Design", "Business"]
        );
        assert_eq!(PopularCategory::Design.as_ref(), "Design");
    }
}
