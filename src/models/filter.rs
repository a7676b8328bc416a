//! Request-scoped listing filters.
//!
//! A [`FilterSet`] is turned into a list of independent [`Predicate`]s, each
//! carrying its own bound values. The database layer folds that list into a
//! single query, so a clause and its parameters can never drift apart.

/// Axis-aligned viewport, in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Viewport {
    /// Only a complete box is a viewport; any missing edge drops the whole filter.
    pub fn from_edges(
        west: Option<f64>,
        south: Option<f64>,
        east: Option<f64>,
        north: Option<f64>,
    ) -> Option<Self> {
        Some(Viewport {
            west: west?,
            south: south?,
            east: east?,
            north: north?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `lat BETWEEN south AND north AND lng BETWEEN west AND east`
    Viewport(Viewport),
    PriceAtLeast(i64),
    PriceAtMost(i64),
    NeighborhoodIn(Vec<String>),
    PropertyTypeIn(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub viewport: Option<Viewport>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub neighborhoods: Vec<String>,
    pub property_types: Vec<String>,
}

impl FilterSet {
    /// One predicate per active filter. An empty set means the unrestricted relation.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(viewport) = self.viewport {
            predicates.push(Predicate::Viewport(viewport));
        }
        if let Some(min) = self.price_min {
            predicates.push(Predicate::PriceAtLeast(min));
        }
        if let Some(max) = self.price_max {
            predicates.push(Predicate::PriceAtMost(max));
        }
        if !self.neighborhoods.is_empty() {
            predicates.push(Predicate::NeighborhoodIn(self.neighborhoods.clone()));
        }
        if !self.property_types.is_empty() {
            predicates.push(Predicate::PropertyTypeIn(self.property_types.clone()));
        }

        predicates
    }
}

/// Splits a comma separated transport value, trimming whitespace and dropping
/// empty tokens. `None` and all-empty input both give an empty list.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHENNAI: Viewport = Viewport {
        west: 80.1,
        south: 12.8,
        east: 80.3,
        north: 13.2,
    };

    #[test]
    fn split_list_tolerates_whitespace_and_empty_tokens() {
        assert_eq!(
            split_list(Some("Adyar, Velachery ,,")),
            split_list(Some("Adyar,Velachery"))
        );
        assert_eq!(split_list(Some("Adyar,Velachery")), vec!["Adyar", "Velachery"]);
        assert!(split_list(Some(" , ,")).is_empty());
        assert!(split_list(Some("")).is_empty());
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn split_list_keeps_inner_spaces() {
        assert_eq!(
            split_list(Some("T. Nagar, Anna Nagar")),
            vec!["T. Nagar", "Anna Nagar"]
        );
    }

    #[test]
    fn viewport_requires_all_four_edges() {
        assert_eq!(
            Viewport::from_edges(Some(80.1), Some(12.8), Some(80.3), Some(13.2)),
            Some(CHENNAI)
        );
        assert_eq!(Viewport::from_edges(Some(80.1), Some(12.8), Some(80.3), None), None);
        assert_eq!(Viewport::from_edges(None, Some(12.8), Some(80.3), Some(13.2)), None);
        assert_eq!(Viewport::from_edges(None, None, None, None), None);
    }

    #[test]
    fn empty_filter_set_has_no_predicates() {
        assert!(FilterSet::default().predicates().is_empty());
    }

    #[test]
    fn each_present_filter_contributes_exactly_one_predicate() {
        let filters = FilterSet {
            viewport: Some(CHENNAI),
            price_min: Some(1_000_000),
            price_max: Some(5_000_000),
            neighborhoods: vec!["Adyar".to_string()],
            property_types: vec!["villa".to_string(), "apartment".to_string()],
        };

        assert_eq!(
            filters.predicates(),
            vec![
                Predicate::Viewport(CHENNAI),
                Predicate::PriceAtLeast(1_000_000),
                Predicate::PriceAtMost(5_000_000),
                Predicate::NeighborhoodIn(vec!["Adyar".to_string()]),
                Predicate::PropertyTypeIn(vec!["villa".to_string(), "apartment".to_string()]),
            ]
        );
    }

    #[test]
    fn removing_a_filter_only_removes_its_predicate() {
        let full = FilterSet {
            viewport: Some(CHENNAI),
            price_min: Some(1),
            price_max: Some(2),
            neighborhoods: vec!["Adyar".to_string()],
            property_types: vec!["villa".to_string()],
        };
        let without_price_min = FilterSet {
            price_min: None,
            ..full.clone()
        };

        let mut expected = full.predicates();
        expected.retain(|p| !matches!(p, Predicate::PriceAtLeast(_)));
        assert_eq!(without_price_min.predicates(), expected);
    }

    #[test]
    fn inverted_price_range_is_kept_as_is() {
        let filters = FilterSet {
            price_min: Some(5_000_000),
            price_max: Some(1_000_000),
            ..FilterSet::default()
        };
        assert_eq!(
            filters.predicates(),
            vec![
                Predicate::PriceAtLeast(5_000_000),
                Predicate::PriceAtMost(1_000_000)
            ]
        );
    }
}
