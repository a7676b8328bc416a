use diesel::Queryable;
use serde::Serialize;

/// One property pin. Field order matches the select list in `db::listing`.
#[derive(Debug, Queryable, Serialize, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub price: i64,
    pub beds: Option<i32>,
    pub baths: Option<i32>,
    pub area_sqft: Option<f64>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub property_type: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ListingsPage {
    pub listings: Vec<Listing>,
    /// Number of listings in this page, not the number of matching rows.
    pub total: usize,
}

impl From<Vec<Listing>> for ListingsPage {
    fn from(listings: Vec<Listing>) -> Self {
        ListingsPage {
            total: listings.len(),
            listings,
        }
    }
}
