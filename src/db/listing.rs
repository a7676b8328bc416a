use diesel::{
    dsl::sql,
    pg::Pg,
    prelude::*,
    sql_types::{Float8, Int4, Int8, Nullable, Text},
};
use log::debug;

use super::{schema::listings, DbError};
use crate::models::{
    filter::{FilterSet, Predicate},
    listing::Listing,
};

/// Hard ceiling on returned rows. There is no continuation token.
pub const MAX_RESULTS: i64 = 500;

type ListingSqlType = (
    Text,
    Text,
    Int8,
    Nullable<Int4>,
    Nullable<Int4>,
    Nullable<Float8>,
    Nullable<Text>,
    Nullable<Text>,
    Text,
    Float8,
    Float8,
    Text,
);

pub type ListingsQuery = listings::BoxedQuery<'static, Pg, ListingSqlType>;

/// Folds the predicates over the unrestricted relation. Every value ends up as
/// a bind parameter; only column names and placeholders are SQL text.
///
/// Key and numeric columns are cast in the select list, so the store may use
/// any integer or numeric type for them (uuid ids, INTEGER prices, NUMERIC areas).
pub fn build_query(predicates: &[Predicate]) -> ListingsQuery {
    let unrestricted = listings::table
        .select((
            sql::<Text>("listings.id::text"),
            listings::title,
            sql::<Int8>("listings.price::int8"),
            sql::<Nullable<Int4>>("listings.beds::int4"),
            sql::<Nullable<Int4>>("listings.baths::int4"),
            sql::<Nullable<Float8>>("listings.area_sqft::float8"),
            listings::address,
            listings::neighborhood,
            listings::city,
            sql::<Float8>("listings.lat::float8"),
            sql::<Float8>("listings.lng::float8"),
            listings::property_type,
        ))
        .into_boxed();

    predicates
        .iter()
        .fold(unrestricted, apply)
        .order_by((listings::price.asc(), listings::id.asc()))
        .limit(MAX_RESULTS)
}

fn apply(query: ListingsQuery, predicate: &Predicate) -> ListingsQuery {
    match predicate {
        Predicate::Viewport(viewport) => query
            .filter(listings::lat.between(viewport.south, viewport.north))
            .filter(listings::lng.between(viewport.west, viewport.east)),
        Predicate::PriceAtLeast(min) => query.filter(listings::price.ge(*min)),
        Predicate::PriceAtMost(max) => query.filter(listings::price.le(*max)),
        Predicate::NeighborhoodIn(names) => {
            query.filter(listings::neighborhood.eq_any(names.clone()))
        }
        Predicate::PropertyTypeIn(types) => {
            query.filter(listings::property_type.eq_any(types.clone()))
        }
    }
}

pub fn search(conn: &mut PgConnection, filters: &FilterSet) -> Result<Vec<Listing>, DbError> {
    let predicates = filters.predicates();
    let found = build_query(&predicates).load::<Listing>(conn)?;
    debug!(
        "Loaded {} listing(s) with {} active filter(s)",
        found.len(),
        predicates.len()
    );
    Ok(found)
}
