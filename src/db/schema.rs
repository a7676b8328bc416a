// Mirrors the externally owned `listings` relation. This service only reads it.

diesel::table! {
    listings (id) {
        id -> Text,
        title -> Text,
        price -> Int8,
        beds -> Nullable<Int4>,
        baths -> Nullable<Int4>,
        area_sqft -> Nullable<Float8>,
        address -> Nullable<Text>,
        neighborhood -> Nullable<Text>,
        city -> Text,
        lat -> Float8,
        lng -> Float8,
        property_type -> Text,
    }
}
