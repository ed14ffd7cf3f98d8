///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (id) {
        id -> Text,
        email -> Text,
        name -> Text,
        role -> Text,
        bio -> Nullable<Text>,
        profile_image -> Nullable<Text>,
    }
}

table! {
    user_interests (user_id, interest) {
        user_id -> Text,
        interest -> Text,
    }
}

joinable!(user_interests -> users (user_id));

///////////////////////////////////////////////////////////////////////
// Events
///////////////////////////////////////////////////////////////////////

table! {
    events (id) {
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        date -> Text,
        time -> Text,
        cost -> Double,
        image -> Nullable<Text>,
        location_exact -> Nullable<Text>,
        location_zone -> Text,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        created_by -> Text,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

table! {
    event_categories (event_id, category_id) {
        event_id -> Text,
        category_id -> Text,
        position -> Integer,
    }
}

table! {
    event_reviews (event_id, review_id) {
        event_id -> Text,
        review_id -> Text,
        position -> Integer,
        user_id -> Text,
        user_name -> Text,
        profile_picture -> Nullable<Text>,
        grade -> Integer,
        review_text -> Text,
        timestamp -> BigInt,
    }
}

table! {
    event_participants (event_id, user_id) {
        event_id -> Text,
        user_id -> Text,
        position -> Integer,
        user_name -> Text,
        user_email -> Text,
        joined_at -> BigInt,
    }
}

joinable!(event_categories -> events (event_id));
joinable!(event_reviews -> events (event_id));
joinable!(event_participants -> events (event_id));

///////////////////////////////////////////////////////////////////////
// Categories, tags and zones
///////////////////////////////////////////////////////////////////////

table! {
    categories (id) {
        id -> Text,
        name -> Text,
        image -> Nullable<Text>,
    }
}

table! {
    category_tags (category_id, tag_id) {
        category_id -> Text,
        tag_id -> Text,
        position -> Integer,
    }
}

joinable!(category_tags -> categories (category_id));

table! {
    tags (id) {
        id -> Text,
        name -> Text,
    }
}

table! {
    location_zones (id) {
        id -> Text,
        name -> Text,
    }
}

///////////////////////////////////////////////////////////////////////
// Reviews and bookings
///////////////////////////////////////////////////////////////////////

table! {
    reviews (id) {
        id -> Text,
        user_id -> Text,
        user_name -> Text,
        profile_picture -> Nullable<Text>,
        event_id -> Text,
        grade -> Integer,
        review_text -> Text,
        timestamp -> BigInt,
    }
}

table! {
    bookings (id) {
        id -> Text,
        event_id -> Text,
        user_id -> Text,
        status -> Text,
        booking_date -> BigInt,
    }
}

allow_tables_to_appear_in_same_query!(
    users,
    user_interests,
    events,
    event_categories,
    event_reviews,
    event_participants,
    categories,
    category_tags,
    tags,
    location_zones,
    reviews,
    bookings,
);
