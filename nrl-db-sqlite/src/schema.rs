///////////////////////////////////////////////////////////////////////
// Obstacles
///////////////////////////////////////////////////////////////////////

table! {
    obstacles (id) {
        id -> BigInt,
        geojson -> Text,
        obstacle_name -> Text,
        height_m -> Nullable<BigInt>,
        obstacle_description -> Nullable<Text>,
        is_draft -> Bool,
        created_utc -> BigInt,
        created_by_user_id -> Nullable<Text>,
        review_status -> Nullable<Text>,
        review_comment -> Nullable<Text>,
        assigned_to_user_id -> Nullable<Text>,
    }
}
