#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// `created_utc` is stored as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = obstacles)]
pub struct NewObstacle<'a> {
    pub geojson: &'a str,
    pub obstacle_name: &'a str,
    pub height_m: Option<i64>,
    pub obstacle_description: Option<&'a str>,
    pub is_draft: bool,
    pub created_utc: i64,
    pub created_by_user_id: Option<&'a str>,
    pub review_status: Option<String>,
}

#[derive(Queryable)]
pub struct ObstacleEntity {
    pub id: i64,
    pub geojson: String,
    pub obstacle_name: String,
    pub height_m: Option<i64>,
    pub obstacle_description: Option<String>,
    pub is_draft: bool,
    pub created_utc: i64,
    pub created_by_user_id: Option<String>,
    pub review_status: Option<String>,
    pub review_comment: Option<String>,
    pub assigned_to_user_id: Option<String>,
}
