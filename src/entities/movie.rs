use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tmdb_id: i64,
    pub title: String,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub list_name: String,
    pub no_of_times_watched: i32,
    pub user_rating: Option<i32>,
    pub user_review: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
