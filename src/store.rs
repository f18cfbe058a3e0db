use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::{entities::movie, error::AppResult, models::CreateMovieRequest};

/// Thin handle over the movies table. Each method is a single auto-committed
/// statement; list filtering stays with the caller.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().all(&self.db).await?)
    }

    pub async fn insert(&self, req: &CreateMovieRequest) -> AppResult<i32> {
        let model = movie::ActiveModel {
            id: Default::default(),
            tmdb_id: Set(req.tmdb_id),
            title: Set(req.title.clone()),
            director: Set(req.director.clone()),
            actors: Set(req.actors.clone()),
            description: Set(req.description.clone()),
            genre: Set(req.genre.clone()),
            list_name: Set(req.list_name.as_str().to_string()),
            no_of_times_watched: Set(req.no_of_times_watched),
            user_rating: Set(req.user_rating),
            user_review: Set(req.user_review.clone()),
            created_at: Set(now_sec()),
        };
        let res = movie::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    /// Returns the affected-row count so callers can tell a real deletion
    /// from a miss.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
