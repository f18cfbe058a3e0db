use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(big_integer(Movies::TmdbId))
                    .col(string(Movies::Title))
                    .col(string_null(Movies::Director))
                    .col(string_null(Movies::Actors))
                    .col(string_null(Movies::Description))
                    .col(string_null(Movies::Genre))
                    .col(string(Movies::ListName))
                    .col(integer(Movies::NoOfTimesWatched))
                    .col(integer_null(Movies::UserRating))
                    .col(string_null(Movies::UserReview))
                    .col(big_integer(Movies::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_list_name")
                    .table(Movies::Table)
                    .col(Movies::ListName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    TmdbId,
    Title,
    Director,
    Actors,
    Description,
    Genre,
    ListName,
    NoOfTimesWatched,
    UserRating,
    UserReview,
    CreatedAt,
}
