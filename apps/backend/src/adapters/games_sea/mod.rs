//! SeaORM adapter for games - generic over ConnectionTrait.
//!
//! Every query is scoped by owner; a game belonging to someone else is
//! indistinguishable from one that does not exist.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::games;
use crate::infra::db_errors::game_not_found;

pub mod dto;

pub use dto::{GameCreate, GameUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::UserId.eq(user_id))
        .order_by_asc(games::Column::CreatedAt)
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}

pub async fn find_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    game_id: Uuid,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id)
        .filter(games::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Which of `ids` exist and belong to `user_id`.
pub async fn find_owned_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    ids: &[Uuid],
) -> Result<Vec<Uuid>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    games::Entity::find()
        .select_only()
        .column(games::Column::Id)
        .filter(games::Column::UserId.eq(user_id))
        .filter(games::Column::Id.is_in(ids.iter().copied()))
        .into_tuple::<Uuid>()
        .all(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: Set(dto.id),
        user_id: Set(dto.user_id),
        name: Set(dto.name),
        description: Set(dto.description),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}

/// Apply `dto` to an owned game and return the fresh row.
///
/// Fails with the `GAME_NOT_FOUND` custom error when no owned row matched.
pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    let mut update = games::Entity::update_many()
        .col_expr(
            games::Column::UpdatedAt,
            Expr::val(OffsetDateTime::now_utc()).into(),
        )
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::UserId.eq(dto.user_id));

    if let Some(name) = dto.name {
        update = update.col_expr(games::Column::Name, Expr::val(name).into());
    }
    if let Some(description) = dto.description {
        update = update.col_expr(games::Column::Description, Expr::val(description).into());
    }

    let result = update.exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(game_not_found(dto.id));
    }

    find_owned(conn, dto.user_id, dto.id)
        .await?
        .ok_or_else(|| game_not_found(dto.id))
}

/// Delete the owned games among `ids`; unknown ids are skipped. Returns the
/// number of rows removed.
pub async fn delete_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    ids: &[Uuid],
) -> Result<u64, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = games::Entity::delete_many()
        .filter(games::Column::UserId.eq(user_id))
        .filter(games::Column::Id.is_in(ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
