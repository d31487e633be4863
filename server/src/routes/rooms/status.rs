use actix_identity::Identity;
use actix_web::web::{block, Data, Json, Path};

use auth::identity_matches_room_id;
use db::{get_conn, models::Room, PgPool};
use errors;

use crate::handlers::{get_room_snapshot, RoomSnapshot};

/// The lobby snapshot clients poll every few seconds.
pub async fn status(
    id: Identity,
    code: Path<String>,
    pool: Data<PgPool>,
) -> Result<Json<RoomSnapshot>, errors::Error> {
    let code = code.into_inner();

    let connection = get_conn(&pool)?;
    let res = block(move || Room::find_by_code(&connection, &code)).await?;
    let room = res?;

    identity_matches_room_id(id, room.id)?;

    let connection = get_conn(&pool)?;
    let snapshot = get_room_snapshot(connection, room.id).await?;

    Ok(Json(snapshot))
}
