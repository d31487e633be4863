use actix::Addr;
use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};
use diesel::Connection;

use auth::{get_claim_from_identity, Role};
use db::{
    get_conn,
    models::{Player, Room, RoomDetails},
    PgPool,
};
use errors::Error;

use crate::websocket::{client_messages, Server};

/// Starts the game for a room. Host only, and the all-players-ready rule is
/// enforced here rather than trusted to the browser. The room row is locked
/// for the duration of the checks, so two racing starts cannot both win and
/// a player flipping to unready cannot slip past the check.
pub async fn start(
    id: Identity,
    websocket_srv: Data<Addr<Server>>,
    code: Path<String>,
    pool: Data<PgPool>,
) -> Result<Json<RoomDetails>, Error> {
    let (claim, token) = get_claim_from_identity(id)?;
    if claim.role != Role::Host {
        return Err(Error::Forbidden);
    }

    let connection = get_conn(&pool)?;
    let code = code.into_inner();
    let claim_room_id = claim.room_id;

    let res = block(move || {
        connection.transaction::<Room, Error, _>(|| {
            let room = Room::find_by_code_for_update(&connection, &code)?;
            if room.id != claim_room_id {
                return Err(Error::Forbidden);
            }
            if room.host.as_deref() != Some(token.as_str()) {
                return Err(Error::Forbidden);
            }
            if room.game_started {
                return Err(Error::UnprocessableEntity("Game already started".to_string()));
            }

            let players = Player::find_all_by_room_id(&connection, room.id)?;
            if players.is_empty() || players.iter().any(|player| !player.ready) {
                return Err(Error::UnprocessableEntity(
                    "Not all players are ready".to_string(),
                ));
            }

            Room::start(&connection, room.id)
        })
    })
    .await?;

    let room = res?;

    let connection = get_conn(&pool)?;
    client_messages::send_room_status(&websocket_srv, connection, room.id).await;

    Ok(Json(room.into()))
}
