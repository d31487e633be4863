use actix::Addr;
use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    Result,
};
use serde::{Deserialize, Serialize};

use auth::get_claim_from_identity;
use db::{get_conn, models::Player, PgPool};
use errors::Error;

use crate::websocket::{client_messages, Server};

#[derive(Clone, Deserialize, Serialize)]
pub struct ReadyRequest {
    ready: bool,
}

/// Flips the caller's ready flag. The player comes from the token, so one
/// player cannot mark another ready, and the write is a single UPDATE.
pub async fn ready(
    id: Identity,
    websocket_srv: Data<Addr<Server>>,
    pool: Data<PgPool>,
    params: Json<ReadyRequest>,
) -> Result<Json<Player>, Error> {
    let (claim, _) = get_claim_from_identity(id)?;

    let connection = get_conn(&pool)?;
    let player_id = claim.id;
    let ready_value = params.ready;

    let res = block(move || Player::set_ready(&connection, player_id, ready_value)).await?;
    let player = res?;

    let connection = get_conn(&pool)?;
    client_messages::send_player_list(&websocket_srv, connection, claim.room_id).await;

    Ok(Json(player))
}
