use actix_web::{
    web::{block, Data, Json},
    Result,
};
use diesel::Connection;
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::{create_jwt, PrivateClaim, Role};
use db::{
    get_conn,
    models::{Player, Quiz, Room, RoomDetails},
    PgPool,
};
use errors::Error;

use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = "1", message = "Quiz title is required"))]
    quiz_title: String,
    #[validate(length(min = "3"))]
    player_name: String,
}

#[derive(Deserialize, Serialize)]
pub struct CreateRoomResponse {
    pub room: RoomDetails,
    pub player: Player,
    pub token: String,
}

// Quiz, room, join code and host player are written in one transaction, so a
// failure part way through cannot leave an orphaned room behind.
fn create_db_records(
    pool: Data<PgPool>,
    params: Json<CreateRoomRequest>,
) -> Result<CreateRoomResponse, Error> {
    let connection = get_conn(&pool)?;

    connection.transaction::<CreateRoomResponse, Error, _>(|| {
        let quiz = Quiz::find_or_create(&connection, &params.quiz_title)?;
        let room = Room::create(&connection, quiz.id)?;
        let player = Player::create(&connection, params.player_name.clone(), room.id)?;
        let token = create_jwt(PrivateClaim::new(
            player.id,
            player.name.clone(),
            room.id,
            Role::Host,
        ))?;
        let room = Room::set_host(&connection, room.id, &token)?;

        Ok(CreateRoomResponse {
            room: room.into(),
            player,
            token,
        })
    })
}

pub async fn create(
    pool: Data<PgPool>,
    params: Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, Error> {
    validate(&params)?;

    let res = block(move || create_db_records(pool, params)).await?;

    Ok(Json(res?))
}
