use actix_web::web::block;
use serde::{Deserialize, Serialize};

use db::{
    models::{Player, Room, RoomDetails},
    Connection,
};
use errors::Error;

/// What lobby clients poll for, and what the change feed pushes: the room
/// flags plus every player in join order.
#[derive(Deserialize, Serialize)]
pub struct RoomSnapshot {
    pub room: RoomDetails,
    pub players: Vec<Player>,
}

pub async fn get_room_snapshot(connection: Connection, room_id: i32) -> Result<RoomSnapshot, Error> {
    let data: Result<(Room, Vec<Player>), Error> = block(move || {
        let room = Room::find_by_id(&connection, room_id)?;
        let players = Player::find_all_by_room_id(&connection, room_id)?;
        Ok((room, players))
    })
    .await?;

    let (room, players) = data?;

    Ok(RoomSnapshot {
        room: room.into(),
        players,
    })
}
