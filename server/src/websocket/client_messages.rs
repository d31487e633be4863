use actix::Addr;
use actix_web::web::Data;
use serde_json::to_value;

use db::Connection;

use super::{MessageToClient, Server};
use crate::handlers;

// Push failures are logged only. Clients poll the snapshot endpoint anyway,
// so a lost push costs latency, not correctness.

pub async fn send_player_list(
    websocket_srv: &Data<Addr<Server>>,
    connection: Connection,
    room_id: i32,
) {
    match handlers::get_room_snapshot(connection, room_id).await {
        Ok(snapshot) => {
            if let Ok(value) = to_value(snapshot.players) {
                let msg = MessageToClient::new("/players", room_id, value);
                websocket_srv.do_send(msg);
            }
        }
        Err(err) => error!("{:?}", err),
    }
}

pub async fn send_room_status(
    websocket_srv: &Data<Addr<Server>>,
    connection: Connection,
    room_id: i32,
) {
    match handlers::get_room_snapshot(connection, room_id).await {
        Ok(snapshot) => {
            if let Ok(value) = to_value(snapshot.room) {
                let msg = MessageToClient::new("/room-status", room_id, value);
                websocket_srv.do_send(msg);
            }
        }
        Err(err) => error!("{:?}", err),
    }
}
