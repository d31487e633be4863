use std::collections::HashMap;

use actix::prelude::{Actor, Context, Handler, Message as ActixMessage, Recipient};
use serde::{Deserialize, Serialize};
use serde_json::{error::Result as SerdeResult, to_string, to_value, Value};

use auth::decode_jwt;
use db::{get_conn, models::Player, PgPool};
use errors::Error;

#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Message(pub String);

/// A change-feed frame. `path` tells the client what `data` holds
/// ("/players" or "/room-status"); `room_id` scopes delivery.
#[derive(ActixMessage, Deserialize, Serialize)]
#[rtype(result = "()")]
pub struct MessageToClient {
    pub path: String,
    pub data: Value,
    pub room_id: i32,
}

impl MessageToClient {
    pub fn new(path: &str, room_id: i32, data: Value) -> MessageToClient {
        Self {
            path: path.to_string(),
            data,
            room_id,
        }
    }
}

struct Session {
    addr: Recipient<Message>,
}

impl Session {
    fn new(addr: Recipient<Message>) -> Self {
        Session { addr }
    }
}

pub struct Server {
    room_to_sessions: HashMap<i32, Vec<String>>,
    pool: PgPool,
    sessions: HashMap<String, Session>,
}

impl Server {
    pub fn new(pool: PgPool) -> Self {
        Server {
            room_to_sessions: HashMap::new(),
            pool,
            sessions: HashMap::new(),
        }
    }

    fn send_msg_to_room_sessions(&self, room_id: &i32, data: SerdeResult<String>) {
        if let Some(session_ids) = self.room_to_sessions.get(room_id) {
            for id in session_ids {
                if let Some(session) = self.sessions.get(id) {
                    if let Ok(ref data) = data {
                        if let Err(err) = session.addr.try_send(Message(data.clone())) {
                            error!("Error sending client message: {:?}", err);
                        }
                    }
                }
            }
        } else {
            warn!("Could not find session by room: {}", *room_id);
        }
    }
}

impl Actor for Server {
    type Context = Context<Self>;
}

/// In-band authentication for a raw websocket connection. On success the
/// session is filed under the claim's room and the current player list is
/// pushed out, so a client that reconnects mid-lobby catches up immediately.
pub struct Auth {
    pub id: String,
    pub token: String,
}

impl ActixMessage for Auth {
    type Result = Result<(), Error>;
}

impl Handler<Auth> for Server {
    type Result = Result<(), Error>;

    fn handle(&mut self, msg: Auth, _: &mut Context<Self>) -> Self::Result {
        if let Ok(private_claim) = decode_jwt(&msg.token) {
            if !self.sessions.contains_key(&msg.id) {
                error!("Session not found: {}", msg.id);
                return Ok(());
            }

            // a re-auth moves the session, it is never filed twice
            for session_ids in self.room_to_sessions.values_mut() {
                session_ids.retain(|id| id != &msg.id);
            }

            let sessions_for_room = self
                .room_to_sessions
                .entry(private_claim.room_id)
                .or_insert_with(Vec::new);
            sessions_for_room.push(msg.id.clone());

            let connection = get_conn(&self.pool)?;

            let players = Player::find_all_by_room_id(&connection, private_claim.room_id)?;
            if let Ok(value) = to_value(players) {
                let msg = MessageToClient::new("/players", private_claim.room_id, value);
                self.send_msg_to_room_sessions(&msg.room_id, to_string(&msg));
            }
        }

        Ok(())
    }
}

#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Connect {
    pub addr: Recipient<Message>,
    pub id: String,
}

impl Handler<Connect> for Server {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) {
        self.sessions.insert(msg.id.clone(), Session::new(msg.addr));
    }
}

#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: String,
}

impl Handler<Disconnect> for Server {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Context<Self>) {
        self.sessions.remove(&msg.id);
        for session_ids in self.room_to_sessions.values_mut() {
            session_ids.retain(|id| id != &msg.id);
        }
    }
}

impl Handler<MessageToClient> for Server {
    type Result = ();

    fn handle(&mut self, msg: MessageToClient, _: &mut Context<Self>) -> Self::Result {
        self.send_msg_to_room_sessions(&msg.room_id, to_string(&msg));
    }
}
