use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::schema::rooms::{self, table};
use crate::utils::create_code_from_id;

#[derive(Debug, Deserialize, Identifiable, Queryable, Serialize)]
pub struct Room {
    pub id: i32,
    pub code: Option<String>,
    pub quiz_id: i32,
    pub game_started: bool,
    pub host: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The shape of a room as clients see it. The host token never leaves the
/// server.
#[derive(Debug, Deserialize, Queryable, Serialize)]
pub struct RoomDetails {
    pub id: i32,
    pub code: Option<String>,
    pub game_started: bool,
}

impl From<Room> for RoomDetails {
    fn from(room: Room) -> Self {
        RoomDetails {
            id: room.id,
            code: room.code,
            game_started: room.game_started,
        }
    }
}

impl Room {
    pub fn create(conn: &PgConnection, quiz_id_value: i32) -> Result<Room, Error> {
        use crate::schema::rooms::dsl;

        let room: Room = diesel::insert_into(table)
            .values(dsl::quiz_id.eq(quiz_id_value))
            .get_result(conn)?;
        let new_code = create_code_from_id(room.id);
        let room = diesel::update(dsl::rooms.find(room.id))
            .set(dsl::code.eq(new_code))
            .get_result::<Room>(conn)?;

        Ok(room)
    }

    pub fn find_by_id(conn: &PgConnection, room_id: i32) -> Result<Room, Error> {
        use crate::schema::rooms::dsl::rooms;

        let room = rooms.find(room_id).first::<Room>(conn)?;

        Ok(room)
    }

    pub fn find_by_code(conn: &PgConnection, code_value: &str) -> Result<Room, Error> {
        use crate::schema::rooms::dsl::{code, rooms};

        let room = rooms
            .filter(code.eq(code_value.to_uppercase()))
            .first::<Room>(conn)?;

        Ok(room)
    }

    /// Same lookup as `find_by_code`, but takes a `FOR UPDATE` lock on the
    /// row for the rest of the transaction. Start-game checks run under this
    /// lock so a room starts at most once.
    pub fn find_by_code_for_update(conn: &PgConnection, code_value: &str) -> Result<Room, Error> {
        use crate::schema::rooms::dsl::{code, rooms};

        let room = rooms
            .filter(code.eq(code_value.to_uppercase()))
            .for_update()
            .first::<Room>(conn)?;

        Ok(room)
    }

    pub fn set_host(conn: &PgConnection, room_id: i32, token: &str) -> Result<Room, Error> {
        use rooms::dsl;

        let room = diesel::update(dsl::rooms.find(room_id))
            .set(dsl::host.eq(token))
            .get_result::<Room>(conn)?;

        Ok(room)
    }

    pub fn start(conn: &PgConnection, room_id: i32) -> Result<Room, Error> {
        use rooms::dsl;

        let room = diesel::update(dsl::rooms.find(room_id))
            .set(dsl::game_started.eq(true))
            .get_result::<Room>(conn)?;

        Ok(room)
    }
}
