use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::Room;
use crate::schema::players;

#[derive(Associations, Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[belongs_to(Room)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub room_id: i32,
    pub ready: bool,
    pub joined_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "players"]
pub struct NewPlayer {
    pub name: String,
    pub room_id: i32,
}

impl Player {
    pub fn create(conn: &PgConnection, name: String, room_id: i32) -> Result<Player, Error> {
        let player = diesel::insert_into(players::table)
            .values(NewPlayer { name, room_id })
            .get_result(conn)?;

        Ok(player)
    }

    pub fn find_all_by_room_id(conn: &PgConnection, room_id: i32) -> Result<Vec<Player>, Error> {
        use players::dsl::{id, joined_at, players as players_table, room_id as room_id_field};

        let results = players_table
            .filter(room_id_field.eq(room_id))
            .order((joined_at.asc(), id.asc()))
            .get_results::<Player>(conn)?;

        Ok(results)
    }

    /// One UPDATE statement, so concurrent toggles serialize on the row and
    /// the returned player is whichever write landed last.
    pub fn set_ready(
        conn: &PgConnection,
        player_id: i32,
        ready_value: bool,
    ) -> Result<Player, Error> {
        use players::dsl::{players as players_table, ready};

        let player = diesel::update(players_table.find(player_id))
            .set(ready.eq(ready_value))
            .get_result::<Player>(conn)?;

        Ok(player)
    }
}
