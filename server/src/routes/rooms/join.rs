use actix::Addr;
use actix_web::{
    web::{block, Data, Json},
    Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::{create_jwt, PrivateClaim, Role};
use db::{
    get_conn,
    models::{Player, Room},
    PgPool,
};
use errors::Error;

use crate::validate::validate;
use crate::websocket::{client_messages, Server};

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct JoinRequest {
    #[validate(length(equal = "6"))]
    code: String,
    #[validate(length(min = "3"))]
    name: String,
}

#[derive(Deserialize, Serialize)]
pub struct JoinResponse {
    pub room_id: i32,
    pub player: Player,
    pub token: String,
}

pub async fn join(
    pool: Data<PgPool>,
    websocket_srv: Data<Addr<Server>>,
    params: Json<JoinRequest>,
) -> Result<Json<JoinResponse>, Error> {
    validate(&params)?;

    let connection = get_conn(&pool)?;

    let res = block(move || {
        let room = Room::find_by_code(&connection, &params.code)?;
        if room.game_started {
            return Err(Error::UnprocessableEntity("Game already started".to_string()));
        }
        // the (room_id, name) unique index is the arbiter under concurrent joins
        let player = match Player::create(&connection, params.name.clone(), room.id) {
            Err(Error::BadRequest(_)) => {
                return Err(Error::UnprocessableEntity("Name is taken".to_string()))
            }
            res => res?,
        };
        Ok((room, player))
    })
    .await?;

    let (room, player) = res?;

    let token = create_jwt(PrivateClaim::new(
        player.id,
        player.name.clone(),
        room.id,
        Role::Player,
    ))?;

    let connection = get_conn(&pool)?;
    client_messages::send_player_list(&websocket_srv, connection, room.id).await;

    Ok(Json(JoinResponse {
        room_id: room.id,
        player,
        token,
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_rt::time::timeout;
    use actix_web_actors::ws;
    use awc::Client;
    use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
    use futures::{SinkExt, StreamExt};

    use auth::{create_jwt, decode_jwt, PrivateClaim, Role};
    use db::{
        get_conn,
        models::{Player, Quiz, Room},
        new_pool,
        schema::{players, quizzes, rooms},
    };
    use errors::ErrorResponse;

    use super::{JoinRequest, JoinResponse};
    use crate::tests::helpers::tests::{get_test_server, get_websocket_frame_data, test_post};

    #[derive(Insertable)]
    #[table_name = "rooms"]
    struct NewRoom {
        code: Option<String>,
        quiz_id: i32,
        game_started: bool,
    }

    fn create_fixtures(code: &str, game_started: bool) -> (Quiz, Room) {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let quiz: Quiz = diesel::insert_into(quizzes::table)
            .values(quizzes::dsl::title.eq(format!("Join Quiz {}", code)))
            .get_result(&conn)
            .unwrap();
        let room: Room = diesel::insert_into(rooms::table)
            .values(NewRoom {
                code: Some(code.to_string()),
                quiz_id: quiz.id,
                game_started,
            })
            .get_result(&conn)
            .unwrap();

        (quiz, room)
    }

    fn delete_fixtures(quiz: Quiz, room: Room) {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        diesel::delete(players::dsl::players.filter(players::dsl::room_id.eq(room.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(rooms::dsl::rooms.filter(rooms::dsl::id.eq(room.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(quizzes::dsl::quizzes.filter(quizzes::dsl::id.eq(quiz.id)))
            .execute(&conn)
            .unwrap();
    }

    #[actix_rt::test]
    async fn test_join_room() {
        let (quiz, room) = create_fixtures("JRAAAA", false);

        let res: (u16, JoinResponse) = test_post(
            "/api/rooms/join",
            JoinRequest {
                code: "jraaaa".to_string(),
                name: "tara".to_string(),
            },
            None,
        )
        .await;

        assert_eq!(res.0, 200);
        assert_eq!(res.1.room_id, room.id);
        assert_eq!(res.1.player.name, "tara");
        assert_eq!(res.1.player.ready, false);

        let claim = decode_jwt(&res.1.token).unwrap();
        assert_eq!(claim.id, res.1.player.id);
        assert_eq!(claim.room_id, room.id);
        assert_eq!(claim.role, Role::Player);

        delete_fixtures(quiz, room);
    }

    #[actix_rt::test]
    async fn test_join_room_not_found() {
        let res: (u16, ErrorResponse) = test_post(
            "/api/rooms/join",
            JoinRequest {
                code: "FAKE00".to_string(),
                name: "tara".to_string(),
            },
            None,
        )
        .await;

        assert_eq!(res.0, 404);
    }

    #[actix_rt::test]
    async fn test_join_room_with_duplicate_name() {
        let (quiz, room) = create_fixtures("JRBBBB", false);

        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();
        Player::create(&conn, "tara".to_string(), room.id).unwrap();

        let res: (u16, ErrorResponse) = test_post(
            "/api/rooms/join",
            JoinRequest {
                code: "JRBBBB".to_string(),
                name: "tara".to_string(),
            },
            None,
        )
        .await;

        assert_eq!(res.0, 422);
        assert_eq!(res.1.errors[0], "Name is taken");

        delete_fixtures(quiz, room);
    }

    #[actix_rt::test]
    async fn test_join_pushes_player_list() {
        let (quiz, room) = create_fixtures("JRDDDD", false);

        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();
        let host = Player::create(&conn, "host".to_string(), room.id).unwrap();
        let token = create_jwt(PrivateClaim::new(
            host.id,
            host.name.clone(),
            room.id,
            Role::Host,
        ))
        .unwrap();

        let srv = get_test_server();

        let client = Client::default();
        let mut ws_conn = client.ws(srv.url("/ws/")).connect().await.unwrap();
        let framed = &mut ws_conn.1;

        framed
            .send(ws::Message::Text(
                format!("/auth {{\"token\":\"{}\"}}", token).into(),
            ))
            .await
            .unwrap();

        let msg = get_websocket_frame_data(framed.next().await.unwrap().unwrap()).unwrap();
        assert_eq!(msg.path, "/players");
        let players: Vec<Player> = serde_json::from_value(msg.data).unwrap();
        assert_eq!(players.len(), 1);

        // authing again must not file the session twice
        framed
            .send(ws::Message::Text(
                format!("/auth {{\"token\":\"{}\"}}", token).into(),
            ))
            .await
            .unwrap();

        let msg = get_websocket_frame_data(framed.next().await.unwrap().unwrap()).unwrap();
        assert_eq!(msg.path, "/players");

        let res = srv
            .post("/api/rooms/join")
            .send_json(&JoinRequest {
                code: "JRDDDD".to_string(),
                name: "guest".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 200);

        let msg = get_websocket_frame_data(framed.next().await.unwrap().unwrap()).unwrap();
        assert_eq!(msg.path, "/players");
        assert_eq!(msg.room_id, room.id);
        let players: Vec<Player> = serde_json::from_value(msg.data).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].name, "guest");

        // one frame per push, even after the doubled auth
        let extra = timeout(Duration::from_millis(500), framed.next()).await;
        assert!(extra.is_err());

        srv.stop().await;

        delete_fixtures(quiz, room);
    }

    #[actix_rt::test]
    async fn test_join_room_after_game_started() {
        let (quiz, room) = create_fixtures("JRCCCC", true);

        let res: (u16, ErrorResponse) = test_post(
            "/api/rooms/join",
            JoinRequest {
                code: "JRCCCC".to_string(),
                name: "tara".to_string(),
            },
            None,
        )
        .await;

        assert_eq!(res.0, 422);
        assert_eq!(res.1.errors[0], "Game already started");

        delete_fixtures(quiz, room);
    }
}
