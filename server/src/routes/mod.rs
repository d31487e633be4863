use actix_web::web;

use crate::middleware::Auth;
use crate::websocket;

pub mod players;
pub mod quizzes;
pub mod rooms;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .service(
                web::scope("/api")
                    .service(web::scope("/quizzes").route("", web::get().to(quizzes::get_all)))
                    .service(
                        web::scope("/rooms")
                            .route("", web::post().to(rooms::create))
                            .service(web::scope("/join").route("", web::post().to(rooms::join)))
                            .service(
                                web::scope("/{code}")
                                    .wrap(Auth)
                                    .route("", web::get().to(rooms::status))
                                    .route("/start", web::post().to(rooms::start))
                                    .route("/quiz", web::get().to(rooms::quiz)),
                            ),
                    )
                    .service(
                        web::scope("/players")
                            .wrap(Auth)
                            .route("/ready", web::put().to(players::ready)),
                    ),
            )
            .service(web::scope("/ws").route("/", web::get().to(websocket::ws_index))),
    );
}
