#[cfg(test)]
pub mod tests {
    use actix::Actor;
    use actix_web::{test, web::Data, App};
    use actix_web_actors::ws;
    use serde::{de::DeserializeOwned, Serialize};
    use serde_json;

    use auth::{create_jwt, get_identity_service, PrivateClaim};
    use db;

    use crate::routes::routes;
    use crate::websocket::{MessageToClient, Server};

    pub fn get_test_server() -> actix_test::TestServer {
        dotenv::dotenv().ok();
        actix_test::start(|| {
            App::new()
                .wrap(get_identity_service())
                .app_data(Data::new(db::new_pool()))
                .app_data(Data::new(Server::new(db::new_pool()).start()))
                .configure(routes)
        })
    }

    macro_rules! init_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(get_identity_service())
                    .app_data(Data::new(db::new_pool()))
                    .app_data(Data::new(Server::new(db::new_pool()).start()))
                    .configure(routes),
            )
        };
    }

    fn deserialize_body<R>(body: &[u8], status: u16) -> R
    where
        R: DeserializeOwned,
    {
        serde_json::from_slice(body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        })
    }

    /// Helper for HTTP GET integration tests
    pub async fn test_get<R>(route: &str, token: Option<String>) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        dotenv::dotenv().ok();
        let app = init_app!().await;

        let mut req = test::TestRequest::get().uri(route);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", token));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;

        (status, deserialize_body(&body, status))
    }

    /// Helper for HTTP POST integration tests
    pub async fn test_post<T: Serialize, R>(
        route: &str,
        params: T,
        token: Option<String>,
    ) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        dotenv::dotenv().ok();
        let app = init_app!().await;

        let mut req = test::TestRequest::post().set_json(&params).uri(route);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", token));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;

        (status, deserialize_body(&body, status))
    }

    /// Helper for HTTP PUT integration tests
    pub async fn test_put<T: Serialize, R>(
        route: &str,
        params: T,
        token: Option<String>,
    ) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        dotenv::dotenv().ok();
        let app = init_app!().await;

        let mut req = test::TestRequest::put().set_json(&params).uri(route);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", token));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;

        (status, deserialize_body(&body, status))
    }

    pub fn get_auth_token(private_claim: PrivateClaim) -> String {
        dotenv::dotenv().ok();
        create_jwt(private_claim).unwrap()
    }

    pub fn get_websocket_frame_data(frame: ws::Frame) -> Option<MessageToClient> {
        if let ws::Frame::Text(t) = frame {
            let data = String::from_utf8(t.to_vec()).unwrap();
            let value: MessageToClient = serde_json::from_str(&data).unwrap();
            return Some(value);
        }

        None
    }
}
