use actix_web::{
    web::{block, Data, Json},
    Result,
};

use db::{get_conn, models::Quiz, PgPool};
use errors::Error;

pub async fn get_all(pool: Data<PgPool>) -> Result<Json<Vec<Quiz>>, Error> {
    let connection = get_conn(&pool)?;

    let res = block(move || Quiz::get_all(&connection)).await?;

    Ok(Json(res?))
}
