use chrono::{DateTime, Utc};
use diesel::{self, PgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::Question;
use crate::schema::answers;

#[derive(Associations, Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[belongs_to(Question)]
pub struct Answer {
    pub id: i32,
    pub question_id: i32,
    pub body: String,
    pub correct: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "answers"]
pub struct NewAnswer {
    pub question_id: i32,
    pub body: String,
    pub correct: bool,
}

impl Answer {
    pub fn create(
        conn: &PgConnection,
        question_id: i32,
        body: String,
        correct: bool,
    ) -> Result<Answer, Error> {
        let answer = diesel::insert_into(answers::table)
            .values(NewAnswer {
                question_id,
                body,
                correct,
            })
            .get_result(conn)?;

        Ok(answer)
    }
}
