use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::Quiz;
use crate::schema::questions;

#[derive(Associations, Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[belongs_to(Quiz)]
pub struct Question {
    pub id: i32,
    pub quiz_id: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "questions"]
pub struct NewQuestion {
    pub quiz_id: i32,
    pub body: String,
}

impl Question {
    pub fn create(conn: &PgConnection, quiz_id: i32, body: String) -> Result<Question, Error> {
        let question = diesel::insert_into(questions::table)
            .values(NewQuestion { quiz_id, body })
            .get_result(conn)?;

        Ok(question)
    }

    pub fn find_by_quiz_id(conn: &PgConnection, quiz_id: i32) -> Result<Vec<Question>, Error> {
        use questions::dsl::{id, questions as questions_table, quiz_id as quiz_id_field};

        let results = questions_table
            .filter(quiz_id_field.eq(quiz_id))
            .order(id.asc())
            .get_results::<Question>(conn)?;

        Ok(results)
    }
}
