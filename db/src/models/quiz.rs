use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::{Answer, Question};
use crate::schema::quizzes;

// Stock content given to a quiz created on the fly from the room-create
// screen, until an admin fills in real questions.
const SAMPLE_QUESTIONS: [(&str, [(&str, bool); 4]); 2] = [
    (
        "What is the capital of France?",
        [
            ("Paris", true),
            ("London", false),
            ("Berlin", false),
            ("Madrid", false),
        ],
    ),
    (
        "Which planet is known as the Red Planet?",
        [
            ("Mars", true),
            ("Venus", false),
            ("Jupiter", false),
            ("Saturn", false),
        ],
    ),
];

#[derive(Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[table_name = "quizzes"]
pub struct Quiz {
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    pub fn get_all(conn: &PgConnection) -> Result<Vec<Quiz>, Error> {
        use quizzes::dsl::{quizzes as quizzes_table, title};

        let all_quizzes = quizzes_table.order(title).load::<Quiz>(conn)?;

        Ok(all_quizzes)
    }

    pub fn find_by_id(conn: &PgConnection, quiz_id: i32) -> Result<Quiz, Error> {
        use quizzes::dsl::quizzes as quizzes_table;

        let quiz = quizzes_table.find(quiz_id).first::<Quiz>(conn)?;

        Ok(quiz)
    }

    /// Looks a quiz up by title, creating it with the stock sample questions
    /// when it does not exist yet. Run inside the room-create transaction.
    pub fn find_or_create(conn: &PgConnection, quiz_title: &str) -> Result<Quiz, Error> {
        use quizzes::dsl::{quizzes as quizzes_table, title};

        let existing = quizzes_table
            .filter(title.eq(quiz_title))
            .first::<Quiz>(conn)
            .optional()?;
        if let Some(quiz) = existing {
            return Ok(quiz);
        }

        let quiz: Quiz = diesel::insert_into(quizzes::table)
            .values(title.eq(quiz_title))
            .get_result(conn)?;

        for (body, answers) in &SAMPLE_QUESTIONS {
            let question = Question::create(conn, quiz.id, body.to_string())?;
            for (answer_body, correct) in answers {
                Answer::create(conn, question.id, answer_body.to_string(), *correct)?;
            }
        }

        Ok(quiz)
    }
}
