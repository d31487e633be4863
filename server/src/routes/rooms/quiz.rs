use actix_identity::Identity;
use actix_web::web::{block, Data, Json, Path};
use diesel::{BelongingToDsl, GroupedBy, RunQueryDsl};
use serde::{Deserialize, Serialize};

use auth::identity_matches_room_id;
use db::{
    get_conn,
    models::{Answer, Question, Quiz, Room, RoomDetails},
    PgPool,
};
use errors::Error;

#[derive(Deserialize, Serialize)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}

#[derive(Deserialize, Serialize)]
pub struct QuizResponse {
    pub room: RoomDetails,
    pub quiz: Quiz,
    pub questions: Vec<QuestionWithAnswers>,
}

/// The trivia content for a room, fetched once the game starts.
pub async fn quiz(
    id: Identity,
    code: Path<String>,
    pool: Data<PgPool>,
) -> Result<Json<QuizResponse>, Error> {
    let code = code.into_inner();
    let connection = get_conn(&pool)?;

    let res: Result<(Room, Quiz, Vec<(Question, Vec<Answer>)>), Error> = block(move || {
        let room = Room::find_by_code(&connection, &code)?;
        let quiz = Quiz::find_by_id(&connection, room.quiz_id)?;
        let questions = Question::find_by_quiz_id(&connection, quiz.id)?;
        let answers = Answer::belonging_to(&questions)
            .load::<Answer>(&connection)?
            .grouped_by(&questions);

        Ok((room, quiz, questions.into_iter().zip(answers).collect()))
    })
    .await?;

    let (room, quiz, questions) = res?;

    identity_matches_room_id(id, room.id)?;

    Ok(Json(QuizResponse {
        room: room.into(),
        quiz,
        questions: questions
            .into_iter()
            .map(|(question, answers)| QuestionWithAnswers { question, answers })
            .collect(),
    }))
}
