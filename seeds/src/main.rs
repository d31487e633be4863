use diesel::{self, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use dotenv::dotenv;

use db::{
    get_conn,
    models::{Answer, Question, Quiz},
    new_pool,
    schema::quizzes,
};

const QUIZZES: &[(&str, &[(&str, &[(&str, bool)])])] = &[
    (
        "General Knowledge",
        &[
            (
                "What is the largest ocean on Earth?",
                &[
                    ("Pacific", true),
                    ("Atlantic", false),
                    ("Indian", false),
                    ("Arctic", false),
                ],
            ),
            (
                "How many continents are there?",
                &[("Seven", true), ("Five", false), ("Six", false), ("Eight", false)],
            ),
            (
                "What is the chemical symbol for gold?",
                &[("Au", true), ("Ag", false), ("Go", false), ("Gd", false)],
            ),
        ],
    ),
    (
        "Movies",
        &[
            (
                "Who directed Jurassic Park?",
                &[
                    ("Steven Spielberg", true),
                    ("James Cameron", false),
                    ("George Lucas", false),
                    ("Ridley Scott", false),
                ],
            ),
            (
                "In which year was the first Toy Story released?",
                &[("1995", true), ("1999", false), ("1992", false), ("2001", false)],
            ),
        ],
    ),
];

fn main() {
    dotenv().ok();

    let pool = new_pool();
    let conn = get_conn(&pool).unwrap();

    for (title, questions) in QUIZZES {
        let existing = quizzes::dsl::quizzes
            .filter(quizzes::dsl::title.eq(*title))
            .first::<Quiz>(&conn)
            .optional()
            .unwrap();
        if existing.is_some() {
            continue;
        }

        let quiz: Quiz = diesel::insert_into(quizzes::table)
            .values(quizzes::dsl::title.eq(*title))
            .get_result(&conn)
            .unwrap();

        for (body, answers) in *questions {
            let question = Question::create(&conn, quiz.id, body.to_string()).unwrap();
            for (answer_body, correct) in *answers {
                Answer::create(&conn, question.id, answer_body.to_string(), *correct).unwrap();
            }
        }
    }
}
