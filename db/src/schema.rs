table! {
    answers (id) {
        id -> Int4,
        question_id -> Int4,
        body -> Text,
        correct -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    players (id) {
        id -> Int4,
        name -> Varchar,
        room_id -> Int4,
        ready -> Bool,
        joined_at -> Timestamptz,
    }
}

table! {
    questions (id) {
        id -> Int4,
        quiz_id -> Int4,
        body -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    quizzes (id) {
        id -> Int4,
        title -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    rooms (id) {
        id -> Int4,
        code -> Nullable<Varchar>,
        quiz_id -> Int4,
        game_started -> Bool,
        host -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

joinable!(answers -> questions (question_id));
joinable!(players -> rooms (room_id));
joinable!(questions -> quizzes (quiz_id));
joinable!(rooms -> quizzes (quiz_id));

allow_tables_to_appear_in_same_query!(answers, players, questions, quizzes, rooms,);
