diesel::table! {
    tasks (id) {
        id -> Integer,
        todo -> Text,
    }
}
