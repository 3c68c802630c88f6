use diesel::prelude::*;

use crate::domains::task::Task;

pub mod postgres;
pub mod schema;
pub mod sqlite;

use schema::tasks;

#[derive(Queryable)]
struct TaskRow {
    id: i32,
    todo: String,
}

#[derive(Insertable)]
#[diesel(table_name = tasks)]
struct NewTask<'a> {
    todo: &'a str,
}

fn map_row(row: TaskRow) -> Task {
    Task {
        id: row.id,
        todo: row.todo,
    }
}
