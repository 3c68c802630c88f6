use dioxus::prelude::*;

use crate::board::{fetch_tasks, send_delete, send_new_task, send_update, TaskBoard};
use crate::services::api_client::TaskClient;

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; background: #f8fafc; color: #0f172a; }
.board { display: flex; flex-direction: column; gap: 12px; align-items: center; padding: 32px 16px; }
h1 { font-size: 30px; font-weight: 700; text-decoration: underline; margin: 0; }
.message { color: #16a34a; margin: 0; }
.composer { display: flex; gap: 8px; margin-top: 16px; }
input { border: 1px solid #d1d5db; border-radius: 6px; padding: 8px 12px; font-size: 15px; }
input:focus { outline: none; border-color: #3b82f6; }
button { border: none; border-radius: 6px; padding: 8px 16px; font-weight: 700; cursor: pointer; background: transparent; }
.primary { background: #3b82f6; color: white; }
.primary:hover { background: #2563eb; }
.danger { background: #ef4444; color: white; }
.danger:hover { background: #dc2626; }
.tasks { display: flex; flex-direction: column; gap: 8px; min-width: 360px; margin-top: 16px; }
.row { display: flex; align-items: center; justify-content: space-between; gap: 8px; }
.task { flex: 1; display: flex; align-items: center; justify-content: space-between; border: 1px solid #d1d5db; border-radius: 6px; padding: 8px 12px; background: white; }
.delete { color: #dc2626; padding: 0 4px; }
.edit { padding: 0 4px; }
.backdrop { position: fixed; inset: 0; background: rgba(15,23,42,0.35); display: flex; align-items: center; justify-content: center; }
.dialog { background: white; border-radius: 10px; padding: 20px; display: flex; flex-direction: column; gap: 12px; box-shadow: 0 12px 30px rgba(0,0,0,0.2); }
.dialog-actions { display: flex; justify-content: center; gap: 12px; }
"#;

pub fn launch_ui(client: TaskClient) {
    LaunchBuilder::desktop().with_context(client).launch(app_view);
}

// Each action awaits the service on a cloned client and then writes back only the
// fields it owns, so edits made while a request is in flight survive.

fn refresh(mut board: Signal<TaskBoard>) {
    let client = board.peek().client().clone();
    spawn(async move {
        let fetched = fetch_tasks(&client).await;
        board.write().apply_tasks(fetched);
    });
}

fn submit(mut board: Signal<TaskBoard>) {
    let Some(todo) = board.peek().pending_input() else {
        return;
    };
    let client = board.peek().client().clone();
    spawn(async move {
        let created = send_new_task(&client, &todo).await;
        board.write().apply_created(&todo, created);
    });
}

fn remove(mut board: Signal<TaskBoard>, id: i32) {
    let client = board.peek().client().clone();
    spawn(async move {
        if send_delete(&client, id).await {
            let fetched = fetch_tasks(&client).await;
            board.write().apply_tasks(fetched);
        }
    });
}

fn save(mut board: Signal<TaskBoard>) {
    let Some(draft) = board.peek().state().selected.clone() else {
        return;
    };
    let client = board.peek().client().clone();
    spawn(async move {
        if send_update(&client, &draft).await {
            let fetched = fetch_tasks(&client).await;
            let mut board = board.write();
            board.apply_tasks(fetched);
            board.finish_edit(&draft);
        }
    });
}

fn app_view() -> Element {
    let client = use_context::<TaskClient>();
    let mut board = use_signal(move || TaskBoard::new(client));

    use_hook(move || refresh(board));

    let state = board.read().state().clone();
    let show_dialog = state.dialog_open && state.selected.is_some();
    let draft = state
        .selected
        .as_ref()
        .map(|task| task.todo.clone())
        .unwrap_or_default();

    rsx! {
        style { {STYLES} }
        div { class: "board",
            h1 { "Todo App" }
            if !state.message.is_empty() {
                p { class: "message", "{state.message}" }
            }
            div { class: "composer",
                input {
                    r#type: "text",
                    value: "{state.input}",
                    placeholder: "Enter task",
                    oninput: move |evt| board.write().set_input(evt.value()),
                }
                button {
                    class: "primary",
                    onclick: move |_| submit(board),
                    "Add Task"
                }
            }
            div { class: "tasks",
                for task in state.tasks.iter().cloned() {
                    div { class: "row", key: "{task.id}",
                        div { class: "task",
                            span { "{task.todo}" }
                            button {
                                class: "delete",
                                onclick: move |_| remove(board, task.id),
                                "✕"
                            }
                        }
                        button {
                            class: "edit",
                            onclick: {
                                let task = task.clone();
                                move |_| board.write().open_editor(&task)
                            },
                            "✏"
                        }
                    }
                }
            }
            if show_dialog {
                div { class: "backdrop",
                    div { class: "dialog",
                        input {
                            r#type: "text",
                            value: "{draft}",
                            oninput: move |evt| board.write().set_draft(evt.value()),
                        }
                        div { class: "dialog-actions",
                            button {
                                class: "primary",
                                onclick: move |_| save(board),
                                "Save"
                            }
                            button {
                                class: "danger",
                                onclick: move |_| board.write().close_editor(),
                                "Close"
                            }
                        }
                    }
                }
            }
        }
    }
}
