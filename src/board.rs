//! Client-side view-model for the task list.
//!
//! [`TaskBoard`] owns a disposable copy of the server's task list together with the
//! input box, the status message and the edit dialog. Every operation talks to the
//! service through [`TaskClient`]; failures are logged and leave the previous state
//! in place, so callers never see an error.

use crate::domains::task::{CreateTaskResponse, Task};
use crate::services::api_client::TaskClient;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    /// Tasks in the order of the last fetch, plus any appended since.
    pub tasks: Vec<Task>,
    pub input: String,
    /// Last confirmation message from the service.
    pub message: String,
    pub dialog_open: bool,
    /// Editable draft of the task in the dialog.
    pub selected: Option<Task>,
}

#[derive(Clone)]
pub struct TaskBoard {
    client: TaskClient,
    state: BoardState,
}

impl TaskBoard {
    pub fn new(client: TaskClient) -> Self {
        Self {
            client,
            state: BoardState::default(),
        }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    /// Input to send as a new task, or `None` when it is blank.
    pub fn pending_input(&self) -> Option<String> {
        if self.state.input.trim().is_empty() {
            None
        } else {
            Some(self.state.input.clone())
        }
    }

    /// Replaces the local list with the service's.
    pub async fn load(&mut self) {
        let fetched = fetch_tasks(&self.client).await;
        self.apply_tasks(fetched);
    }

    /// Creates a task from the input box. Blank input is ignored.
    pub async fn submit(&mut self) {
        let Some(todo) = self.pending_input() else {
            return;
        };
        let created = send_new_task(&self.client, &todo).await;
        self.apply_created(&todo, created);
    }

    /// Deletes on the service, then refetches; the local list is never edited directly.
    pub async fn delete(&mut self, id: i32) {
        if send_delete(&self.client, id).await {
            self.load().await;
        }
    }

    pub fn open_editor(&mut self, task: &Task) {
        self.state.selected = Some(task.clone());
        self.state.dialog_open = true;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(selected) = self.state.selected.as_mut() {
            selected.todo = text.into();
        }
    }

    pub fn close_editor(&mut self) {
        self.state.dialog_open = false;
        self.state.selected = None;
    }

    /// Persists the draft, refetches and closes the dialog. On failure the dialog
    /// stays open with the draft intact.
    pub async fn save_edit(&mut self) {
        let Some(draft) = self.state.selected.clone() else {
            return;
        };
        if send_update(&self.client, &draft).await {
            self.load().await;
            self.finish_edit(&draft);
        }
    }

    /// Installs a fetched list; `None` keeps the current one.
    pub fn apply_tasks(&mut self, fetched: Option<Vec<Task>>) {
        if let Some(tasks) = fetched {
            self.state.tasks = tasks;
        }
    }

    /// Records a created task. The input is cleared only if it still holds `sent`.
    pub fn apply_created(&mut self, sent: &str, created: Option<CreateTaskResponse>) {
        let Some(created) = created else {
            return;
        };
        self.state.tasks.push(created.task);
        self.state.message = created.message;
        if self.state.input == sent {
            self.state.input.clear();
        }
    }

    /// Closes the dialog after `saved` was persisted, unless another task is being edited.
    pub fn finish_edit(&mut self, saved: &Task) {
        if self.state.selected.as_ref().map(|task| task.id) == Some(saved.id) {
            self.close_editor();
        }
    }
}

// Network halves of the board operations. They only read the client, so a UI can run
// them outside its state lock and merge the result with the `apply_*` methods.

pub async fn fetch_tasks(client: &TaskClient) -> Option<Vec<Task>> {
    match client.list_tasks().await {
        Ok(tasks) => Some(tasks),
        Err(err) => {
            tracing::error!(error = %err, "Error fetching tasks");
            None
        }
    }
}

pub async fn send_new_task(client: &TaskClient, todo: &str) -> Option<CreateTaskResponse> {
    match client.add_task(todo).await {
        Ok(created) => Some(created),
        Err(err) => {
            tracing::error!(error = %err, "Error adding task");
            None
        }
    }
}

pub async fn send_delete(client: &TaskClient, id: i32) -> bool {
    match client.delete_task(id).await {
        Ok(_) => true,
        Err(err) => {
            tracing::error!(error = %err, id, "Error deleting task");
            false
        }
    }
}

pub async fn send_update(client: &TaskClient, draft: &Task) -> bool {
    match client.update_task(draft).await {
        Ok(_) => true,
        Err(err) => {
            tracing::error!(error = %err, id = draft.id, "Error updating task");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_board() -> TaskBoard {
        TaskBoard::new(TaskClient::new("http://127.0.0.1:9").unwrap())
    }

    #[test]
    fn editor_copies_task_and_close_discards_draft() {
        let mut board = offline_board();
        let task = Task {
            id: 3,
            todo: "walk dog".to_string(),
        };
        board.state.tasks.push(task.clone());

        board.open_editor(&task);
        board.set_draft("walk cat");
        assert!(board.state().dialog_open);
        assert_eq!(board.state().selected.as_ref().unwrap().todo, "walk cat");
        assert_eq!(board.tasks()[0].todo, "walk dog");

        board.close_editor();
        assert!(!board.state().dialog_open);
        assert!(board.state().selected.is_none());
        assert_eq!(board.tasks(), &[task]);
    }

    #[test]
    fn draft_edits_without_selection_are_ignored() {
        let mut board = offline_board();
        board.set_draft("nothing selected");
        assert_eq!(board.state(), &BoardState::default());
    }

    #[test]
    fn completions_leave_state_they_do_not_own() {
        let mut board = offline_board();
        let walk = Task {
            id: 3,
            todo: "walk dog".to_string(),
        };
        let milk = Task {
            id: 4,
            todo: "Buy milk".to_string(),
        };
        board.open_editor(&walk);
        board.set_draft("walk cat");
        board.set_input("Buy milk and eggs");

        board.apply_tasks(Some(vec![walk.clone()]));
        board.apply_created(
            "Buy milk",
            Some(CreateTaskResponse {
                message: "Task added successfully".to_string(),
                task: milk.clone(),
            }),
        );

        assert_eq!(board.tasks(), &[walk, milk]);
        assert_eq!(board.state().message, "Task added successfully");
        assert_eq!(board.state().input, "Buy milk and eggs");
        assert!(board.state().dialog_open);
        assert_eq!(board.state().selected.as_ref().unwrap().todo, "walk cat");
    }

    #[test]
    fn failed_fetch_keeps_list_and_finished_save_only_closes_its_own_dialog() {
        let mut board = offline_board();
        let first = Task {
            id: 1,
            todo: "one".to_string(),
        };
        let second = Task {
            id: 2,
            todo: "two".to_string(),
        };
        board.apply_tasks(Some(vec![first.clone(), second.clone()]));
        board.apply_tasks(None);
        assert_eq!(board.tasks().len(), 2);

        board.open_editor(&second);
        board.finish_edit(&first);
        assert!(board.state().dialog_open);
        assert_eq!(board.state().selected, Some(second.clone()));

        board.finish_edit(&second);
        assert!(!board.state().dialog_open);
        assert!(board.state().selected.is_none());
    }

    #[test]
    fn pending_input_skips_blank_text() {
        let mut board = offline_board();
        board.set_input("  \t");
        assert_eq!(board.pending_input(), None);
        board.set_input(" Buy milk ");
        assert_eq!(board.pending_input().as_deref(), Some(" Buy milk "));
    }
}
