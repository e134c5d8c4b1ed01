use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    pub done: bool,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        done: task.done,
    }
}

pub fn tasks_to_json(tasks: &[Task]) -> Vec<TaskJson> {
    tasks.iter().map(task_to_json).collect()
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn state_char(done: bool) -> char {
    if done { 'x' } else { ' ' }
}

/// `[x] 1A2B3C4D  title`
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {:<8}  {}",
        state_char(task.done),
        task.short_id(),
        task.title
    )
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    vec![
        format!("[{}] {}", state_char(task.done), task.title),
        format!("id:   {}", task.id),
        format!("done: {}", if task.done { "yes" } else { "no" }),
    ]
}
