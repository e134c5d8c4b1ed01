use log::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::task::Task;
use crate::store::TaskStore;

/// Error type for turning user-typed ids into task ids
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("ambiguous id '{query}' matches {count} tasks")]
    Ambiguous { query: String, count: usize },
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    command: Commands,
    store: &mut TaskStore,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(args, store, json),
        Commands::Show(args) => cmd_show(args, store, json),

        // Write commands
        Commands::Add(args) => cmd_add(args, store, json),
        Commands::Toggle(args) => cmd_toggle(args, store, json),
        Commands::Rm(args) => cmd_rm(args, store, json),
    }
}

// ---------------------------------------------------------------------------
// ID resolution
// ---------------------------------------------------------------------------

/// Exact id first, then a unique case-insensitive prefix.
pub fn resolve_id(store: &TaskStore, query: &str) -> Result<String, ResolveError> {
    if store.contains_task(query) {
        return Ok(query.to_string());
    }
    let needle = query.to_lowercase();
    let matches: Vec<Task> = if needle.is_empty() {
        Vec::new()
    } else {
        store
            .get_all_tasks()
            .into_iter()
            .filter(|t| t.id.to_lowercase().starts_with(&needle))
            .collect()
    };
    match matches.as_slice() {
        [] => Err(ResolveError::NotFound(query.to_string())),
        [only] => Ok(only.id.clone()),
        many => Err(ResolveError::Ambiguous {
            query: query.to_string(),
            count: many.len(),
        }),
    }
}

/// Resolve every query before anything is changed. Repeats collapse to one.
pub fn resolve_ids(store: &TaskStore, queries: &[String]) -> Result<Vec<String>, ResolveError> {
    let mut ids: Vec<String> = Vec::new();
    for query in queries {
        let id = resolve_id(store, query)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Mutations persist on their own; surface a failed write as an error.
fn check_saved(store: &TaskStore) -> Result<(), Box<dyn std::error::Error>> {
    match store.save_error() {
        Some(err) => Err(format!("changes were not saved: {}", err).into()),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    store: &TaskStore,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = Vec::new();
    if !args.done {
        tasks.extend(store.get_uncompleted_tasks());
    }
    if !args.pending {
        tasks.extend(store.get_completed_tasks());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks_to_json(&tasks))?);
    } else if tasks.is_empty() {
        println!("no tasks");
    } else {
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_show(
    args: ShowArgs,
    store: &TaskStore,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve_id(store, &args.id)?;
    let task = store
        .get_task_info(&id)
        .ok_or_else(|| ResolveError::NotFound(args.id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        for line in format_task_detail(&task) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    args: AddArgs,
    store: &mut TaskStore,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let title = args.title.join(" ");
    if title.trim().is_empty() {
        return Err("task title cannot be empty".into());
    }

    let id = store.add_task(&title);
    check_saved(store)?;
    info!("event=cli_add status=ok id={}", id);

    if json {
        let task = Task::new(id, title);
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_toggle(
    args: IdsArgs,
    store: &mut TaskStore,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ids = resolve_ids(store, &args.ids)?;
    for id in &ids {
        store.toggle_task_status(id);
    }
    check_saved(store)?;

    let tasks: Vec<Task> = ids.iter().filter_map(|id| store.get_task_info(id)).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks_to_json(&tasks))?);
    } else {
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_rm(
    args: IdsArgs,
    store: &mut TaskStore,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ids = resolve_ids(store, &args.ids)?;
    let tasks: Vec<Task> = ids.iter().filter_map(|id| store.get_task_info(id)).collect();
    for id in &ids {
        store.delete_task(id);
    }
    check_saved(store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks_to_json(&tasks))?);
    } else {
        for task in &tasks {
            println!("deleted {}", format_task_line(task));
        }
    }
    Ok(())
}
