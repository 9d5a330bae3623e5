//! Task management commands.

use clap::Subcommand;
use focusdo_core::{Priority, TaskStore};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Priority: high, medium or low
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// List tasks as JSON
    List {
        /// Only show tasks that are not completed yet
        #[arg(long)]
        pending: bool,
    },
    /// Toggle a task's completion flag
    Toggle {
        /// Task ID
        id: Uuid,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: Uuid,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::open()?;

    match action {
        TaskAction::Add { title, priority } => {
            let priority: Priority = priority.parse()?;
            let task = store.add(title, priority)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { pending } => {
            let tasks: Vec<_> = store
                .list()
                .iter()
                .filter(|t| !pending || !t.is_completed)
                .collect();
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Toggle { id } => {
            if store.toggle(id)? {
                if let Some(task) = store.get(id) {
                    println!("{}", serde_json::to_string_pretty(task)?);
                }
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Delete { id } => {
            if store.delete(id)? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }

    Ok(())
}
