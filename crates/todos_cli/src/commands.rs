use crate::cli::{Cli, Command, collect_config_overrides};
use crate::tui;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use todos_core::TaskStore;
use todos_core::config::{
    Config, Palette, load_config_with_fallback, merge_overrides, palette_for_theme,
};
use todos_core::error::AppError;
use todos_core::filter::items_left_label;
use todos_core::model::Task;
use todos_core::storage::Backend;
use tracing::debug;

/// Config plus the store it points at, opened once per invocation.
pub struct Session {
    pub config: Config,
    pub store: TaskStore<Backend>,
}

impl Session {
    pub fn open(cli: &Cli) -> Result<Self, AppError> {
        let overrides = collect_config_overrides(&cli.config_override)?;
        let loaded = load_config_with_fallback();
        let config = merge_overrides(&loaded.config, &overrides);
        let backend = Backend::open(&config);
        debug!(?backend, "opening task storage");
        let store = TaskStore::open(backend);
        Ok(Self { config, store })
    }

    pub fn palette(&self) -> Palette {
        palette_for_theme(self.config.theme.as_deref())
    }
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Task")]
    text: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            done: if task.completed { "x" } else { "" },
            text: task.text.clone(),
        }
    }
}

fn task_json(task: &Task) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(task)
        .map_err(|err| AppError::invalid_data(format!("failed to encode task {}: {err}", task.id)))
}

fn print_optional_task_json(task: Option<&Task>) -> Result<(), AppError> {
    match task {
        Some(task) => println!("{}", task_json(task)?),
        None => println!("null"),
    }
    Ok(())
}

fn print_list_plain(store: &TaskStore<Backend>, palette: &Palette) {
    if store.is_empty() {
        println!("No tasks");
        return;
    }

    let rows: Vec<TaskRow> = store.visible().into_iter().map(TaskRow::from).collect();
    if rows.is_empty() {
        println!("No {} tasks", store.filter());
    } else {
        let mut table = Table::new(rows);
        table.with(Style::psql());
        println!("{table}");
    }

    let mut footer = palette.accentize(&items_left_label(store.active_count()));
    footer.push_str(&palette.mutedize(&format!("  filter: {}", store.filter())));
    let completed = store.completed_count();
    if completed > 0 {
        footer.push_str(&palette.mutedize(&format!("  ({completed} completed)")));
    }
    println!("{footer}");
}

fn print_list_json(store: &TaskStore<Backend>) -> Result<(), AppError> {
    let tasks = store
        .visible()
        .into_iter()
        .map(task_json)
        .collect::<Result<Vec<_>, _>>()?;
    let payload = serde_json::json!({
        "filter": store.filter().as_str(),
        "items_left": store.active_count(),
        "tasks": tasks,
    });
    println!("{payload}");
    Ok(())
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut session = Session::open(&cli)?;

    let Some(command) = cli.command else {
        let theme = session.config.theme.clone();
        return tui::run(session.store, theme.as_deref());
    };

    match command {
        Command::Add { text } => {
            let added = session.store.add(&text);
            if cli.json {
                print_optional_task_json(added.as_ref())?;
            } else if let Some(task) = added {
                println!("Added task: {} ({})", task.text, task.id);
            }
        }
        Command::Toggle { id } => {
            let toggled = session.store.toggle(id);
            if cli.json {
                print_optional_task_json(toggled.as_ref())?;
            } else if let Some(task) = toggled {
                let verb = if task.completed { "Completed" } else { "Reopened" };
                println!("{verb} task: {} ({})", task.text, task.id);
            }
        }
        Command::Delete { id } => {
            let removed = session.store.delete(id);
            if cli.json {
                print_optional_task_json(removed.as_ref())?;
            } else if let Some(task) = removed {
                println!("Deleted task: {} ({})", task.text, task.id);
            }
        }
        Command::ClearCompleted => {
            let removed = session.store.clear_completed();
            if cli.json {
                println!("{}", serde_json::json!({ "removed": removed }));
            } else {
                let noun = if removed == 1 { "task" } else { "tasks" };
                println!("Cleared {removed} completed {noun}");
            }
        }
        Command::List { filter } => {
            session.store.set_filter(filter);
            if cli.json {
                print_list_json(&session.store)?;
            } else {
                let palette = session.palette();
                print_list_plain(&session.store, &palette);
            }
        }
    }

    Ok(())
}
