//! Demonstration of Store for managing complex state

use rudder::{Action, Store};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
struct TodoItem {
    id: usize,
    title: String,
    completed: bool,
}

#[derive(Clone, Debug)]
struct AppState {
    todos: Vec<TodoItem>,
    filter: TodoFilter,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum TodoFilter {
    All,
    Active,
    Completed,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum TodoAction {
    AddTodo { title: String },
    ToggleTodo { id: usize },
    SetFilter { filter: TodoFilter },
}

impl AppState {
    fn new() -> Self {
        Self {
            todos: Vec::new(),
            filter: TodoFilter::All,
        }
    }

    fn filtered_todos(&self) -> Vec<&TodoItem> {
        match self.filter {
            TodoFilter::All => self.todos.iter().collect(),
            TodoFilter::Active => self.todos.iter().filter(|t| !t.completed).collect(),
            TodoFilter::Completed => self.todos.iter().filter(|t| t.completed).collect(),
        }
    }

    fn stats(&self) -> (usize, usize, usize) {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|t| t.completed).count();
        let active = total - completed;
        (total, active, completed)
    }
}

fn reducer(state: Option<AppState>, action: &Action) -> AppState {
    let mut state = state.unwrap_or_else(AppState::new);
    match action.decode::<TodoAction>() {
        Ok(TodoAction::AddTodo { title }) => {
            let id = state.todos.len();
            state.todos.push(TodoItem {
                id,
                title,
                completed: false,
            });
        }
        Ok(TodoAction::ToggleTodo { id }) => {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) {
                todo.completed = !todo.completed;
            }
        }
        Ok(TodoAction::SetFilter { filter }) => state.filter = filter,
        Err(_) => {}
    }
    state
}

fn send(store: &Store<AppState>, action: TodoAction) {
    let signal = serde_json::to_value(action).expect("serializable action");
    store.dispatch(signal).expect("dispatch");
}

fn print_todos(store: &Store<AppState>) {
    store.read(|state| {
        for todo in state.map(AppState::filtered_todos).unwrap_or_default() {
            let status = if todo.completed { "✓" } else { " " };
            println!("   [{}] {}", status, todo.title);
        }
    });
}

fn main() {
    println!("=== Store Example: Todo App ===\n");

    // Create store; the reducer supplies the initial state
    let store = Store::new(reducer, None);

    // Subscribe to state changes
    println!("1. Setting up subscriber");
    let view = store.clone();
    store.subscribe(move || {
        view.read(|state| {
            if let Some(state) = state {
                let (total, active, completed) = state.stats();
                println!(
                    "   [Store Update] Total: {}, Active: {}, Completed: {}",
                    total, active, completed
                );
            }
        });
    });

    // Add todos
    println!("\n2. Adding todos");
    for title in ["Learn Rust", "Build state container", "Write documentation"] {
        send(
            &store,
            TodoAction::AddTodo {
                title: title.to_string(),
            },
        );
    }

    println!("\n3. Current todos:");
    print_todos(&store);

    println!("\n4. Completing first two todos");
    send(&store, TodoAction::ToggleTodo { id: 0 });
    send(&store, TodoAction::ToggleTodo { id: 1 });

    println!("\n5. Filtering to show only active todos");
    send(
        &store,
        TodoAction::SetFilter {
            filter: TodoFilter::Active,
        },
    );
    print_todos(&store);

    println!("\n6. Filtering to show completed todos");
    send(
        &store,
        TodoAction::SetFilter {
            filter: TodoFilter::Completed,
        },
    );
    print_todos(&store);

    println!("\n7. Final statistics:");
    let (total, active, completed) = store.read(|state| state.map(AppState::stats).unwrap_or_default());
    println!("   Total: {}", total);
    println!("   Active: {}", active);
    println!("   Completed: {}", completed);

    println!("\n✓ Example complete!");
}
