// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A todo list wired with delegated events.
//!
//! Shows:
//! - One click listener on the list handling every row, by attribute and by binding.
//! - Unhandled clicks bubbling to the page's own listener.
//! - A toolbar registered as a parent scope, with one disabled button.
//! - The submit calling convention.
//!
//! Run:
//! - `cargo run -p relay_demos --example todo_list`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hashbrown::HashMap;
use relay_delegate::delegator::Delegator;
use relay_delegate::error::BindError;
use relay_delegate::event::DomEvent;
use relay_delegate::types::{Action, BindingContext, DataItem, Handler};
use relay_tree::{LocalNode, NodeFlags, NodeId, Tree};

type Ev = DomEvent<NodeId>;
type Contexts = HashMap<NodeId, BindingContext<Model>>;

/// View models bound to the tree.
#[derive(Clone, Debug)]
enum Model {
    App(Rc<App>),
    Todo(Rc<Todo>),
}

#[derive(Debug, Default)]
struct App {
    todos: RefCell<Vec<Rc<Todo>>>,
}

#[derive(Debug)]
struct Todo {
    title: String,
    done: Cell<bool>,
}

impl DataItem<NodeId, Ev> for Model {
    fn method(&self, name: &str) -> Option<Action<NodeId, Self, Ev>> {
        let action = match (self, name) {
            (Self::Todo(_), "toggle") => Action::new(|me: &Self, _| {
                if let Self::Todo(todo) = me {
                    todo.done.set(!todo.done.get());
                    tracing::info!(title = %todo.title, done = todo.done.get(), "toggled");
                }
                // Let the checkbox tick.
                true
            }),
            // Lives on the app; the row's todo arrives as the data argument.
            (Self::App(_), "remove") => Action::new(|me: &Self, args| {
                if let (Self::App(app), Some(Self::Todo(todo))) = (me, args.data()) {
                    app.todos.borrow_mut().retain(|t| !Rc::ptr_eq(t, todo));
                    tracing::info!(title = %todo.title, "removed");
                }
                false
            }),
            _ => return None,
        };
        Some(action)
    }
}

fn fire(
    delegator: &Delegator<NodeId, Model, Ev>,
    tree: &Tree,
    contexts: &Contexts,
    kind: &str,
    target: NodeId,
) {
    let mut ev = DomEvent::new(kind, target);
    let stopped_at = delegator.dispatch(tree, contexts, &mut ev);
    println!(
        "{kind:>6} on {target:?}: stopped at {stopped_at:?}, default prevented: {}",
        ev.default_prevented()
    );
}

fn main() -> Result<(), BindError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let app = Rc::new(App::default());
    let app_model = Model::App(Rc::clone(&app));

    let mut tree = Tree::new();
    let mut contexts = Contexts::new();
    let mut delegator: Delegator<NodeId, Model, Ev> = Delegator::new();

    let body = tree.insert(
        None,
        LocalNode::element("body").with_attribute("data-click", "log"),
    );
    let form = tree.insert(
        Some(body),
        LocalNode::element("form").with_attribute("data-submit", "add"),
    );
    let list = tree.insert(Some(body), LocalNode::element("ul"));
    let toolbar = tree.insert(Some(body), LocalNode::element("div"));
    let clear = tree.insert(
        Some(toolbar),
        LocalNode::element("button").with_attribute("data-click-parent", "clearDone"),
    );
    let frozen = tree.insert(
        Some(toolbar),
        LocalNode::element("button")
            .with_attribute("data-click-parent", "clearDone")
            .with_flags(NodeFlags::DISABLED),
    );
    for node in [body, form, list, toolbar, clear, frozen] {
        contexts.insert(node, BindingContext::new(app_model.clone()));
    }

    delegator.register_delegation_root(body, ["click", "submit"], &());
    delegator.register_delegation_root(list, ["click"], &());
    delegator.register_parent_delegation_root(
        toolbar,
        [(
            "click",
            Handler::map([(
                "clearDone",
                Handler::action(|me: &Model, _| {
                    if let Model::App(app) = me {
                        app.todos.borrow_mut().retain(|t| !t.done.get());
                        tracing::info!(left = app.todos.borrow().len(), "cleared done");
                    }
                    false
                }),
            )]),
        )],
        &(),
    );

    let actions = delegator.actions();
    actions.register_fn("log", |_, _| {
        tracing::info!("click reached the page");
        true
    });
    actions.register_fn("add", |me: &Model, args| {
        if let Model::App(app) = me {
            app.todos.borrow_mut().push(Rc::new(Todo {
                title: "Jam".into(),
                done: Cell::new(false),
            }));
            tracing::info!(form = ?args.form(), "added");
        }
        false
    });

    let mut rows = Vec::new();
    for title in ["Milk", "Eggs", "Bread"] {
        let todo = Rc::new(Todo {
            title: title.into(),
            done: Cell::new(false),
        });
        app.todos.borrow_mut().push(Rc::clone(&todo));
        let context = BindingContext::new(Model::Todo(todo)).with_parents([app_model.clone()]);

        let li = tree.insert(Some(list), LocalNode::element("li"));
        let check = tree.insert(Some(li), LocalNode::element("input"));
        let label = tree.insert(Some(li), LocalNode::text(title));
        let remove = tree.insert(
            Some(li),
            LocalNode::element("button").with_attribute("data-click", "remove"),
        );
        delegator.apply_binding(check, "delegatedClick", Handler::name("toggle"))?;
        for node in [li, check, label, remove] {
            contexts.insert(node, context.clone());
        }
        rows.push((check, label, remove));
    }

    fire(&delegator, &tree, &contexts, "click", rows[0].0);
    fire(&delegator, &tree, &contexts, "click", rows[1].1);
    fire(&delegator, &tree, &contexts, "click", rows[2].2);
    fire(&delegator, &tree, &contexts, "click", clear);
    fire(&delegator, &tree, &contexts, "click", frozen);
    fire(&delegator, &tree, &contexts, "submit", form);

    let titles: Vec<String> = app.todos.borrow().iter().map(|t| t.title.clone()).collect();
    println!("remaining: {titles:?}");
    Ok(())
}
