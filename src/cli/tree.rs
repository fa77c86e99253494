// ABOUTME: Renders a loaded config as a session/window/pane tree for `loom list`

use loom::{Config, Pane, Window};
use std::fmt::Write;

/// One labelled node of the rendered tree.
#[derive(Debug, Default)]
pub struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.label);
        render_children(&self.children, "", &mut out);
        out
    }
}

fn render_children(children: &[Node], prefix: &str, out: &mut String) {
    for (index, child) in children.iter().enumerate() {
        let last = index + 1 == children.len();
        let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        let _ = writeln!(out, "{prefix}{branch}{}", child.label);
        render_children(&child.children, &format!("{prefix}{indent}"), out);
    }
}

/// Build the display tree for `config`, nested sessions first.
pub fn config_tree(config: &Config) -> Node {
    let mut root = Node::new(with_path(&config.session, &config.path));
    root.children
        .extend(config.sessions.iter().map(config_tree));
    root.children.extend(config.windows.iter().map(window_node));
    root
}

fn window_node(window: &Window) -> Node {
    let name = if window.name.is_empty() {
        "[ ]".to_string()
    } else {
        format!("[{}]", window.name)
    };
    let mut node = Node::new(with_path(&name, &window.path));
    let commands = window.command_sequence();
    if !commands.is_empty() {
        node.children.push(Node::new(commands.join("; ")));
    }
    node.children.extend(window.panes.iter().map(pane_node));
    node
}

fn pane_node(pane: &Pane) -> Node {
    let commands = pane.command_sequence();
    let label = if commands.is_empty() {
        "pane".to_string()
    } else {
        commands.join("; ")
    };
    Node::new(with_path(&label, &pane.path))
}

fn with_path(label: &str, path: &str) -> String {
    if path.is_empty() {
        label.to_string()
    } else {
        format!("{label} ({path})")
    }
}
