// ABOUTME: clap definitions and argv normalisation for the loom binary

use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  $ loom list
  $ loom edit foo
  $ loom print > ~/.config/loom/foo.yml
  $ loom foo
  $ loom start foo -d
  $ loom start foo:win1,win2
  $ loom start foo -w win1 key=value
  $ loom stop foo";

/// Declarative tmux session launcher
#[derive(Debug, Parser)]
#[command(name = "loom", version, about, after_help = EXAMPLES)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log every executed command to ~/.cache/loom.log
    #[arg(long, global = true)]
    pub debug: bool,

    /// Custom path to a config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Do not attach to the session
    #[arg(short, long, global = true)]
    pub detach: bool,

    /// Create windows inside the current session
    #[arg(short, long, global = true)]
    pub inside: bool,

    /// Path to the tmux binary
    #[arg(long = "tmux", global = true, value_name = "PATH")]
    pub tmux_path: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a tmux session
    #[command(visible_aliases = ["star", "sta"])]
    Start(ProjectArgs),

    /// Stop a tmux session
    #[command(visible_aliases = ["sto"])]
    Stop(ProjectArgs),

    /// Print the configuration of a running tmux session
    #[command(visible_aliases = ["pr", "p"])]
    Print {
        /// Session to describe instead of the current one
        session: Option<String>,
    },

    /// List all projects, or a project's sessions, windows and panes
    #[command(visible_aliases = ["l", "ls"])]
    List {
        /// Project to display as a tree
        project: Option<String>,
    },

    /// Edit a project configuration
    #[command(visible_aliases = ["ed", "e"])]
    Edit {
        /// Project name
        project: Option<String>,
    },

    /// Create a new project configuration
    #[command(visible_aliases = ["ne", "n"])]
    New {
        /// Project name
        project: Option<String>,
    },

    /// Switch to a running tmux session
    #[command(visible_aliases = ["swi", "sw"])]
    Switch {
        /// Session to switch to; lists running sessions when omitted
        session: Option<String>,
    },

    /// Display version information
    #[command(visible_aliases = ["ver", "v"])]
    Version,
}

#[derive(Debug, Default, Args)]
pub struct ProjectArgs {
    /// Project name (optionally PROJECT:win1,win2) followed by KEY=VALUE variables
    #[arg(value_name = "PROJECT|KEY=VALUE")]
    pub args: Vec<String>,

    /// Windows to act on
    #[arg(short, long, value_delimiter = ',')]
    pub windows: Vec<String>,
}

/// A project invocation with its positional arguments sorted out.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProjectRequest {
    pub project: Option<String>,
    pub windows: Vec<String>,
    pub variables: HashMap<String, String>,
}

impl ProjectArgs {
    /// Split positionals into the project, `KEY=VALUE` variables and any
    /// `project:win1,win2` window list.
    pub fn into_request(self) -> anyhow::Result<ProjectRequest> {
        let mut request = ProjectRequest {
            windows: self.windows,
            ..ProjectRequest::default()
        };
        for arg in self.args {
            if let Some((key, value)) = arg.split_once('=') {
                request.variables.insert(key.to_string(), value.to_string());
                continue;
            }
            if request.project.is_some() {
                anyhow::bail!("unexpected argument {arg:?}: only one project may be given");
            }
            match arg.split_once(':') {
                Some((project, windows)) => {
                    request.project = Some(project.to_string());
                    request.windows.extend(
                        windows
                            .split(',')
                            .filter(|name| !name.is_empty())
                            .map(String::from),
                    );
                }
                None => request.project = Some(arg),
            }
        }
        Ok(request)
    }
}

const SUBCOMMANDS: &[&str] = &[
    "start", "star", "sta", "stop", "sto", "print", "pr", "p", "list", "l", "ls", "edit", "ed",
    "e", "new", "ne", "n", "switch", "swi", "sw", "version", "ver", "v", "help",
];

/// Normalise argv before clap sees it: no arguments means `--help`, and an
/// invocation without a subcommand means `start`.
pub fn shim_args(mut args: Vec<String>) -> Vec<String> {
    if args.len() < 2 {
        args.push("--help".to_string());
        return args;
    }

    let mut index = 1;
    while index < args.len() {
        let arg = args[index].as_str();
        if matches!(arg, "-h" | "--help" | "-V" | "--version") {
            return args;
        }
        let takes_value = matches!(arg, "--file" | "--tmux")
            || (arg.starts_with('-') && !arg.starts_with("--") && arg.ends_with('f'));
        if takes_value {
            index += 2;
        } else if arg.starts_with('-') {
            index += 1;
        } else {
            break;
        }
    }

    let has_subcommand = args
        .get(index)
        .is_some_and(|arg| SUBCOMMANDS.contains(&arg.as_str()));
    if !has_subcommand {
        args.insert(1, "start".to_string());
    }
    args
}
