// ABOUTME: Executes parsed CLI commands against the loom library
// Each subcommand maps onto loading a project and driving the Launcher

use super::args::{Cli, Command, GlobalArgs, ProjectArgs};
use super::project::{find_project_file, project_file_for_edit, shorten_path};
use super::tree::config_tree;
use anyhow::{bail, Context, Result};
use loom::config::{config_dir, list_configs, load_config};
use loom::shell::{Executor, ShellCommand, SystemExecutor};
use loom::{Launcher, Options};
use std::fs;
use std::path::Path;
use std::process::Command as Process;
use tracing::{debug, info};

const FALLBACK_EDITORS: [&str; 3] = ["nvim", "vim", "nano"];

pub fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    let launcher = Launcher::new(options(&global), SystemExecutor);
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    match command {
        Command::Start(args) => start(&launcher, &global, args, &cwd),
        Command::Stop(args) => stop(&launcher, &global, args, &cwd),
        Command::Print { session } => print(&launcher, session.as_deref()),
        Command::List { project } => list(&global, project.as_deref(), &cwd),
        Command::Edit { project } => {
            let path = project_file_for_edit(project.as_deref(), global.file.as_deref(), &cwd)?;
            edit(&path)
        }
        Command::New { project } => new(&global, project.as_deref(), &cwd),
        Command::Switch { session } => switch(&launcher, session.as_deref()),
        Command::Version => {
            println!("loom {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn options(global: &GlobalArgs) -> Options {
    Options {
        detach: global.detach,
        inside: global.inside,
        tmux_path: global.tmux_path.clone(),
    }
}

fn ensure_tmux<E: Executor>(launcher: &Launcher<E>) -> Result<()> {
    if !launcher.tmux().check_installed() {
        bail!(
            "tmux not found (looked for {:?}); install it or pass --tmux",
            launcher.tmux().bin()
        );
    }
    Ok(())
}

fn start<E: Executor>(
    launcher: &Launcher<E>,
    global: &GlobalArgs,
    args: ProjectArgs,
    cwd: &Path,
) -> Result<()> {
    ensure_tmux(launcher)?;
    let request = args.into_request()?;
    let path = find_project_file(request.project.as_deref(), global.file.as_deref(), cwd)?;
    let config = load_config(&path, &request.variables)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    println!("Starting {:?} session…", shorten_path(&path));
    info!(config = %path.display(), windows = ?request.windows, "starting");
    launcher
        .start(&config, &request.windows)
        .with_context(|| format!("Failed to start session {:?}", config.session))?;
    Ok(())
}

fn stop<E: Executor>(
    launcher: &Launcher<E>,
    global: &GlobalArgs,
    args: ProjectArgs,
    cwd: &Path,
) -> Result<()> {
    ensure_tmux(launcher)?;
    let request = args.into_request()?;
    let path = find_project_file(request.project.as_deref(), global.file.as_deref(), cwd)?;
    let config = load_config(&path, &request.variables)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    println!("Stopping {:?} session…", shorten_path(&path));
    launcher
        .stop(&config, &request.windows)
        .with_context(|| format!("Failed to stop session {:?}", config.session))?;
    Ok(())
}

fn print<E: Executor>(launcher: &Launcher<E>, session: Option<&str>) -> Result<()> {
    ensure_tmux(launcher)?;
    let config = launcher.generate_config(session)?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

fn list(global: &GlobalArgs, project: Option<&str>, cwd: &Path) -> Result<()> {
    if project.is_none() && global.file.is_none() {
        let dir = config_dir()?;
        let names = list_configs(&dir)
            .with_context(|| format!("Failed to list projects in {}", dir.display()))?;
        for name in names {
            let stem = Path::new(&name)
                .file_stem()
                .map_or(name.clone(), |stem| stem.to_string_lossy().into_owned());
            println!("{stem}");
        }
        return Ok(());
    }

    let path = find_project_file(project, global.file.as_deref(), cwd)?;
    let config = load_config(&path, &Default::default())
        .with_context(|| format!("Failed to load {}", path.display()))?;
    print!("{}", config_tree(&config).render());
    Ok(())
}

fn new(global: &GlobalArgs, project: Option<&str>, cwd: &Path) -> Result<()> {
    let path = project_file_for_edit(project, global.file.as_deref(), cwd)?;
    if path.exists() {
        bail!("{} already exists", shorten_path(&path));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let session = project.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("project")
    });
    fs::write(&path, project_template(session))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", shorten_path(&path));
    edit(&path)
}

fn project_template(session: &str) -> String {
    format!(
        "session: {session}\n\
         \n\
         before:\n  - echo starting {session}\n\
         \n\
         windows:\n  - name: code\n    commands:\n      - echo hello\n"
    )
}

fn switch<E: Executor>(launcher: &Launcher<E>, session: Option<&str>) -> Result<()> {
    ensure_tmux(launcher)?;
    if let Some(session) = session {
        launcher.switch_or_attach(session)?;
        return Ok(());
    }

    let sessions = launcher.tmux().list_sessions()?;
    if sessions.is_empty() {
        println!("No running sessions");
        return Ok(());
    }
    for session in sessions {
        let created = session
            .created
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let marker = if session.attached { "*" } else { " " };
        println!(
            "{marker} {:<24} {:>3} windows  {created}",
            session.name, session.windows
        );
    }
    Ok(())
}

fn edit(path: &Path) -> Result<()> {
    let editor = find_editor().context("No editor found; set $EDITOR")?;
    let mut words = editor.split_whitespace();
    let program = words.next().context("$EDITOR is empty")?;
    let command = ShellCommand::new(program)
        .args(words)
        .arg(path.display().to_string());
    debug!(%command, "opening editor");
    SystemExecutor.execute_silently(&command)?;
    Ok(())
}

fn find_editor() -> Option<String> {
    if let Ok(editor) = std::env::var("EDITOR") {
        if !editor.trim().is_empty() {
            return Some(editor);
        }
    }
    FALLBACK_EDITORS
        .iter()
        .find(|editor| on_path(editor))
        .map(ToString::to_string)
}

fn on_path(program: &str) -> bool {
    Process::new("which")
        .arg(program)
        .output()
        .is_ok_and(|output| output.status.success())
}
