// ABOUTME: Tests for the start pass against a recording executor
// Verifies the exact tmux command sequence produced for common session layouts

mod common;

use common::{home, RecordingExecutor};
use loom::config::{Config, Pane, Window};
use loom::tmux::WindowInfo;
use loom::tmux::TmuxRecord;
use loom::{LaunchError, Launcher, Options, TmuxClient};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn launcher(
    executor: &RecordingExecutor,
    options: Options,
    in_session: bool,
) -> Launcher<&RecordingExecutor> {
    Launcher::with_client(TmuxClient::new("tmux", executor), options, in_session)
}

fn detached() -> Options {
    Options {
        detach: true,
        ..Options::default()
    }
}

fn session(name: &str, path: &str, windows: Vec<Window>) -> Config {
    Config {
        session: name.into(),
        path: path.into(),
        windows,
        command_delay: 0,
        ..Config::default()
    }
}

fn named(name: &str) -> Window {
    Window {
        name: name.into(),
        ..Window::default()
    }
}

#[test]
fn test_start_single_window_with_before_hooks() {
    let executor = RecordingExecutor::with_outputs(&["ses", "win1"]);
    let mut config = session(
        "ses",
        "~/root",
        vec![Window {
            name: "win1".into(),
            commands: vec!["command1".into()],
            ..Window::default()
        }],
    );
    config.before = vec!["command1".into(), "command2".into()];

    launcher(&executor, Options::default(), false)
        .start(&config, &[])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:".to_string(),
            "/bin/sh -c command1".to_string(),
            "/bin/sh -c command2".to_string(),
            format!("tmux new-session -Pd -F #{{session_id}} -s ses -n win1 -c {}/root", home()),
            "tmux send-keys -t ses:win1 -l command1".to_string(),
            "tmux send-keys -t ses:win1 Enter".to_string(),
            "tmux attach -d -t ses".to_string(),
        ]
    );

    let hooks: Vec<_> = executor
        .invocations()
        .into_iter()
        .filter(|cmd| cmd.program == "/bin/sh")
        .collect();
    assert_eq!(hooks.len(), 2);
    for hook in hooks {
        assert_eq!(hook.dir, Some(std::path::PathBuf::from(format!("{}/root", home()))));
    }
}

#[test]
fn test_start_detached_does_not_attach() {
    let executor = RecordingExecutor::with_outputs(&["xyz"]);
    let config = session("ses", "/root", vec![named("win1")]);

    launcher(&executor, detached(), false).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:",
            "tmux new-session -Pd -F #{session_id} -s ses -n win1 -c /root",
        ]
    );
}

#[test]
fn test_start_end_to_end_split_and_layout() {
    let executor = RecordingExecutor::with_outputs(&["ses", "win1", "1"]);
    let config = session(
        "ses",
        "/tmp",
        vec![
            Window {
                name: "win1".into(),
                layout: "main-horizontal".into(),
                panes: vec![Pane {
                    split: "horizontal".into(),
                    commands: vec!["command1".into()],
                    ..Pane::default()
                }],
                ..Window::default()
            },
            Window {
                name: "win2".into(),
                manual: true,
                layout: "tiled".into(),
                ..Window::default()
            },
        ],
    );

    launcher(&executor, Options::default(), false)
        .start(&config, &[])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:",
            "tmux new-session -Pd -F #{session_id} -s ses -n win1 -c /tmp",
            "tmux split-window -Pd -t ses:win1 -h -c /tmp -F #{pane_id}",
            "tmux send-keys -t ses:win1.1 -l command1",
            "tmux send-keys -t ses:win1.1 Enter",
            "tmux select-layout -t ses:win1 main-horizontal",
            "tmux attach -d -t ses",
        ]
    );
}

#[test]
fn test_start_requested_manual_window() {
    let executor = RecordingExecutor::with_outputs(&["xyz"]);
    let config = session(
        "ses",
        "/tmp",
        vec![
            named("win1"),
            Window {
                name: "win2".into(),
                manual: true,
                ..Window::default()
            },
        ],
    );

    launcher(&executor, Options::default(), false)
        .start(&config, &["win2".to_string()])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:",
            "tmux new-session -Pd -F #{session_id} -s ses -n win1 -c /tmp",
            "tmux new-window -Pd -t ses: -n win2 -F #{window_id} -c /tmp",
            "tmux attach -d -t ses",
        ]
    );
}

#[test]
fn test_start_adds_requested_window_to_running_session() {
    let executor = RecordingExecutor::with_outputs(&["", "@5"]);
    let config = session("ses", "/tmp", vec![named("win1"), named("win2")]);

    launcher(&executor, detached(), false)
        .start(&config, &["win1".to_string()])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:",
            "tmux new-window -Pd -t ses: -n win1 -F #{window_id} -c /tmp",
        ]
    );
}

#[test]
fn test_start_existing_session_only_attaches() {
    let executor = RecordingExecutor::with_outputs(&[""]);
    let config = session("ses", "/tmp", vec![named("win1")]);

    launcher(&executor, Options::default(), false)
        .start(&config, &[])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec!["tmux has-session -t ses:", "tmux attach -d -t ses"]
    );
}

#[test]
fn test_start_twice_is_idempotent() {
    let executor = RecordingExecutor::with_outputs(&["absent", ""]);
    let mut config = session("ses", "/tmp", vec![named("win1")]);
    config.env = BTreeMap::from([("KEY".to_string(), "value".to_string())]);
    let launcher = launcher(&executor, detached(), false);

    launcher.start(&config, &[]).unwrap();
    let first_run = executor.commands().len();
    launcher.start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands()[first_run..].to_vec(),
        vec!["tmux has-session -t ses:".to_string()]
    );
}

#[test]
fn test_start_from_another_session_switches_client() {
    let executor = RecordingExecutor::with_outputs(&["xyz"]);
    let config = session("ses", "/tmp", Vec::new());

    launcher(&executor, Options::default(), true)
        .start(&config, &[])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:",
            "tmux new-session -Pd -F #{session_id} -s ses -c /tmp",
            "tmux switch-client -t ses",
        ]
    );
}

#[test]
fn test_start_existing_session_from_another_session_switches_client() {
    let executor = RecordingExecutor::with_outputs(&[""]);
    let config = session("ses", "/tmp", vec![named("win1")]);

    launcher(&executor, Options::default(), true)
        .start(&config, &[])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec!["tmux has-session -t ses:", "tmux switch-client -t ses"]
    );
}

#[test]
fn test_start_inside_current_session_creates_windows() {
    let executor = RecordingExecutor::with_outputs(&["current", "", "@9"]);
    let config = session("ses", "/tmp", vec![named("win1")]);
    let options = Options {
        inside: true,
        ..Options::default()
    };

    launcher(&executor, options, true).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux display-message -p #S",
            "tmux has-session -t current:",
            "tmux new-window -Pd -t current: -n win1 -F #{window_id} -c /tmp",
        ]
    );
}

#[test]
fn test_start_inside_requires_tmux() {
    let executor = RecordingExecutor::new();
    let config = session("ses", "/tmp", vec![named("win1")]);
    let options = Options {
        inside: true,
        ..Options::default()
    };

    let err = launcher(&executor, options, false)
        .start(&config, &[])
        .unwrap_err();

    assert!(matches!(err, LaunchError::NotInsideSession));
    assert!(executor.commands().is_empty());
}

#[test]
fn test_start_requires_session_name() {
    let executor = RecordingExecutor::new();
    let config = session("", "/tmp", vec![named("win1")]);

    let err = launcher(&executor, detached(), false)
        .start(&config, &[])
        .unwrap_err();

    assert!(matches!(err, LaunchError::NoSessionName));
    assert!(executor.commands().is_empty());
}

#[test]
fn test_start_unnamed_first_window_adopts_session_window() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1", "@7§§tiled§/tmp"]);
    let config = session(
        "ses",
        "/tmp",
        vec![Window {
            commands: vec!["ls".into()],
            ..Window::default()
        }],
    );

    launcher(&executor, detached(), false).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:".to_string(),
            "tmux new-session -Pd -F #{session_id} -s ses -c /tmp".to_string(),
            format!("tmux list-windows -t ses: -F {}", WindowInfo::format()),
            "tmux send-keys -t ses:@7 -l ls".to_string(),
            "tmux send-keys -t ses:@7 Enter".to_string(),
        ]
    );
}

#[test]
fn test_start_fails_when_new_session_has_no_windows() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1", ""]);
    let config = session("ses", "/tmp", vec![Window::default()]);

    let err = launcher(&executor, detached(), false)
        .start(&config, &[])
        .unwrap_err();

    assert!(matches!(err, LaunchError::NoWindowsFound(ref name) if name == "ses"));
}

#[test]
fn test_start_applies_environment_in_key_order() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1"]);
    let mut config = session("ses", "/tmp", Vec::new());
    config.env = BTreeMap::from([
        ("ZED".to_string(), "2".to_string()),
        ("ALPHA".to_string(), "1".to_string()),
    ]);

    launcher(&executor, detached(), false).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:",
            "tmux new-session -Pd -F #{session_id} -s ses -c /tmp",
            "tmux setenv -t ses ALPHA 1",
            "tmux setenv -t ses ZED 2",
        ]
    );
}

#[test]
fn test_start_merges_commands_and_suppresses_history() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1"]);
    let mut config = session(
        "ses",
        "/tmp",
        vec![Window {
            name: "win1".into(),
            commands: vec!["first".into()],
            cmd: "last".into(),
            ..Window::default()
        }],
    );
    config.suppress_history = true;

    launcher(&executor, detached(), false).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands()[2..].to_vec(),
        vec![
            "tmux send-keys -t ses:win1 -l  first",
            "tmux send-keys -t ses:win1 Enter",
            "tmux send-keys -t ses:win1 -l  last",
            "tmux send-keys -t ses:win1 Enter",
        ]
    );
}

#[test]
fn test_start_continues_after_failed_send() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1"])
        .failing_on("tmux send-keys -t ses:win1 -l boom");
    let config = session(
        "ses",
        "/tmp",
        vec![Window {
            name: "win1".into(),
            commands: vec!["boom".into(), "fine".into()],
            layout: "tiled".into(),
            ..Window::default()
        }],
    );

    launcher(&executor, detached(), false).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands()[2..].to_vec(),
        vec![
            "tmux send-keys -t ses:win1 -l boom",
            "tmux send-keys -t ses:win1 Enter",
            "tmux send-keys -t ses:win1 -l fine",
            "tmux send-keys -t ses:win1 Enter",
            "tmux select-layout -t ses:win1 tiled",
        ]
    );
}

#[test]
fn test_start_aborts_on_failed_before_hook() {
    let executor = RecordingExecutor::with_outputs(&["absent"]).failing_on("/bin/sh -c false");
    let mut config = session("ses", "/tmp", vec![named("win1")]);
    config.before = vec!["false".into(), "never".into()];

    let err = launcher(&executor, Options::default(), false)
        .start(&config, &[])
        .unwrap_err();

    assert!(matches!(err, LaunchError::Shell(_)));
    assert_eq!(
        executor.commands(),
        vec!["tmux has-session -t ses:", "/bin/sh -c false"]
    );
}

#[test]
fn test_start_nested_sessions_before_parent() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1"]);
    let mut config = session("top", "/tmp", Vec::new());
    config.sessions = vec![
        session("child1", "/srv/one", Vec::new()),
        session("child2", "/srv/two", Vec::new()),
    ];

    launcher(&executor, Options::default(), false)
        .start(&config, &[])
        .unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t child1:",
            "tmux new-session -Pd -F #{session_id} -s child1 -c /srv/one",
            "tmux has-session -t child2:",
            "tmux new-session -Pd -F #{session_id} -s child2 -c /srv/two",
            "tmux has-session -t top:",
            "tmux new-session -Pd -F #{session_id} -s top -c /tmp",
            "tmux attach -d -t top",
        ]
    );
}

#[test]
fn test_start_resolves_window_and_pane_directories() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1", "@2", "%3"]);
    let cwd = std::env::current_dir().unwrap().display().to_string();
    let config = session(
        "ses",
        "/srv",
        vec![
            named("first"),
            Window {
                name: "logs".into(),
                path: "logs".into(),
                panes: vec![
                    Pane::default(),
                    Pane {
                        path: "/var/log".into(),
                        ..Pane::default()
                    },
                    Pane {
                        path: "./".into(),
                        split: "h".into(),
                        ..Pane::default()
                    },
                ],
                ..Window::default()
            },
            Window {
                name: "here".into(),
                path: ".".into(),
                ..Window::default()
            },
        ],
    );

    launcher(&executor, detached(), false).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "tmux has-session -t ses:".to_string(),
            "tmux new-session -Pd -F #{session_id} -s ses -n first -c /srv".to_string(),
            "tmux new-window -Pd -t ses: -n logs -F #{window_id} -c /srv/logs".to_string(),
            "tmux split-window -Pd -t ses:@2 -v -c /srv/logs -F #{pane_id}".to_string(),
            "tmux split-window -Pd -t ses:@2 -v -c /var/log -F #{pane_id}".to_string(),
            format!("tmux split-window -Pd -t ses:@2 -h -c {cwd} -F #{{pane_id}}"),
            format!("tmux new-window -Pd -t ses: -n here -F #{{window_id}} -c {cwd}"),
        ]
    );
}

#[test]
fn test_start_focuses_window_and_pane() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1", "%4"]);
    let config = session(
        "ses",
        "/tmp",
        vec![Window {
            name: "win1".into(),
            focus: true,
            panes: vec![Pane {
                focus: true,
                cmd: "htop".into(),
                ..Pane::default()
            }],
            ..Window::default()
        }],
    );

    launcher(&executor, detached(), false).start(&config, &[]).unwrap();

    assert_eq!(
        executor.commands()[2..].to_vec(),
        vec![
            "tmux select-window -t ses:win1",
            "tmux split-window -Pd -t ses:win1 -v -c /tmp -F #{pane_id}",
            "tmux send-keys -t ses:win1.%4 -l htop",
            "tmux send-keys -t ses:win1.%4 Enter",
            "tmux select-pane -t ses:win1.%4",
        ]
    );
}

#[test]
fn test_command_delay_precedes_each_send() {
    let executor = RecordingExecutor::with_outputs(&["absent", "$1"]);
    let mut config = session(
        "ses",
        "/tmp",
        vec![Window {
            name: "win1".into(),
            commands: vec!["one".into(), "two".into(), "three".into()],
            ..Window::default()
        }],
    );
    config.command_delay = 30;

    let started = std::time::Instant::now();
    launcher(&executor, detached(), false)
        .start(&config, &[])
        .unwrap();
    let elapsed = started.elapsed();

    assert!(
        elapsed >= std::time::Duration::from_millis(90),
        "three sends with a 30ms delay finished in {elapsed:?}"
    );
    let sent: Vec<String> = executor
        .commands()
        .into_iter()
        .filter(|cmd| cmd.contains(" -l "))
        .collect();
    assert_eq!(
        sent,
        vec![
            "tmux send-keys -t ses:win1 -l one",
            "tmux send-keys -t ses:win1 -l two",
            "tmux send-keys -t ses:win1 -l three",
        ]
    );
}
