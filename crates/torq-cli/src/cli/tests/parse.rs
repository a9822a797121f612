//! Per-subcommand parse tests.

use super::parse;
use crate::cli::commands::LabelAction;
use crate::cli::CliCommand;

#[test]
fn cli_parse_add() {
    match parse(&["torq", "add", "magnet:?xt=urn:btih:abc"]) {
        CliCommand::Add { magnet } => assert_eq!(magnet, "magnet:?xt=urn:btih:abc"),
        other => panic!("expected Add, got {other:?}"),
    }
}

#[test]
fn cli_parse_run_defaults() {
    match parse(&["torq", "run"]) {
        CliCommand::Run { max_active } => assert!(max_active.is_none()),
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn cli_parse_run_max_active() {
    match parse(&["torq", "run", "--max-active", "3"]) {
        CliCommand::Run { max_active } => assert_eq!(max_active, Some(3)),
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn cli_parse_status() {
    assert!(matches!(parse(&["torq", "status"]), CliCommand::Status));
}

#[test]
fn cli_parse_stop_and_force() {
    match parse(&["torq", "stop", "cafebabe"]) {
        CliCommand::Stop { hash } => assert_eq!(hash, "cafebabe"),
        other => panic!("expected Stop, got {other:?}"),
    }
    match parse(&["torq", "force", "cafebabe"]) {
        CliCommand::Force { hash } => assert_eq!(hash, "cafebabe"),
        other => panic!("expected Force, got {other:?}"),
    }
}

#[test]
fn cli_parse_remove() {
    match parse(&["torq", "remove", "cafebabe"]) {
        CliCommand::Remove { hash, with_data } => {
            assert_eq!(hash, "cafebabe");
            assert!(!with_data);
        }
        other => panic!("expected Remove, got {other:?}"),
    }
    match parse(&["torq", "remove", "cafebabe", "--with-data"]) {
        CliCommand::Remove { with_data, .. } => assert!(with_data),
        other => panic!("expected Remove, got {other:?}"),
    }
}

#[test]
fn cli_parse_label_update() {
    match parse(&[
        "torq", "label", "update", "linux", "--color", "#cc0000", "--move-to", "/srv/iso",
    ]) {
        CliCommand::Label {
            action:
                LabelAction::Update {
                    name,
                    id,
                    color,
                    move_to,
                },
        } => {
            assert_eq!(name, "linux");
            assert!(id.is_none());
            assert_eq!(color.as_deref(), Some("#cc0000"));
            assert_eq!(move_to.as_deref(), Some("/srv/iso"));
        }
        other => panic!("expected Label Update, got {other:?}"),
    }
}

#[test]
fn cli_parse_label_set_and_clear() {
    match parse(&["torq", "label", "set", "cafebabe", "--label", "l1"]) {
        CliCommand::Label {
            action: LabelAction::Set { hash, label },
        } => {
            assert_eq!(hash, "cafebabe");
            assert_eq!(label.as_deref(), Some("l1"));
        }
        other => panic!("expected Label Set, got {other:?}"),
    }
    match parse(&["torq", "label", "set", "cafebabe"]) {
        CliCommand::Label {
            action: LabelAction::Set { label, .. },
        } => assert!(label.is_none()),
        other => panic!("expected Label Set, got {other:?}"),
    }
}

#[test]
fn cli_parse_label_delete_and_list() {
    match parse(&["torq", "label", "delete", "l1"]) {
        CliCommand::Label {
            action: LabelAction::Delete { id },
        } => assert_eq!(id, "l1"),
        other => panic!("expected Label Delete, got {other:?}"),
    }
    assert!(matches!(
        parse(&["torq", "label", "list"]),
        CliCommand::Label {
            action: LabelAction::List
        }
    ));
}
