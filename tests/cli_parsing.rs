use appconf::cli::{Cli, Commands, KindArg};
use appconf::domain::models::EntryKind;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_check() {
    let cli = Cli::try_parse_from(vec!["appconf", "check", "config.yaml"]).unwrap();

    match cli.command {
        Commands::Check { path } => assert_eq!(path, PathBuf::from("config.yaml")),
        _ => panic!("Wrong command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(vec![
        "appconf",
        "hash",
        "config.yaml",
        "--json",
        "--settings",
        "appconf.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.settings, Some(PathBuf::from("appconf.yaml")));
    assert!(matches!(cli.command, Commands::Hash { .. }));
}

#[test]
fn test_parse_show() {
    let cli =
        Cli::try_parse_from(vec!["appconf", "show", "config.yaml", "crawler", "news"]).unwrap();

    match cli.command {
        Commands::Show { kind, name, .. } => {
            assert_eq!(kind, KindArg::Crawler);
            assert_eq!(EntryKind::from(kind), EntryKind::Crawler);
            assert_eq!(name, "news");
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_show_rejects_unknown_kind() {
    assert!(Cli::try_parse_from(vec!["appconf", "show", "config.yaml", "queue", "x"]).is_err());
}

#[test]
fn test_parse_requires_path() {
    assert!(Cli::try_parse_from(vec!["appconf", "check"]).is_err());
}
