//! End-to-End CLI Tests for argot-demo
//!
//! Drives the demo binary through routing, option parsing, binding and help.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command pointing to the demo binary, isolated from any user config
fn demo() -> Command {
    let mut cmd = cargo_bin_cmd!("argot-demo");
    cmd.env_remove("ARGOT_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Write a config file and point the binary at it
fn demo_with_config(temp: &TempDir, content: &str) -> Command {
    let path = temp.path().join("argot.toml");
    std::fs::write(&path, content).expect("write config");
    let mut cmd = demo();
    cmd.env("ARGOT_CONFIG", &path);
    cmd
}

// ============================================
// Help and Version
// ============================================

mod help_and_version {
    use super::*;

    #[test]
    fn no_arguments_lists_root() {
        demo()
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Usage: argot-demo <command> [options]\n",
            ))
            .stdout(predicate::str::contains("Groups:"))
            .stdout(predicate::str::contains("greet"))
            .stdout(predicate::str::contains("help"))
            .stdout(predicate::str::contains("-V, --verbose"));
    }

    #[test]
    fn shows_version() {
        for flag in ["--version", "-v", "version"] {
            demo()
                .arg(flag)
                .assert()
                .success()
                .stdout(format!("argot-demo {}\n", env!("CARGO_PKG_VERSION")));
        }
    }

    #[test]
    fn help_for_group() {
        demo()
            .args(["help", "db"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Usage: argot-demo db <command> [options]\n",
            ))
            .stdout(predicate::str::contains("migrate, m"))
            .stdout(predicate::str::contains("--dry-run"));
    }

    #[test]
    fn help_flag_inside_group() {
        demo()
            .args(["db", "-h"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: argot-demo db <command>"));
    }

    #[test]
    fn help_flag_after_command_shows_command_usage() {
        demo()
            .args(["db", "migrate", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Usage: argot-demo db migrate <direction> [<steps>] [options]\n",
            ))
            .stdout(predicate::str::contains("Parameters:"))
            .stdout(predicate::str::contains("How many migrations"));
    }

    #[test]
    fn unknown_command_suggests() {
        demo()
            .args(["db", "migrat"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains(
                "unknown command 'migrat'. Did you mean 'migrate'?",
            ))
            .stderr(predicate::str::contains("Usage: argot-demo db <command>"));
    }

    #[test]
    fn unknown_command_without_close_match() {
        demo()
            .args(["db", "unknown"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unknown command 'unknown'"))
            .stderr(predicate::str::contains("Did you mean").not());
    }
}

// ============================================
// Commands
// ============================================

mod commands {
    use super::*;

    #[test]
    fn greet_with_defaults() {
        demo()
            .args(["greet", "ada"])
            .assert()
            .success()
            .stdout("Hello, ada!\n");
    }

    #[test]
    fn greet_with_variadic_and_cascade() {
        demo()
            .args(["greet", "ada", "good", "morning", "-ln", "2"])
            .assert()
            .success()
            .stdout("GOOD MORNING, ADA!\nGOOD MORNING, ADA!\n");
    }

    #[test]
    fn migrate_by_shortcut_with_shared_option() {
        demo()
            .args(["db", "m", "up", "3", "--dry-run"])
            .assert()
            .success()
            .stdout("[dry-run] migrating up 3 step(s)\n");
    }

    #[test]
    fn handler_errors_exit_one() {
        demo()
            .args(["db", "migrate", "sideways"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "error: invalid direction 'sideways' (expected <up|down>)",
            ));
    }

    #[test]
    fn counter_from_root_reaches_nested_command() {
        demo()
            .args(["db", "status", "-VV"])
            .assert()
            .success()
            .stdout("database: ok\nverbosity: 2\n");
    }

    #[test]
    fn paint_with_choice_and_repeated_tag() {
        demo()
            .args(["paint", "wall", "--shape=circle", "-t", "a", "--tag", "b"])
            .assert()
            .success()
            .stdout("painting a plain circle on wall\ntag: a\ntag: b\n");
    }
}

// ============================================
// Input Errors
// ============================================

mod input_errors {
    use super::*;

    #[test]
    fn missing_argument_shows_usage() {
        demo()
            .arg("greet")
            .assert()
            .code(1)
            .stderr(predicate::str::starts_with(
                "error: expected at least 1 argument(s), got 0\n\nUsage: argot-demo greet",
            ));
    }

    #[test]
    fn unrecognized_option() {
        demo()
            .args(["greet", "ada", "--bogus"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unrecognized option '--bogus'"));
    }

    #[test]
    fn invalid_choice_value() {
        demo()
            .args(["paint", "wall", "-s", "hexagon"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("'hexagon'"))
            .stderr(predicate::str::contains("<circle|square|triangle>"));
    }

    #[test]
    fn option_group_violation() {
        demo()
            .args(["paint", "wall", "--fill", "--outline"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "at most one of --fill, --outline must be given",
            ));
    }

    #[test]
    fn missing_option_value() {
        demo()
            .args(["greet", "ada", "--times"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("requires a value"));
    }
}

// ============================================
// Configuration
// ============================================

mod configuration {
    use super::*;

    #[test]
    fn lenient_config_passes_unknown_options_through() {
        let temp = TempDir::new().expect("temp dir");
        demo_with_config(&temp, "fail_on_unrecognized = false\n")
            .args(["greet", "ada", "--bogus"])
            .assert()
            .success()
            .stdout("--bogus, ada!\n");
    }

    #[test]
    fn disabled_shortcuts_treat_flags_as_unknown() {
        let temp = TempDir::new().expect("temp dir");
        demo_with_config(&temp, "help_shortcuts = false\n")
            .arg("--version")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unknown command '--version'"));
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        demo_with_config(&temp, "this is not valid toml {{{{")
            .args(["greet", "ada"])
            .assert()
            .success()
            .stdout("Hello, ada!\n");
    }
}
