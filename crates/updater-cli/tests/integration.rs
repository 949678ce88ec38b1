use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const FAST_DELAYS: &str = r#"
[delays]
read_input = 5
connect = 5
transfer = 5
write_output = 5
"#;

fn updater_at(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("updater");
    cmd.current_dir(dir)
        .env_remove("MY_APP_USER")
        .env_remove("MY_APP_PASSWORD");
    cmd
}

fn fast_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("updater.toml"), FAST_DELAYS).unwrap();
    dir
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn missing_arguments_exit_1() {
    let dir = fast_project();
    updater_at(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "You must specify both an input and output file",
        ))
        .stderr(predicate::str::contains("--input"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_output_exit_1() {
    let dir = fast_project();
    updater_at(dir.path())
        .args(["--input", "in.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("both an input and output"));
}

#[test]
fn empty_input_or_output_exit_1() {
    let dir = fast_project();
    for args in [["-i", "", "-o", "out.csv"], ["-i", "in.csv", "-o", ""]] {
        updater_at(dir.path())
            .args(args)
            .env("MY_APP_USER", "u")
            .env("MY_APP_PASSWORD", "p")
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "You must specify both an input and output file",
            ))
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn version_flag() {
    let dir = fast_project();
    updater_at(dir.path())
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("updater 0.1.0"));
}

#[test]
fn help_flag_lists_options() {
    let dir = fast_project();
    updater_at(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn full_run_prints_steps_in_order() {
    let dir = fast_project();
    let output = updater_at(dir.path())
        .args(["-i", "in.csv", "-o", "out.csv", "--no-progress"])
        .env("MY_APP_USER", "alice")
        .env("MY_APP_PASSWORD", "s3cret")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "unexpected output: {stdout}");
    assert!(lines[0].starts_with("Reading input file [in.csv]  ("));
    assert!(lines[1].starts_with("Connecting with user [alice]  ("));
    assert!(lines[2].starts_with("Reading data from external system  ("));
    assert!(lines[3].starts_with("Writing output file [out.csv]  ("));
    assert!(lines[..4].iter().all(|l| l.ends_with("s).")));
    assert_eq!(lines[4], "Done!");
    assert!(!stdout.contains("s3cret"));
}

#[test]
fn missing_credentials_are_read_from_stdin_without_terminal() {
    let dir = fast_project();
    updater_at(dir.path())
        .args(["-i", "in.csv", "-o", "out.csv"])
        .write_stdin("bob\nhunter2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Connecting with user [bob]  ("))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn empty_stdin_gives_empty_user() {
    let dir = fast_project();
    updater_at(dir.path())
        .args(["-i", "in.csv", "-o", "out.csv"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Connecting with user []  ("));
}

#[test]
fn dotenv_file_supplies_credentials() {
    let dir = fast_project();
    std::fs::write(
        dir.path().join(".env"),
        "MY_APP_USER=erin\nMY_APP_PASSWORD=pw\n",
    )
    .unwrap();
    updater_at(dir.path())
        .args(["-i", "in.csv", "-o", "out.csv", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connecting with user [erin]"))
        .stderr(predicate::str::contains("[env] loaded"))
        .stderr(predicate::str::contains(
            "user from environment, password from environment",
        ));
}

#[test]
fn process_env_wins_over_dotenv() {
    let dir = fast_project();
    std::fs::write(dir.path().join(".env"), "MY_APP_USER=erin\n").unwrap();
    updater_at(dir.path())
        .args(["-i", "in.csv", "-o", "out.csv"])
        .env("MY_APP_USER", "frank")
        .env("MY_APP_PASSWORD", "pw")
        .assert()
        .success()
        .stdout(predicate::str::contains("Connecting with user [frank]"));
}

#[test]
fn custom_env_names_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("updater.toml"),
        format!("{FAST_DELAYS}\n[credentials]\nuser_env = \"SYNC_USER\"\npassword_env = \"SYNC_PASSWORD\"\n"),
    )
    .unwrap();
    updater_at(dir.path())
        .args(["-i", "a", "-o", "b"])
        .env("SYNC_USER", "gina")
        .env("SYNC_PASSWORD", "pw")
        .assert()
        .success()
        .stdout(predicate::str::contains("Connecting with user [gina]"));
}

#[test]
fn explicit_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fast.toml");
    std::fs::write(&config, FAST_DELAYS).unwrap();
    updater_at(dir.path())
        .args(["-i", "a", "-o", "b", "--verbose", "--config"])
        .arg(&config)
        .env("MY_APP_USER", "u")
        .env("MY_APP_PASSWORD", "p")
        .assert()
        .success()
        .stderr(predicate::str::contains("fast.toml"))
        .stdout(predicate::str::ends_with("Done!\n"));
}

#[test]
fn missing_explicit_config_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    updater_at(dir.path())
        .args(["-i", "a", "-o", "b", "--config", "missing.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn invalid_config_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("updater.toml"), "[delays]\nconnect = 0\n").unwrap();
    updater_at(dir.path())
        .args(["-i", "a", "-o", "b"])
        .env("MY_APP_USER", "u")
        .env("MY_APP_PASSWORD", "p")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("delays.connect"));
}

#[test]
fn verbose_reports_pipeline_shape() {
    let dir = fast_project();
    updater_at(dir.path())
        .args(["-i", "a", "-o", "b", "--verbose"])
        .env("MY_APP_USER", "u")
        .env("MY_APP_PASSWORD", "p")
        .assert()
        .success()
        .stderr(predicate::str::contains("[pipeline] 4 steps"))
        .stderr(predicate::str::contains("spinners off"));
}

#[test]
fn spinner_color_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("updater.toml"),
        format!("color = \"cyan\"\n{FAST_DELAYS}"),
    )
    .unwrap();
    updater_at(dir.path())
        .args(["-i", "a", "-o", "b"])
        .env("MY_APP_USER", "u")
        .env("MY_APP_PASSWORD", "p")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Done!\n"));
}

#[test]
fn unknown_spinner_color_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("updater.toml"), "color = \"purple\"\n").unwrap();
    updater_at(dir.path())
        .args(["-i", "a", "-o", "b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse updater.toml"));
}
