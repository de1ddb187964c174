use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// A batchren command running inside `dir`, isolated from the user's config
fn batchren(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("batchren").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config-home"))
        .env_remove("NO_COLOR")
        .env_remove("BATCHREN_YES")
        .env_remove("BATCHREN_LOG");
    cmd
}

fn setup(names: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in names {
        temp_dir.child(name).write_str(name).unwrap();
    }
    temp_dir
}

#[test]
fn test_help_command() {
    let temp_dir = setup(&[]);
    batchren(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename a batch of files"));
}

#[test]
fn test_version_subcommand() {
    let temp_dir = setup(&[]);
    batchren(&temp_dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("batchren 0.1.0"));
}

#[test]
fn test_version_subcommand_json() {
    let temp_dir = setup(&[]);
    batchren(&temp_dir)
        .args(["version", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"\{"name":"batchren","version":"0\.1\.0"\}"#).unwrap());
}

#[test]
fn test_plan_command_missing_args() {
    let temp_dir = setup(&[]);
    batchren(&temp_dir).arg("plan").assert().failure();
    batchren(&temp_dir).args(["plan", "prefix"]).assert().failure();
}

#[test]
fn test_list_command() {
    let temp_dir = setup(&["b.txt", "a.txt", ".hidden"]);
    temp_dir.child("subdir").create_dir_all().unwrap();

    batchren(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt"))
        .stdout(predicate::str::contains("2 file(s)"))
        .stdout(predicate::str::contains(".hidden").not())
        .stdout(predicate::str::contains("subdir").not());

    batchren(&temp_dir)
        .args(["list", "--hidden"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".hidden"));
}

#[test]
fn test_list_json() {
    let temp_dir = setup(&["a.txt"]);
    let output = batchren(&temp_dir)
        .args(["list", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "list");
    assert_eq!(value["files"][0]["name"], "a.txt");
    assert_eq!(value["total_size"], 5);
}

#[test]
fn test_plan_does_not_rename() {
    let temp_dir = setup(&["a.txt", "b.txt"]);

    batchren(&temp_dir)
        .args(["plan", "--preview", "summary", "prefix", "draft_"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. a.txt -> draft_a.txt"))
        .stdout(predicate::str::contains("  2. b.txt -> draft_b.txt"))
        .stdout(predicate::str::contains(
            "Files: 2, to rename: 2, unchanged: 0, conflicts: 0",
        ));

    temp_dir.child("a.txt").assert(predicate::path::exists());
    temp_dir.child("draft_a.txt").assert(predicate::path::missing());
}

#[test]
fn test_plan_table_preview() {
    let temp_dir = setup(&["a.txt"]);

    batchren(&temp_dir)
        .args(["plan", "--preview", "table", "suffix", "_final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current name"))
        .stdout(predicate::str::contains("a_final.txt"))
        .stdout(predicate::str::contains("TOTALS"));
}

#[test]
fn test_plan_json_output() {
    let temp_dir = setup(&["a.txt", "x_a.txt"]);
    let output = batchren(&temp_dir)
        .args(["plan", "--output", "json", "prefix", "x_", "a.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "plan");
    assert_eq!(value["executable"], false);
    assert_eq!(value["summary"]["conflicts"], 1);
    assert_eq!(value["plan"]["entries"][0]["status"], "conflict");
    assert_eq!(
        value["plan"]["entries"][0]["conflict"]["kind"],
        "exists_on_disk"
    );
}

#[test]
fn test_rename_with_yes() {
    let temp_dir = setup(&["a.txt", "b.txt"]);

    batchren(&temp_dir)
        .args(["--yes", "rename", "--preview", "none", "prefix", "draft_"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 2 file(s)"));

    temp_dir.child("draft_a.txt").assert("a.txt");
    temp_dir.child("draft_b.txt").assert("b.txt");
    temp_dir.child("a.txt").assert(predicate::path::missing());
}

#[test]
fn test_rename_confirmed_on_stdin() {
    let temp_dir = setup(&["a.txt"]);

    batchren(&temp_dir)
        .args(["rename", "--preview", "summary", "suffix", "_v2"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. a.txt -> a_v2.txt"))
        .stdout(predicate::str::contains("✓ Renamed 1 file(s)"))
        .stderr(predicate::str::contains("Apply these changes? [y/N]"));

    temp_dir.child("a_v2.txt").assert(predicate::path::exists());
}

#[test]
fn test_rename_declined() {
    let temp_dir = setup(&["a.txt"]);

    batchren(&temp_dir)
        .args(["rename", "suffix", "_v2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));

    temp_dir.child("a.txt").assert(predicate::path::exists());
    temp_dir.child("a_v2.txt").assert(predicate::path::missing());
}

#[test]
fn test_rename_dry_run() {
    let temp_dir = setup(&["xa.txt", "yb.txt"]);

    batchren(&temp_dir)
        .args(["rename", "--dry-run", "--preview", "summary", "remove-start", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. xa.txt -> a.txt"))
        .stdout(predicate::str::contains("Dry run: 2 file(s) would be renamed"));

    temp_dir.child("xa.txt").assert(predicate::path::exists());
    temp_dir.child("a.txt").assert(predicate::path::missing());
}

#[test]
fn test_rename_dry_run_reports_conflicts() {
    let temp_dir = setup(&["a.txt", "b.txt"]);

    batchren(&temp_dir)
        .args(["rename", "--dry-run", "--preview", "none", "remove-start", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: 0 file(s) would be renamed"))
        .stdout(predicate::str::contains("2 file(s) have conflicts"));
}

#[test]
fn test_rename_conflict_exits_with_1() {
    let temp_dir = setup(&["a.txt", "b.txt", "a_old.txt"]);

    batchren(&temp_dir)
        .args(["--yes", "rename", "suffix", "_old", "a.txt", "b.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 conflict(s)"));

    temp_dir.child("b.txt").assert(predicate::path::exists());
    temp_dir.child("b_old.txt").assert(predicate::path::missing());
}

#[test]
fn test_rename_skip_conflicts() {
    let temp_dir = setup(&["a.txt", "b.txt", "a_old.txt"]);

    batchren(&temp_dir)
        .args([
            "--yes",
            "rename",
            "--skip-conflicts",
            "suffix",
            "_old",
            "a.txt",
            "b.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 1 file(s)"))
        .stdout(predicate::str::contains("Skipped 1 conflicting file(s)"));

    temp_dir.child("a.txt").assert("a.txt");
    temp_dir.child("a_old.txt").assert("a_old.txt");
    temp_dir.child("b_old.txt").assert("b.txt");
}

#[test]
fn test_rename_skip_conflicts_reports_rejected_numbering() {
    // 1 + "0_x" and 10 + "_x" both give "10_x"
    let mut names: Vec<String> = vec!["0_x".to_string()];
    names.extend((1..=8).map(|i| format!("m{i}")));
    names.push("_x".to_string());
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let temp_dir = setup(&refs);

    batchren(&temp_dir)
        .args([
            "--yes",
            "rename",
            "--skip-conflicts",
            "number",
            "--width",
            "1",
            "--separator",
            "",
        ])
        .args(&names)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to rename."))
        .stdout(predicate::str::contains("Skipped 10 conflicting file(s)"));

    temp_dir.child("0_x").assert("0_x");
    temp_dir.child("_x").assert("_x");
}

#[test]
fn test_number_in_given_order() {
    let temp_dir = setup(&["intro.mp3", "middle.mp3", "outro.mp3"]);

    batchren(&temp_dir)
        .args([
            "--yes",
            "rename",
            "number",
            "--width",
            "3",
            "--separator",
            " - ",
            "outro.mp3",
            "intro.mp3",
        ])
        .assert()
        .success();

    temp_dir.child("001 - outro.mp3").assert("outro.mp3");
    temp_dir.child("002 - intro.mp3").assert("intro.mp3");
    temp_dir.child("middle.mp3").assert(predicate::path::exists());
}

#[test]
fn test_replace_ignore_case_with_glob() {
    let temp_dir = setup(&["IMG_1.JPG", "img_2.jpg", "img_3.png"]);

    batchren(&temp_dir)
        .args([
            "--yes", "rename", "replace", "--ignore-case", "img", "photo", "--glob", "*.jpg",
            "--glob", "*.JPG",
        ])
        .assert()
        .success();

    temp_dir.child("photo_1.JPG").assert(predicate::path::exists());
    temp_dir.child("photo_2.jpg").assert(predicate::path::exists());
    temp_dir.child("img_3.png").assert(predicate::path::exists());
}

#[test]
fn test_invalid_input_exits_with_2() {
    let temp_dir = setup(&["a.txt"]);

    batchren(&temp_dir)
        .args(["plan", "prefix", ""])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("prefix must not be empty"));

    batchren(&temp_dir)
        .args(["plan", "number", "--width", "7"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("number width must be between 1 and 4"));

    batchren(&temp_dir)
        .args(["plan", "prefix", "x", "missing.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found in directory: missing.txt"));

    batchren(&temp_dir)
        .args(["plan", "remove-end", "--count", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("count must be at least 1"));
}

#[test]
fn test_directory_flag() {
    let temp_dir = setup(&[]);
    let photos = temp_dir.child("photos");
    photos.create_dir_all().unwrap();
    photos.child("a.jpg").write_str("a").unwrap();

    batchren(&temp_dir)
        .args(["-C", "photos", "--yes", "rename", "prefix", "trip_"])
        .assert()
        .success();

    photos.child("trip_a.jpg").assert(predicate::path::exists());
}

#[test]
fn test_config_defaults_are_used() {
    let temp_dir = setup(&["abcdef.txt"]);
    temp_dir
        .child(".batchren/config.toml")
        .write_str("[remove]\ncount = 2\n\n[defaults]\npreview_format = \"summary\"\n")
        .unwrap();

    batchren(&temp_dir)
        .args(["plan", "remove-start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. abcdef.txt -> cdef.txt"));
}

#[test]
fn test_log_file_option() {
    let temp_dir = setup(&["a.txt"]);

    batchren(&temp_dir)
        .args(["--yes", "rename", "--log-file", "renames.log", "prefix", "z_"])
        .assert()
        .success();

    temp_dir
        .child("renames.log")
        .assert(predicate::str::contains("Renamed a.txt -> z_a.txt"));
}

#[test]
fn test_completions_to_stdout() {
    let temp_dir = setup(&[]);
    batchren(&temp_dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("batchren"));
}
