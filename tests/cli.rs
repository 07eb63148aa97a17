use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn fake_hex() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fake_hex"));
    command.env_remove("HEXDECK_LOG").stdin(Stdio::null());
    command
}

#[test]
fn builtin_dump_prints_every_row_then_exits_cleanly() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let len = std::fs::metadata(&input).unwrap().len() as usize;
    let output = fake_hex()
        .args(["--no-config", "--builtin", "--frame-ms", "0"])
        .arg(&input)
        .arg("demo")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows = stdout.matches('\n').count();
    assert_eq!(rows, len.div_ceil(16));
    assert!(stdout.starts_with("\r00000000: 5b70 6163 6b61 6765 5d0a"));
    // Not a terminal, so every status line is padded to the 80-column fallback.
    let status = stdout.rsplit('\r').next().unwrap();
    assert!(status.contains("demo"));
    assert_eq!(unicode_columns(status), 80);
}

#[test]
fn hyphenated_track_name_plays() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let output = fake_hex()
        .args(["--no-config", "--builtin", "--frame-ms", "0"])
        .arg(&input)
        .arg("-Remix")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.rsplit('\r').next().unwrap().contains("-Remix"));
}

#[cfg(unix)]
#[test]
fn external_producer_rows_are_rendered_in_order() {
    let dir = scratch_dir("external-producer");
    let track = dir.join("track.txt");
    std::fs::write(&track, "one\ntwo\nthree\n").unwrap();
    let config = dir.join("hexdeck.toml");
    std::fs::write(
        &config,
        "[renderer]\nproducer = \"external\"\ndump_cmd = \"cat\"\nframe_ms = 0\nstatus = \"> {name}\"\n",
    )
    .unwrap();

    let output = fake_hex()
        .arg("--config")
        .arg(&config)
        .arg(&track)
        .arg("t")
        .output()
        .unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let status = format!("\r> t{}", " ".repeat(77));
    let rows: Vec<&str> = stdout.split('\n').collect();
    assert_eq!(
        rows,
        vec![
            "\rone".to_string(),
            format!("{status}\rtwo"),
            format!("{status}\rthree"),
            status.clone(),
        ]
    );
}

#[test]
fn missing_file_is_fatal_with_no_output() {
    let output = fake_hex()
        .args(["--no-config", "/nonexistent/hexdeck/track.m4s", "demo"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No such file or directory"), "{stderr}");
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let output = fake_hex().arg("only-one").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let output = fake_hex().args(["a", "b", "c"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn watchdog_fails_when_ui_cannot_start() {
    let dir = std::env::temp_dir();
    let output = Command::new(env!("CARGO_BIN_EXE_watchdog"))
        .arg("--no-config")
        .current_dir(&dir)
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to spawn cmd/tui/mytui"), "{stderr}");
}

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hexdeck-{}-{}", label, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn unicode_columns(text: &str) -> usize {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(text)
}
