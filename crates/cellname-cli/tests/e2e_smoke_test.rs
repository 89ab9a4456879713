use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tempfile::tempdir;

use cellname_cli::{Args, Outcome, run};

/// Fixture directory of this crate
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .svg files from a directory
fn collect_svg_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("svg")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: Option<&Path>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.map(|path| path.to_string_lossy().to_string()),
        config: None,
        dry_run: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_fixtures = collect_svg_files(fixtures_path());
    assert!(
        !valid_fixtures.is_empty(),
        "No valid fixtures found in tests/fixtures/"
    );

    let mut failed_fixtures = Vec::new();

    for fixture_path in &valid_fixtures {
        let output_path = temp_dir.path().join(fixture_path.file_name().unwrap());
        let args = args_for(fixture_path, Some(&output_path));

        match run(&args) {
            Ok(Outcome::Written(path)) => assert_eq!(path, output_path),
            Ok(other) => panic!("Unexpected outcome: {other:?}"),
            Err(e) => failed_fixtures.push((fixture_path.clone(), e)),
        }
    }

    if !failed_fixtures.is_empty() {
        eprintln!("\nValid fixtures that failed:");
        for (path, err) in &failed_fixtures {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} valid fixture(s) failed unexpectedly",
            failed_fixtures.len()
        );
    }
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_fixtures = collect_svg_files(fixtures_path().join("errors"));
    assert!(
        !error_fixtures.is_empty(),
        "No error fixtures found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture_path in &error_fixtures {
        let output_path = temp_dir
            .path()
            .join(format!("error_{}", fixture_path.file_name().unwrap().to_string_lossy()));
        let args = args_for(fixture_path, Some(&output_path));

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(fixture_path.clone());
        }
        assert!(!output_path.exists(), "Failed run must not write output");
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError fixtures that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error fixture(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_hormones_ids() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("hormones.svg");
    let args = args_for(&fixtures_path().join("hormones.svg"), Some(&output_path));

    run(&args).expect("Failed to process fixture");

    let svg = fs::read_to_string(&output_path).expect("Failed to read output");
    for expected in [
        r#"<g id="sry_gene" data-cell-id="xYz-1">"#,
        r#"<g id="5alpha_reductase" data-cell-id="xYz-2">"#,
        r#"<g id="cell_xYz-3" data-cell-id="xYz-3">"#,
        r#"<g id="inhibin" data-cell-id="xYz-4">"#,
        r#"<g id="inhibin_2" data-cell-id="xYz-5">"#,
        r#"<g data-cell-id="xYz-6" id="legend">"#,
    ] {
        assert!(svg.contains(expected), "Missing {expected} in output");
    }
    assert!(svg.contains("<!DOCTYPE svg PUBLIC"));
}

#[test]
fn e2e_default_output_overwrites_svg_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("plain.svg");
    fs::copy(fixtures_path().join("plain.svg"), &input).expect("Failed to copy fixture");

    let outcome = run(&args_for(&input, None)).expect("Failed to process fixture");
    assert!(matches!(outcome, Outcome::Written(path) if path == input));

    let svg = fs::read_to_string(&input).expect("Failed to read output");
    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg"));
    assert!(svg.contains(r#"<g id="step_1" data-cell-id="1">"#));
    assert!(svg.contains(r#"<g id="step_1_2" data-cell-id="2">"#));
}

#[test]
fn e2e_dry_run_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.svg");
    let mut args = args_for(&fixtures_path().join("plain.svg"), Some(&output_path));
    args.dry_run = true;

    let outcome = run(&args).expect("Failed to process fixture");
    match outcome {
        Outcome::DryRun(assignments) => {
            let ids: Vec<_> = assignments.iter().map(|a| (a.cell_id(), a.id())).collect();
            assert_eq!(ids, vec![("1", "step_1"), ("2", "step_1_2")]);
        }
        Outcome::Written(_) => panic!("Dry run must not write"),
    }
    assert!(!output_path.exists());
}

#[test]
fn e2e_config_file_applies() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[ids]\ncell_prefix = \"shape\"\n").expect("Failed to write config");
    let output_path = temp_dir.path().join("hormones.svg");

    let mut args = args_for(&fixtures_path().join("hormones.svg"), Some(&output_path));
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Failed to process fixture");

    let svg = fs::read_to_string(&output_path).expect("Failed to read output");
    assert!(svg.contains(r#"<g id="shape_xYz-3" data-cell-id="xYz-3">"#));
}

#[test]
fn e2e_binary_reports_success() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.svg");

    let output = Command::new(env!("CARGO_BIN_EXE_cellname"))
        .arg(fixtures_path().join("plain.svg"))
        .arg(&output_path)
        .args(["--log-level", "off"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Written cleaned SVG to:"));
    assert!(stdout.contains("out.svg"));
    assert!(output_path.exists());
}

#[test]
fn e2e_binary_missing_input_exits_1() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let output = Command::new(env!("CARGO_BIN_EXE_cellname"))
        .arg(temp_dir.path().join("missing.svg"))
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input file not found"));
}

#[test]
fn e2e_binary_wrong_argument_count_exits_1() {
    let output = Command::new(env!("CARGO_BIN_EXE_cellname"))
        .output()
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(1));

    let output = Command::new(env!("CARGO_BIN_EXE_cellname"))
        .args(["a.svg", "b.svg", "c.svg"])
        .output()
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn e2e_binary_missing_input_reported_with_logging_off() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let output = Command::new(env!("CARGO_BIN_EXE_cellname"))
        .arg(temp_dir.path().join("missing.svg"))
        .args(["--log-level", "off"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input file not found"));
}
