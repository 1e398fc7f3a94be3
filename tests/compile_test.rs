use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new("cargo")
        .arg("run")
        .arg("--")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_compile_command_writes_fragment() {
    // Create temporary directory
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();

    // Create a small two-section presentation
    fs::create_dir(temp_path.join("one")).expect("Failed to create section dir");
    fs::write(
        temp_path.join("one/01_intro.md"),
        "!SLIDE subsection\n# Introduction\n\n!SLIDE bullets\n- first\n- second\n",
    )
    .expect("Failed to write markdown file");
    fs::write(
        temp_path.join("soapbox.json"),
        "{ \"name\": \"Test Deck\", \"sections\": [ {\"section\": \"one\"} ] }",
    )
    .expect("Failed to write config file");

    // Output path
    let output_path = temp_path.join("deck.html");

    // Run command
    let output = run_command(&[
        "compile",
        "-d",
        temp_path.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
        "--toc",
    ]);

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output_path.exists(), "Output file should exist");

    let html = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(html.contains("ref=\"one/01_intro/1\""));
    assert!(html.contains("ref=\"one/01_intro/2\""));
    assert!(html.contains("class=\"slide subsection\""));
    assert!(html.contains("<li>first</li>"));
}

#[test]
fn test_compile_command_prints_to_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();

    fs::write(temp_path.join("foo.md"), "# Title\ntext\n").expect("Failed to write markdown file");

    let output = run_command(&["compile", "-d", temp_path.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("ref=\"foo\""));
    assert!(html.contains("<h1>Title</h1>"));
}

#[test]
fn test_compile_command_rejects_missing_directory() {
    let output = run_command(&["compile", "-d", "/nonexistent/presentation"]);
    assert!(!output.status.success());
}
