use assert_cmd::Command;
use std::fs;

fn enseash() -> Command {
    Command::cargo_bin("enseash").unwrap()
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn banner_prompt_and_farewell() {
    let out = stdout_of(enseash().write_stdin("exit\n"));
    assert_eq!(
        out,
        "Bienvenue dans le Shell ENSEA.\nPour quitter, tapez 'exit'.\nenseash % Bye bye...\n"
    );
}

#[test]
fn quiet_skips_banner() {
    let out = stdout_of(enseash().arg("--quiet").write_stdin(""));
    assert_eq!(out, "enseash % Bye bye...\n");
}

#[test]
fn child_output_comes_between_prompts() {
    let out = stdout_of(enseash().arg("-q").write_stdin("echo hello\n"));
    assert!(out.starts_with("enseash % hello\nenseash [exit:0|"), "{out}");
    assert!(out.ends_with("ms] % Bye bye...\n"), "{out}");
}

#[test]
fn redirections_from_a_script() {
    let dir = tempfile::tempdir().unwrap();
    let script = "echo hi > out.txt\ncat < out.txt > copy.txt\nexit\n";
    stdout_of(enseash().arg("-q").current_dir(dir.path()).write_stdin(script));
    assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "hi\n");
    assert_eq!(fs::read_to_string(dir.path().join("copy.txt")).unwrap(), "hi\n");
}

#[test]
fn errors_go_to_stderr_and_the_shell_continues() {
    let assert = enseash()
        .arg("-q")
        .write_stdin("cat >\nenseash-no-such-program-xyz\n")
        .assert()
        .success();
    let output = assert.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stderr.contains("Error: missing filename after >"), "{stderr}");
    assert!(stderr.contains("Error: cannot execute enseash-no-such-program-xyz"), "{stderr}");
    assert!(stdout.contains("enseash [exit:1|"), "{stdout}");
    assert_eq!(stdout.matches("Bye bye...").count(), 1);
}

#[test]
fn zero_max_args_is_rejected() {
    enseash().args(["--max-args", "0"]).write_stdin("").assert().failure();
}
