mod errors;
mod scenario;
mod subcommands;
mod variables;

use std::{env, process::Command};

use compsynth::Config;

fn compile(src: &str) -> String {
    compsynth::compile(src, &Config::default()).unwrap()
}

/// The definition of shell function `name`.
fn routine<'a>(script: &'a str, name: &str) -> &'a str {
    let header = format!("\n{name}() {{\n");
    let start = script.find(&header).map(|it| it + 1).unwrap_or_else(|| panic!("no `{name}` in\n{script}"));
    let len = script[start..].find("\n}\n").unwrap() + 2;
    &script[start..start + len]
}

const PRELUDE: &str = r#"
_init_completion() {
  words=("${COMP_WORDS[@]}")
  cword=$COMP_CWORD
  cur="${words[cword]}"
  prev="${words[cword-1]}"
}
_filedir() {
  COMPREPLY+=("<file:$cur>")
}
"#;

const RUN: &str = r#"
COMP_WORDS=("$@")
COMP_CWORD=$(( $# - 1 ))
COMPREPLY=()
"$COMPLETION_FUNCTION"
printf '%s\n' "$?" "${COMPREPLY[@]}"
"#;

#[derive(Debug, PartialEq, Eq)]
struct Completion {
    success: bool,
    replies: Vec<String>,
}

/// Runs `function` from `script` with `words`, the last one being the word
/// under the cursor. `None` when bash is not installed, unless
/// `COMPSYNTH_REQUIRE_BASH` is set.
fn complete(script: &str, function: &str, words: &[&str]) -> Option<Completion> {
    let program = format!("{PRELUDE}\n{script}\n{RUN}");
    let output = Command::new("bash")
        .args(["-O", "extglob", "-c", program.as_str(), "bash"])
        .args(words)
        .env("COMPLETION_FUNCTION", function)
        .output();
    let output = match output {
        Ok(it) => it,
        Err(err) => {
            assert!(env::var_os("COMPSYNTH_REQUIRE_BASH").is_none(), "can't run bash: {err}");
            return None;
        }
    };
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    let success = lines.next() == Some("0");
    let replies = lines.map(String::from).collect();
    Some(Completion { success, replies })
}

fn replies(script: &str, function: &str, words: &[&str]) -> Option<Vec<String>> {
    complete(script, function, words).map(|it| it.replies)
}

#[test]
fn output_layout() {
    let script = compile(include_str!("../data/scenario.cmd"));
    assert!(script.starts_with("# This file was generated by compsynth.\n"));
    assert!(script.ends_with("\n\ncomplete -F _prog prog\n\n# vim: ft=sh ts=2 sts=2 sw=2 et\n"));

    let helpers = ["__prog_compgen_w_replacement() {", "__prog_option_info() {", "__prog_parse_commandline() {"];
    for helper in helpers {
        assert_eq!(script.matches(&format!("\n{helper}\n")).count(), 1, "{helper}");
    }
    assert!(!script.contains("__prog_prefix_compreply"));
}

#[test]
fn without_modeline() {
    let config = Config { vim_modeline: false, ..Config::default() };
    let script = compsynth::compile("cmd prog { option --verbose }", &config).unwrap();
    assert!(script.ends_with("\n\ncomplete -F _prog prog\n"));
}

#[test]
fn included_files() {
    let path = std::env::temp_dir().join(format!("compsynth-include-{}.bash", std::process::id()));
    std::fs::write(&path, "# included\n_my_helper() { :; }\n").unwrap();
    let config = Config { include_files: vec![path.clone()], ..Config::default() };
    let script = compsynth::compile("cmd prog { option --verbose }", &config).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(script.contains("regenerated.\n\n# included\n_my_helper() { :; }\n\n__prog_"));
}

#[test]
fn empty_command() {
    let script = compile("cmd prog {}");
    assert!(script.contains("\n_prog() {\n  return 1\n}\n"));
    assert!(!script.contains("parse_commandline"));
}

/// The `__complete_option` routine nested in the first command routine.
fn master(script: &str) -> &str {
    let start = script.find("  __complete_option() {\n").unwrap() + 2;
    let len = script[start..].find("\n  }\n").unwrap() + 4;
    &script[start..start + len]
}
