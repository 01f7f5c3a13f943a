use compsynth::{Config, Error};
use expect_test::{expect, Expect};

fn check(src: &str, expect: Expect) {
    let err = compsynth::compile(src, &Config::default()).unwrap_err();
    expect.assert_eq(&err.to_string());
}

#[test]
fn unknown_option_in_condition() {
    check(
        r#"cmd prog { option --debug when "has_option --verbose" }"#,
        expect!["option `--verbose` referenced by a condition not found in command `prog`"],
    );
    check(
        r#"
        cmd git {
            option --no-pager
            cmd remote {
                cmd add {
                    positional URL when "option_is --no-pager -- yes"
                }
            }
        }
        "#,
        expect!["option `--no-pager` referenced by a condition not found in command `git remote add`"],
    );
}

#[test]
fn unknown_conflicting_option() {
    check(
        "cmd prog { option --fast conflicts(--slow) }",
        expect!["option `--slow` listed in `conflicts` not found in command `prog`"],
    );

    let script = compsynth::compile(
        "cmd prog { option --fast conflicts(--slow) option --slow conflicts(--fast) }",
        &Config::default(),
    )
    .unwrap();
    assert!(script.contains("(( ! ${#OPT_fast[@]} && ! ${#OPT_slow[@]} )) && opts+=(--fast)"));
}

#[test]
fn inherited_options_resolve() {
    let script = compsynth::compile(
        r#"
        cmd git inherit {
            option -C <DIR>: directory
            cmd log {
                option --stat when "has_option -C"
            }
        }
        "#,
        &Config::default(),
    )
    .unwrap();
    assert!(script.contains("(( ! ${#OPT_stat[@]} )) && (( ${#OPT_C[@]} )) && opts+=(--stat)"));
}

#[test]
fn missing_include() {
    let config = Config { include_files: vec!["/nonexistent/compsynth.bash".into()], ..Config::default() };
    let err = compsynth::compile("cmd prog {}", &config).unwrap_err();
    assert!(matches!(err, Error::Include { .. }));
    assert_eq!(err.to_string(), "can't read included file `/nonexistent/compsynth.bash`");
}
