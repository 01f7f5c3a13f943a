use expect_test::expect;

use crate::{compile, complete, replies, routine};

const SRC: &str = include_str!("../data/git.cmd");

#[test]
fn dispatch() {
    let script = compile(SRC);
    assert!(script.contains(
        r#"
  if (( POSITIONAL_NUM > 1 )); then
    case "${POSITIONALS[0]}" in
      commit|ci) _git__commit && return 0;;
      push) _git__push && return 0;;
    esac
  fi
"#
    ));
    assert_eq!(routine(&script, "_git__push"), "_git__push() {\n  return 1\n}");

    let root = script.find("\n_git() {\n").unwrap();
    let commit = script.find("\n_git__commit() {\n").unwrap();
    let push = script.find("\n_git__push() {\n").unwrap();
    assert!(root < commit && commit < push);
}

#[test]
fn subcommand_routine() {
    let script = compile(SRC);
    expect![[r#"
        _git__commit() {
          local END_OF_OPTIONS POSITIONALS POSITIONAL_NUM
          local -a OPT_message OPT_amend OPT_C OPT_no_pager

          __git_parse_commandline

          __complete_option() {
            local opt="$1" cur="$2" mode="$3"

            case "$opt" in
              --message|-m)
                return 0;;
            esac

            return 1
          }

          case "$prev" in
            --*)
              __complete_option "$prev" "$cur" WITHOUT_OPTIONALS && return 0;;
            -*)
              case "$prev" in -[mC])
                __complete_option "-${prev: -1}" "$cur" WITHOUT_OPTIONALS && return 0
              esac;;
          esac

          case "$cur" in
            --*=*)
              __complete_option "${cur%%=*}" "${cur#*=}" WITH_OPTIONALS && return 0;;
            -*=*);;
            --*);;
            -*)
              local i
              for ((i=2; i <= ${#cur}; ++i)); do
                local pre="${cur:0:$i}" value="${cur:$i}"
                __complete_option "-${pre: -1}" "$value" WITH_OPTIONALS && {
                  __git_prefix_compreply "$pre"
                  return 0
                }
              done;;
          esac

          if (( ! END_OF_OPTIONS )) && [[ "$cur" = -* ]]; then
            local -a opts=()
            (( ! ${#OPT_message[@]} )) && opts+=(-m --message)
            (( ! ${#OPT_amend[@]} )) && opts+=(--amend)
            __git_compgen_w_replacement -a -- "$cur" "${opts[@]}"
            return 1
          fi

          return 1
        }"#]]
    .assert_eq(routine(&script, "_git__commit"));
}

#[test]
fn subcommand_names() {
    let script = compile(SRC);
    let Some(all) = replies(&script, "_git", &["git", ""]) else { return };
    assert_eq!(all, ["commit", "ci", "push"]);

    let some = replies(&script, "_git", &["git", "-C", "src", "c"]).unwrap();
    assert_eq!(some, ["commit", "ci"]);

    let none = replies(&script, "_git", &["git", "commit", ""]).unwrap();
    assert!(none.is_empty());
}

#[test]
fn inherited_options_fall_through() {
    let script = compile(SRC);
    let Some(options) = replies(&script, "_git", &["git", "ci", "-"]) else { return };
    assert_eq!(options, ["-m", "--message", "--amend", "-C", "--no-pager"]);

    let parent_value = replies(&script, "_git", &["git", "commit", "-C", "d"]).unwrap();
    assert_eq!(parent_value, ["<file:d>"]);

    let own_value = complete(&script, "_git", &["git", "commit", "-m", ""]).unwrap();
    assert!(own_value.success);
    assert!(own_value.replies.is_empty());

    let empty_child = replies(&script, "_git", &["git", "push", "--"]).unwrap();
    assert_eq!(empty_child, ["--no-pager"]);
}

#[test]
fn isolated_subcommands() {
    let script = compile(
        r#"
        cmd tool {
            option --root-only
            cmd run {
                option --fast
            }
        }
        "#,
    );
    assert!(script.contains("      run) _tool__run && return 0 || return 1;;\n"));

    let Some(child_only) = replies(&script, "_tool", &["tool", "run", "--"]) else { return };
    assert_eq!(child_only, ["--fast"]);

    let root = replies(&script, "_tool", &["tool", "--"]).unwrap();
    assert_eq!(root, ["--root-only"]);
}
