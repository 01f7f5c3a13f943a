use expect_test::expect;

use crate::{compile, replies, routine};

const SRC: &str = include_str!("../data/scenario.cmd");

#[test]
fn routine_text() {
    let script = compile(SRC);
    expect![[r#"
        _prog() {
          local cur prev words cword split
          _init_completion -n = || return

          local END_OF_OPTIONS POSITIONALS POSITIONAL_NUM
          local -a OPT_color OPT_verbose OPT_debug

          __prog_parse_commandline

          __complete_option() {
            local opt="$1" cur="$2" mode="$3"

            case "$opt" in
              --color)
                __prog_compgen_w_replacement -- "$cur" red green blue
                return 0;;
            esac

            return 1
          }

          case "$prev" in
            --*)
              __complete_option "$prev" "$cur" WITHOUT_OPTIONALS && return 0;;
            -*);;
          esac

          case "$cur" in
            --*=*)
              __complete_option "${cur%%=*}" "${cur#*=}" WITH_OPTIONALS && return 0;;
            -*=*);;
            --*);;
            -*);;
          esac

          if (( ! END_OF_OPTIONS )) && [[ "$cur" = -* ]]; then
            local -a opts=()
            (( ! ${#OPT_color[@]} )) && opts+=(--color)
            (( ! ${#OPT_verbose[@]} )) && opts+=(--verbose)
            (( ! ${#OPT_debug[@]} )) && (( ${#OPT_verbose[@]} )) && opts+=(--debug)
            __prog_compgen_w_replacement -a -- "$cur" "${opts[@]}"
            return 1
          fi

          test "$POSITIONAL_NUM" -ge 1 && {
            _filedir
            return 0;
          }

          return 1
        }"#]]
    .assert_eq(routine(&script, "_prog"));
}

#[test]
fn color_values_ignore_verbose() {
    let script = compile(SRC);
    let Some(plain) = replies(&script, "_prog", &["prog", "--color", ""]) else { return };
    assert_eq!(plain, ["red", "green", "blue"]);

    let verbose = replies(&script, "_prog", &["prog", "--verbose", "--color", "g"]).unwrap();
    assert_eq!(verbose, ["green"]);

    let attached = replies(&script, "_prog", &["prog", "--color=b"]).unwrap();
    assert_eq!(attached, ["blue"]);
}

#[test]
fn debug_needs_verbose() {
    let script = compile(SRC);
    let Some(before) = replies(&script, "_prog", &["prog", "--"]) else { return };
    assert_eq!(before, ["--color", "--verbose"]);

    let after = replies(&script, "_prog", &["prog", "--verbose", "--"]).unwrap();
    assert_eq!(after, ["--color", "--debug"]);

    let given = replies(&script, "_prog", &["prog", "--verbose", "--debug", "--"]).unwrap();
    assert_eq!(given, ["--color"]);
}

#[test]
fn files_everywhere() {
    let script = compile(SRC);
    let Some(first) = replies(&script, "_prog", &["prog", "a"]) else { return };
    assert_eq!(first, ["<file:a>"]);

    let later = replies(&script, "_prog", &["prog", "a", "b", "--color", "red", "c", ""]).unwrap();
    assert_eq!(later, ["<file:>"]);

    let after_double_dash = replies(&script, "_prog", &["prog", "--", "-x"]).unwrap();
    assert_eq!(after_double_dash, ["<file:-x>"]);
}
