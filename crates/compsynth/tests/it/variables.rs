use crate::{compile, replies};

const SRC: &str = r#"
cmd p {
    option --debug
    option -debug
    option --dry-run
    option --dry_run
    option --extra when "has_option -debug"
}
"#;

#[test]
fn similar_spellings_get_own_arrays() {
    let script = compile(SRC);
    assert!(script.contains("\n  local -a OPT_debug OPT_debug_2 OPT_dry_run OPT_dry_run_2 OPT_extra\n"));
    assert!(script.contains("0:--debug) kind=flag var=OPT_debug;;"));
    assert!(script.contains("0:-debug) kind=flag var=OPT_debug_2;;"));
    assert!(script.contains("(( ! ${#OPT_extra[@]} )) && (( ${#OPT_debug_2[@]} )) && opts+=(--extra)"));
}

#[test]
fn similar_spellings_are_tracked_apart() {
    let script = compile(SRC);
    let Some(after_long) = replies(&script, "_p", &["p", "--debug", "-"]) else { return };
    assert_eq!(after_long, ["-debug", "--dry-run", "--dry_run"]);

    let after_old = replies(&script, "_p", &["p", "-debug", "-"]).unwrap();
    assert_eq!(after_old, ["--debug", "--dry-run", "--dry_run", "--extra"]);

    let after_dashed = replies(&script, "_p", &["p", "--dry-run", "-"]).unwrap();
    assert_eq!(after_dashed, ["--debug", "-debug", "--dry_run"]);
}
