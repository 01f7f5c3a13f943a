//! Quoting and identifier rules of the target shell.

/// Quotes `s` unless every character is safe unquoted.
pub(crate) fn escape(s: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "-_./:,+@%=".contains(c);
    if !s.is_empty() && s.chars().all(safe) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r"'\''"))
}

pub(crate) fn identifier(s: &str) -> String {
    s.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

/// `_git` for the root, `_git__remote__add` for nested subcommands.
pub(crate) fn completion_funcname(path: &[&str]) -> String {
    let mut res = String::from("_");
    for (i, name) in path.iter().enumerate() {
        if i > 0 {
            res.push_str("__");
        }
        res.push_str(&identifier(name));
    }
    res
}

pub(crate) fn option_variable(option_string: &str) -> String {
    format!("OPT_{}", identifier(option_string.trim_start_matches('-')))
}
