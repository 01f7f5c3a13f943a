//! Completion of option arguments and of the option strings themselves.

use std::fmt::Write;

use indexmap::IndexSet;

use crate::{
    ast::{ArgPolicy, Spelling},
    shell, Error, Result,
};

use super::{
    classify::ArgFlags,
    context::Helper,
    generator::NodeGenerator,
    indent,
    master::{self, MasterCompletionFunction},
};

pub(crate) fn option_completion(g: &mut NodeGenerator<'_, '_>) -> Result<String> {
    let options = g.node.cmd.options.iter().filter(|it| it.is_completable()).collect::<Vec<_>>();

    let mut buf = String::new();
    if let Some(code) = MasterCompletionFunction::build(g, &options)?.get() {
        w!(buf, "{code}\n\n");
    }

    let flags = ArgFlags::of(options.iter().copied());
    let complete_option = master::NAME;

    let prefix_compreply =
        if flags.any_short() { g.helpers.use_function(Helper::PrefixCompreply) } else { String::new() };

    let mut has_oldstyle = false;
    if flags.any_short() {
        let old = g.old_option_strings();
        if !old.is_empty() {
            has_oldstyle = true;
            w!(buf, "__is_oldstyle_option() {{\n");
            w!(buf, "  case \"$1\" in {}) return 0;; esac\n", old.join("|"));
            w!(buf, "  return 1\n");
            w!(buf, "}}\n\n");
        }
    }

    if flags.any_required() {
        let (short_no_args, short_required_args) = short_option_chars(g);

        w!(buf, "case \"$prev\" in\n");
        w!(buf, "  --*)");
        if flags.long_required {
            w!(buf, "\n    {complete_option} \"$prev\" \"$cur\" WITHOUT_OPTIONALS && return 0");
        }
        w!(buf, ";;\n");
        w!(buf, "  -*)");
        if flags.old_required {
            w!(buf, "\n    {complete_option} \"$prev\" \"$cur\" WITHOUT_OPTIONALS && return 0");
        }
        if flags.short_required {
            if short_no_args.is_empty() {
                w!(buf, "\n    case \"$prev\" in -[{short_required_args}])");
            } else {
                w!(buf, "\n    case \"$prev\" in -*([{short_no_args}])[{short_required_args}])");
            }
            w!(buf, "\n      {complete_option} \"-${{prev: -1}}\" \"$cur\" WITHOUT_OPTIONALS && return 0");
            w!(buf, "\n    esac");
        }
        w!(buf, ";;\n");
        w!(buf, "esac\n\n");
    }

    if flags.any() {
        w!(buf, "case \"$cur\" in\n");
        w!(buf, "  --*=*)");
        if flags.any_long() {
            w!(buf, "\n    {complete_option} \"${{cur%%=*}}\" \"${{cur#*=}}\" WITH_OPTIONALS && return 0");
        }
        w!(buf, ";;\n");
        w!(buf, "  -*=*)");
        if flags.any_old() {
            w!(buf, "\n    {complete_option} \"${{cur%%=*}}\" \"${{cur#*=}}\" WITH_OPTIONALS && return 0");
        }
        w!(buf, ";;\n");
        w!(buf, "  --*);;\n");
        w!(buf, "  -*)");
        if flags.any_short() {
            let mut combined = String::new();
            w!(combined, "local i\n");
            w!(combined, "for ((i=2; i <= ${{#cur}}; ++i)); do\n");
            w!(combined, "  local pre=\"${{cur:0:$i}}\" value=\"${{cur:$i}}\"\n");
            w!(combined, "  {complete_option} \"-${{pre: -1}}\" \"$value\" WITH_OPTIONALS && {{\n");
            w!(combined, "    {prefix_compreply} \"$pre\"\n");
            w!(combined, "    return 0\n");
            w!(combined, "  }}\n");
            w!(combined, "done");
            if has_oldstyle {
                w!(buf, "\n    if ! __is_oldstyle_option \"$cur\"; then");
                w!(buf, "\n{}", indent(&combined, 6));
                w!(buf, "\n    fi");
            } else {
                w!(buf, "\n{}", indent(&combined, 4));
            }
        }
        w!(buf, ";;\n");
        w!(buf, "esac");
    }

    Ok(buf.trim().to_string())
}

/// Characters of short options taking no argument and of those requiring one,
/// inherited options included.
fn short_option_chars(g: &NodeGenerator<'_, '_>) -> (String, String) {
    let mut no_args = IndexSet::new();
    let mut required_args = IndexSet::new();
    for option in &g.visible {
        let set = match option.arg_policy() {
            ArgPolicy::None => &mut no_args,
            ArgPolicy::Required => &mut required_args,
            ArgPolicy::Optional => continue,
        };
        for s in option.strings_of(Spelling::Short) {
            set.extend(s.chars().skip(1));
        }
    }
    (bracket_chars(no_args), bracket_chars(required_args))
}

fn bracket_chars(chars: IndexSet<char>) -> String {
    let mut res = String::new();
    for c in chars {
        if !c.is_ascii_alphanumeric() {
            res.push('\\');
        }
        res.push(c);
    }
    res
}

pub(crate) fn option_strings_completion(g: &mut NodeGenerator<'_, '_>) -> Result<String> {
    let cmd = g.node.cmd;
    let mut buf = String::new();
    w!(buf, "if (( ! END_OF_OPTIONS )) && [[ \"$cur\" = -* ]]; then\n");
    w!(buf, "  local -a opts=()\n");
    for option in &cmd.options {
        let mut guard = IndexSet::new();
        if !option.repeatable {
            guard.insert(format!("! ${{#{}[@]}}", g.variable(option)));
        }
        for spelling in &option.conflicts {
            let conflicting = g
                .visible
                .iter()
                .copied()
                .find(|it| it.option_strings.contains(spelling))
                .ok_or_else(|| Error::ConflictNotFound {
                    spelling: spelling.clone(),
                    command: g.command_name(),
                })?;
            guard.insert(format!("! ${{#{}[@]}}", g.variable(conflicting)));
        }
        for final_option in cmd.final_options() {
            guard.insert(format!("! ${{#{}[@]}}", g.variable(final_option)));
        }

        w!(buf, "  ");
        if !guard.is_empty() {
            let guard = guard.into_iter().collect::<Vec<_>>();
            w!(buf, "(( {} )) && ", guard.join(" && "));
        }
        if let Some(when) = &option.when {
            w!(buf, "{} && ", g.when_conditions(when)?);
        }
        let strings = option.option_strings.iter().map(|it| shell::escape(it)).collect::<Vec<_>>();
        w!(buf, "opts+=({})\n", strings.join(" "));
    }
    let compgen = g.helpers.use_function(Helper::CompgenWReplacement);
    w!(buf, "  {compgen} -a -- \"$cur\" \"${{opts[@]}}\"\n");
    w!(buf, "  return 1\n");
    w!(buf, "fi");
    Ok(buf)
}
