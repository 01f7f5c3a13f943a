//! Positional completion and dispatch into subcommand routines.

use std::fmt::Write;

use crate::{ast::Complete, shell, Result};

use super::{generator::NodeGenerator, indent};

fn make_block(code: &str) -> String {
    if code.is_empty() {
        "{\n  return 0;\n}".to_string()
    } else {
        format!("{{\n{}\n  return 0;\n}}", indent(code, 2))
    }
}

pub(crate) fn positionals_completion(g: &mut NodeGenerator<'_, '_>) -> Result<String> {
    let cmd = g.node.cmd;
    let offset = g.node.offset;
    let mut buf = String::new();

    // Exact ordinals win over a repeatable positional's open range.
    let (repeatable, exact): (Vec<_>, Vec<_>) = cmd.positionals.iter().partition(|it| it.repeatable);
    for positional in exact.into_iter().chain(repeatable) {
        let operator = if positional.repeatable { "-ge" } else { "-eq" };
        w!(buf, "test \"$POSITIONAL_NUM\" {operator} {} && ", offset + positional.number);
        if let Some(when) = &positional.when {
            w!(buf, "{} && ", g.when_conditions(when)?);
        }
        let code = g.complete(&positional.complete, true);
        w!(buf, "{}\n\n", make_block(&code));
    }

    if let Some(slot) = cmd.subcommand_slot() {
        let names = cmd
            .subcommands
            .iter()
            .flat_map(|it| it.all_names())
            .map(String::from)
            .collect::<Vec<_>>();
        let code = g.complete(&Complete::Choices(names), true);
        w!(buf, "test \"$POSITIONAL_NUM\" -eq {} && ", offset + slot);
        w!(buf, "{}\n\n", make_block(&code));
    }

    Ok(buf.trim().to_string())
}

/// Hands over to the routine of the subcommand named at the slot.
///
/// Without inheritance a subcommand that completes nothing ends the completion.
pub(crate) fn subcommand_call(g: &NodeGenerator<'_, '_>) -> String {
    let slot = match g.node.cmd.subcommand_slot() {
        Some(it) => g.node.offset + it,
        None => return String::new(),
    };

    let mut buf = String::new();
    w!(buf, "if (( POSITIONAL_NUM > {slot} )); then\n");
    w!(buf, "  case \"${{POSITIONALS[{}]}}\" in\n", slot - 1);
    for child in g.tree.children(g.node) {
        let pattern = child.cmd.all_names().map(shell::escape).collect::<Vec<_>>();
        let funcname = shell::completion_funcname(&child.path);
        if g.node.inherit {
            w!(buf, "    {}) {funcname} && return 0;;\n", pattern.join("|"));
        } else {
            w!(buf, "    {}) {funcname} && return 0 || return 1;;\n", pattern.join("|"));
        }
    }
    w!(buf, "  esac\n");
    w!(buf, "fi");
    buf
}
