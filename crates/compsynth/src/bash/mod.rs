//! The bash backend.

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

mod classify;
mod complete;
mod context;
mod cond;
mod generator;
mod master;
mod options;
mod parser;
mod positionals;
mod tracer;

use std::fmt::Write;

use crate::{ast::CommandLine, shell, tree::Tree, Config, Result};

use self::{context::GenerationContext, generator::NodeGenerator};

const GENERATION_NOTICE: &str = "\
# This file was generated by compsynth.
# Changes made here will be lost when it is regenerated.";

const VIM_MODELINE: &str = "# vim: ft=sh ts=2 sts=2 sw=2 et";

/// Generates a bash completion script for `cmd` and all of its subcommands.
pub fn generate_completion(cmd: &CommandLine, config: &Config) -> Result<String> {
    let tree = Tree::new(cmd, config);
    let mut ctx = GenerationContext::new(config, &cmd.prog);

    let mut routines = Vec::new();
    for node in tree.nodes() {
        let routine = NodeGenerator::new(&tree, node, &mut ctx.helpers).generate()?;
        routines.push(routine);
    }

    let mut output = vec![GENERATION_NOTICE.to_string()];
    output.extend(ctx.config.included_files_content()?);
    output.extend(ctx.helpers.used_functions_code());
    output.extend(routines);

    let mut register = String::new();
    w!(register, "complete -F {}", shell::completion_funcname(&tree.root().path));
    for name in cmd.all_names() {
        w!(register, " {}", shell::escape(name));
    }
    output.push(register);

    if ctx.config.vim_modeline {
        output.push(VIM_MODELINE.to_string());
    }

    let mut res = output.join("\n\n");
    res.push('\n');
    Ok(res)
}

fn indent(text: &str, n: usize) -> String {
    let mut buf = String::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        if !line.is_empty() {
            w!(buf, "{blank:n$}{line}", blank = "");
        }
    }
    buf
}
