//! One completion routine per command.

use std::fmt::Write;

use indexmap::IndexSet;
use tracing::debug;

use crate::{
    abbrev::{Abbreviations, NoAbbreviations, PrefixAbbreviations},
    ast::{Complete, Opt, Spelling},
    shell,
    tree::{Node, Tree},
    when::Condition,
    Result,
};

use super::{
    complete::complete_code, cond, context::HelperRegistry, indent, options, parser, positionals,
    tracer::VariableTracer,
};

pub(crate) struct NodeGenerator<'g, 'a> {
    pub(crate) tree: &'g Tree<'a>,
    pub(crate) node: &'g Node<'a>,
    pub(crate) helpers: &'g mut HelperRegistry,
    pub(crate) tracer: VariableTracer<'g>,
    /// Own options followed by inherited ones.
    pub(crate) visible: Vec<&'a Opt>,
    abbreviations: Box<dyn Abbreviations>,
}

impl<'g, 'a> NodeGenerator<'g, 'a> {
    pub(crate) fn new(
        tree: &'g Tree<'a>,
        node: &'g Node<'a>,
        helpers: &'g mut HelperRegistry,
    ) -> NodeGenerator<'g, 'a> {
        let visible = tree.visible_options(node);
        let abbreviations: Box<dyn Abbreviations> = if node.abbreviate {
            let all = visible.iter().flat_map(|it| it.option_strings.iter().map(String::as_str));
            Box::new(PrefixAbbreviations::new(all))
        } else {
            Box::new(NoAbbreviations)
        };
        NodeGenerator { tree, node, helpers, tracer: VariableTracer::new(&tree.variables), visible, abbreviations }
    }

    pub(crate) fn funcname(&self) -> String {
        shell::completion_funcname(&self.node.path)
    }

    pub(crate) fn command_name(&self) -> String {
        self.node.path.join(" ")
    }

    pub(crate) fn complete(&mut self, complete: &Complete, append: bool) -> String {
        complete_code(self.helpers, complete, append)
    }

    pub(crate) fn complete_option(&mut self, option: &Opt) -> String {
        match option.complete() {
            Some(complete) => self.complete(complete, false),
            None => String::new(),
        }
    }

    pub(crate) fn when_conditions(&mut self, condition: &Condition) -> Result<String> {
        let command = self.command_name();
        cond::compile(condition, &self.visible, &command, &mut self.tracer)
    }

    pub(crate) fn variable(&mut self, option: &Opt) -> String {
        self.tracer.variable(option)
    }

    /// Every label `__complete_option` must accept for `option`.
    pub(crate) fn all_option_strings(&self, option: &Opt) -> Vec<String> {
        let mut res = Vec::new();
        for spelling in [Spelling::Long, Spelling::OldStyle] {
            let strings = option.strings_of(spelling).collect::<Vec<_>>();
            res.extend(self.abbreviations.many_abbreviations(&strings));
        }
        res.extend(option.strings_of(Spelling::Short).map(String::from));
        res.into_iter().map(|it| shell::escape(&it)).collect()
    }

    pub(crate) fn old_option_strings(&self) -> Vec<String> {
        let strings = self
            .visible
            .iter()
            .flat_map(|it| it.strings_of(Spelling::OldStyle))
            .collect::<Vec<_>>();
        self.abbreviations.many_abbreviations(&strings).iter().map(|it| shell::escape(it)).collect()
    }

    pub(crate) fn generate(mut self) -> Result<String> {
        let cmd = self.node.cmd;
        let funcname = self.funcname();
        debug!(
            function = %funcname,
            options = cmd.options.len(),
            positionals = cmd.positionals.len(),
            subcommands = cmd.subcommands.len(),
            "generating completion routine"
        );

        if !cmd.is_worth_a_function() {
            return Ok(format!("{funcname}() {{\n  return 1\n}}"));
        }

        let mut sections = Vec::new();

        if self.node.parent.is_none() {
            sections.push("local cur prev words cword split\n_init_completion -n = || return".to_string());
        }

        if !cmd.subcommands.is_empty() {
            sections.push(positionals::subcommand_call(&self));
        }

        if !cmd.options.is_empty() {
            sections.push(options::option_completion(&mut self)?);
            sections.push(options::option_strings_completion(&mut self)?);
        }

        if !cmd.positionals.is_empty() || !cmd.subcommands.is_empty() {
            sections.push(positionals::positionals_completion(&mut self)?);
        }

        let parsing = self.commandline_parsing();
        let at = if self.node.parent.is_none() { 1 } else { 0 };
        sections.insert(at, parsing);

        let captured = self.tracer.captured().collect::<Vec<_>>().join(" ");
        debug!(function = %funcname, captured = %captured, "captured option variables");

        let body = sections.iter().filter(|it| !it.is_empty()).map(String::as_str).collect::<Vec<_>>();
        let mut buf = String::new();
        w!(buf, "{funcname}() {{\n");
        w!(buf, "{}\n\n", indent(&body.join("\n\n"), 2));
        w!(buf, "  return 1\n");
        w!(buf, "}}");
        Ok(buf)
    }

    /// Declares the state filled in by the command line parser and runs it.
    fn commandline_parsing(&mut self) -> String {
        if self.node.parent.is_none() {
            parser::register(self.tree, self.helpers);
        }

        let mut buf = String::new();
        w!(buf, "local END_OF_OPTIONS POSITIONALS POSITIONAL_NUM\n");
        if !self.visible.is_empty() {
            let vars = self
                .visible
                .iter()
                .map(|it| self.tree.variables.of(it))
                .collect::<IndexSet<_>>();
            let vars = vars.into_iter().collect::<Vec<_>>();
            w!(buf, "local -a {}\n", vars.join(" "));
        }
        w!(buf, "\n{}", self.helpers.qualified(parser::PARSE_COMMANDLINE));
        buf
    }
}
