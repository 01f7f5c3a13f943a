//! The shared `__complete_option` routine of one command.

use std::fmt::Write;

use indexmap::IndexMap;
use tracing::debug;

use crate::{ast::Opt, Result};

use super::{generator::NodeGenerator, indent};

pub(crate) const NAME: &str = "__complete_option";

pub(crate) struct MasterCompletionFunction {
    code: Vec<String>,
}

impl MasterCompletionFunction {
    /// Options with a required argument are tried first; those with an
    /// optional one only when called with `WITH_OPTIONALS`.
    pub(crate) fn build(g: &mut NodeGenerator<'_, '_>, options: &[&Opt]) -> Result<Self> {
        let mut res = MasterCompletionFunction { code: Vec::new() };

        let (with_optional_arg, with_required_arg): (Vec<&Opt>, Vec<&Opt>) = options
            .iter()
            .copied()
            .filter(|it| it.is_completable())
            .partition(|it| it.arg.as_ref().map_or(false, |arg| arg.optional));

        res.add_options(g, &with_required_arg)?;
        if !with_optional_arg.is_empty() {
            res.code.push("[[ \"$mode\" == WITH_OPTIONALS ]] || return 1".to_string());
            res.add_options(g, &with_optional_arg)?;
        }
        Ok(res)
    }

    fn add_options(&mut self, g: &mut NodeGenerator<'_, '_>, options: &[&Opt]) -> Result<()> {
        let (with_when, without_when): (Vec<&Opt>, Vec<&Opt>) =
            options.iter().copied().partition(|it| it.when.is_some());

        let mut by_complete = IndexMap::<String, Vec<&Opt>>::new();
        for option in without_when {
            let complete = g.complete_option(option);
            by_complete.entry(complete).or_default().push(option);
        }

        if !by_complete.is_empty() {
            let mut buf = String::new();
            w!(buf, "case \"$opt\" in\n");
            for (complete, options) in &by_complete {
                let labels = options.iter().flat_map(|it| g.all_option_strings(it)).collect::<Vec<_>>();
                debug!(labels = %labels.join(" "), "merged option completion");
                w!(buf, "  {})\n", labels.join("|"));
                if !complete.is_empty() {
                    w!(buf, "{}\n", indent(complete, 4));
                }
                w!(buf, "    return 0;;\n");
            }
            w!(buf, "esac");
            self.code.push(buf);
        }

        for option in with_when {
            let labels = g.all_option_strings(option);
            let complete = g.complete_option(option);
            let condition = match &option.when {
                Some(it) => g.when_conditions(it)?,
                None => continue,
            };

            let mut buf = String::new();
            w!(buf, "case \"$opt\" in {})\n", labels.join("|"));
            w!(buf, "  if {condition}; then\n");
            if !complete.is_empty() {
                w!(buf, "{}\n", indent(&complete, 4));
            }
            w!(buf, "    return 0\n");
            w!(buf, "  fi;;\n");
            w!(buf, "esac");
            self.code.push(buf);
        }
        Ok(())
    }

    /// `None` when no option needs its argument completed.
    pub(crate) fn get(&self) -> Option<String> {
        if self.code.is_empty() {
            return None;
        }
        let mut buf = String::new();
        w!(buf, "{NAME}() {{\n");
        w!(buf, "  local opt=\"$1\" cur=\"$2\" mode=\"$3\"\n\n");
        w!(buf, "{}\n\n", indent(&self.code.join("\n\n"), 2));
        w!(buf, "  return 1\n");
        w!(buf, "}}");
        Some(buf)
    }
}
