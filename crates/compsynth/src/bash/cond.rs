//! Lowers conditions into bash tests over the captured option arrays.

use crate::{ast::Opt, shell, when::Condition, Error, Result};

use super::tracer::VariableTracer;

pub(crate) fn compile(
    condition: &Condition,
    visible: &[&Opt],
    command: &str,
    tracer: &mut VariableTracer<'_>,
) -> Result<String> {
    let options = find_options(condition.options(), visible, command)?;

    let conditions = match condition {
        Condition::HasOption(_) => options
            .iter()
            .map(|option| format!("(( ${{#{}[@]}} ))", tracer.variable(option)))
            .collect::<Vec<_>>(),
        Condition::OptionIs { values, .. } => options
            .iter()
            .map(|option| {
                let var = tracer.variable(option);
                let have_option = format!("(( ${{#{var}[@]}} ))");
                let value_equals = values
                    .iter()
                    .map(|value| format!("[[ \"${{{var}[-1]}}\" == {} ]]", shell::escape(value)))
                    .collect::<Vec<_>>();
                match value_equals.as_slice() {
                    [single] => format!("{{ {have_option} && {single}; }}"),
                    _ => format!("{{ {have_option} && {{ {}; }}; }}", value_equals.join(" || ")),
                }
            })
            .collect::<Vec<_>>(),
    };

    Ok(disjunction(conditions))
}

fn disjunction(mut conditions: Vec<String>) -> String {
    if conditions.len() == 1 {
        conditions.remove(0)
    } else {
        format!("{{ {}; }}", conditions.join(" || "))
    }
}

/// Resolves spellings to options, first match wins, duplicates dropped.
fn find_options<'a>(
    option_strings: &[String],
    visible: &[&'a Opt],
    command: &str,
) -> Result<Vec<&'a Opt>> {
    let mut res: Vec<&'a Opt> = Vec::new();
    for option_string in option_strings {
        let option = visible
            .iter()
            .copied()
            .find(|it| it.option_strings.contains(option_string))
            .ok_or_else(|| Error::OptionNotFound {
                spelling: option_string.clone(),
                command: command.to_string(),
            })?;
        if !res.iter().any(|it| std::ptr::eq(*it, option)) {
            res.push(option);
        }
    }
    Ok(res)
}
