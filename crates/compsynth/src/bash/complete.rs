use std::fmt::Write;

use crate::{ast::Complete, shell};

use super::context::{Helper, HelperRegistry};

/// Code that fills `COMPREPLY` with candidates matching `$cur`.
///
/// With `append` unset the replies replace whatever is already there.
pub(crate) fn complete_code(helpers: &mut HelperRegistry, complete: &Complete, append: bool) -> String {
    let op = if append { "+=" } else { "=" };
    let mut buf = String::new();
    match complete {
        Complete::None => (),
        Complete::Choices(values) => {
            w!(buf, "{}", helpers.use_function(Helper::CompgenWReplacement));
            if append {
                w!(buf, " -a");
            }
            w!(buf, " -- \"$cur\"");
            for value in values {
                w!(buf, " {}", shell::escape(value));
            }
        }
        Complete::File => w!(buf, "_filedir"),
        Complete::Directory => w!(buf, "_filedir -d"),
        Complete::Command => w!(buf, "COMPREPLY{op}($(compgen -c -- \"$cur\"))"),
        Complete::User => w!(buf, "COMPREPLY{op}($(compgen -u -- \"$cur\"))"),
        Complete::Group => w!(buf, "COMPREPLY{op}($(compgen -g -- \"$cur\"))"),
        Complete::Hostname => w!(buf, "COMPREPLY{op}($(compgen -A hostname -- \"$cur\"))"),
        Complete::Signal => w!(buf, "COMPREPLY{op}($(compgen -A signal -- \"$cur\"))"),
        Complete::Exec(command) => {
            w!(buf, "COMPREPLY{op}($(compgen -W \"$({command})\" -- \"$cur\"))")
        }
    }
    buf
}
