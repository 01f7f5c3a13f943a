use crate::ast::{ArgPolicy, Opt, Spelling};

/// Which spelling/argument combinations exist among the completable options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArgFlags {
    pub(crate) long_required: bool,
    pub(crate) long_optional: bool,
    pub(crate) old_required: bool,
    pub(crate) old_optional: bool,
    pub(crate) short_required: bool,
    pub(crate) short_optional: bool,
}

impl ArgFlags {
    pub(crate) fn of<'a>(options: impl IntoIterator<Item = &'a Opt>) -> ArgFlags {
        let mut res = ArgFlags::default();
        for option in options {
            let (required, optional) = match option.arg_policy() {
                ArgPolicy::None => continue,
                ArgPolicy::Required => (true, false),
                ArgPolicy::Optional => (false, true),
            };
            if option.has_spelling(Spelling::Long) {
                res.long_required |= required;
                res.long_optional |= optional;
            }
            if option.has_spelling(Spelling::OldStyle) {
                res.old_required |= required;
                res.old_optional |= optional;
            }
            if option.has_spelling(Spelling::Short) {
                res.short_required |= required;
                res.short_optional |= optional;
            }
        }
        res
    }

    /// Something may take its argument from the next word.
    pub(crate) fn any_required(&self) -> bool {
        self.long_required || self.old_required || self.short_required
    }

    pub(crate) fn any(&self) -> bool {
        self.any_required() || self.long_optional || self.old_optional || self.short_optional
    }

    pub(crate) fn any_short(&self) -> bool {
        self.short_required || self.short_optional
    }

    pub(crate) fn any_long(&self) -> bool {
        self.long_required || self.long_optional
    }

    pub(crate) fn any_old(&self) -> bool {
        self.old_required || self.old_optional
    }
}
