//! Abbreviated spellings of long and old-style options.

use crate::ast::Spelling;

/// Expands an option spelling into every form that must match it.
pub trait Abbreviations {
    /// Includes `option_string` itself.
    fn abbreviations(&self, option_string: &str) -> Vec<String>;

    fn many_abbreviations(&self, option_strings: &[&str]) -> Vec<String> {
        option_strings.iter().flat_map(|it| self.abbreviations(it)).collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoAbbreviations;

impl Abbreviations for NoAbbreviations {
    fn abbreviations(&self, option_string: &str) -> Vec<String> {
        vec![option_string.to_string()]
    }
}

/// Accepts every prefix that no other known spelling shares.
#[derive(Debug, Clone)]
pub struct PrefixAbbreviations {
    known: Vec<String>,
}

impl PrefixAbbreviations {
    pub fn new<'a, I>(option_strings: I) -> PrefixAbbreviations
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut known = Vec::<String>::new();
        for it in option_strings {
            if !known.iter().any(|k| k == it) {
                known.push(it.to_string());
            }
        }
        PrefixAbbreviations { known }
    }
}

impl Abbreviations for PrefixAbbreviations {
    fn abbreviations(&self, option_string: &str) -> Vec<String> {
        let min_len = match Spelling::of(option_string) {
            Spelling::Short => return vec![option_string.to_string()],
            Spelling::Long => 3,
            Spelling::OldStyle => 3,
        };

        let mut res = Vec::new();
        let boundaries = option_string.char_indices().map(|(i, _)| i).skip(min_len);
        for end in boundaries {
            let prefix = &option_string[..end];
            let shared = self.known.iter().any(|it| it != option_string && it.starts_with(prefix));
            if !shared {
                res.push(prefix.to_string());
            }
        }
        res.push(option_string.to_string());
        res
    }
}
