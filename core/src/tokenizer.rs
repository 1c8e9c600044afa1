use std::collections::BTreeSet;

use crate::error::{Result, SearchError};

fn is_invalid_character(c: char) -> bool { (c as u32) < 32 }

fn validate(text: &str) -> Result<()> {
    match text.chars().find(|&c| is_invalid_character(c)) {
        Some(character) => Err(SearchError::InvalidInput { text: text.to_string(), character }),
        None => Ok(()),
    }
}

/// Split text into non-empty words separated by one or more ASCII spaces.
///
/// Fails with [`SearchError::InvalidInput`] when the text contains a control
/// character anywhere, including between words.
pub fn split_into_words(text: &str) -> Result<Vec<&str>> {
    validate(text)?;
    Ok(text.split(' ').filter(|w| !w.is_empty()).collect())
}

/// Collect the distinct non-empty strings of a container, validating each one.
/// Every string is additionally split on spaces, so `["a b"]` yields `a` and `b`.
pub fn make_unique_non_empty_strings<I, S>(strings: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BTreeSet::new();
    for s in strings {
        for word in split_into_words(s.as_ref())? {
            out.insert(word.to_string());
        }
    }
    Ok(out)
}
