//! Detects whether an option's switch textually appears in the raw argv.
//!
//! clap fills in defaults, so the parsed value alone cannot tell
//! `--option 42` apart from no `--option` at all when 42 is the default.
//! This module re-scans the untouched argument vector instead.
//!
//! The scan is a heuristic, not a second argument grammar:
//! - A long switch matches any token that starts with it, so `--apple=food`
//!   matches `--apple` (and so would `--applesauce`).
//! - A short cluster such as `-BcDa` is walked one character at a time and
//!   stops at the first character that is not a short switch of the command;
//!   whatever follows is taken to be a value. `-BcEaqux` therefore does not
//!   match `-a` when `E` is unknown, even though `a` appears later.
//! - Option values that happen to look like switches are not distinguished
//!   from switches.

use super::descriptor::{OptionDescriptor, is_long_switch, short_switch};

/// Collects every short switch character of `options`, in iteration order.
///
/// Secondary switches count too. The result is the alphabet used by
/// [`is_option_switch_in_arguments`] to decide where a cluster ends; build it
/// once per command.
#[must_use]
pub fn get_short_switches<'a, I>(options: I) -> String
where
    I: IntoIterator<Item = &'a OptionDescriptor>,
{
    options
        .into_iter()
        .flat_map(OptionDescriptor::short_switches)
        .collect()
}

/// Returns true if any of `switches` appears in `arguments`.
///
/// `short_switches` is the command's full short switch alphabet as returned by
/// [`get_short_switches`]. `arguments` excludes the program name.
#[must_use]
pub fn is_option_switch_in_arguments<S, A>(
    switches: &[S],
    short_switches: &str,
    arguments: &[A],
) -> bool
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    let longs: Vec<&str> = switches
        .iter()
        .map(AsRef::as_ref)
        .filter(|switch| is_long_switch(switch))
        .collect();
    let shorts: Vec<char> = switches
        .iter()
        .filter_map(|switch| short_switch(switch.as_ref()))
        .collect();

    arguments
        .iter()
        .map(AsRef::as_ref)
        .filter(|token| token.starts_with('-'))
        .any(|token| {
            longs.iter().any(|long| token.starts_with(long))
                || cluster_contains(token, &shorts, short_switches)
        })
}

/// Walks a short switch cluster like `-aBc`.
fn cluster_contains(token: &str, shorts: &[char], alphabet: &str) -> bool {
    let Some(cluster) = token.strip_prefix('-') else {
        return false;
    };
    if cluster.is_empty() || cluster.starts_with('-') {
        return false;
    }

    for c in cluster.chars() {
        if !alphabet.contains(c) {
            return false;
        }
        if shorts.contains(&c) {
            return true;
        }
    }

    false
}
