//! Mapping of 1-based page/slide locators onto an ordered document.

use crate::error::{Error, Result};

/// The part of a document an extraction call covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every page or slide, in order.
    All,
    /// Exactly one page or slide, by 0-based position.
    Single(usize),
}

/// Resolve an optional 1-based locator against `available` pages or slides.
///
/// `0`, negative numbers, and numbers above `available` are out of range.
pub fn resolve(locator: Option<i64>, available: usize) -> Result<Scope> {
    let Some(requested) = locator else {
        return Ok(Scope::All);
    };

    let out_of_range = || Error::LocatorOutOfRange {
        requested,
        available,
    };

    let number = usize::try_from(requested).map_err(|_| out_of_range())?;
    if number == 0 || number > available {
        return Err(out_of_range());
    }

    log::trace!("Locator {} resolved to position {}", requested, number - 1);
    Ok(Scope::Single(number - 1))
}
