//! Key sources: whitespace-delimited tokens and single bytes of a buffer.

use crate::error::TableError;
use crate::key_ops::KeyOps;
use crate::table::Table;
use log::debug;

/// The C `isspace` set: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Iterator over maximal runs of non-whitespace bytes. Never yields an empty
/// token.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    rest: &'a [u8],
}

pub fn tokens(input: &[u8]) -> Tokens<'_> {
    Tokens { rest: input }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.iter().position(|&b| !is_space(b))?;
        let rest = &self.rest[start..];
        let end = rest.iter().position(|&b| is_space(b)).unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

/// Count every token of `input` in `table`. Returns the number of tokens seen.
pub fn count_tokens<'a, O>(
    input: &'a [u8],
    table: &mut Table<&'a [u8], u64, O>,
) -> Result<u64, TableError>
where
    O: KeyOps<&'a [u8]>,
{
    let mut seen = 0u64;
    for token in tokens(input) {
        *table.update(token)? += 1;
        seen += 1;
    }
    debug!(
        "counted {} tokens, {} distinct, {} slots",
        seen,
        table.len(),
        table.capacity()
    );
    Ok(seen)
}

/// Count every byte of `input` in `table`, whitespace included.
pub fn count_bytes<O>(input: &[u8], table: &mut Table<u8, u64, O>) -> Result<u64, TableError>
where
    O: KeyOps<u8>,
{
    for &b in input {
        *table.update(b)? += 1;
    }
    debug!(
        "counted {} bytes, {} distinct, {} slots",
        input.len(),
        table.len(),
        table.capacity()
    );
    Ok(input.len() as u64)
}
