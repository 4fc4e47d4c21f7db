#![no_main]

use libfuzzer_sys::fuzz_target;
use stmt_stream::{Statement, StmtError};

// The first byte picks a base chunk size of 1 to 64 bytes. Each chunk then
// varies by up to 7 bytes depending on its own first byte, so token
// boundaries land in different places for similar inputs.
fn parse_varied(input: &[u8], chunk_base: usize) -> Result<Vec<Statement>, StmtError> {
    let mut driver = stmt_stream::driver()?;

    let mut rest = input;
    while !rest.is_empty() {
        let vary = match rest {
            [b, _, _, ..] if *b > 0 => usize::from(b % 8),
            _ => 0,
        };
        let len = (chunk_base + vary).min(rest.len());
        let (chunk, tail) = rest.split_at(len);
        rest = tail;

        let status = driver.feed(chunk, rest.is_empty())?;
        if status.is_final() {
            return stmt_stream::conclude(driver, status);
        }
    }

    let status = driver.finish()?;
    stmt_stream::conclude(driver, status)
}

fuzz_target!(|data: &[u8]| {
    let Some((&first, input)) = data.split_first() else {
        return;
    };
    let chunk_base = usize::from(first % 64) + 1;

    // Splitting must never change the statements or the error.
    let whole = stmt_stream::parse_chunked(input, input.len());
    assert_eq!(parse_varied(input, chunk_base), whole);
});
