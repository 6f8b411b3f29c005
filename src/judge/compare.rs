use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Reads the next logical line, stripping the terminator and then
/// trailing space characters only. Tabs and other trailing whitespace
/// stay significant.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line.truncate(line.trim_end_matches(' ').len());
    Ok(Some(line))
}

/// Line-oriented comparison of the expected output against the produced
/// result. Returns `true` at the first line pair that differs after
/// trimming, short-circuiting the rest of both files.
///
/// End-of-stream on either side means "no more lines", so the presence
/// of a trailing newline never matters, and a file that is a strict
/// prefix of the other compares as not differing. The prefix leniency is
/// a deliberate, documented property of the comparator.
pub fn differs(expected_path: &Path, result_path: &Path) -> Result<bool> {
    let mut expected = BufReader::new(fs::File::open(expected_path)?);
    let mut result = BufReader::new(fs::File::open(result_path)?);

    loop {
        match (
            read_trimmed_line(&mut expected)?,
            read_trimmed_line(&mut result)?,
        ) {
            (Some(want), Some(got)) => {
                if want != got {
                    return Ok(true);
                }
            }
            _ => return Ok(false),
        }
    }
}
