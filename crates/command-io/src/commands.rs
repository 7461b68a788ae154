// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Command stream parsing.
//!
//! # Format
//! One command per line, whitespace-separated:
//! ```text
//! RQ 1 1 0 2      request (1, 0, 2) for customer 1
//! RL 2 4 0 0      release (4, 0, 0) from customer 2
//! *               dump the state
//! ```
//!
//! Blank lines are skipped but still counted, so line numbers in errors
//! match the file.

use crate::InputError;
use allocation_engine::Command;
use resource_model::{CustomerId, ResourceVector};
use std::io::BufRead;
use std::path::Path;

/// Default command filename.
pub const COMMANDS_FILE: &str = "commands.txt";

/// A parsed command with its 1-based source line.
pub type NumberedCommand = (usize, Command);

/// Parses one line. Returns `Ok(None)` for a blank line.
///
/// `width` is the number of resource types; request and release lines
/// must carry exactly that many counts.
pub fn parse_command(text: &str, line: usize, width: usize) -> Result<Option<Command>, InputError> {
    let malformed = |detail: String| InputError::MalformedCommand { line, detail };

    let mut tokens = text.split_whitespace();
    let Some(tag) = tokens.next() else {
        return Ok(None);
    };

    let is_request = match tag {
        "*" => {
            return match tokens.next() {
                None => Ok(Some(Command::Dump)),
                Some(extra) => Err(malformed(format!("unexpected '{extra}' after '*'"))),
            };
        }
        "RQ" => true,
        "RL" => false,
        other => {
            return Err(malformed(format!(
                "unknown command '{other}'; expected 'RQ', 'RL', or '*'"
            )))
        }
    };

    let customer = tokens
        .next()
        .ok_or_else(|| malformed(format!("'{tag}' is missing a customer ID")))?;
    let customer = customer
        .parse::<usize>()
        .map(CustomerId)
        .map_err(|_| malformed(format!("invalid customer ID '{customer}'")))?;

    let counts = tokens
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| malformed(format!("'{token}' is not a non-negative count")))
        })
        .collect::<Result<Vec<u32>, _>>()?;
    if counts.len() != width {
        return Err(malformed(format!(
            "expected {width} resource counts, found {}",
            counts.len()
        )));
    }

    let delta = ResourceVector::new(counts);
    Ok(Some(if is_request {
        Command::Request { customer, delta }
    } else {
        Command::Release { customer, delta }
    }))
}

/// Iterates the commands of a buffered reader.
///
/// Each item is either a numbered command or the error for that line.
/// Iteration continues past malformed lines; the caller decides whether
/// to stop. A read failure ends the iteration after yielding the error.
pub struct CommandReader<R> {
    reader: R,
    width: usize,
    line: usize,
    buf: String,
    done: bool,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R, width: usize) -> Self {
        Self {
            reader,
            width,
            line: 0,
            buf: String::new(),
            done: false,
        }
    }
}

impl CommandReader<std::io::BufReader<std::fs::File>> {
    /// Opens a command file.
    pub fn open(path: &Path, width: usize) -> Result<Self, InputError> {
        let file = std::fs::File::open(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("reading commands from '{}'", path.display());
        Ok(Self::new(std::io::BufReader::new(file), width))
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<NumberedCommand, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    match parse_command(&self.buf, self.line, self.width) {
                        Ok(Some(command)) => return Some(Ok((self.line, command))),
                        Ok(None) => continue,
                        Err(e) => return Some(Err(e)),
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(InputError::Read(e)));
                }
            }
        }
        None
    }
}

/// Parses a whole command text.
pub fn parse_commands(
    content: &str,
    width: usize,
) -> impl Iterator<Item = Result<NumberedCommand, InputError>> + '_ {
    CommandReader::new(content.as_bytes(), width)
}
