use std::fs;
use std::path::Path;

use crate::config::PagerConfig;
use crate::error::{PagingError, Result};
use crate::memory::BackingStore;

/// One step of an access trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(usize),
    Write(usize, u8),
}

pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<Access>> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_trace(&content)
}

/// Parse `r <addr>` / `w <addr> <value>` lines; `#` starts a comment
pub fn parse_trace(content: &str) -> Result<Vec<Access>> {
    let mut accesses = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let access = match tokens.as_slice() {
            ["r" | "R", addr] => Access::Read(parse_number(addr, line)?),
            ["w" | "W", addr, value] => {
                let addr = parse_number(addr, line)?;
                let value = parse_number(value, line)?;
                let value = u8::try_from(value).map_err(|_| PagingError::Parse {
                    line,
                    message: format!("value {} does not fit in a byte", value),
                })?;
                Access::Write(addr, value)
            }
            _ => {
                return Err(PagingError::Parse {
                    line,
                    message: format!(
                        "expected `r <addr>` or `w <addr> <value>`, got `{}`",
                        text
                    ),
                });
            }
        };
        accesses.push(access);
    }

    Ok(accesses)
}

fn parse_number(token: &str, line: usize) -> Result<usize> {
    let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => token.parse::<usize>(),
    };
    parsed.map_err(|_| PagingError::Parse {
        line,
        message: format!("invalid number: {}", token),
    })
}

/// Load a raw image covering the whole address space
pub fn load_backing_image<P: AsRef<Path>>(path: P, config: &PagerConfig) -> Result<BackingStore> {
    let bytes = fs::read(path.as_ref())?;
    BackingStore::from_bytes(bytes, config.page_size(), config.page_count())
}

pub fn write_backing_image<P: AsRef<Path>>(path: P, store: &BackingStore) -> Result<()> {
    fs::write(path.as_ref(), store.as_bytes())?;
    Ok(())
}

pub fn write_results<P: AsRef<Path>>(path: P, results: &[u8]) -> Result<()> {
    let output: Vec<String> = results.iter().map(|r| r.to_string()).collect();
    fs::write(path.as_ref(), output.join(" "))?;
    Ok(())
}

/// Deterministic byte source for seeding a backing store (splitmix64)
#[derive(Debug, Clone)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        SeedSequence { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    pub fn fill(&mut self, bytes: &mut [u8]) {
        for chunk in bytes.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}
