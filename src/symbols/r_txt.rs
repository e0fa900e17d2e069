use super::{SymbolTable, SymbolValue};
use crate::error::{AaptError, IoContext, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a dependency `R.txt`.
///
/// Lines look like `int string app_name 0x7f0e001b` or
/// `int[] styleable ChartView { 0x7f030001, 0x7f030002 }`.
pub fn parse_r_txt(path: &Path) -> Result<SymbolTable> {
    let contents = fs::read_to_string(path).with_path(path)?;
    let table = parse_r_txt_str(path, &contents)?;
    debug!("Read {} symbols from {}", table.len(), path.display());
    Ok(table)
}

pub(crate) fn parse_r_txt_str(path: &Path, contents: &str) -> Result<SymbolTable> {
    let line_pattern =
        Regex::new(r"^(int|int\[\])\s+(\w+)\s+(\w+)\s+(.+)$").expect("valid R.txt pattern");

    let mut table = SymbolTable::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cap = line_pattern
            .captures(line)
            .ok_or_else(|| AaptError::InvalidRTxt {
                path: path.to_path_buf(),
                line: index + 1,
                content: line.to_string(),
            })?;

        let value = if &cap[1] == "int[]" {
            SymbolValue::IntArray
        } else {
            SymbolValue::Int
        };
        table.add(&cap[2], &cap[3], value);
    }

    Ok(table)
}
