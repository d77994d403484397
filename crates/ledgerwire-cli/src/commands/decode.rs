//! Decode command implementation.

use ledgerwire_codec::BinaryCodec;

use crate::error::CliError;
use crate::input::read_text;
use crate::output::format_json;

pub fn run(input: Option<String>, compact: bool) -> Result<(), CliError> {
    let hex = read_text(input)?;
    let document = BinaryCodec::new().decode(hex.trim())?;
    println!("{}", format_json(&document, compact));
    Ok(())
}
