//! Encode command implementation.

use ledgerwire_codec::BinaryCodec;

use crate::error::CliError;
use crate::input::read_json;

pub fn run(input: Option<String>) -> Result<(), CliError> {
    let document = read_json(input)?;
    println!("{}", BinaryCodec::new().encode(&document)?);
    Ok(())
}
