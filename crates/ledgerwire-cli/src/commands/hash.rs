//! Hash command implementation.

use ledgerwire_codec::BinaryCodec;

use crate::error::CliError;
use crate::input::read_json;

pub fn run(input: Option<String>) -> Result<(), CliError> {
    let document = read_json(input)?;
    let id = BinaryCodec::new().transaction_hash(&document)?;
    println!("{}", hex::encode_upper(id));
    Ok(())
}
