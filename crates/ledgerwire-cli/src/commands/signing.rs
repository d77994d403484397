//! Signing framing commands.
//!
//! Each prints the exact bytes a signer signs, as uppercase hex.

use ledgerwire_codec::BinaryCodec;

use crate::error::CliError;
use crate::input::read_json;

pub fn single(input: Option<String>) -> Result<(), CliError> {
    let document = read_json(input)?;
    println!("{}", BinaryCodec::new().encode_for_signing(&document)?);
    Ok(())
}

pub fn multi(input: Option<String>, signer: String) -> Result<(), CliError> {
    let document = read_json(input)?;
    println!(
        "{}",
        BinaryCodec::new().encode_for_multi_signing(&document, &signer)?
    );
    Ok(())
}

pub fn claim(input: Option<String>) -> Result<(), CliError> {
    let claim = read_json(input)?;
    println!("{}", BinaryCodec::new().encode_for_signing_claim(&claim)?);
    Ok(())
}

pub fn batch(input: Option<String>, signer: Option<String>) -> Result<(), CliError> {
    let batch = read_json(input)?;
    let codec = BinaryCodec::new();
    let bytes = match signer {
        Some(signer) => codec.encode_for_batch_inner_multi_signing(&batch, &signer)?,
        None => codec.encode_for_batch_inner_signing(&batch)?,
    };
    println!("{}", hex::encode_upper(bytes));
    Ok(())
}
