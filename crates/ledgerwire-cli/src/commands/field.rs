//! Field command implementation.

use ledgerwire_codec::definitions;

use crate::error::CliError;
use crate::output::{field_json, field_table, format_json};

pub fn run(name: String, json_output: bool) -> Result<(), CliError> {
    let def = definitions()
        .field_by_name(&name)
        .ok_or(CliError::UnknownField(name))?;
    if json_output {
        println!("{}", format_json(&field_json(def), false));
    } else {
        println!("{}", field_table(def));
    }
    Ok(())
}
