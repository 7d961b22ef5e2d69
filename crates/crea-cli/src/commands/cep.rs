use crea_core::cep::{AddressLookup, Cep, ViaCepClient};
use crea_core::config::Config;
use crea_core::error::CreaError;

use crate::output;

pub fn run(config: &Config, input: &str) -> Result<(), CreaError> {
    let cep = Cep::parse(input)?;
    let client = ViaCepClient::new(&config.cep.base_url, config.cep.timeout())?;
    let address = client.lookup(&cep)?;
    output::table::print_address(&address);
    Ok(())
}
