use crea_core::error::CreaError;
use crea_core::form::municipios::MUNICIPIOS_RJ;

pub fn run() -> Result<(), CreaError> {
    for name in MUNICIPIOS_RJ {
        println!("{name}");
    }
    eprintln!("{} municipalities", MUNICIPIOS_RJ.len());
    Ok(())
}
