pub mod cep;
pub mod extract;
pub mod form;
pub mod municipios;
pub mod rules;
