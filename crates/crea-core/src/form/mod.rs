pub mod choices;
pub mod municipios;

use crate::cep::{AddressLookup, Cep};
use crate::error::CreaError;
use choices::{ConstructionType, MeasureUnit, Nature, Phase, StreetType};
use serde::{Deserialize, Serialize};

/// Values entered by the operator for one inspection, before validation.
///
/// This is the whole per-session state of the form; callers own it and
/// pass it explicitly to the lookup and validation steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default = "InspectionForm::new")]
pub struct InspectionForm {
    pub latitude: String,
    pub longitude: String,
    #[serde(alias = "tipo_logradouro")]
    pub street_type: StreetType,
    #[serde(alias = "logradouro")]
    pub street_name: String,
    #[serde(alias = "numero")]
    pub number: String,
    #[serde(alias = "bairro")]
    pub neighborhood: String,
    #[serde(alias = "municipio")]
    pub municipality: String,
    pub cep: String,
    #[serde(alias = "nome_contratante")]
    pub contractor_name: String,
    #[serde(alias = "cpf_cnpj")]
    pub tax_id: String,
    #[serde(alias = "caracteristica")]
    pub characteristic: String,
    #[serde(alias = "fase")]
    pub phase: Phase,
    #[serde(alias = "num_pavimentos")]
    pub floors: u32,
    #[serde(alias = "quantificacao")]
    pub quantification: String,
    #[serde(alias = "unidade_medida")]
    pub unit: MeasureUnit,
    #[serde(alias = "natureza")]
    pub nature: Nature,
    #[serde(alias = "tipo_construcao")]
    pub construction_type: ConstructionType,
}

/// A form that passed validation; the only input the report renderer takes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionRecord {
    pub latitude: String,
    pub longitude: String,
    pub street_type: StreetType,
    pub street_name: String,
    pub number: String,
    pub neighborhood: String,
    pub municipality: String,
    pub cep: String,
    pub contractor_name: String,
    pub tax_id: String,
    pub characteristic: String,
    pub phase: Phase,
    pub floors: u32,
    pub quantification: String,
    pub unit: MeasureUnit,
    pub nature: Nature,
    pub construction_type: ConstructionType,
}

/// Result of a CEP lookup. Failures are reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Street and/or neighborhood were replaced.
    Applied { street: String, neighborhood: String },
    /// The form was left unchanged.
    Failed(String),
}

impl InspectionForm {
    pub fn new() -> Self {
        InspectionForm {
            municipality: municipios::MUNICIPIOS_RJ[0].to_string(),
            ..Default::default()
        }
    }

    /// Look up `self.cep` and patch street name and neighborhood.
    ///
    /// Only non-empty values from the lookup are written; every other field
    /// is left as the operator typed it. A malformed CEP fails before any
    /// call to `lookup`.
    pub fn fill_from_cep(&mut self, lookup: &dyn AddressLookup) -> LookupOutcome {
        let cep = match Cep::parse(&self.cep) {
            Ok(cep) => cep,
            Err(e) => {
                log::warn!("{e}");
                return LookupOutcome::Failed(e.to_string());
            }
        };

        match lookup.lookup(&cep) {
            Ok(address) => {
                if !address.street.trim().is_empty() {
                    self.street_name = address.street.trim().to_string();
                }
                if !address.neighborhood.trim().is_empty() {
                    self.neighborhood = address.neighborhood.trim().to_string();
                }
                log::info!("CEP {} resolved to {}", cep.formatted(), address.street);
                LookupOutcome::Applied {
                    street: self.street_name.clone(),
                    neighborhood: self.neighborhood.clone(),
                }
            }
            Err(e) => {
                log::warn!("CEP lookup failed: {e}");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }

    /// Names of mandatory fields that are blank.
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("Logradouro", &self.street_name),
            ("Nome do contratante", &self.contractor_name),
            ("CPF/CNPJ", &self.tax_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Gate for rendering: fails unless street name, contractor name and
    /// tax ID are all filled in.
    pub fn validate(&self) -> Result<InspectionRecord, CreaError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CreaError::Validation { missing });
        }

        let municipality = match municipios::canonical_municipio(&self.municipality) {
            Some(canonical) => canonical.to_string(),
            None => {
                if !self.municipality.trim().is_empty() {
                    log::warn!(
                        "'{}' is not a municipality of Rio de Janeiro; keeping it as typed",
                        self.municipality.trim()
                    );
                }
                self.municipality.trim().to_string()
            }
        };

        let t = |s: &String| s.trim().to_string();
        Ok(InspectionRecord {
            latitude: t(&self.latitude),
            longitude: t(&self.longitude),
            street_type: self.street_type,
            street_name: t(&self.street_name),
            number: t(&self.number),
            neighborhood: t(&self.neighborhood),
            municipality,
            cep: t(&self.cep),
            contractor_name: t(&self.contractor_name),
            tax_id: t(&self.tax_id),
            characteristic: t(&self.characteristic),
            phase: self.phase,
            floors: self.floors,
            quantification: t(&self.quantification),
            unit: self.unit,
            nature: self.nature,
            construction_type: self.construction_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cep::Address;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    struct FixedLookup {
        result: Result<Address, String>,
        calls: Cell<usize>,
    }

    impl AddressLookup for FixedLookup {
        fn lookup(&self, _cep: &Cep) -> Result<Address, CreaError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone().map_err(CreaError::Lookup)
        }
    }

    fn filled_form() -> InspectionForm {
        InspectionForm {
            street_name: "Rio Branco".into(),
            number: "1".into(),
            contractor_name: "Construtora Alfa".into(),
            tax_id: "12.345.678/0001-90".into(),
            cep: "20.040-020".into(),
            ..InspectionForm::new()
        }
    }

    #[test]
    fn test_missing_contractor_is_rejected() {
        let form = InspectionForm {
            contractor_name: "   ".into(),
            ..filled_form()
        };
        match form.validate() {
            Err(CreaError::Validation { missing }) => {
                assert_eq!(missing, vec!["Nome do contratante".to_string()])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_all_mandatory_fields_reported() {
        let missing = InspectionForm::new().missing_fields();
        assert_eq!(missing, vec!["Logradouro", "Nome do contratante", "CPF/CNPJ"]);
    }

    #[test]
    fn test_validate_trims_and_canonicalizes() {
        let form = InspectionForm {
            municipality: "niteroi".into(),
            street_name: "  Rio Branco ".into(),
            ..filled_form()
        };
        let record = form.validate().unwrap();
        assert_eq!(record.street_name, "Rio Branco");
        assert_eq!(record.municipality, "Niterói");
    }

    #[test]
    fn test_lookup_overwrites_only_street_and_neighborhood() {
        let mut form = InspectionForm {
            neighborhood: "Antigo".into(),
            characteristic: "Edifício".into(),
            ..filled_form()
        };
        let lookup = FixedLookup {
            result: Ok(Address {
                cep: "20040-020".into(),
                street: "Praça Pio X".into(),
                neighborhood: "Centro".into(),
                city: "Rio de Janeiro".into(),
                state: "RJ".into(),
            }),
            calls: Cell::new(0),
        };
        let before = form.clone();

        let outcome = form.fill_from_cep(&lookup);

        assert_eq!(
            outcome,
            LookupOutcome::Applied {
                street: "Praça Pio X".into(),
                neighborhood: "Centro".into()
            }
        );
        assert_eq!(
            form,
            InspectionForm {
                street_name: "Praça Pio X".into(),
                neighborhood: "Centro".into(),
                ..before
            }
        );
    }

    #[test]
    fn test_empty_lookup_values_do_not_clear_input() {
        let mut form = InspectionForm {
            neighborhood: "Saúde".into(),
            ..filled_form()
        };
        let lookup = FixedLookup {
            result: Ok(Address {
                street: "Rua Sacadura Cabral".into(),
                ..Default::default()
            }),
            calls: Cell::new(0),
        };
        form.fill_from_cep(&lookup);
        assert_eq!(form.street_name, "Rua Sacadura Cabral");
        assert_eq!(form.neighborhood, "Saúde");
    }

    #[test]
    fn test_invalid_cep_skips_lookup() {
        let mut form = InspectionForm {
            cep: "1234".into(),
            ..filled_form()
        };
        let before = form.clone();
        let lookup = FixedLookup {
            result: Ok(Address::default()),
            calls: Cell::new(0),
        };
        let outcome = form.fill_from_cep(&lookup);
        assert!(matches!(outcome, LookupOutcome::Failed(_)));
        assert_eq!(lookup.calls.get(), 0);
        assert_eq!(form, before);
    }

    #[test]
    fn test_failed_lookup_leaves_form_unchanged() {
        let mut form = filled_form();
        let before = form.clone();
        let lookup = FixedLookup {
            result: Err("connection refused".into()),
            calls: Cell::new(0),
        };
        let outcome = form.fill_from_cep(&lookup);
        assert_eq!(lookup.calls.get(), 1);
        assert!(matches!(outcome, LookupOutcome::Failed(msg) if msg.contains("connection refused")));
        assert_eq!(form, before);
    }

    #[test]
    fn test_json_accepts_portuguese_keys() {
        let json = r#"{
            "logradouro": "Rio Branco",
            "nome_contratante": "Alfa",
            "cpf_cnpj": "123",
            "fase": "Execução",
            "num_pavimentos": 4,
            "unidade_medida": "m2"
        }"#;
        let form: InspectionForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.street_name, "Rio Branco");
        assert_eq!(form.phase, Phase::Execucao);
        assert_eq!(form.floors, 4);
        assert_eq!(form.unit, MeasureUnit::SquareMeter);
        assert!(form.validate().is_ok());
    }
}
