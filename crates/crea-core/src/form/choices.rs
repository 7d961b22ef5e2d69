use crate::error::CreaError;
use crate::parsing::normalize::fold_accents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of options offered to the operator.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Label as printed in the report.
    fn label(self) -> &'static str;

    /// Parse a label ignoring case and accents.
    fn from_str_loose(s: &str) -> Option<Self> {
        let wanted = fold_accents(s);
        Self::ALL
            .iter()
            .copied()
            .find(|c| fold_accents(c.label()) == wanted)
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }

    /// Like `from_str_loose`, naming `field` and the accepted labels on failure.
    fn parse_for(field: &str, value: &str) -> Result<Self, CreaError> {
        Self::from_str_loose(value).ok_or_else(|| CreaError::InvalidChoice {
            field: field.to_string(),
            value: value.to_string(),
            expected: Self::labels().join(", "),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreetType {
    #[default]
    Avenida,
    Rua,
    Rodovia,
    Estrada,
    Viela,
    Alameda,
}

impl Choice for StreetType {
    const ALL: &'static [Self] = &[
        StreetType::Avenida,
        StreetType::Rua,
        StreetType::Rodovia,
        StreetType::Estrada,
        StreetType::Viela,
        StreetType::Alameda,
    ];

    fn label(self) -> &'static str {
        match self {
            StreetType::Avenida => "Avenida",
            StreetType::Rua => "Rua",
            StreetType::Rodovia => "Rodovia",
            StreetType::Estrada => "Estrada",
            StreetType::Viela => "Viela",
            StreetType::Alameda => "Alameda",
        }
    }
}

/// Stage of the works.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Acabamento,
    #[serde(rename = "Licitação")]
    Licitacao,
    #[serde(rename = "Execução")]
    Execucao,
    #[serde(rename = "Conclusão")]
    Conclusao,
}

impl Choice for Phase {
    const ALL: &'static [Self] = &[
        Phase::Acabamento,
        Phase::Licitacao,
        Phase::Execucao,
        Phase::Conclusao,
    ];

    fn label(self) -> &'static str {
        match self {
            Phase::Acabamento => "Acabamento",
            Phase::Licitacao => "Licitação",
            Phase::Execucao => "Execução",
            Phase::Conclusao => "Conclusão",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureUnit {
    #[default]
    #[serde(rename = "m²", alias = "m2")]
    SquareMeter,
    #[serde(rename = "m³", alias = "m3")]
    CubicMeter,
    #[serde(rename = "un")]
    Unit,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ton")]
    Ton,
}

impl Choice for MeasureUnit {
    const ALL: &'static [Self] = &[
        MeasureUnit::SquareMeter,
        MeasureUnit::CubicMeter,
        MeasureUnit::Unit,
        MeasureUnit::Kilogram,
        MeasureUnit::Ton,
    ];

    fn label(self) -> &'static str {
        match self {
            MeasureUnit::SquareMeter => "m²",
            MeasureUnit::CubicMeter => "m³",
            MeasureUnit::Unit => "un",
            MeasureUnit::Kilogram => "kg",
            MeasureUnit::Ton => "ton",
        }
    }

    fn from_str_loose(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase().replace('2', "²").replace('3', "³");
        Self::ALL.iter().copied().find(|c| c.label() == wanted)
    }
}

/// Public, private or mixed works.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nature {
    #[default]
    #[serde(rename = "Pública")]
    Publica,
    Privada,
    Mista,
}

impl Choice for Nature {
    const ALL: &'static [Self] = &[Nature::Publica, Nature::Privada, Nature::Mista];

    fn label(self) -> &'static str {
        match self {
            Nature::Publica => "Pública",
            Nature::Privada => "Privada",
            Nature::Mista => "Mista",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionType {
    #[default]
    Residencial,
    Comercial,
    Industrial,
    Infraestrutura,
}

impl Choice for ConstructionType {
    const ALL: &'static [Self] = &[
        ConstructionType::Residencial,
        ConstructionType::Comercial,
        ConstructionType::Industrial,
        ConstructionType::Infraestrutura,
    ];

    fn label(self) -> &'static str {
        match self {
            ConstructionType::Residencial => "Residencial",
            ConstructionType::Comercial => "Comercial",
            ConstructionType::Industrial => "Industrial",
            ConstructionType::Infraestrutura => "Infraestrutura",
        }
    }
}

impl fmt::Display for StreetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ConstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_str_loose() {
        assert_eq!(Phase::from_str_loose("execucao"), Some(Phase::Execucao));
        assert_eq!(Phase::from_str_loose("LICITAÇÃO"), Some(Phase::Licitacao));
        assert_eq!(Phase::from_str_loose("demolição"), None);
    }

    #[test]
    fn test_unit_accepts_plain_digits() {
        assert_eq!(MeasureUnit::from_str_loose("M2"), Some(MeasureUnit::SquareMeter));
        assert_eq!(MeasureUnit::from_str_loose("m³"), Some(MeasureUnit::CubicMeter));
        assert_eq!(MeasureUnit::from_str_loose("Ton"), Some(MeasureUnit::Ton));
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Nature::Publica).unwrap(), "\"Pública\"");
        let unit: MeasureUnit = serde_json::from_str("\"m2\"").unwrap();
        assert_eq!(unit, MeasureUnit::SquareMeter);
    }

    #[test]
    fn test_defaults_are_first_options() {
        assert_eq!(StreetType::default(), StreetType::ALL[0]);
        assert_eq!(Phase::default(), Phase::ALL[0]);
        assert_eq!(ConstructionType::labels()[3], "Infraestrutura");
    }

    #[test]
    fn test_parse_for_lists_expected_labels() {
        match Nature::parse_for("natureza", "estatal") {
            Err(CreaError::InvalidChoice { field, expected, .. }) => {
                assert_eq!(field, "natureza");
                assert_eq!(expected, "Pública, Privada, Mista");
            }
            other => panic!("expected invalid choice, got {other:?}"),
        }
        assert_eq!(StreetType::parse_for("tipo", "rua").unwrap(), StreetType::Rua);
    }
}
