use crate::parsing::normalize::fold_accents;

/// Municipalities of the state of Rio de Janeiro.
pub const MUNICIPIOS_RJ: [&str; 92] = [
    "Angra dos Reis",
    "Aperibé",
    "Araruama",
    "Areal",
    "Armação dos Búzios",
    "Arraial do Cabo",
    "Barra do Piraí",
    "Barra Mansa",
    "Belford Roxo",
    "Bom Jardim",
    "Bom Jesus do Itabapoana",
    "Cabo Frio",
    "Cachoeiras de Macacu",
    "Cambuci",
    "Campos dos Goytacazes",
    "Cantagalo",
    "Carapebus",
    "Cardoso Moreira",
    "Carmo",
    "Casimiro de Abreu",
    "Comendador Levy Gasparian",
    "Conceição de Macabu",
    "Cordeiro",
    "Duas Barras",
    "Duque de Caxias",
    "Engenheiro Paulo de Frontin",
    "Guapimirim",
    "Iguaba Grande",
    "Itaboraí",
    "Itaguaí",
    "Italva",
    "Itaocara",
    "Itaperuna",
    "Itatiaia",
    "Japeri",
    "Laje do Muriaé",
    "Macaé",
    "Macuco",
    "Magé",
    "Mangaratiba",
    "Maricá",
    "Mendes",
    "Mesquita",
    "Miguel Pereira",
    "Miracema",
    "Natividade",
    "Nilópolis",
    "Niterói",
    "Nova Friburgo",
    "Nova Iguaçu",
    "Paracambi",
    "Paraíba do Sul",
    "Paraty",
    "Paty do Alferes",
    "Petrópolis",
    "Pinheiral",
    "Piraí",
    "Porciúncula",
    "Porto Real",
    "Quatis",
    "Queimados",
    "Quissamã",
    "Resende",
    "Rio Bonito",
    "Rio Claro",
    "Rio das Flores",
    "Rio das Ostras",
    "Rio de Janeiro",
    "Santa Maria Madalena",
    "Santo Antônio de Pádua",
    "São Fidélis",
    "São Francisco de Itabapoana",
    "São Gonçalo",
    "São João da Barra",
    "São João de Meriti",
    "São José de Ubá",
    "São José do Vale do Rio Preto",
    "São Pedro da Aldeia",
    "São Sebastião do Alto",
    "Sapucaia",
    "Saquarema",
    "Seropédica",
    "Silva Jardim",
    "Sumidouro",
    "Tanguá",
    "Teresópolis",
    "Trajano de Moraes",
    "Três Rios",
    "Valença",
    "Varre-Sai",
    "Vassouras",
    "Volta Redonda",
];

/// Canonical spelling of a municipality, matched ignoring case and accents.
pub fn canonical_municipio(name: &str) -> Option<&'static str> {
    let wanted = fold_accents(name);
    MUNICIPIOS_RJ
        .iter()
        .copied()
        .find(|m| fold_accents(m) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ignores_case_and_accents() {
        assert_eq!(canonical_municipio("niteroi"), Some("Niterói"));
        assert_eq!(canonical_municipio("  SAO GONCALO "), Some("São Gonçalo"));
        assert_eq!(canonical_municipio("Itaguai"), Some("Itaguaí"));
        assert_eq!(canonical_municipio("São Paulo"), None);
    }

    #[test]
    fn test_no_duplicates() {
        let mut folded: Vec<String> = MUNICIPIOS_RJ.iter().map(|m| fold_accents(m)).collect();
        folded.sort();
        folded.dedup();
        assert_eq!(folded.len(), MUNICIPIOS_RJ.len());
    }
}
