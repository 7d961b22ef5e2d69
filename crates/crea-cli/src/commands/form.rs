use crea_core::cep::ViaCepClient;
use crea_core::config::Config;
use crea_core::error::CreaError;
use crea_core::form::choices::{
    Choice, ConstructionType, MeasureUnit, Nature, Phase, StreetType,
};
use crea_core::form::municipios::MUNICIPIOS_RJ;
use crea_core::form::{InspectionForm, LookupOutcome};
use crea_core::report::inspection::render_inspection;
use crea_core::report::INSPECTION_REPORT_FILENAME;
use dialoguer::{Confirm, Input, Select};

use crate::FormArgs;

pub fn run(config: &Config, args: FormArgs) -> Result<(), CreaError> {
    let mut form = match args.from.as_deref() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => InspectionForm::new(),
    };
    apply_flags(&mut form, &args)?;

    if args.interactive {
        prompt_form(&mut form, config, args.buscar_cep)?;
    } else if args.buscar_cep {
        lookup_cep(&mut form, config);
    }

    let record = form.validate()?;

    let logo = args.logo.as_deref().unwrap_or(config.logo_path.as_path());
    let report = render_inspection(&record, Some(logo))?;
    for diagnostic in &report.diagnostics {
        eprintln!("  warning: {diagnostic}");
    }

    let path = match args.out {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.output_dir)?;
            config.output_dir.join(INSPECTION_REPORT_FILENAME)
        }
    };
    std::fs::write(&path, &report.bytes)?;
    log::info!("report written to {}", path.display());
    eprintln!("Report written to {}", path.display());
    Ok(())
}

fn apply_flags(form: &mut InspectionForm, args: &FormArgs) -> Result<(), CreaError> {
    let text_fields = [
        (&args.latitude, &mut form.latitude),
        (&args.longitude, &mut form.longitude),
        (&args.logradouro, &mut form.street_name),
        (&args.numero, &mut form.number),
        (&args.bairro, &mut form.neighborhood),
        (&args.municipio, &mut form.municipality),
        (&args.cep, &mut form.cep),
        (&args.contratante, &mut form.contractor_name),
        (&args.cpf_cnpj, &mut form.tax_id),
        (&args.caracteristica, &mut form.characteristic),
        (&args.quantificacao, &mut form.quantification),
    ];
    for (flag, field) in text_fields {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }

    if let Some(ref v) = args.tipo_logradouro {
        form.street_type = StreetType::parse_for("tipo de logradouro", v)?;
    }
    if let Some(ref v) = args.fase {
        form.phase = Phase::parse_for("fase", v)?;
    }
    if let Some(n) = args.pavimentos {
        form.floors = n;
    }
    if let Some(ref v) = args.unidade {
        form.unit = MeasureUnit::parse_for("unidade de medida", v)?;
    }
    if let Some(ref v) = args.natureza {
        form.nature = Nature::parse_for("natureza", v)?;
    }
    if let Some(ref v) = args.tipo_construcao {
        form.construction_type = ConstructionType::parse_for("tipo de construção", v)?;
    }
    Ok(())
}

fn lookup_cep(form: &mut InspectionForm, config: &Config) {
    let client = match ViaCepClient::new(&config.cep.base_url, config.cep.timeout()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("  warning: {e}");
            return;
        }
    };
    match form.fill_from_cep(&client) {
        LookupOutcome::Applied {
            street,
            neighborhood,
        } => eprintln!("Endereço encontrado: {street}, {neighborhood}"),
        LookupOutcome::Failed(reason) => eprintln!("  warning: {reason}"),
    }
}

fn prompt_error(e: dialoguer::Error) -> CreaError {
    CreaError::Io(e.into())
}

fn prompt_text(prompt: &str, current: &str) -> Result<String, CreaError> {
    Input::<String>::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_choice<C: Choice + PartialEq>(prompt: &str, current: C) -> Result<C, CreaError> {
    let labels = C::labels();
    let default = C::ALL.iter().position(|c| *c == current).unwrap_or(0);
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()
        .map_err(prompt_error)?;
    Ok(C::ALL[idx])
}

/// Ask for every field, starting from the values already in `form`.
/// The CEP comes first so a lookup can prefill street and neighborhood.
fn prompt_form(
    form: &mut InspectionForm,
    config: &Config,
    lookup: bool,
) -> Result<(), CreaError> {
    println!("ENDEREÇO DO EMPREENDIMENTO");
    form.cep = prompt_text("CEP", &form.cep)?;
    let lookup = lookup
        || (!form.cep.trim().is_empty()
            && Confirm::new()
                .with_prompt("Buscar endereço pelo CEP?")
                .default(true)
                .interact()
                .map_err(prompt_error)?);
    if lookup {
        lookup_cep(form, config);
    }
    form.latitude = prompt_text("Latitude", &form.latitude)?;
    form.longitude = prompt_text("Longitude", &form.longitude)?;
    form.street_type = prompt_choice("Tipo de logradouro", form.street_type)?;
    form.street_name = prompt_text("Logradouro", &form.street_name)?;
    form.number = prompt_text("Número", &form.number)?;
    form.neighborhood = prompt_text("Bairro", &form.neighborhood)?;
    let current = MUNICIPIOS_RJ
        .iter()
        .position(|m| *m == form.municipality)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Município")
        .items(&MUNICIPIOS_RJ)
        .default(current)
        .interact()
        .map_err(prompt_error)?;
    form.municipality = MUNICIPIOS_RJ[idx].to_string();

    println!("IDENTIFICAÇÃO DO CONTRATANTE");
    form.contractor_name = prompt_text("Nome do contratante", &form.contractor_name)?;
    form.tax_id = prompt_text("CPF/CNPJ", &form.tax_id)?;

    println!("ATIVIDADE DESENVOLVIDA");
    form.characteristic = prompt_text("Característica", &form.characteristic)?;
    form.phase = prompt_choice("Fase", form.phase)?;
    form.floors = Input::<u32>::new()
        .with_prompt("Nº de pavimentos")
        .default(form.floors)
        .interact_text()
        .map_err(prompt_error)?;
    form.quantification = prompt_text("Quantificação", &form.quantification)?;
    form.unit = prompt_choice("Unidade de medida", form.unit)?;
    form.nature = prompt_choice("Natureza", form.nature)?;
    form.construction_type = prompt_choice("Tipo de construção", form.construction_type)?;
    Ok(())
}
