use crate::error::CreaError;
use crate::form::choices::Choice;
use crate::form::InspectionRecord;
use crate::pdf::font::FontStyle;
use crate::pdf::raster::RasterImage;
use crate::pdf::{
    Advance, Align, DocumentInfo, ImageHandle, PageDecorator, PageNumberFooter, PdfCanvas,
    A4_WIDTH_MM,
};
use crate::report::{Diagnostic, RenderedReport};
use std::path::Path;

pub const TITLE: &str = "Relatório de Fiscalização";
pub const AUTHOR: &str = "Sistema de Fiscalização";

const LOGO_WIDTH_MM: f32 = 40.0;
const LOGO_TOP_MM: f32 = 10.0;
const ROW_HEIGHT: f32 = 10.0;

struct InspectionHeader {
    logo: Option<ImageHandle>,
}

impl PageDecorator for InspectionHeader {
    fn header(&self, canvas: &mut PdfCanvas) {
        if let Some(logo) = self.logo {
            canvas.image(logo, (A4_WIDTH_MM - LOGO_WIDTH_MM) / 2.0, LOGO_TOP_MM, LOGO_WIDTH_MM);
            canvas.ln(Some(20.0));
        }
        canvas.set_font(FontStyle::Bold, 16.0);
        canvas.cell(0.0, 10.0, TITLE, false, Advance::NextLine, Align::Center);
        canvas.ln(Some(10.0));
    }

    fn footer(&self, canvas: &mut PdfCanvas) {
        PageNumberFooter.footer(canvas);
    }
}

/// Render one validated inspection as a PDF.
///
/// Logo problems are returned as diagnostics and the report is produced
/// without the logo.
pub fn render_inspection(
    record: &InspectionRecord,
    logo_path: Option<&Path>,
) -> Result<RenderedReport, CreaError> {
    let mut diagnostics = Vec::new();
    let logo = logo_path.and_then(|path| load_logo(path, &mut diagnostics));

    let mut canvas = PdfCanvas::new().with_info(DocumentInfo {
        title: Some(TITLE.to_string()),
        author: Some(AUTHOR.to_string()),
    });
    let logo = logo.map(|image| canvas.add_image(image));
    let mut canvas = canvas.with_decorator(Box::new(InspectionHeader { logo }));

    canvas.set_font(FontStyle::Regular, 12.0);
    canvas.add_page();

    section(
        &mut canvas,
        "ENDEREÇO DO EMPREENDIMENTO",
        40.0,
        &[
            (
                "Logradouro:",
                format!(
                    "{} {}, {}",
                    record.street_type.label(),
                    record.street_name,
                    record.number
                ),
            ),
            ("Bairro:", record.neighborhood.clone()),
            ("Município:", record.municipality.clone()),
            ("CEP:", record.cep.clone()),
            (
                "Coordenadas:",
                format!("Lat: {}, Long: {}", record.latitude, record.longitude),
            ),
        ],
    );
    canvas.ln(Some(10.0));

    section(
        &mut canvas,
        "IDENTIFICAÇÃO DO CONTRATANTE",
        40.0,
        &[
            ("Nome:", record.contractor_name.clone()),
            ("CPF/CNPJ:", record.tax_id.clone()),
        ],
    );
    canvas.ln(Some(10.0));

    section(
        &mut canvas,
        "ATIVIDADE DESENVOLVIDA",
        60.0,
        &[
            ("Característica:", record.characteristic.clone()),
            ("Fase:", record.phase.label().to_string()),
            ("Nº de pavimentos:", record.floors.to_string()),
            ("Quantificação:", record.quantification.clone()),
            ("Unidade de medida:", record.unit.label().to_string()),
            ("Natureza:", record.nature.label().to_string()),
            ("Tipo de Construção:", record.construction_type.label().to_string()),
        ],
    );

    let bytes = canvas.finish()?;
    Ok(RenderedReport { bytes, diagnostics })
}

fn section(canvas: &mut PdfCanvas, heading: &str, label_width: f32, rows: &[(&str, String)]) {
    canvas.set_font(FontStyle::Bold, 14.0);
    canvas.cell(0.0, ROW_HEIGHT, heading, false, Advance::NextLine, Align::Left);
    canvas.set_font(FontStyle::Regular, 12.0);
    for (label, value) in rows {
        canvas.cell(label_width, ROW_HEIGHT, label, false, Advance::Right, Align::Left);
        canvas.cell(0.0, ROW_HEIGHT, value, false, Advance::NextLine, Align::Left);
    }
}

fn load_logo(path: &Path, diagnostics: &mut Vec<Diagnostic>) -> Option<RasterImage> {
    if !path.exists() {
        let diagnostic = Diagnostic::LogoMissing {
            path: path.to_path_buf(),
        };
        log::warn!("{diagnostic}");
        diagnostics.push(diagnostic);
        return None;
    }

    let decoded = std::fs::read(path)
        .map_err(CreaError::from)
        .and_then(|bytes| RasterImage::decode(&bytes));
    match decoded {
        Ok(image) => Some(image),
        Err(e) => {
            let diagnostic = Diagnostic::LogoUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
            log::error!("{diagnostic}");
            diagnostics.push(diagnostic);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::InspectionForm;
    use crate::pdf::page_texts;
    use std::io::Write;

    fn record() -> InspectionRecord {
        InspectionForm {
            latitude: "-22.90".into(),
            longitude: "-43.17".into(),
            street_name: "Rio Branco".into(),
            number: "156".into(),
            neighborhood: "Centro".into(),
            municipality: "Rio de Janeiro".into(),
            cep: "20040-020".into(),
            contractor_name: "Construtora Alfa".into(),
            tax_id: "12.345.678/0001-90".into(),
            floors: 12,
            ..InspectionForm::new()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_sections_in_order() {
        let report = render_inspection(&record(), None).unwrap();
        assert!(report.diagnostics.is_empty());
        let pages = page_texts(&report.bytes).unwrap();
        assert_eq!(pages.len(), 1);
        let texts = &pages[0];
        assert_eq!(texts[0], TITLE);
        let pos = |needle: &str| texts.iter().position(|t| t == needle).unwrap();
        assert!(pos("ENDEREÇO DO EMPREENDIMENTO") < pos("IDENTIFICAÇÃO DO CONTRATANTE"));
        assert!(pos("IDENTIFICAÇÃO DO CONTRATANTE") < pos("ATIVIDADE DESENVOLVIDA"));
        assert_eq!(texts[pos("Logradouro:") + 1], "Avenida Rio Branco, 156");
        assert_eq!(texts[pos("Coordenadas:") + 1], "Lat: -22.90, Long: -43.17");
        assert_eq!(texts[pos("Nº de pavimentos:") + 1], "12");
        assert_eq!(texts[pos("Unidade de medida:") + 1], "m²");
        assert_eq!(texts.last().map(String::as_str), Some("Página 1"));
    }

    #[test]
    fn test_missing_logo_is_a_warning() {
        let report = render_inspection(&record(), Some(Path::new("/nonexistent/10.png"))).unwrap();
        assert!(!report.bytes.is_empty());
        assert!(matches!(
            report.diagnostics.as_slice(),
            [Diagnostic::LogoMissing { .. }]
        ));
    }

    #[test]
    fn test_undecodable_logo_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"not really a png").unwrap();
        let report = render_inspection(&record(), Some(file.path())).unwrap();
        assert!(!report.bytes.is_empty());
        assert!(matches!(
            report.diagnostics.as_slice(),
            [Diagnostic::LogoUnreadable { .. }]
        ));
        assert_eq!(page_texts(&report.bytes).unwrap()[0][0], TITLE);
    }

    #[test]
    fn test_valid_logo_is_drawn() {
        let img = image::RgbImage::from_pixel(8, 4, image::Rgb([200, 0, 0]));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(png.get_ref()).unwrap();

        let report = render_inspection(&record(), Some(file.path())).unwrap();
        assert!(report.diagnostics.is_empty());
        let doc = lopdf::Document::load_mem(&report.bytes).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content =
            lopdf::content::Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        assert!(content.operations.iter().any(|op| op.operator == "Do"));
    }
}
