use common::model::template::{address_line_keys, TemplateType};
use common::recipients::postal_address::MIN_LINES;

use super::{FieldView, FileField};
use crate::validation::{
    FailureCode, FileExtension, FileSize, Rule, SpreadsheetColumns, SvgElement, Upload,
    ValidationContext, ValidationError,
};

pub const CSV_MAX_BYTES: u64 = 10 * 1024 * 1024;
pub const LETTER_BRANDING_MAX_BYTES: u64 = 2 * 1024 * 1024;

/// A spreadsheet of recipients for a bulk send.
#[derive(Debug)]
pub struct CsvUploadForm {
    pub file: FileField,
}

impl CsvUploadForm {
    pub fn new(template_type: TemplateType) -> Self {
        let required_columns = match template_type {
            TemplateType::Letter => address_line_keys().into_iter().take(MIN_LINES).collect(),
            other => other.recipient_columns(),
        };
        let file = FileField::new(
            "file",
            "Bestand met ontvangers",
            "Kies een bestand om te uploaden",
            vec![
                Rule::FileExtension(FileExtension::spreadsheet()),
                Rule::FileSize(FileSize::new(
                    CSV_MAX_BYTES,
                    "Het bestand mag niet groter zijn dan 10MB",
                )),
                Rule::MalwareScan,
                Rule::SpreadsheetColumns(SpreadsheetColumns::new(required_columns)),
            ],
        );
        Self { file }
    }

    pub fn attach(&mut self, upload: Option<Upload>) {
        self.file.attach(upload);
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        self.file.validate(ctx)
    }

    pub fn view(&self) -> FieldView {
        self.file.view()
    }
}

/// An SVG logo printed on letters.
#[derive(Debug)]
pub struct LetterBrandingUploadForm {
    pub branding: FileField,
}

impl LetterBrandingUploadForm {
    pub fn new() -> Self {
        let branding = FileField::new(
            "branding",
            "Huisstijl voor brieven",
            "U moet een bestand uploaden",
            vec![
                Rule::FileExtension(FileExtension::new(
                    ["svg"],
                    FailureCode::InvalidFormat,
                    "Huisstijl moet een SVG bestand zijn",
                )),
                Rule::FileSize(FileSize::new(
                    LETTER_BRANDING_MAX_BYTES,
                    "Het bestand mag niet groter zijn dan 2MB",
                )),
                Rule::SvgElement(SvgElement::embedded_images()),
                Rule::SvgElement(SvgElement::text()),
                Rule::MalwareScan,
            ],
        );
        Self { branding }
    }

    pub fn attach(&mut self, upload: Option<Upload>) {
        self.branding.attach(upload);
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        self.branding.validate(ctx)
    }

    pub fn view(&self) -> FieldView {
        self.branding.view()
    }
}

impl Default for LetterBrandingUploadForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{FakeAntivirus, Fakes};
    use std::sync::Arc;

    fn codes(errors: &[crate::validation::FieldError]) -> Vec<FailureCode> {
        errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn csv_for_sms_needs_phone_column() {
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(true);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };

        let mut form = CsvUploadForm::new(TemplateType::Sms);
        form.attach(Some(Upload::from_bytes("lijst.csv", b"telefoonnummer,naam\n0612345678,Jan\n").unwrap()));
        assert!(form.validate(&ctx).unwrap());
        assert_eq!(fakes.antivirus.scanned.lock().unwrap().len(), 1);

        let mut form = CsvUploadForm::new(TemplateType::Sms);
        form.attach(Some(Upload::from_bytes("lijst.csv", b"naam\nJan\n").unwrap()));
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(codes(form.file.errors()), vec![FailureCode::InvalidFormat]);
    }

    #[test]
    fn rejected_file_is_not_scanned() {
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(true);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };

        let mut form = CsvUploadForm::new(TemplateType::Sms);
        form.attach(Some(Upload::from_bytes("lijst.pdf", b"%PDF-1.4").unwrap()));
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(codes(form.file.errors()), vec![FailureCode::UnrecognizedSpreadsheet]);

        let mut form = LetterBrandingUploadForm::new();
        form.attach(Some(Upload::from_bytes("logo.svg", b"<svg><image/></svg>").unwrap()));
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(codes(form.branding.errors()), vec![FailureCode::DisallowedSvgElement]);

        assert!(fakes.antivirus.scanned.lock().unwrap().is_empty());
    }

    #[test]
    fn csv_for_letters_needs_three_address_lines() {
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(false);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };
        let mut form = CsvUploadForm::new(TemplateType::Letter);
        form.attach(Some(
            Upload::from_bytes("brieven.csv", b"address_line_1,address_line_2,address_line_3\n")
                .unwrap(),
        ));
        assert!(form.validate(&ctx).unwrap());
    }

    #[test]
    fn infected_csv_stops_before_column_check() {
        let mut fakes = Fakes::new();
        fakes.antivirus = Arc::new(FakeAntivirus {
            infected: true,
            ..FakeAntivirus::default()
        });
        let collaborators = fakes.collaborators(true);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };
        let mut form = CsvUploadForm::new(TemplateType::Email);
        form.attach(Some(Upload::from_bytes("lijst.csv", b"naam\n").unwrap()));
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(codes(form.file.errors()), vec![FailureCode::VirusDetected]);
    }

    #[test]
    fn branding_must_be_plain_svg() {
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(false);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };

        let mut form = LetterBrandingUploadForm::new();
        form.attach(Some(Upload::from_bytes("logo.png", b"\x89PNG").unwrap()));
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(form.branding.errors()[0].message, "Huisstijl moet een SVG bestand zijn");

        let mut form = LetterBrandingUploadForm::new();
        form.attach(Some(
            Upload::from_bytes("logo.svg", b"<svg><text>Gemeente</text><image/></svg>").unwrap(),
        ));
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(
            codes(form.branding.errors()),
            vec![FailureCode::DisallowedSvgElement, FailureCode::DisallowedSvgElement]
        );

        let mut form = LetterBrandingUploadForm::new();
        form.attach(Some(Upload::from_bytes("logo.svg", b"<svg><path d='M0 0'/></svg>").unwrap()));
        assert!(form.validate(&ctx).unwrap());

        let mut form = LetterBrandingUploadForm::new();
        form.attach(None);
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(codes(form.branding.errors()), vec![FailureCode::EmptyValue]);
    }
}
