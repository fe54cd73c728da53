//! Rules for uploaded files. Each one that reads the file does so through
//! [`Upload::rewound`], leaving it at the start for the next rule.

use common::formatters::formatted_list;
use common::recipients::insensitive::make_key;
use log::warn;

use super::{FailureCode, FieldError, Upload, ValidationContext, ValidationError, Verdict};

pub const SPREADSHEET_EXTENSIONS: &[&str] = &["csv", "tsv", "ods", "xls", "xlsx", "xlsm"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtension {
    allowed: Vec<String>,
    code: FailureCode,
    message: String,
}

impl FileExtension {
    pub fn new<I, S>(allowed: I, code: FailureCode, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
            code,
            message: message.into(),
        }
    }

    pub fn spreadsheet() -> Self {
        Self::new(
            SPREADSHEET_EXTENSIONS,
            FailureCode::UnrecognizedSpreadsheet,
            "Dit bestand moet een spreadsheet zijn dat Notify kan lezen",
        )
    }

    pub fn check(&self, upload: &Upload) -> Verdict {
        match upload.extension() {
            Some(extension) if self.allowed.contains(&extension) => Verdict::Pass,
            _ => Verdict::fail(self.code, &self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSize {
    max_bytes: u64,
    message: String,
}

impl FileSize {
    pub fn new(max_bytes: u64, message: impl Into<String>) -> Self {
        Self {
            max_bytes,
            message: message.into(),
        }
    }

    pub fn check(&self, upload: &Upload) -> Result<Verdict, ValidationError> {
        if upload.size()? > self.max_bytes {
            Ok(Verdict::Fail(
                FieldError::new(FailureCode::FileTooLarge, &self.message).stopping(),
            ))
        } else {
            Ok(Verdict::Pass)
        }
    }
}

/// Rejects SVGs containing a given element, such as embedded images or
/// live text, which the letter printer cannot handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    element: String,
    message: String,
}

impl SvgElement {
    pub fn new(element: &str, message: impl Into<String>) -> Self {
        Self {
            element: element.to_string(),
            message: message.into(),
        }
    }

    pub fn embedded_images() -> Self {
        Self::new(
            "image",
            "Dit SVG-bestand bevat een ingesloten afbeelding. Verwijder de afbeelding of upload een ander bestand",
        )
    }

    pub fn text() -> Self {
        Self::new(
            "text",
            "Dit SVG-bestand bevat tekst die niet naar vectoren is omgezet. Zet de tekst om naar vectoren of upload een ander bestand",
        )
    }

    pub fn check(&self, upload: &mut Upload) -> Result<Verdict, ValidationError> {
        let content = upload.read_all()?;
        let content = String::from_utf8_lossy(&content).to_lowercase();
        if content.contains(&format!("<{}", self.element.to_lowercase())) {
            Ok(Verdict::fail(FailureCode::DisallowedSvgElement, &self.message))
        } else {
            Ok(Verdict::Pass)
        }
    }
}

/// Sends the file to the antivirus scanner when scanning is enabled. An
/// infected file stops any further checks.
pub(super) fn scan_for_malware(
    upload: &mut Upload,
    ctx: &ValidationContext<'_>,
) -> Result<Verdict, ValidationError> {
    if !ctx.collaborators.antivirus_enabled {
        return Ok(Verdict::Pass);
    }

    let clean = {
        let mut guard = upload.rewound()?;
        let filename = guard.filename().to_string();
        ctx.collaborators.antivirus.scan(&mut *guard, &filename)?
    };
    if clean {
        return Ok(Verdict::Pass);
    }

    warn!(
        "Virus detected in {} uploaded for {}",
        upload.filename(),
        ctx.service_name
    );
    Ok(Verdict::Fail(
        FieldError::new(FailureCode::VirusDetected, "Dit bestand bevat een virus").stopping(),
    ))
}

/// Checks the header row of a CSV or TSV upload: no blank column names and
/// every required column present. Other spreadsheet formats pass untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetColumns {
    required: Vec<String>,
}

impl SpreadsheetColumns {
    pub fn new(required: Vec<String>) -> Self {
        Self { required }
    }

    pub fn check(&self, upload: &mut Upload) -> Result<Verdict, ValidationError> {
        let delimiter = match upload.extension().as_deref() {
            Some("csv") => b',',
            Some("tsv") => b'\t',
            _ => return Ok(Verdict::Pass),
        };

        let mut guard = upload.rewound()?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(&mut *guard);
        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => {
                warn!("Could not read spreadsheet header: {}", e);
                return Ok(Verdict::fail(
                    FailureCode::UnrecognizedSpreadsheet,
                    "Notify kan dit bestand niet lezen",
                ));
            }
        };

        if headers.is_empty() || headers.iter().any(|cell| cell.trim().is_empty()) {
            return Ok(Verdict::fail(
                FailureCode::InvalidFormat,
                "Vul een naam in voor elke kolom in de eerste rij",
            ));
        }

        let present: Vec<String> = headers.iter().map(make_key).collect();
        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|column| !present.contains(&make_key(column)))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            return Ok(Verdict::Pass);
        }

        let noun = if missing.len() == 1 { "de kolom" } else { "de kolommen" };
        Ok(Verdict::fail(
            FailureCode::InvalidFormat,
            format!("Het bestand mist {noun} {}", formatted_list(&missing, "en", "‘", "’")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{FakeAntivirus, Fakes};
    use std::io::{Read, Seek, SeekFrom};
    use std::sync::Arc;

    fn failure(verdict: Verdict) -> FieldError {
        match verdict {
            Verdict::Fail(error) => error,
            Verdict::Pass => panic!("expected a failure"),
        }
    }

    #[test]
    fn extension_check() {
        let rule = FileExtension::spreadsheet();
        assert_eq!(rule.check(&Upload::from_bytes("a.XLSX", b"").unwrap()), Verdict::Pass);
        let error = failure(rule.check(&Upload::from_bytes("a.pdf", b"").unwrap()));
        assert_eq!(error.code, FailureCode::UnrecognizedSpreadsheet);
    }

    #[test]
    fn size_check() {
        let upload = Upload::from_bytes("a.csv", &[b'x'; 11]).unwrap();
        assert_eq!(FileSize::new(11, "te groot").check(&upload).unwrap(), Verdict::Pass);
        let error = failure(FileSize::new(10, "te groot").check(&upload).unwrap());
        assert_eq!(error.code, FailureCode::FileTooLarge);
        assert!(error.stops_chain);
    }

    #[test]
    fn svg_elements_are_found_and_file_is_rewound() {
        let mut upload =
            Upload::from_bytes("logo.svg", b"<svg><image href='x.png'/></svg>").unwrap();
        let error = failure(SvgElement::embedded_images().check(&mut upload).unwrap());
        assert_eq!(error.code, FailureCode::DisallowedSvgElement);
        assert_eq!(SvgElement::text().check(&mut upload).unwrap(), Verdict::Pass);
        assert_eq!(upload.stream_position().unwrap(), 0);
    }

    #[test]
    fn svg_element_match_ignores_case() {
        let svg = b"<svg><IMAGE href='x.png'/><Text>Hallo</Text></svg>";
        let mut upload = Upload::from_bytes("logo.svg", svg).unwrap();
        for rule in [SvgElement::embedded_images(), SvgElement::text()] {
            let error = failure(rule.check(&mut upload).unwrap());
            assert_eq!(error.code, FailureCode::DisallowedSvgElement);
        }

        let mut content = Vec::new();
        upload.read_to_end(&mut content).unwrap();
        assert_eq!(content, svg);
    }

    #[test]
    fn malware_scan_only_when_enabled() {
        let mut fakes = Fakes::new();
        fakes.antivirus = Arc::new(FakeAntivirus {
            infected: true,
            ..FakeAntivirus::default()
        });
        let mut upload = Upload::from_bytes("a.csv", b"telefoonnummer\n0612345678\n").unwrap();

        let disabled = fakes.collaborators(false);
        let ctx = ValidationContext {
            collaborators: &disabled,
            service_name: "Test",
        };
        assert_eq!(scan_for_malware(&mut upload, &ctx).unwrap(), Verdict::Pass);
        assert!(fakes.antivirus.scanned.lock().unwrap().is_empty());

        let enabled = fakes.collaborators(true);
        let ctx = ValidationContext {
            collaborators: &enabled,
            service_name: "Test",
        };
        upload.seek(SeekFrom::Start(5)).unwrap();
        let error = failure(scan_for_malware(&mut upload, &ctx).unwrap());
        assert_eq!(error.code, FailureCode::VirusDetected);
        assert!(error.stops_chain);
        assert_eq!(
            fakes.antivirus.scanned.lock().unwrap()[0],
            b"telefoonnummer\n0612345678\n"
        );
        assert_eq!(upload.stream_position().unwrap(), 0);
    }

    #[test]
    fn spreadsheet_columns() {
        let rule = SpreadsheetColumns::new(vec!["telefoonnummer".to_string()]);

        let mut ok = Upload::from_bytes("a.csv", b"Telefoonnummer,naam\n0612345678,Jan\n").unwrap();
        assert_eq!(rule.check(&mut ok).unwrap(), Verdict::Pass);

        let mut blank = Upload::from_bytes("a.csv", b"telefoonnummer,,naam\n").unwrap();
        assert_eq!(failure(rule.check(&mut blank).unwrap()).code, FailureCode::InvalidFormat);

        let mut missing = Upload::from_bytes("a.tsv", b"naam\tdatum\n").unwrap();
        assert_eq!(
            failure(rule.check(&mut missing).unwrap()).message,
            "Het bestand mist de kolom ‘telefoonnummer’"
        );

        let mut workbook = Upload::from_bytes("a.xlsx", b"PK\x03\x04").unwrap();
        assert_eq!(rule.check(&mut workbook).unwrap(), Verdict::Pass);
    }
}
