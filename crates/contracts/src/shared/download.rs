//! Naming rules for binary downloads (PDF reports, payslips).

/// Backend path of the PDF rendition of a resource, e.g. `/documentos/15/pdf`.
pub fn pdf_path(recurso: &str, id: impl std::fmt::Display) -> String {
    format!("/{}/{}/pdf", recurso.trim_matches('/'), id)
}

/// File name offered in the save dialog, e.g. `documento_15.pdf`.
pub fn pdf_filename(prefijo: &str, id: impl std::fmt::Display) -> String {
    let prefijo: String = prefijo
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}_{}.pdf", prefijo, id)
}

pub const PDF_MIME: &str = "application/pdf";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_path() {
        assert_eq!(pdf_path("documentos", 15), "/documentos/15/pdf");
        assert_eq!(pdf_path("/nomina/liquidacion/", 7), "/nomina/liquidacion/7/pdf");
    }

    #[test]
    fn test_pdf_filename_is_deterministic() {
        assert_eq!(pdf_filename("documento", 15), "documento_15.pdf");
        assert_eq!(pdf_filename("Desprendible Nómina", "2026-10"), "desprendible_n_mina_2026-10.pdf");
        assert_eq!(pdf_filename("documento", 15), pdf_filename("documento", 15));
    }
}
