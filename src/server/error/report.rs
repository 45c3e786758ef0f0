use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Workbook generation failed.
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
