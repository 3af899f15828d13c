//! Error types for the conversion pipeline.

use thiserror::Error;

/// File-level failures that abort a conversion.
///
/// Per-event problems (bad dates, missing fields) never show up here; they
/// degrade to empty output fields instead.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No file supplied")]
    NoFile,

    #[error("File content is empty")]
    EmptyContent,

    #[error("ICS decode error: {0}")]
    Decode(String),

    #[error("No VEVENT components found")]
    NoEvents,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Message shown to the person who uploaded the file.
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::NoFile => "Nenhum arquivo enviado.".to_string(),
            ConvertError::EmptyContent => {
                "O arquivo .ics está vazio ou não pôde ser lido.".to_string()
            }
            ConvertError::Decode(detail) => format!(
                "Erro ao processar o ficheiro .ics: {detail}. Verifique se o formato do ficheiro é válido."
            ),
            ConvertError::NoEvents => "Nenhum evento válido encontrado no ficheiro .ics.".to_string(),
            ConvertError::Internal(detail) | ConvertError::Config(detail) => {
                format!("Erro no servidor: {detail}")
            }
            ConvertError::Io(e) => format!("Erro no servidor: {e}"),
        }
    }

    /// Whether the failure was caused by the input rather than by us.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConvertError::NoFile
                | ConvertError::EmptyContent
                | ConvertError::Decode(_)
                | ConvertError::NoEvents
        )
    }
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
