use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Diagnostic {
    Info(String),
    Error(String),
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Info(m) | Diagnostic::Error(m) => m,
        }
    }
}
