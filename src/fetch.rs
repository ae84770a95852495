use crate::adapter::adapt;
use crate::types::DrawResult;
use serde_json::Value;

/// Official results lookup page of the lottery authority.
pub const OFFICIAL_RESULTS_URL: &str = "https://loterias.caixa.gov.br/Paginas/Mega-Sena.aspx";

/// What the retrieval side currently holds for a draw.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Failed(String),
    Ready(Option<Value>),
}

impl FetchState {
    /// Builds the state from the `{ data, loading, error }` triple.
    /// Loading takes precedence over an error, an error over data.
    pub fn from_parts(data: Option<Value>, loading: bool, error: Option<String>) -> Self {
        if loading {
            FetchState::Loading
        } else if let Some(message) = error {
            FetchState::Failed(message)
        } else {
            FetchState::Ready(data)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Canonical result, only once data is ready. Partial or failed fetches
    /// are never adapted.
    pub fn draw_result(&self) -> Option<DrawResult> {
        match self {
            FetchState::Ready(Some(data)) => adapt(data),
            _ => None,
        }
    }
}
