/*
 * Responsibility
 * - async-graphql の Response を、クライアント向けの JSON 形に整形する
 *   { data, errors: [{ code, message, detail?, details? }] }
 * - code / detail / details は ApiError が error extensions に載せたもの
 */
use async_graphql::{ServerError, Value};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GraphqlBody {
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl From<ServerError> for ErrorPayload {
    fn from(err: ServerError) -> Self {
        let ext = err.extensions.as_ref();

        let code = ext
            .and_then(|e| e.get("code"))
            .and_then(|v| match v {
                Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
                _ => None,
            })
            // No code: parse/validation errors have no path, anything else is ours.
            .unwrap_or(if err.path.is_empty() { 400 } else { 500 });

        let detail = ext.and_then(|e| e.get("detail")).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            _ => None,
        });

        let details = match ext.and_then(|e| e.get("details")) {
            Some(Value::List(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            code,
            message: err.message,
            detail,
            details,
        }
    }
}

impl From<async_graphql::Response> for GraphqlBody {
    fn from(res: async_graphql::Response) -> Self {
        Self {
            data: res.data,
            errors: res.errors.into_iter().map(ErrorPayload::from).collect(),
        }
    }
}
