use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDescriptor {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub val: Value,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

impl ParameterDescriptor {
    pub fn initial_text(&self) -> String {
        match &self.val {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn range_hint(&self) -> Option<String> {
        if self.kind != ParamKind::Int {
            return None;
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(format!("({} to {})", min, max)),
            _ => None,
        }
    }

    pub fn validate(&self, text: &str) -> Result<Value, Error> {
        match self.kind {
            ParamKind::Int => {
                let min = self.min.unwrap_or(i64::MIN);
                let max = self.max.unwrap_or(i64::MAX);
                let out_of_range =
                    || Error::Validation(format!("{} must be {}-{}", self.label, min, max));

                let value: i64 = match text.trim().parse() {
                    Ok(value) => value,
                    Err(_) => return Err(out_of_range()),
                };

                if value < min || value > max {
                    return Err(out_of_range());
                }

                Ok(Value::from(value))
            }
            ParamKind::String => Ok(Value::from(text)),
        }
    }
}

pub fn parse_schema(line: &str) -> Result<Vec<ParameterDescriptor>, Error> {
    let params: Vec<ParameterDescriptor> = match serde_json::from_str(line) {
        Ok(params) => params,
        Err(e) => return Err(Error::Schema(format!("Cannot parse schema: {}", e))),
    };

    for p in &params {
        if p.kind == ParamKind::Int && (p.min.is_none() || p.max.is_none()) {
            return Err(Error::Schema(format!(
                "Parameter {} has type int but no min/max bounds",
                p.key
            )));
        }
    }

    Ok(params)
}
