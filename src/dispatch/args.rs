//! Decoded handler arguments.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArgError {
    #[error("missing argument at position {0}")]
    Missing(usize),

    #[error("argument at position {index} has the wrong shape: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Positional arguments decoded from an identifier's payload.
///
/// A payload may carry fewer values than the handler declares; trailing
/// parameters then read as missing and can fall back to a default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Required argument at `index`.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, ArgError> {
        match self.0.get(index) {
            Some(value) => Self::convert(index, value),
            None => Err(ArgError::Missing(index)),
        }
    }

    /// Argument at `index`, `None` when the payload stopped short.
    pub fn get_opt<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>, ArgError> {
        self.0
            .get(index)
            .map(|value| Self::convert(index, value))
            .transpose()
    }

    /// Argument at `index`, or `default` when the payload stopped short.
    pub fn get_or<T: DeserializeOwned>(&self, index: usize, default: T) -> Result<T, ArgError> {
        Ok(self.get_opt(index)?.unwrap_or(default))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    fn convert<T: DeserializeOwned>(index: usize, value: &Value) -> Result<T, ArgError> {
        T::deserialize(value).map_err(|source| ArgError::Invalid { index, source })
    }
}
