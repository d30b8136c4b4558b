//! User-authored size specifications and their canonical shape.
//!
//! A size can be written three ways:
//!
//! ```text
//! 320                                    bare token: width only
//! "50X25"                                width X height (uppercase separator)
//! { width = "50%", function = "cover" }  structured object
//! ```
//!
//! [`RawSizeSpec::canonicalize`] turns all three into a [`SizeObject`] and
//! captures the `original` snapshot exactly once. Nothing here is parsed yet;
//! that happens in [`normalize`](super::normalize).

use super::dimension::RawDimension;
use super::error::ValidationError;
use super::functions::ScalingStep;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A size specification as supplied per resize request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSizeSpec {
    Object(SizeObject),
    Token(RawDimension),
}

/// Canonical, unparsed size object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<RawDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<RawDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionSpec>,
    /// Snapshot of the canonical input, taken on first canonicalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<Box<SizeObject>>,
}

/// One function reference or a chain of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionSpec {
    Many(Vec<FunctionRef>),
    One(FunctionRef),
}

/// Reference to a scaling step.
///
/// Deserializes from any value: strings become names, everything else is
/// kept as [`FunctionRef::Invalid`] and replaced by the default function
/// (with a warning) during normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionRef {
    Name(String),
    Step(ScalingStep),
    Invalid(serde_json::Value),
}

impl FunctionRef {
    /// JavaScript-style type label for an invalid reference, used in warnings.
    pub(crate) fn kind(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                "object"
            }
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
        }
    }
}

impl Serialize for FunctionRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FunctionRef::Name(name) => serializer.serialize_str(name),
            FunctionRef::Step(step) => serializer.serialize_str(step.name()),
            FunctionRef::Invalid(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FunctionRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(name) => FunctionRef::Name(name),
            other => FunctionRef::Invalid(other),
        })
    }
}

impl From<&str> for FunctionRef {
    fn from(name: &str) -> Self {
        FunctionRef::Name(name.to_string())
    }
}

impl From<ScalingStep> for FunctionRef {
    fn from(step: ScalingStep) -> Self {
        FunctionRef::Step(step)
    }
}

impl SizeObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<RawDimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<RawDimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Set a single function reference, replacing any chain.
    pub fn function(mut self, function: impl Into<FunctionRef>) -> Self {
        self.function = Some(FunctionSpec::One(function.into()));
        self
    }

    /// Set a function chain, evaluated left to right.
    pub fn chain<I, F>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FunctionRef>,
    {
        self.function = Some(FunctionSpec::Many(
            functions.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Record `original` unless it is already present.
    pub(crate) fn capture_original(&mut self) {
        if self.original.is_none() {
            let mut snapshot = self.clone();
            snapshot.original = None;
            self.original = Some(Box::new(snapshot));
        }
    }

    /// JSON rendering of the original snapshot (or of self), for messages.
    pub(crate) fn original_json(&self) -> String {
        let target = self.original.as_deref().unwrap_or(self);
        serde_json::to_string(target).unwrap_or_default()
    }
}

impl RawSizeSpec {
    /// Canonicalize into a [`SizeObject`] and capture `original`.
    ///
    /// A bare token defines the width. A string containing `separator` is
    /// split into width and height; a second separator is malformed.
    pub fn canonicalize(&self, separator: char) -> Result<SizeObject, ValidationError> {
        let mut object = match self {
            RawSizeSpec::Object(object) => object.clone(),
            RawSizeSpec::Token(RawDimension::Text(text)) if text.contains(separator) => {
                split_pair(text, separator)?
            }
            RawSizeSpec::Token(token) => SizeObject {
                width: Some(token.clone()),
                ..SizeObject::default()
            },
        };
        object.capture_original();
        Ok(object)
    }
}

fn split_pair(text: &str, separator: char) -> Result<SizeObject, ValidationError> {
    let mut parts = text.split(separator);
    let (Some(width), Some(height), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::MalformedSize {
            input: text.to_string(),
            separator,
        });
    };
    Ok(SizeObject {
        width: Some(RawDimension::Text(width.to_string())),
        height: Some(RawDimension::Text(height.to_string())),
        ..SizeObject::default()
    })
}

impl From<SizeObject> for RawSizeSpec {
    fn from(object: SizeObject) -> Self {
        RawSizeSpec::Object(object)
    }
}

impl From<&str> for RawSizeSpec {
    fn from(token: &str) -> Self {
        RawSizeSpec::Token(RawDimension::Text(token.to_string()))
    }
}

impl From<u32> for RawSizeSpec {
    fn from(px: u32) -> Self {
        RawSizeSpec::Token(RawDimension::Integer(px as u64))
    }
}
