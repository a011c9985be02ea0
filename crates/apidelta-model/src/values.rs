//! Annotation-like values.
//!
//! Values may reference type descriptors by [`TypeId`], so they are only
//! meaningful together with the universe that produced them. There is no
//! `PartialEq` on [`AnnotationValue`]: comparing two values, possibly from
//! two universes, is the job of the signature crate's `ValueComparator`.

use crate::types::TypeId;
use indexmap::IndexMap;
use std::fmt;

/// An opaque primitive or string constant.
#[derive(Clone, Debug)]
pub enum ScalarValue {
    Boolean(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

/// Kind-strict equality. `Int(1)` and `Long(1)` differ.
///
/// Floating point values compare by bit pattern with every NaN collapsed to
/// one, so `NaN == NaN` and `0.0 != -0.0`. This keeps the relation reflexive.
impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => a == b,
            (ScalarValue::Byte(a), ScalarValue::Byte(b)) => a == b,
            (ScalarValue::Char(a), ScalarValue::Char(b)) => a == b,
            (ScalarValue::Short(a), ScalarValue::Short(b)) => a == b,
            (ScalarValue::Int(a), ScalarValue::Int(b)) => a == b,
            (ScalarValue::Long(a), ScalarValue::Long(b)) => a == b,
            (ScalarValue::Float(a), ScalarValue::Float(b)) => float_bits(*a) == float_bits(*b),
            (ScalarValue::Double(a), ScalarValue::Double(b)) => double_bits(*a) == double_bits(*b),
            (ScalarValue::String(a), ScalarValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ScalarValue {}

fn float_bits(value: f32) -> u32 {
    if value.is_nan() { f32::NAN.to_bits() } else { value.to_bits() }
}

fn double_bits(value: f64) -> u64 {
    if value.is_nan() { f64::NAN.to_bits() } else { value.to_bits() }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Boolean(v) => write!(f, "{v}"),
            ScalarValue::Byte(v) => write!(f, "{v}"),
            ScalarValue::Char(v) => write!(f, "{v}"),
            ScalarValue::Short(v) => write!(f, "{v}"),
            ScalarValue::Int(v) => write!(f, "{v}"),
            ScalarValue::Long(v) => write!(f, "{v}"),
            ScalarValue::Float(v) => write_floating(f, f64::from(*v)),
            ScalarValue::Double(v) => write_floating(f, *v),
            ScalarValue::String(v) => f.write_str(v),
        }
    }
}

fn write_floating(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_infinite() {
        f.write_str(if value.is_sign_negative() { "-Infinity" } else { "Infinity" })
    } else {
        // Debug keeps the trailing ".0" on integral values
        write!(f, "{value:?}")
    }
}

/// One annotation instance: the annotation type plus its explicitly set
/// attributes, keyed by attribute name in declaration order.
#[derive(Clone, Debug)]
pub struct AnnotationInstance {
    pub annotation_type: TypeId,
    pub attributes: IndexMap<String, AnnotationValue>,
}

impl AnnotationInstance {
    pub fn new(annotation_type: TypeId) -> Self {
        AnnotationInstance {
            annotation_type,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: AnnotationValue) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AnnotationValue> {
        self.attributes.get(name)
    }
}

/// The closed set of annotation-like value kinds.
#[derive(Clone, Debug)]
pub enum AnnotationValue {
    Scalar(ScalarValue),
    Type(TypeId),
    EnumConstant { enum_type: TypeId, name: String },
    Annotation(AnnotationInstance),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn int(value: i32) -> Self {
        AnnotationValue::Scalar(ScalarValue::Int(value))
    }

    pub fn string(value: &str) -> Self {
        AnnotationValue::Scalar(ScalarValue::String(value.to_string()))
    }

    pub fn enum_constant(enum_type: TypeId, name: &str) -> Self {
        AnnotationValue::EnumConstant {
            enum_type,
            name: name.to_string(),
        }
    }
}

impl From<ScalarValue> for AnnotationValue {
    fn from(value: ScalarValue) -> Self {
        AnnotationValue::Scalar(value)
    }
}

impl From<AnnotationInstance> for AnnotationValue {
    fn from(value: AnnotationInstance) -> Self {
        AnnotationValue::Annotation(value)
    }
}

#[cfg(test)]
#[path = "../tests/values_tests.rs"]
mod tests;
