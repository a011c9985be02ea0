//! String forms of annotation-like values.

use crate::canonical::CanonicalWriter;
use crate::human::HumanReadableWriter;
use crate::state::SignatureState;
use apidelta_model::{AnnotationInstance, AnnotationValue, TypeDatabase, TypeId};

/// Diagnostic rendering: `@com.acme.Ann(level = 3, tags = [a, b])`.
pub fn value_human_readable(db: &dyn TypeDatabase, value: &AnnotationValue) -> String {
    let mut out = String::new();
    ValueFormatter {
        db,
        mode: TypeMode::HumanReadable,
    }
    .write_value(value, &mut out);
    out
}

/// Like [`value_human_readable`], but type references use canonical
/// signatures so the result is comparable across runs.
pub fn value_canonical(db: &dyn TypeDatabase, value: &AnnotationValue) -> String {
    let mut out = String::new();
    ValueFormatter {
        db,
        mode: TypeMode::Canonical,
    }
    .write_value(value, &mut out);
    out
}

/// Diagnostic rendering of a single annotation instance.
pub fn annotation_human_readable(db: &dyn TypeDatabase, annotation: &AnnotationInstance) -> String {
    let mut out = String::new();
    ValueFormatter {
        db,
        mode: TypeMode::HumanReadable,
    }
    .write_annotation(annotation, &mut out);
    out
}

#[derive(Copy, Clone)]
enum TypeMode {
    Canonical,
    HumanReadable,
}

struct ValueFormatter<'a> {
    db: &'a dyn TypeDatabase,
    mode: TypeMode,
}

impl ValueFormatter<'_> {
    fn write_value(&self, value: &AnnotationValue, out: &mut String) {
        match value {
            AnnotationValue::Scalar(scalar) => out.push_str(&scalar.to_string()),
            AnnotationValue::Type(ty) => out.push_str(&self.type_string(*ty)),
            AnnotationValue::EnumConstant { enum_type, name } => {
                out.push_str(&self.type_string(*enum_type));
                out.push('.');
                out.push_str(name);
            }
            AnnotationValue::Annotation(annotation) => self.write_annotation(annotation, out),
            AnnotationValue::Array(values) => {
                out.push('[');
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(value, out);
                }
                out.push(']');
            }
        }
    }

    fn write_annotation(&self, annotation: &AnnotationInstance, out: &mut String) {
        out.push('@');
        out.push_str(&self.type_string(annotation.annotation_type));

        if annotation.attributes.is_empty() {
            return;
        }
        out.push('(');
        for (i, (name, value)) in annotation.attributes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
            out.push_str(" = ");
            self.write_value(value, out);
        }
        out.push(')');
    }

    fn type_string(&self, ty: TypeId) -> String {
        let mut state = SignatureState::new();
        match self.mode {
            TypeMode::Canonical => CanonicalWriter { db: self.db }.write_type(ty, &mut state),
            TypeMode::HumanReadable => {
                HumanReadableWriter { db: self.db }.write_type(ty, &mut state)
            }
        }
        state.finish()
    }
}

#[cfg(test)]
#[path = "../tests/value_format_tests.rs"]
mod tests;
