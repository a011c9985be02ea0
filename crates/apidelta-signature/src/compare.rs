//! Structural equality of annotation-like values.
//!
//! | kind | equal when |
//! |---|---|
//! | scalar | same kind and value |
//! | type | canonical signatures match |
//! | enum constant | member names match (the enum type is not checked) |
//! | annotation | same annotation type, same attribute count, every attribute found by name and equal |
//! | array | same length, elements equal position by position |
//!
//! Any kind mismatch is simply `false`.

use crate::canonical::canonical;
use apidelta_model::{AnnotationInstance, AnnotationValue, TypeDatabase};

/// Compare two values, possibly from two universes.
pub fn is_equal(
    left_db: &dyn TypeDatabase,
    left: &AnnotationValue,
    right_db: &dyn TypeDatabase,
    right: &AnnotationValue,
) -> bool {
    ValueComparator::new(left_db, right_db).is_equal(left, right)
}

/// Compares values of the `left` universe against values of the `right`
/// universe. Both sides may be the same universe.
#[derive(Copy, Clone)]
pub struct ValueComparator<'a> {
    left: &'a dyn TypeDatabase,
    right: &'a dyn TypeDatabase,
}

impl<'a> ValueComparator<'a> {
    pub fn new(left: &'a dyn TypeDatabase, right: &'a dyn TypeDatabase) -> Self {
        ValueComparator { left, right }
    }

    /// Compare values that come from one universe.
    pub fn within(db: &'a dyn TypeDatabase) -> Self {
        ValueComparator { left: db, right: db }
    }

    pub fn is_equal(&self, left: &AnnotationValue, right: &AnnotationValue) -> bool {
        match (left, right) {
            (AnnotationValue::Scalar(a), AnnotationValue::Scalar(b)) => a == b,
            (AnnotationValue::Type(a), AnnotationValue::Type(b)) => {
                canonical(self.left, *a) == canonical(self.right, *b)
            }
            (
                AnnotationValue::EnumConstant { name: a, .. },
                AnnotationValue::EnumConstant { name: b, .. },
            ) => a == b,
            (AnnotationValue::Annotation(a), AnnotationValue::Annotation(b)) => {
                self.is_annotation_equal(a, b)
            }
            (AnnotationValue::Array(a), AnnotationValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| self.is_equal(a, b))
            }
            _ => false,
        }
    }

    /// Attribute order does not matter; attribute names do.
    pub fn is_annotation_equal(&self, left: &AnnotationInstance, right: &AnnotationInstance) -> bool {
        if canonical(self.left, left.annotation_type) != canonical(self.right, right.annotation_type) {
            return false;
        }
        if left.attributes.len() != right.attributes.len() {
            return false;
        }

        left.attributes.iter().all(|(name, value)| {
            right
                .attributes
                .get(name)
                .is_some_and(|other| self.is_equal(value, other))
        })
    }

    /// The same comparator with sides swapped.
    pub fn reversed(&self) -> Self {
        ValueComparator {
            left: self.right,
            right: self.left,
        }
    }
}

#[cfg(test)]
#[path = "../tests/compare_tests.rs"]
mod tests;
