/*
 * slice.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Subscript and slice evaluation.
//!
//! Values are indexed by character. Out-of-range bounds are clamped rather
//! than reported, and any subscript of an empty value yields an empty value.

use crate::ast::Subscript;

impl Subscript {
    /// Apply this subscript to `value`.
    pub fn apply(&self, value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        let len = chars.len() as i64;

        match *self {
            Subscript::Index(i) => {
                let index = if i < 0 {
                    len.saturating_add(i).max(0)
                } else {
                    i.min(len - 1)
                };
                chars[index as usize].to_string()
            }
            Subscript::Slice { start, end } => {
                let start = clamp_bound(start.unwrap_or(0), len);
                let end = clamp_bound(end.unwrap_or(len), len);
                if start >= end {
                    String::new()
                } else {
                    chars[start..end].iter().collect()
                }
            }
        }
    }
}

/// Resolve a possibly-negative slice bound into `0..=len`.
fn clamp_bound(bound: i64, len: i64) -> usize {
    let bound = if bound < 0 {
        len.saturating_add(bound)
    } else {
        bound
    };
    bound.clamp(0, len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(i: i64) -> Subscript {
        Subscript::Index(i)
    }

    fn slice(start: Option<i64>, end: Option<i64>) -> Subscript {
        Subscript::Slice { start, end }
    }

    #[test]
    fn test_single_index() {
        assert_eq!(index(0).apply("ABCDEF"), "A");
        assert_eq!(index(2).apply("ABCDEF"), "C");
        assert_eq!(index(-1).apply("ABCDEF"), "F");
        assert_eq!(index(-6).apply("ABCDEF"), "A");
    }

    #[test]
    fn test_index_clamps() {
        assert_eq!(index(100).apply("ABCDEF"), "F");
        assert_eq!(index(-100).apply("ABCDEF"), "A");
        assert_eq!(index(i64::MIN).apply("ABCDEF"), "A");
        assert_eq!(index(i64::MAX).apply("ABCDEF"), "F");
    }

    #[test]
    fn test_slices() {
        assert_eq!(slice(Some(2), Some(3)).apply("ABCDEF"), "C");
        assert_eq!(slice(None, None).apply("ABCDEF"), "ABCDEF");
        assert_eq!(slice(None, Some(-1)).apply("ABCDEF"), "ABCDE");
        assert_eq!(slice(Some(1), None).apply("ABCDEF"), "BCDEF");
        assert_eq!(slice(Some(1), Some(10000)).apply("ABCDEF"), "BCDEF");
        assert_eq!(slice(Some(2), Some(-1)).apply("Boy, howdy"), "y, howd");
    }

    #[test]
    fn test_inverted_slice_is_empty() {
        assert_eq!(slice(Some(-11), Some(0)).apply("Boy, howdy"), "");
        assert_eq!(slice(Some(4), Some(2)).apply("ABCDEF"), "");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(index(0).apply(""), "");
        assert_eq!(index(-5).apply(""), "");
        assert_eq!(slice(Some(3), Some(9)).apply(""), "");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(index(1).apply("héllo"), "é");
        assert_eq!(slice(Some(0), Some(2)).apply("日本語"), "日本");
    }
}
