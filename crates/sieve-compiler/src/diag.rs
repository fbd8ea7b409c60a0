//! Diagnostics over filter instances: fingerprinting and presence probes.
//!
//! None of these look at field metadata beyond the emptiness policy. Fields
//! marked `skip_synthesis` still take part.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::scan::scan;
use crate::traits::Filter;
use crate::value::FilterValue;

/// Combines the values of every annotated field and the paging fields into a
/// single hash.
///
/// The result does not depend on field declaration order, and list fields
/// hash as multisets: two lists holding the same elements in a different
/// order produce the same fingerprint. Null and empty values hash
/// differently. Fields without filter metadata never take part.
///
/// Fingerprints are stable within a build and suitable as cache keys; they are
/// not meant to be persisted.
pub fn fingerprint<F: Filter>(filter: &F) -> u64 {
    let mut acc = scan(filter).fold(0u64, |acc, scanned| {
        acc ^ field_hash(scanned.name(), scanned.value)
    });

    let paging = filter.paging();
    acc ^= hash_of(&("starting_index", paging.starting_index));
    acc ^= hash_of(&("page_size", paging.page_size));
    acc
}

fn field_hash(name: &str, value: FilterValue<'_>) -> u64 {
    match value {
        FilterValue::Text(None) => hash_of(&(name, 0u8)),
        FilterValue::Text(Some(s)) => hash_of(&(name, 1u8, s)),
        FilterValue::TextList(None) => hash_of(&(name, 2u8)),
        FilterValue::TextList(Some(list)) => {
            let elements = list
                .iter()
                .fold(0u64, |acc, item| acc.wrapping_add(hash_of(item)));
            hash_of(&(name, 3u8, list.len(), elements))
        }
        FilterValue::Date(None) => hash_of(&(name, 4u8)),
        FilterValue::Date(Some(ts)) => hash_of(&(name, 5u8, ts)),
        FilterValue::None => hash_of(&(name, 6u8)),
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Returns `true` if at least one annotated field holds a present value.
pub fn has_any<F: Filter>(filter: &F) -> bool {
    scan(filter).any(|scanned| scanned.is_present())
}

/// Returns `true` if every annotated field holds a present value.
pub fn has_all<F: Filter>(filter: &F) -> bool {
    scan(filter).all(|scanned| scanned.is_present())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{FieldMeta, FilterField};
    use crate::traits::{Model, Paging};
    use crate::value::{FieldKind, Timestamp, Value};

    struct Any;

    impl Model for Any {
        fn field_kind(_field: &str) -> Option<FieldKind> {
            None
        }

        fn field_value(&self, _field: &str) -> Value<'_> {
            Value::None
        }
    }

    #[derive(Clone, Default)]
    struct Probe {
        id: Option<String>,
        tags: Option<Vec<String>>,
        since: Option<Timestamp>,
        strict: Option<String>,
        paging: Paging,
        unannotated: u32,
    }

    impl Filter for Probe {
        type Model = Any;

        const FIELDS: &'static [FilterField] = &[
            FilterField::new("id", FieldKind::Text, FieldMeta::new()),
            FilterField::new("tags", FieldKind::TextList, FieldMeta::new().skip_synthesis(true)),
            FilterField::new("since", FieldKind::OptionalDate, FieldMeta::new()),
            FilterField::new("strict", FieldKind::Text, FieldMeta::new().ignore_if_empty(false)),
        ];

        fn filter_value(&self, field: &str) -> FilterValue<'_> {
            match field {
                "id" => FilterValue::Text(self.id.as_deref()),
                "tags" => FilterValue::TextList(self.tags.as_deref()),
                "since" => FilterValue::Date(self.since),
                "strict" => FilterValue::Text(self.strict.as_deref()),
                _ => FilterValue::None,
            }
        }

        fn paging(&self) -> Paging {
            self.paging
        }
    }

    fn tags(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn equal_filters_equal_fingerprints() {
        let a = Probe {
            id: Some("1".into()),
            tags: tags(&["a", "b"]),
            ..Default::default()
        };
        assert_eq!(fingerprint(&a), fingerprint(&a.clone()));
    }

    #[test]
    fn list_order_does_not_matter() {
        let a = Probe {
            tags: tags(&["a", "b", "c"]),
            ..Default::default()
        };
        let b = Probe {
            tags: tags(&["c", "a", "b"]),
            ..Default::default()
        };
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn values_change_fingerprint() {
        let base = Probe::default();
        let changed = [
            Probe {
                id: Some("1".into()),
                ..Default::default()
            },
            Probe {
                id: Some(String::new()),
                ..Default::default()
            },
            Probe {
                tags: tags(&[]),
                ..Default::default()
            },
            Probe {
                tags: tags(&["a", "a"]),
                ..Default::default()
            },
            Probe {
                since: Some(Timestamp(0)),
                ..Default::default()
            },
            Probe {
                paging: Paging::new(0, 10),
                ..Default::default()
            },
        ];

        for probe in &changed {
            assert_ne!(fingerprint(&base), fingerprint(probe));
        }
        assert_ne!(
            fingerprint(&Probe {
                tags: tags(&["a"]),
                ..Default::default()
            }),
            fingerprint(&Probe {
                tags: tags(&["a", "a"]),
                ..Default::default()
            })
        );
    }

    #[test]
    fn unannotated_fields_are_ignored() {
        let a = Probe::default();
        let b = Probe {
            unannotated: 42,
            ..Default::default()
        };
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn presence_probes() {
        let empty = Probe::default();
        assert!(!has_any(&empty));
        assert!(!has_all(&empty));

        let blank = Probe {
            id: Some(String::new()),
            tags: tags(&[]),
            ..Default::default()
        };
        assert!(!has_any(&blank));

        // `strict` keeps empty strings
        let strict = Probe {
            strict: Some(String::new()),
            ..Default::default()
        };
        assert!(has_any(&strict));

        let full = Probe {
            id: Some("1".into()),
            tags: tags(&["x"]),
            since: Some(Timestamp(1)),
            strict: Some(String::new()),
            ..Default::default()
        };
        assert!(has_any(&full));
        assert!(has_all(&full));
    }
}
