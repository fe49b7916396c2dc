//! Grouping records under a string key

use serde::Serialize;
use std::collections::BTreeMap;

/// Label of the group holding records without a key
pub const UNSPECIFIED: &str = "Unspecified";

/// Records sharing one key, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<T> {
    /// Group key
    pub key: String,
    /// Member records
    pub records: Vec<T>,
}

impl<T> Group<T> {
    /// Number of records in the group
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Partition records into groups sorted by key
///
/// Blank or missing keys fall under [`UNSPECIFIED`].
pub fn group_by<T, F>(records: impl IntoIterator<Item = T>, key_fn: F) -> Vec<Group<T>>
where
    F: Fn(&T) -> Option<String>,
{
    let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for record in records {
        let key = key_fn(&record)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| UNSPECIFIED.to_string());
        groups.entry(key).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(key, records)| Group { key, records })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use backoffice_core::{Job, Record};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;
    use std::borrow::Cow;

    #[test]
    fn test_jobs_group_by_department() {
        let jobs: Vec<Job> = serde_json::from_value(json!([
            {"id": 1, "title": "Backend", "department": "Engineering"},
            {"id": 2, "title": "Recruiter", "department": "People"},
            {"id": 3, "title": "Frontend", "department": "Engineering"},
            {"id": 4, "title": "Intern"}
        ]))
        .unwrap();

        let groups = group_by(&jobs, |job| job.group_key().map(Cow::into_owned));
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Engineering", "People", UNSPECIFIED]);

        let engineering: Vec<&str> = groups[0].records.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(engineering, vec!["1", "3"]);
        assert_eq!(groups[0].count(), 2);
    }

    #[test]
    fn test_blank_key_is_unspecified() {
        let groups = group_by(vec![("a", " "), ("b", "")], |(_, key)| Some((*key).to_string()));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, UNSPECIFIED);
        assert_eq!(groups[0].count(), 2);
    }

    proptest! {
        #[test]
        fn prop_grouping_partitions_input(
            items in prop::collection::vec((0_usize..1000, prop::option::of("[a-c]{1,2}")), 0..40)
        ) {
            let indexed: Vec<(usize, Option<String>)> =
                items.iter().cloned().enumerate().map(|(i, (_, k))| (i, k)).collect();
            let groups = group_by(indexed.clone(), |(_, key)| key.clone());

            // keys sorted, unique
            for pair in groups.windows(2) {
                prop_assert!(pair[0].key < pair[1].key);
            }

            // every record exactly once, input order kept inside a group
            let total: usize = groups.iter().map(Group::count).sum();
            prop_assert_eq!(total, indexed.len());
            for group in &groups {
                for pair in group.records.windows(2) {
                    prop_assert!(pair[0].0 < pair[1].0);
                }
            }
        }
    }
}
