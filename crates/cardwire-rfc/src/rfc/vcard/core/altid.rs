//! ALTID grouping of alternative representations.

use std::collections::HashSet;

use super::property::VCardProperty;

/// Properties of one kind that represent the same value.
#[derive(Debug, Clone)]
pub struct AltIdGroup<'a> {
    /// The shared ALTID, or `None` for a property that has none.
    pub alt_id: Option<&'a str>,
    pub properties: Vec<&'a dyn VCardProperty>,
}

impl AltIdGroup<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

pub(crate) fn group_by_alt_id(properties: &[Box<dyn VCardProperty>]) -> Vec<AltIdGroup<'_>> {
    let mut groups: Vec<AltIdGroup<'_>> = Vec::new();
    let mut singles = Vec::new();

    for property in properties {
        let property = property.as_ref();
        match property.alt_id() {
            Some(alt_id) => match groups.iter_mut().find(|g| g.alt_id == Some(alt_id)) {
                Some(group) => group.properties.push(property),
                None => groups.push(AltIdGroup {
                    alt_id: Some(alt_id),
                    properties: vec![property],
                }),
            },
            None => singles.push(AltIdGroup {
                alt_id: None,
                properties: vec![property],
            }),
        }
    }

    groups.extend(singles);
    groups
}

pub(crate) fn next_alt_id(properties: &[Box<dyn VCardProperty>]) -> String {
    let used: HashSet<&str> = properties.iter().filter_map(|p| p.alt_id()).collect();
    (1u64..)
        .map(|n| n.to_string())
        .find(|candidate| !used.contains(candidate.as_str()))
        .unwrap_or_default()
}
