//! Structural validation of a vCard against a target version.

use std::fmt;

use super::property::{PropertyKind, VCardProperty};
use super::vcard::VCard;
use super::version::VCardVersion;

/// What a group of warnings is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationTarget {
    /// The vCard as a whole.
    VCard,
    /// The `index`-th property of `kind`.
    Property { kind: PropertyKind, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationGroup {
    pub target: ValidationTarget,
    pub warnings: Vec<String>,
}

/// The outcome of [`VCard::validate`]: the vCard-level group first (if any),
/// then one group per offending property in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationWarnings {
    groups: Vec<ValidationGroup>,
}

impl ValidationWarnings {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn groups(&self) -> &[ValidationGroup] {
        &self.groups
    }

    /// Warnings about the vCard as a whole.
    #[must_use]
    pub fn card_warnings(&self) -> &[String] {
        self.groups
            .iter()
            .find(|g| g.target == ValidationTarget::VCard)
            .map_or(&[], |g| g.warnings.as_slice())
    }

    fn push(&mut self, target: ValidationTarget, warnings: Vec<String>) {
        if !warnings.is_empty() {
            self.groups.push(ValidationGroup { target, warnings });
        }
    }
}

impl fmt::Display for ValidationWarnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            let label = match group.target {
                ValidationTarget::VCard => "vCard".to_string(),
                ValidationTarget::Property { kind, index } => format!("{kind}[{index}]"),
            };
            for warning in &group.warnings {
                writeln!(f, "{label}: {warning}")?;
            }
        }
        Ok(())
    }
}

impl VCard {
    /// Checks the vCard's structure against `version`.
    #[must_use]
    pub fn validate(&self, version: VCardVersion) -> ValidationWarnings {
        let mut report = ValidationWarnings::default();

        let mut card = Vec::new();
        let has = |kind| !self.properties_of(kind).is_empty();
        if matches!(version, VCardVersion::V2_1 | VCardVersion::V3_0)
            && !has(PropertyKind::STRUCTURED_NAME)
        {
            card.push(format!("a structured name (N) is required in {version}"));
        }
        if matches!(version, VCardVersion::V3_0 | VCardVersion::V4_0)
            && !has(PropertyKind::FORMATTED_NAME)
        {
            card.push(format!("a formatted name (FN) is required in {version}"));
        }
        report.push(ValidationTarget::VCard, card);

        for kind in self.kinds() {
            for (index, property) in self.properties_of(kind).iter().enumerate() {
                let warnings = validate_property(property.as_ref(), version);
                report.push(ValidationTarget::Property { kind, index }, warnings);
            }
        }
        report
    }
}

fn validate_property(property: &dyn VCardProperty, version: VCardVersion) -> Vec<String> {
    let mut warnings = Vec::new();
    if !property.is_supported_by(version) {
        let supported: Vec<&str> = property
            .supported_versions()
            .iter()
            .map(|v| v.as_str())
            .collect();
        warnings.push(format!(
            "property is not supported in {version} (supported: {})",
            supported.join(", ")
        ));
    }
    if property.alt_id().is_some() {
        if !property.supports_alt_id() {
            warnings.push("property does not support ALTID".to_string());
        } else if version != VCardVersion::V4_0 {
            warnings.push(format!("ALTID is not supported in {version}"));
        }
    }
    property.validate_value(version, &mut warnings);
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::properties::{
        FormattedName, Kind, Note, StructuredName, Telephone, Uid,
    };

    #[test]
    fn card_level_requirements_by_version() {
        let card = VCard::new();
        assert_eq!(card.validate(VCardVersion::V2_1).card_warnings().len(), 1);
        assert_eq!(card.validate(VCardVersion::V3_0).card_warnings().len(), 2);
        assert_eq!(card.validate(VCardVersion::V4_0).card_warnings().len(), 1);

        let mut card = VCard::new();
        card.add(FormattedName::new("Jane"));
        card.add(StructuredName::simple("Doe", "Jane"));
        assert!(card.validate(VCardVersion::V3_0).is_empty());
    }

    #[test]
    fn card_group_comes_first_then_store_order() {
        let mut card = VCard::new();
        card.add(Kind::new("individual"));
        card.add(Telephone::text(" "));

        let report = card.validate(VCardVersion::V3_0);
        let targets: Vec<ValidationTarget> = report.groups().iter().map(|g| g.target).collect();
        assert_eq!(
            targets,
            vec![
                ValidationTarget::VCard,
                ValidationTarget::Property {
                    kind: PropertyKind::KIND,
                    index: 0
                },
                ValidationTarget::Property {
                    kind: PropertyKind::TELEPHONE,
                    index: 0
                },
            ]
        );
    }

    #[test]
    fn alt_id_checks() {
        let mut card = VCard::new();
        card.add(FormattedName::new("Jane"));
        card.add(StructuredName::simple("Doe", "Jane"));

        let mut uid = Uid::new("1");
        uid.set_alt_id(Some("1"));
        card.add(uid);
        let mut note = Note::new("n");
        note.set_alt_id(Some("1"));
        card.add(note);

        let report = card.validate(VCardVersion::V4_0);
        assert_eq!(report.groups().len(), 1);
        assert_eq!(report.groups()[0].warnings, vec!["property does not support ALTID"]);

        let report = card.validate(VCardVersion::V3_0);
        assert_eq!(report.groups().len(), 2);
        assert!(report.to_string().contains("NOTE[0]: ALTID is not supported in 3.0"));
    }
}
