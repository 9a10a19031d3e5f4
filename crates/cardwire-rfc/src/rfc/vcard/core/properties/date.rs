//! Date-valued properties (BDAY and REV).

use chrono::{DateTime, NaiveDate, Utc};

use crate::property_common;
use crate::rfc::vcard::core::{
    HasAltId, PropertyBase, PropertyKind, PropertyType, VCardProperty, VCardVersion,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthdayValue {
    Date(NaiveDate),
    /// Free text such as "circa 1800" (4.0, `VALUE=text`).
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Birthday {
    pub base: PropertyBase,
    pub value: BirthdayValue,
}

impl Birthday {
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            base: PropertyBase::default(),
            value: BirthdayValue::Date(date),
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            base: PropertyBase::default(),
            value: BirthdayValue::Text(text.into()),
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.value {
            BirthdayValue::Date(date) => Some(date),
            BirthdayValue::Text(_) => None,
        }
    }
}

impl PropertyType for Birthday {
    const KIND: PropertyKind = PropertyKind::BIRTHDAY;
}

impl HasAltId for Birthday {}

impl VCardProperty for Birthday {
    property_common!();

    fn supports_alt_id(&self) -> bool {
        true
    }

    fn validate_value(&self, version: VCardVersion, warnings: &mut Vec<String>) {
        if matches!(self.value, BirthdayValue::Text(_)) && version != VCardVersion::V4_0 {
            warnings.push(format!("text birthdays are not supported in {version}"));
        }
    }
}

/// REV: when the vCard was last revised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub base: PropertyBase,
    pub timestamp: DateTime<Utc>,
}

impl Revision {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            base: PropertyBase::default(),
            timestamp,
        }
    }

    #[must_use]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }
}

impl PropertyType for Revision {
    const KIND: PropertyKind = PropertyKind::REVISION;
}

impl VCardProperty for Revision {
    property_common!();
}
