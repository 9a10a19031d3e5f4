//! vCard parameters.

use super::data_type::VCardDataType;
use super::encoding::Encoding;

/// Common parameter names.
pub mod names {
    pub const ALTID: &str = "ALTID";
    pub const CALSCALE: &str = "CALSCALE";
    pub const CHARSET: &str = "CHARSET";
    pub const ENCODING: &str = "ENCODING";
    pub const GEO: &str = "GEO";
    pub const LABEL: &str = "LABEL";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const MEDIATYPE: &str = "MEDIATYPE";
    pub const PID: &str = "PID";
    pub const PREF: &str = "PREF";
    pub const SORT_AS: &str = "SORT-AS";
    pub const TYPE: &str = "TYPE";
    pub const TZ: &str = "TZ";
    pub const VALUE: &str = "VALUE";
}

/// Common TYPE values as constants.
pub mod types {
    pub const HOME: &str = "home";
    pub const WORK: &str = "work";
    pub const PREF: &str = "pref";

    pub const VOICE: &str = "voice";
    pub const FAX: &str = "fax";
    pub const CELL: &str = "cell";
    pub const PAGER: &str = "pager";

    pub const INTERNET: &str = "internet";

    pub const JPEG: &str = "jpeg";
    pub const PNG: &str = "png";
    pub const GIF: &str = "gif";
}

/// A vCard parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// The parameters of one property: an ordered multimap from upper-cased
/// name to values.
///
/// Entries keep the position of the first time their name was added; values
/// keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardParameters {
    entries: Vec<VCardParameter>,
}

impl VCardParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VCardParameter> {
        self.entries.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all values of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.position(name)
            .map_or(&[], |i| self.entries[i].values.as_slice())
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Appends a value to a parameter, creating it if needed.
    pub fn put(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.position(name) {
            Some(i) => self.entries[i].values.push(value),
            None => self.entries.push(VCardParameter::new(name, value)),
        }
    }

    pub fn put_all(&mut self, name: &str, values: impl IntoIterator<Item = String>) {
        for value in values {
            self.put(name, value);
        }
    }

    /// Sets a parameter to a single value, keeping its position if present.
    pub fn replace(&mut self, name: &str, value: impl Into<String>) {
        match self.position(name) {
            Some(i) => self.entries[i].values = vec![value.into()],
            None => self.entries.push(VCardParameter::new(name, value)),
        }
    }

    /// Removes a parameter, returning its values.
    pub fn remove_all(&mut self, name: &str) -> Vec<String> {
        self.position(name)
            .map(|i| self.entries.remove(i).values)
            .unwrap_or_default()
    }

    /// Removes one value of a parameter (case-insensitive match).
    pub fn remove(&mut self, name: &str, value: &str) -> bool {
        let Some(i) = self.position(name) else {
            return false;
        };
        let values = &mut self.entries[i].values;
        let Some(j) = values.iter().position(|v| v.eq_ignore_ascii_case(value)) else {
            return false;
        };
        values.remove(j);
        if values.is_empty() {
            self.entries.remove(i);
        }
        true
    }

    // --- Typed accessors ---

    #[must_use]
    pub fn encoding(&self) -> Option<Encoding> {
        self.first(names::ENCODING).map(Encoding::parse)
    }

    pub fn set_encoding(&mut self, encoding: Option<&Encoding>) {
        self.set_optional(names::ENCODING, encoding.map(Encoding::as_str));
    }

    #[must_use]
    pub fn is_quoted_printable(&self) -> bool {
        self.get(names::ENCODING)
            .iter()
            .any(|v| v.eq_ignore_ascii_case(Encoding::QuotedPrintable.as_str()))
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.first(names::CHARSET)
    }

    pub fn set_charset(&mut self, charset: Option<&str>) {
        self.set_optional(names::CHARSET, charset);
    }

    /// Returns the VALUE parameter.
    #[must_use]
    pub fn value_type(&self) -> Option<VCardDataType> {
        self.first(names::VALUE).map(VCardDataType::parse)
    }

    #[must_use]
    pub fn types(&self) -> &[String] {
        self.get(names::TYPE)
    }

    pub fn add_type(&mut self, value: impl Into<String>) {
        self.put(names::TYPE, value);
    }

    #[must_use]
    pub fn has_type(&self, value: &str) -> bool {
        self.types().iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    #[must_use]
    pub fn alt_id(&self) -> Option<&str> {
        self.first(names::ALTID)
    }

    pub fn set_alt_id(&mut self, alt_id: Option<&str>) {
        self.set_optional(names::ALTID, alt_id);
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.first(names::LABEL)
    }

    pub fn set_label(&mut self, label: Option<&str>) {
        self.set_optional(names::LABEL, label);
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.first(names::LANGUAGE)
    }

    pub fn set_language(&mut self, language: Option<&str>) {
        self.set_optional(names::LANGUAGE, language);
    }

    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.first(names::MEDIATYPE)
    }

    /// Returns the PREF value if present (1-100, lower is preferred).
    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.first(names::PREF).and_then(|v| v.trim().parse().ok())
    }

    fn set_optional(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.replace(name, value),
            None => {
                self.remove_all(name);
            }
        }
    }
}

impl<'a> IntoIterator for &'a VCardParameters {
    type Item = &'a VCardParameter;
    type IntoIter = std::slice::Iter<'a, VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Names a parameter that was written without a name (`TEL;HOME:...`).
///
/// A known data type name is taken as VALUE, a known encoding as ENCODING,
/// anything else as TYPE.
#[must_use]
pub fn guess_parameter_name(value: &str) -> &'static str {
    if VCardDataType::find(value).is_some() {
        names::VALUE
    } else if Encoding::find(value).is_some() {
        names::ENCODING
    } else {
        names::TYPE
    }
}

/// Compares two TYPE lists as case-insensitive sets.
#[must_use]
pub fn same_types(a: &[String], b: &[String]) -> bool {
    let contains =
        |list: &[String], value: &str| list.iter().any(|v| v.eq_ignore_ascii_case(value));
    a.iter().all(|v| contains(b, v)) && b.iter().all(|v| contains(a, v))
}
