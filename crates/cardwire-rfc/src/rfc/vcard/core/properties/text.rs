//! Properties whose value is a single text string.

use crate::rfc::vcard::core::property::{ALL_VERSIONS, ONLY_4_0, SINCE_3_0, UNTIL_3_0};
use crate::text_property;

text_property!(
    /// `FN`: the display name.
    FormattedName, FORMATTED_NAME, versions: ALL_VERSIONS, alt_id: true
);

text_property!(Note, NOTE, versions: ALL_VERSIONS, alt_id: true);

text_property!(Title, TITLE, versions: ALL_VERSIONS, alt_id: true);

text_property!(Role, ROLE, versions: ALL_VERSIONS, alt_id: true);

text_property!(Email, EMAIL, versions: ALL_VERSIONS, alt_id: true);

text_property!(Uid, UID, versions: ALL_VERSIONS, alt_id: false);

text_property!(
    /// `PRODID`: the product that created the vCard.
    ProductId, PRODUCT_ID, versions: SINCE_3_0, alt_id: false
);

text_property!(
    /// `KIND`: what the vCard represents (individual, group, org, location).
    Kind, KIND, versions: ONLY_4_0, alt_id: false
);

text_property!(
    /// `LABEL`: a formatted delivery address.
    ///
    /// Readers attach labels to the matching [`Address`](super::Address);
    /// only labels with no matching address remain as properties.
    Label, LABEL, versions: UNTIL_3_0, alt_id: false
);

impl Kind {
    pub const INDIVIDUAL: &'static str = "individual";
    pub const GROUP: &'static str = "group";
    pub const ORG: &'static str = "org";
    pub const LOCATION: &'static str = "location";

    /// Returns whether the value is a registered kind or an extension.
    #[must_use]
    pub fn is_known(&self) -> bool {
        let value = self.value.as_str();
        [Self::INDIVIDUAL, Self::GROUP, Self::ORG, Self::LOCATION]
            .iter()
            .any(|k| k.eq_ignore_ascii_case(value))
            || value.len() > 2 && value.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("x-"))
    }
}
