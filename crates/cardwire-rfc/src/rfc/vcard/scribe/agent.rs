//! Scribe for AGENT.
//!
//! 2.1 puts the agent's vCard on the lines that follow the empty AGENT
//! value; 3.0 escapes it into the value itself. Both are handed to the
//! reader and writer as [`ScribeSignal::Embedded`] and
//! [`WriteSignal::Embedded`].

use super::{
    EmbeddedVCard, ParseContext, ScribeResult, ScribeSignal, TypedScribe, WriteContext,
    WriteResult, WriteSignal,
};
use crate::rfc::vcard::core::properties::Agent;
use crate::rfc::vcard::core::{VCard, VCardDataType, VCardParameters, VCardProperty, VCardVersion};
use crate::rfc::vcard::parse::unescape_text;

#[derive(Debug, Default)]
pub struct AgentScribe;

fn inject(property: &mut dyn VCardProperty, vcard: VCard) {
    if let Some(agent) = property.as_any_mut().downcast_mut::<Agent>() {
        agent.vcard = Some(vcard);
    }
}

fn embedded(inline: Option<String>) -> ScribeSignal {
    ScribeSignal::Embedded(EmbeddedVCard {
        property: Box::new(Agent::default()),
        inline,
        injector: inject,
    })
}

impl TypedScribe for AgentScribe {
    type Property = Agent;

    fn property_name(&self) -> &'static str {
        "AGENT"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::VCard)
    }

    fn data_type(&self, property: &Agent, version: VCardVersion) -> Option<VCardDataType> {
        match (&property.url, version) {
            (Some(_), VCardVersion::V2_1) => Some(VCardDataType::Url),
            (Some(_), _) => Some(VCardDataType::Uri),
            (None, _) => Some(VCardDataType::VCard),
        }
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<Agent> {
        if data_type.is_some_and(VCardDataType::is_uri) {
            return Ok(Agent::url(value.trim()));
        }

        let trimmed = value.trim();
        if ctx.version == VCardVersion::V2_1 {
            return if trimmed.is_empty() {
                Err(embedded(None))
            } else {
                Ok(Agent::url(trimmed))
            };
        }

        let starts_vcard = trimmed
            .get(..11)
            .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCARD"));
        if starts_vcard {
            return Err(embedded(Some(unescape_text(value, ctx.version))));
        }
        if trimmed.is_empty() {
            return Err(ScribeSignal::Skip("AGENT has no value".to_string()));
        }
        Ok(Agent::url(trimmed))
    }

    fn write_text(&self, property: &Agent, _ctx: &WriteContext<'_>) -> WriteResult {
        match (&property.url, &property.vcard) {
            (Some(url), _) => Ok(url.clone()),
            (None, Some(vcard)) => Err(WriteSignal::Embedded(vcard.clone())),
            (None, None) => Err(WriteSignal::Skip("AGENT has no value".to_string())),
        }
    }
}
