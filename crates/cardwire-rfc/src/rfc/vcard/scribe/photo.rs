//! Scribe for PHOTO.
//!
//! | version | URL                | inline data                       |
//! |---------|--------------------|-----------------------------------|
//! | 2.1     | `VALUE=URL`        | `ENCODING=BASE64`, `TYPE=<type>`  |
//! | 3.0     | `VALUE=uri`        | `ENCODING=b`, `TYPE=<type>`       |
//! | 4.0     | default, MEDIATYPE | `data:<mime>;base64,...` URI      |

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::{
    ParseContext, ScribeResult, ScribeSignal, TypedScribe, WriteContext, WriteResult, WriteSignal,
};
use crate::rfc::vcard::core::parameter::names;
use crate::rfc::vcard::core::properties::{Photo, PhotoSource};
use crate::rfc::vcard::core::{Encoding, VCardDataType, VCardParameters, VCardVersion};

#[derive(Debug, Default)]
pub struct PhotoScribe;

impl TypedScribe for PhotoScribe {
    type Property = Photo;

    fn property_name(&self) -> &'static str {
        "PHOTO"
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V2_1 | VCardVersion::V3_0 => None,
            VCardVersion::V4_0 => Some(VCardDataType::Uri),
        }
    }

    fn data_type(&self, property: &Photo, version: VCardVersion) -> Option<VCardDataType> {
        match (&property.source, version) {
            (Some(PhotoSource::Url(_)), VCardVersion::V2_1) => Some(VCardDataType::Url),
            (Some(PhotoSource::Url(_)), _) | (_, VCardVersion::V4_0) => Some(VCardDataType::Uri),
            _ => None,
        }
    }

    fn prepare_parameters(
        &self,
        property: &Photo,
        parameters: &mut VCardParameters,
        ctx: &WriteContext<'_>,
    ) {
        parameters.set_encoding(None);
        if ctx.version == VCardVersion::V4_0 {
            parameters.remove_all(names::MEDIATYPE);
            if let Some(mime) = property.url_value().and(property.mime_type()) {
                parameters.replace(names::MEDIATYPE, mime);
            }
            return;
        }

        parameters.remove_all(names::TYPE);
        if let Some(content_type) = &property.content_type {
            parameters.add_type(content_type.clone());
        }
        if property.data().is_some() {
            let encoding = match ctx.version {
                VCardVersion::V2_1 => Encoding::Base64,
                _ => Encoding::B,
            };
            parameters.set_encoding(Some(&encoding));
        }
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<Photo> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ScribeSignal::Skip("PHOTO has no value".to_string()));
        }

        let content_type = match ctx.version {
            VCardVersion::V4_0 => parameters.remove_all(names::MEDIATYPE),
            _ => parameters.remove_all(names::TYPE),
        }
        .into_iter()
        .next();

        if parameters.encoding().is_some_and(|e| e.is_base64()) {
            parameters.set_encoding(None);
            return Ok(Photo::inline(decode_base64(value)?, content_type));
        }

        if let Some(rest) = strip_prefix_ignore_case(value, "data:") {
            let (meta, data) = rest
                .split_once(',')
                .ok_or_else(|| ScribeSignal::CannotParse("data URI has no data".to_string()))?;
            let Some(mime) = strip_suffix_ignore_case(meta, ";base64") else {
                return Err(ScribeSignal::CannotParse(
                    "only base64 data URIs are supported".to_string(),
                ));
            };
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            return Ok(Photo::inline(decode_base64(data)?, mime.or(content_type)));
        }

        if data_type.is_some_and(|dt| !dt.is_uri()) {
            let name = data_type.map_or("", VCardDataType::as_str);
            ctx.warn(format!("PHOTO value type {name} treated as a URL"));
        }
        let mut photo = Photo::url(value);
        photo.content_type = content_type;
        Ok(photo)
    }

    fn write_text(&self, property: &Photo, ctx: &WriteContext<'_>) -> WriteResult {
        match &property.source {
            None => Err(WriteSignal::Skip("PHOTO has no value".to_string())),
            Some(PhotoSource::Url(url)) => Ok(url.clone()),
            Some(PhotoSource::Inline(data)) if ctx.version == VCardVersion::V4_0 => {
                let mime = property
                    .mime_type()
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                Ok(format!("data:{mime};base64,{}", STANDARD.encode(data)))
            }
            Some(PhotoSource::Inline(data)) => Ok(STANDARD.encode(data)),
        }
    }
}

fn decode_base64(value: &str) -> ScribeResult<Vec<u8>> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ScribeSignal::CannotParse(format!("invalid base64 data: {e}")))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    s.get(split..)
        .filter(|tail| tail.eq_ignore_ascii_case(suffix))
        .map(|_| &s[..split])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::VCard;

    fn parse(
        version: VCardVersion,
        value: &str,
        params: &mut VCardParameters,
        dt: Option<&VCardDataType>,
    ) -> ScribeResult<Photo> {
        let mut ctx = ParseContext::new(version, "PHOTO");
        TypedScribe::parse_text(&PhotoScribe, value, dt, params, &mut ctx)
    }

    #[test]
    fn inline_base64_in_2_1() {
        let mut params = VCardParameters::new();
        params.put("ENCODING", "BASE64");
        params.put("TYPE", "JPEG");
        let photo = parse(VCardVersion::V2_1, "AQID\r\n BA==", &mut params, None).unwrap();
        assert_eq!(photo.data(), Some(&[1u8, 2, 3, 4][..]));
        assert_eq!(photo.content_type.as_deref(), Some("JPEG"));
        assert!(params.is_empty());
    }

    #[test]
    fn data_uri_in_4_0() {
        let mut params = VCardParameters::new();
        let photo = parse(VCardVersion::V4_0, "data:image/png;base64,AQID", &mut params, Some(&VCardDataType::Uri)).unwrap();
        assert_eq!(photo.data(), Some(&[1u8, 2, 3][..]));
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));

        let card = VCard::new();
        let ctx = WriteContext { version: VCardVersion::V4_0, card: &card };
        assert_eq!(
            TypedScribe::write_text(&PhotoScribe, &photo, &ctx).unwrap(),
            "data:image/png;base64,AQID"
        );
    }

    #[test]
    fn url_value() {
        let mut params = VCardParameters::new();
        let photo = parse(VCardVersion::V3_0, "http://example.com/a.jpg", &mut params, Some(&VCardDataType::Uri)).unwrap();
        assert_eq!(photo.url_value(), Some("http://example.com/a.jpg"));
        assert_eq!(
            TypedScribe::data_type(&PhotoScribe, &photo, VCardVersion::V2_1),
            Some(VCardDataType::Url)
        );
    }

    #[test]
    fn empty_value_is_skipped() {
        let mut params = VCardParameters::new();
        assert!(matches!(
            parse(VCardVersion::V3_0, "  ", &mut params, None),
            Err(ScribeSignal::Skip(_))
        ));

        let card = VCard::new();
        let ctx = WriteContext { version: VCardVersion::V3_0, card: &card };
        assert!(matches!(
            TypedScribe::write_text(&PhotoScribe, &Photo::default(), &ctx),
            Err(WriteSignal::Skip(_))
        ));
    }

    #[test]
    fn bad_base64_cannot_parse() {
        let mut params = VCardParameters::new();
        params.put("ENCODING", "b");
        assert!(matches!(
            parse(VCardVersion::V3_0, "not base64!!", &mut params, None),
            Err(ScribeSignal::CannotParse(_))
        ));
    }

    #[test]
    fn parameters_by_version() {
        let photo = Photo::inline(vec![1, 2, 3], Some("JPEG".to_string()));
        let card = VCard::new();
        let mut params = VCardParameters::new();
        let ctx = WriteContext { version: VCardVersion::V3_0, card: &card };
        TypedScribe::prepare_parameters(&PhotoScribe, &photo, &mut params, &ctx);
        assert_eq!(params.first("ENCODING"), Some("b"));
        assert_eq!(params.types(), ["JPEG"]);

        let mut params = VCardParameters::new();
        let ctx = WriteContext { version: VCardVersion::V2_1, card: &card };
        TypedScribe::prepare_parameters(&PhotoScribe, &photo, &mut params, &ctx);
        assert_eq!(params.first("ENCODING"), Some("BASE64"));
    }
}
