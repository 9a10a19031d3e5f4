/// Product identity written into the PRODID property
pub const PRODUCT_NAME: &str = "cardwire";
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PRODUCT_ID: &str =
    const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_NAME, " ", PRODUCT_VERSION, "//EN");

/// vCard versions as they appear on the VERSION line
pub const VERSION_2_1: &str = "2.1";
pub const VERSION_3_0: &str = "3.0";
pub const VERSION_4_0: &str = "4.0";

/// Version assumed for a card that never states one (vCard 2.1 allows that).
pub const DEFAULT_READ_VERSION: &str = VERSION_2_1;
pub const DEFAULT_WRITE_VERSION: &str = VERSION_3_0;

/// Folding defaults (RFC 6350 §3.2 recommends 75 columns).
pub const DEFAULT_LINE_LENGTH: usize = 75;
pub const DEFAULT_INDENT: &str = " ";

pub const DEFAULT_QUOTED_PRINTABLE_CHARSET: &str = "UTF-8";

/// Namespace of xCard (RFC 6351) elements
pub const XCARD_NAMESPACE: &str = "urn:ietf:params:xml:ns:vcard-4.0";

/// Prefix of environment variables read by [`crate::config::Settings::load`]
pub const ENV_PREFIX: &str = "CARDWIRE";
pub const CONFIG_FILE: &str = "cardwire.toml";
