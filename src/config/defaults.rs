/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PUBLIC_SCHEME: &str = "https";

// Storage defaults
pub const DEFAULT_DATA_PATH: &str = "./data";
pub const DEFAULT_FONT_KEY: &str = "LINESeedJP_OTF_Bd.otf";
pub const DEFAULT_IMAGE_KEY_PREFIX: &str = "ogp/";

// Card defaults
pub const DEFAULT_CAPTION: &str = "ちんちん";
pub const DEFAULT_DESCRIPTION: &str = "びろーん";
pub const DEFAULT_SITE_NAME: &str = "chin-ch.in";
pub const DEFAULT_FALLBACK_FONT_FAMILY: &str = "sans-serif";

// Environment overrides, e.g. HOSTCARD_WEB__PORT=9000
pub const ENV_PREFIX: &str = "HOSTCARD_";
