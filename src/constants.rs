//! Centralized constants for paths, permissions, and the credentials template.

/// Default credentials file on a Panthyr station.
pub const PANTHYR_CRED_LOCATION: &str = "/home/panthyr/data/credentials";

/// Default credentials file on a HYPERMAQ station.
pub const HYPERMAQ_CRED_LOCATION: &str = "/home/hypermaq/data/credentials";

/// Environment variable overriding the credentials file location.
pub const CRED_LOCATION_ENV: &str = "PANTHYR_CREDENTIALS";

/// Environment variable holding the CLI log filter.
pub const LOG_FILTER_ENV: &str = "PANTHYR_CREDENTIALS_LOG";

/// Section holding all credentials in the file.
pub const CREDENTIALS_SECTION: &str = "credentials";

/// Keys written when scaffolding an empty credentials file.
pub const DEFAULT_TEMPLATE_KEYS: &[&str] = &[
    "email_user",
    "email_password",
    "email_server_port",
    "ftp_server",
    "ftp_user",
    "ftp_password",
];

/// Permission mode for a scaffolded credentials file.
pub const CRED_FILE_MODE: u32 = 0o600;
