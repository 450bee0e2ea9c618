//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default URL for new REST drafts
pub const DEFAULT_REST_URL: &str = "https://pokeapi.co/api/v2/pokemon/pikachu";

/// Default endpoint for new GraphQL drafts
pub const DEFAULT_GRAPHQL_URL: &str = "https://beta.pokeapi.co/graphql/v1beta";

/// Sample document shown in a fresh GraphQL draft
pub const DEFAULT_GRAPHQL_QUERY: &str = r#"query {
  pokemon_v2_pokemon(limit: 5) {
    id
    name
    height
    weight
    pokemon_v2_pokemontypes {
      pokemon_v2_type {
        name
      }
    }
  }
}"#;

/// Default GraphQL variables document
pub const DEFAULT_GRAPHQL_VARIABLES: &str = "{}";

/// Content type forced onto every GraphQL request
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Status text used for the synthetic transport-failure envelope
pub const TRANSPORT_ERROR_STATUS_TEXT: &str = "Error";

/// Settings bounds
pub const MIN_TIMEOUT_MS: u64 = 1_000;
pub const MAX_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const ALLOWED_RETRY_COUNTS: [u8; 5] = [0, 1, 2, 3, 5];
pub const DEFAULT_MAX_RETRIES: u8 = 3;

/// Upper bound on redirects followed when redirects are enabled
pub const MAX_REDIRECTS: usize = 10;

/// Delay before the first transport retry, grows linearly per attempt
pub const RETRY_BACKOFF_MS: u64 = 200;

/// Environment variable holding the log filter
pub const LOG_FILTER_ENV: &str = "ZAPI_LOG";

/// Log file written by [`crate::telemetry::init`]
pub const LOG_FILE_NAME: &str = "zapi.log";
