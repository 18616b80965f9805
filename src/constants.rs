/// Backend and region service defaults, overridable through `config.toml`

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_REGIONS_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_POSITION_TIMEOUT_SECS: u64 = 30;

// Points backend resources
pub const ITEMS_PATH: &str = "items";
pub const POINTS_PATH: &str = "points";
pub const ITEMS_QUERY_KEY: &str = "items[]";

// Region lookup resources
pub const STATES_PATH: &str = "estados";
pub const CITIES_SEGMENT: &str = "municipios";
pub const CITIES_ORDER_BY: &str = "nome";

// Map viewport around the device fix
pub const MAP_LATITUDE_DELTA: f64 = 0.014;
pub const MAP_LONGITUDE_DELTA: f64 = 0.014;

// Contact actions on the detail screen
pub const WHATSAPP_MESSAGE: &str = "Tenho interesse na coleta de resíduos.";
pub const MAIL_SUBJECT: &str = "Interesse na coleta de resíduos";

// Notices
pub const PERMISSION_NOTICE_TITLE: &str = "Ooopss...";
pub const PERMISSION_NOTICE_MESSAGE: &str =
    "Precisamos de sua permissão para obter a sua localização";

/// Joins a base URL and a relative path with exactly one slash between them
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
