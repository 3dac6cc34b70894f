use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://s1-en.tanoth.gameforge.com/xmlrpc";
pub const DEFAULT_GAME_PAGE: &str = "https://lobby.tanoth.gameforge.com/en_GB/hub";

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub endpoint: String,
    pub game_page: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            game_page: DEFAULT_GAME_PAGE.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}
