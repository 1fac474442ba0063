use std::path::PathBuf;

pub const API_BASE_URL: &str = "http://localhost:3000/api";
pub const COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

// Auth endpoints
pub const REGISTER_PATH: &str = "/Api/Client/Register";
pub const LOGIN_PATH: &str = "/Api/Client/Login";
pub const LOGOUT_PATH: &str = "/Api/Client/Logout";

// Caption (vocabulary) endpoints
pub const WORDS_PATH: &str = "/Api/Client/Words";
pub const ADD_WORD_PATH: &str = "/Api/Client/Words/Add";
pub const EDIT_WORD_PATH: &str = "/Api/Client/Words/Edit";
pub const DELETE_WORD_PATH: &str = "/Api/Client/Words/Delete";

pub const COUNTRIES_ALL_PATH: &str = "/all";

/// Durable storage key holding the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Durable storage key holding `{"username", "_id"}` as JSON.
pub const USER_DATA_KEY: &str = "user_data";

pub const COUNTRIES_PAGE_SIZE: usize = 15;
pub const COUNTRIES_FLAG_KEY: &str = "independent";
pub const COUNTRIES_CATEGORY_KEY: &str = "currency";
pub const PAGE_KEY: &str = "page";

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

pub const STORAGE_FILE: &str = "storage.json";

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("wordbook-sdk")
    } else {
        PathBuf::from(".wordbook-sdk-data")
    }
}
