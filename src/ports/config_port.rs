//! Configuration access port trait.
//!
//! Values are looked up by INI-style `[section] key`. Getters with a default
//! fall back to it when the key is missing or does not parse.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
}
