//! Key-value storage port trait.
//!
//! Both the per-session intake store and the durable credential store are
//! reached through this trait, so domain logic never touches files directly.

use crate::domain::error::WealthdeskError;

pub trait StorePort {
    fn get(&self, key: &str) -> Result<Option<String>, WealthdeskError>;
    fn set(&self, key: &str, value: &str) -> Result<(), WealthdeskError>;
    fn clear(&self, key: &str) -> Result<(), WealthdeskError>;
}
