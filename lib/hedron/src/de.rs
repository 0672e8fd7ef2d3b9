//! Deserialization of scenes from various storage formats.

#[cfg(feature = "de_obj")]
pub mod obj;
