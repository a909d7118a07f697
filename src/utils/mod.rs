//! Shared helpers: markup, MIME, hashing and URL strings.

pub mod hash;
pub mod html;
pub mod mime;
pub mod url;
