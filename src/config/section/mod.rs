//! Configuration section definitions.
//!
//! Each module corresponds to a section in `critpath.toml`:
//!
//! | Module    | TOML Section | Purpose                                 |
//! |-----------|--------------|-----------------------------------------|
//! | `site`    | `[site]`     | Base URLs for resolving asset paths     |
//! | `store`   | `[store]`    | Option store file                       |
//! | `cache`   | `[cache]`    | Transient cache directory and lifetime  |
//! | `request` | `[request]`  | Default request flags for `render`      |

mod cache;
mod request;
mod site;
mod store;

pub use cache::CacheConfig;
pub use request::RequestConfig;
pub use site::SiteConfig;
pub use store::StoreConfig;
