//! Configuration section definitions.
//!
//! Each module corresponds to a section in `canister-hooks.toml`:
//!
//! | Module     | TOML Section   | Purpose                               |
//! |------------|----------------|---------------------------------------|
//! | `build`    | `[build]`      | Build output directory                |
//! | `canister` | `[canister]`   | Canister ids file and lookup keys     |
//! | `html`     | `[html]`       | Registered html transform hooks       |
//! | `compress` | `[compress]`   | Compressed siblings for build output  |

mod build;
mod canister;
mod compress;
mod html;

pub use build::BuildConfig;
pub use canister::CanisterConfig;
pub use compress::{Algorithm, CompressConfig};
pub use html::HtmlConfig;
