//! Concrete search engine implementations.

mod aol;
mod ask;
mod bing;
mod brave;
mod dogpile;
mod duckduckgo;
mod google;
mod mojeek;
mod startpage;
mod yahoo;

pub use aol::Aol;
pub use ask::Ask;
pub use bing::Bing;
pub use brave::Brave;
pub use dogpile::Dogpile;
pub use duckduckgo::DuckDuckGo;
pub use google::Google;
pub use mojeek::Mojeek;
pub use startpage::Startpage;
pub use yahoo::Yahoo;

use crate::engine::Engine;

/// Known engine names, as accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "aol",
    "ask",
    "bing",
    "brave",
    "dogpile",
    "duckduckgo",
    "google",
    "mojeek",
    "startpage",
    "yahoo",
];

/// Resolves a single engine by name, case-insensitively. The short form
/// `ddg` is accepted for DuckDuckGo.
pub fn by_name(name: &str) -> Option<Box<dyn Engine>> {
    match name.to_ascii_lowercase().as_str() {
        "aol" => Some(Box::new(Aol::new())),
        "ask" => Some(Box::new(Ask::new())),
        "bing" => Some(Box::new(Bing::new())),
        "brave" => Some(Box::new(Brave::new())),
        "dogpile" => Some(Box::new(Dogpile::new())),
        "duckduckgo" | "ddg" => Some(Box::new(DuckDuckGo::new())),
        "google" => Some(Box::new(Google::new())),
        "mojeek" => Some(Box::new(Mojeek::new())),
        "startpage" => Some(Box::new(Startpage::new())),
        "yahoo" => Some(Box::new(Yahoo::new())),
        _ => None,
    }
}

/// Resolves a list of names to engines. Unknown names are skipped; callers
/// wanting stricter behavior validate against [`NAMES`] themselves.
pub fn select<S: AsRef<str>>(names: &[S]) -> Vec<Box<dyn Engine>> {
    names.iter().filter_map(|name| by_name(name.as_ref())).collect()
}

/// All known engines.
pub fn all() -> Vec<Box<dyn Engine>> {
    select(NAMES)
}
