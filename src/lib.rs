// src/lib.rs

//! html2feed library
//!
//! Turns an HTML page into an Atom or RSS feed from a handful of CSS
//! selectors supplied with the request.

pub mod error;
pub mod fetch;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
