pub mod client;

pub use client::{AppwriteClient, Query};
