// Adapters layer: concrete implementations for the fetch provider, render substrate, input events and storage.

pub mod console;
pub mod export;
pub mod html;
pub mod http;
pub mod storage;
