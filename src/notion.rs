pub mod client;
pub mod types;

pub use client::{NotionClient, NotionDatabase};
pub use types::{NotionPage, Properties, PropertyValue};

#[cfg(test)]
pub use client::MockNotionDatabase;
