pub mod config;
pub mod embed;
pub mod http;
pub mod pets;
pub mod store;

pub use config::Config;
pub use embed::{extract_pet, extract_rarity, first_embed, Embed, EmbedField, PayloadError};
pub use http::{create_router, AppState};
pub use pets::{NewPet, Pets};
pub use store::{MemoryStore, PostgrestStore, RecordStore, StoreError};
