use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::mongodb_store::MongoDBConfig;
use crate::store::supabase_store::SupabaseStoreConfig;

/// A wrapper for the metadata store configuration:
/// - enabled: if false, the store is effectively disabled (NoStore).
/// - backend: the actual store backend (MongoDB, Supabase, memory).
#[derive(Deserialize, Serialize, Debug, JsonSchema, Default)]
pub struct StoreConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub backend: Option<StoreBackend>,
}

/// The existing store backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreBackend {
    #[serde(rename = "mongo")]
    MongoDB(MongoDBConfig),
    #[serde(rename = "supabase")]
    Supabase(SupabaseStoreConfig),
    #[serde(rename = "memory")]
    Memory,
}
