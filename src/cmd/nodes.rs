/*!
nodes.rs - commands whose payload is assembled from typed flags.

  context        POST /cocos/context
  search-nodes   POST /cocos/search-nodes
  query-nodes    POST /cocos/query-nodes

Flags with a default are always sent. Flags without one are omitted from
the payload when not given (never sent as null or "").
*/

use clap::Args;
use serde_json::{Map, Value};

#[derive(Args, Debug)]
pub struct ContextArgs {
    /// Summary mode for large scenes
    #[arg(long)]
    pub summary_only: bool,

    /// Max hierarchy depth
    #[arg(long, default_value_t = 2)]
    pub max_depth: i64,

    /// Max nodes to return
    #[arg(long, default_value_t = 100)]
    pub max_nodes: i64,

    /// Query a specific parent node
    #[arg(long, value_name = "UUID")]
    pub parent_uuid: Option<String>,
}

impl ContextArgs {
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("summaryOnly".into(), self.summary_only.into());
        payload.insert("maxDepth".into(), self.max_depth.into());
        payload.insert("maxNodes".into(), self.max_nodes.into());
        insert_opt(&mut payload, "parentUuid", self.parent_uuid.as_deref());
        Value::Object(payload)
    }
}

#[derive(Args, Debug)]
pub struct SearchNodesArgs {
    /// Name pattern (supports wildcards)
    #[arg(long, value_name = "PATTERN")]
    pub name: Option<String>,

    /// Component type filter
    #[arg(long, value_name = "TYPE")]
    pub component: Option<String>,

    /// Path pattern filter
    #[arg(long, value_name = "PATTERN")]
    pub path: Option<String>,

    /// Max results
    #[arg(long, default_value_t = 50)]
    pub limit: i64,

    /// Result offset
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
}

impl SearchNodesArgs {
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("limit".into(), self.limit.into());
        payload.insert("offset".into(), self.offset.into());
        insert_opt(&mut payload, "namePattern", self.name.as_deref());
        insert_opt(&mut payload, "componentType", self.component.as_deref());
        insert_opt(&mut payload, "pathPattern", self.path.as_deref());
        Value::Object(payload)
    }
}

#[derive(Args, Debug)]
pub struct QueryNodesArgs {
    /// Node UUID to query (scene root when omitted)
    #[arg(long)]
    pub uuid: Option<String>,

    /// Include node properties
    #[arg(long)]
    pub include_properties: bool,

    /// Include attached components
    #[arg(long)]
    pub include_components: bool,

    /// Max hierarchy depth
    #[arg(long, default_value_t = 2)]
    pub max_depth: i64,
}

impl QueryNodesArgs {
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("includeProperties".into(), self.include_properties.into());
        payload.insert("includeComponents".into(), self.include_components.into());
        payload.insert("maxDepth".into(), self.max_depth.into());
        insert_opt(&mut payload, "nodeUuid", self.uuid.as_deref());
        Value::Object(payload)
    }
}

/// Insert only non-empty values.
fn insert_opt(payload: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        payload.insert(key.to_string(), Value::String(v.to_string()));
    }
}
