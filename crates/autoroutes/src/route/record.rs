use crate::meta::RouteMeta;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of the routing table
///
/// Structural fields come first and are never overridden by metadata;
/// user metadata lives in `extra` and is flattened on serialization.
///
/// ```json
/// {"id":"user-:id","path":"/user/:id","name":"user-:id","parentId":"@@global-layout","title":"User"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub id: String,
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_layout: bool,
    #[serde(flatten)]
    pub extra: RouteMeta,
}

impl RouteRecord {
    /// Navigable page record; `name` mirrors the id
    pub fn page(id: impl Into<String>, path: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            path: path.into(),
            parent_id: None,
            is_layout: false,
            extra: RouteMeta::new(),
        }
    }

    /// Layout record; never a navigable leaf
    pub fn layout(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            is_layout: true,
            ..Self::page(id, path)
        }
    }

    pub fn with_parent(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_extra(mut self, extra: RouteMeta) -> Self {
        self.extra = extra;
        self
    }
}

/// Ordered `id → RouteRecord`, insertion order = discovery order
pub type RouteTable = IndexMap<String, RouteRecord>;

/// Ordered `id → relative import path`, co-indexed with [`RouteTable`]
pub type ComponentTable = IndexMap<String, String>;

/// Result of one build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOutput {
    pub routes: RouteTable,
    pub route_components: ComponentTable,
}

impl RouteOutput {
    /// Navigable routes only (layouts filtered out), in table order
    pub fn pages(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes.values().filter(|r| !r.is_layout)
    }

    pub fn layouts(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes.values().filter(|r| r.is_layout)
    }
}
