//! Route module: identity derivation and the routing table types
//!
//! - `identity` maps file locations to route paths and ids (pure functions)
//! - `record` holds `RouteRecord`, `RouteTable`, `ComponentTable`

pub mod identity;
pub mod record;

pub use identity::{
    is_dynamic, normalize_segment, route_path_from_relative, route_path_from_segments, to_route_id, to_route_path,
    IdentityOptions, DEFAULT_DYNAMIC_MARKER, ROOT_ROUTE_ID,
};
pub use record::{ComponentTable, RouteOutput, RouteRecord, RouteTable};
