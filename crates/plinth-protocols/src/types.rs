//! Common utility types.

use std::collections::HashMap;

/// Free-form metadata map attached to contributions and events.
pub type Metadata = HashMap<String, serde_json::Value>;
