// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod actions;
pub mod forms;
pub mod ids;
pub mod model;
pub mod schema;
pub mod state;
pub mod theme;

pub use actions::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use state::*;
pub use theme::*;
