// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod actions;
pub mod cell;
pub mod column;
pub mod view;

pub use actions::*;
pub use cell::*;
pub use column::*;
pub use view::*;
