// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for civic_table::RowId {
            fn from(value: $name) -> Self {
                civic_table::RowId::Number(value.0)
            }
        }
    };
}

entity_id!(UserId);
entity_id!(DepartmentId);
entity_id!(DistrictId);
entity_id!(StateId);
entity_id!(ProjectId);
entity_id!(GrievanceId);
entity_id!(PollId);
entity_id!(BudgetId);
