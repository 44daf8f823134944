//! Strongly-typed IDs shared across the front-end.
//!
//! Kept dependency-free and separate from `turin-core` so leaf crates that
//! only need to name a file or node don't have to pull in interning/text
//! machinery.

macro_rules! raw_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn to_raw(self) -> u32 {
                self.0
            }
        }
    };
}

raw_id!(FileId);
raw_id!(NodeId);
raw_id!(ExprId);
raw_id!(StmtId);
raw_id!(TypeVarId);
