//! Skillctl Skills - discovery and resolution engine
//!
//! Skills are directories containing a `SKILL.md` document. Two tiers are
//! merged into one namespace:
//!
//! - **Override** skills (operator-supplied) are addressed by their bare name
//! - **Base** skills (stock collection) are addressed as `<namespace>:<name>`,
//!   and also by their bare name unless an override of the same name exists
//!
//! ## Flow
//!
//! 1. [`DirectorySource`] lists the entries of one tier (metadata only)
//! 2. [`RegistryBuilder`] merges both tiers, applying override precedence
//! 3. [`Resolver`] looks a query up (exact, case-insensitive, prefix, fuzzy)
//!    and loads the document content on a match

pub mod fuzzy;
pub mod registry;
pub mod resolver;
pub mod source;

pub use registry::{Binding, ListedSkill, RegistryBuilder, Shadowed, SkillRegistry};
pub use resolver::{MatchKind, Resolution, Resolver, SearchHit};
pub use source::{DirectorySource, SkillSource, SKILL_FILE};

pub use skillctl_types::{SkillEntry, SkillError, Tier};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        DirectorySource, RegistryBuilder, Resolution, Resolver, SkillEntry, SkillError,
        SkillRegistry, SkillSource, Tier,
    };
}
