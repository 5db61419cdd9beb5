//! Union taxonomy of domains, skills, and sub-skill templates

pub mod builder;
pub mod meta;

pub use builder::{DomainNode, SkillNode, TaxonomyRoot, ROOT_NAME};
pub use meta::{MetadataIndex, SkillMeta};
