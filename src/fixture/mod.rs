//! People fixture loading
//!
//! The loading collaborator owns fetch and retry policy. At this boundary a
//! failure of any kind degrades to an empty roster; data-quality issues
//! inside a loaded roster are handled downstream by the index builders.

use crate::core::error::Result;
use crate::core::types::Person;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// The `{"people": [...]}` document shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleFixture {
    #[serde(default)]
    pub people: Vec<Person>,
}

/// Strict parse of a fixture document
pub fn parse_people(json: &str) -> Result<Vec<Person>> {
    let fixture: PeopleFixture = serde_json::from_str(json)?;
    Ok(fixture.people)
}

/// Load a fixture file, degrading any failure to an empty roster
pub fn load_people(path: &Path) -> Vec<Person> {
    let loaded = fs::read_to_string(path)
        .map_err(crate::core::error::AtlasError::from)
        .and_then(|contents| parse_people(&contents));
    match loaded {
        Ok(people) => people,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "people fixture unavailable, starting with an empty roster"
            );
            Vec::new()
        }
    }
}
