//! Navigation state and display-ready table projections

pub mod state;
pub mod tables;

pub use state::{ChartView, ViewState};
pub use tables::{
    person_table_rows, skill_table_rows, PersonSkillCell, PersonTableRow, SkillContributor,
    SkillTableRow, TableInputs,
};
