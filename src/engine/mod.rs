//! The aggregation engine: roster, selection, visibility, and view state
//!
//! Every mutation is a discrete state-change event followed by a full
//! re-derivation of whatever depends on it. Derived structures are fresh
//! snapshots; nothing is patched in place, so recomputing twice with the same
//! inputs yields structurally identical output.

use crate::chart::{
    leaf_styles, weighted_hierarchy, ChartInputs, ChartMode, LeafStyle, WeightedRoot,
};
use crate::core::config::AtlasConfig;
use crate::core::types::{Person, SkillKey};
use crate::metrics::person::PersonMetricsIndex;
use crate::metrics::scale::UsageScale;
use crate::metrics::selection::SelectionSnapshot;
use crate::taxonomy::builder::TaxonomyRoot;
use crate::taxonomy::meta::MetadataIndex;
use crate::view::state::{ChartView, ViewState};
use crate::view::tables::{
    person_table_rows, skill_table_rows, PersonTableRow, SkillTableRow, TableInputs,
};
use ahash::AHashSet;
use tracing::{debug, info};

/// Aggregation and view state for one roster
#[derive(Debug, Default)]
pub struct SkillAtlas {
    config: AtlasConfig,
    people: Vec<Person>,

    // Derived on roster change
    taxonomy: TaxonomyRoot,
    meta: MetadataIndex,
    metrics: PersonMetricsIndex,
    usage_scale: UsageScale,

    // Interaction state
    selected_person_ids: AHashSet<String>,
    hidden_person_ids: AHashSet<String>,
    hidden_skill_keys: AHashSet<SkillKey>,
    highlighted_skill_keys: AHashSet<SkillKey>,
    pinned_highlight_person: Option<String>,
    view: ChartView,

    // Derived on selection/visibility/roster change
    selection: SelectionSnapshot,
}

impl SkillAtlas {
    pub fn new() -> Self {
        Self::with_config(AtlasConfig::default())
    }

    pub fn with_config(config: AtlasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // === ROSTER ===

    /// Replace the roster, select everyone, and reset the view
    ///
    /// A new roster invalidates any prior drill-down; hidden and highlight
    /// sets persist so a reload keeps the user's visibility choices.
    pub fn set_people(&mut self, people: Vec<Person>) {
        self.selected_person_ids = people
            .iter()
            .map(|p| p.trimmed_id())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        self.people = people;
        self.rebuild_indices();
        self.view.reset_to_overview();
        self.refresh_selection();
        info!(
            people = self.people.len(),
            skills = self.meta.len(),
            "roster replaced"
        );
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    // === SELECTION ===

    pub fn toggle_person_selected(&mut self, person_id: &str) {
        if !self.selected_person_ids.remove(person_id) {
            self.selected_person_ids.insert(person_id.to_string());
        }
        self.refresh_selection();
    }

    pub fn select_all_people(&mut self) {
        self.selected_person_ids = self
            .people
            .iter()
            .map(|p| p.trimmed_id())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        self.refresh_selection();
    }

    pub fn clear_all_people(&mut self) {
        self.selected_person_ids.clear();
        self.refresh_selection();
    }

    pub fn selected_person_ids(&self) -> &AHashSet<String> {
        &self.selected_person_ids
    }

    // === VISIBILITY ===

    pub fn toggle_skill_visibility(&mut self, key: &SkillKey) {
        if !self.hidden_skill_keys.remove(key) {
            self.hidden_skill_keys.insert(key.clone());
        }
    }

    pub fn toggle_person_visibility(&mut self, person_id: &str) {
        if !self.hidden_person_ids.remove(person_id) {
            self.hidden_person_ids.insert(person_id.to_string());
        }
        self.refresh_selection();
    }

    pub fn hidden_skill_keys(&self) -> &AHashSet<SkillKey> {
        &self.hidden_skill_keys
    }

    pub fn hidden_person_ids(&self) -> &AHashSet<String> {
        &self.hidden_person_ids
    }

    // === HIGHLIGHT ===

    pub fn set_highlighted_skill_keys(&mut self, keys: AHashSet<SkillKey>) {
        self.highlighted_skill_keys = keys;
    }

    /// Pin the highlight to one person's skills, or unpin with `None`
    pub fn pin_highlight_person(&mut self, person_id: Option<String>) {
        self.pinned_highlight_person = person_id;
    }

    /// The highlight set in effect: the pinned person's skill keys when a
    /// pin is set, the explicit set otherwise
    pub fn effective_highlighted_skill_keys(&self) -> AHashSet<SkillKey> {
        if let Some(person_id) = &self.pinned_highlight_person {
            return self
                .metrics
                .metrics_for(person_id)
                .map(|per_skill| per_skill.keys().cloned().collect())
                .unwrap_or_default();
        }
        self.highlighted_skill_keys.clone()
    }

    // === NAVIGATION ===

    /// Drill into a domain; unknown names are ignored
    pub fn drill_down_to_domain(&mut self, domain_name: &str) -> bool {
        if self.taxonomy.domain(domain_name).is_none() {
            debug!(domain = domain_name, "drill-down ignored, unknown domain");
            return false;
        }
        self.view.drill_down(domain_name);
        debug!(domain = domain_name, "drilled down");
        true
    }

    pub fn go_back(&mut self) {
        self.view.go_back();
    }

    pub fn reset_to_overview(&mut self) {
        self.view.reset_to_overview();
    }

    pub fn view(&self) -> &ViewState {
        self.view.current()
    }

    pub fn is_overview(&self) -> bool {
        self.view.is_overview()
    }

    pub fn view_history_len(&self) -> usize {
        self.view.history_len()
    }

    /// Skill keys in play for the current view; `None` at overview
    pub fn view_skill_keys(&self) -> Option<AHashSet<SkillKey>> {
        match self.view.current() {
            ViewState::Overview => None,
            ViewState::Domain(name) => Some(
                self.taxonomy
                    .domain(name)
                    .map(|domain| domain.skill_keys())
                    .unwrap_or_default(),
            ),
        }
    }

    // === DERIVED SNAPSHOTS ===

    pub fn taxonomy(&self) -> &TaxonomyRoot {
        &self.taxonomy
    }

    pub fn metadata(&self) -> &MetadataIndex {
        &self.meta
    }

    pub fn metrics(&self) -> &PersonMetricsIndex {
        &self.metrics
    }

    pub fn selection(&self) -> &SelectionSnapshot {
        &self.selection
    }

    pub fn visible_count(&self) -> usize {
        self.selection.visible_count()
    }

    pub fn usage_scale(&self) -> &UsageScale {
        &self.usage_scale
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Aggregate mode once a roster is loaded, static otherwise
    pub fn chart_mode(&self) -> ChartMode {
        if self.people.is_empty() {
            ChartMode::Static
        } else {
            ChartMode::Aggregate
        }
    }

    // === PROJECTIONS ===

    pub fn skill_table_rows(&self) -> Vec<SkillTableRow> {
        let scope = self.view_skill_keys();
        skill_table_rows(&self.table_inputs(scope.as_ref()))
    }

    pub fn person_table_rows(&self) -> Vec<PersonTableRow> {
        let scope = self.view_skill_keys();
        person_table_rows(&self.table_inputs(scope.as_ref()))
    }

    pub fn weighted_hierarchy(&self) -> WeightedRoot {
        let scope = self.view_skill_keys();
        let highlighted = self.effective_highlighted_skill_keys();
        weighted_hierarchy(&self.chart_inputs(scope.as_ref(), &highlighted))
    }

    pub fn leaf_styles(&self) -> Vec<LeafStyle> {
        let scope = self.view_skill_keys();
        let highlighted = self.effective_highlighted_skill_keys();
        leaf_styles(&self.chart_inputs(scope.as_ref(), &highlighted))
    }

    // === INTERNAL ===

    fn table_inputs<'a>(&'a self, scope: Option<&'a AHashSet<SkillKey>>) -> TableInputs<'a> {
        TableInputs {
            people: &self.people,
            meta: &self.meta,
            metrics: &self.metrics,
            selection: &self.selection,
            selected_person_ids: &self.selected_person_ids,
            hidden_skill_keys: &self.hidden_skill_keys,
            hidden_person_ids: &self.hidden_person_ids,
            scope,
        }
    }

    fn chart_inputs<'a>(
        &'a self,
        scope: Option<&'a AHashSet<SkillKey>>,
        highlighted: &'a AHashSet<SkillKey>,
    ) -> ChartInputs<'a> {
        ChartInputs {
            taxonomy: &self.taxonomy,
            selection: &self.selection,
            scale: &self.usage_scale,
            hidden_skill_keys: &self.hidden_skill_keys,
            highlighted_skill_keys: highlighted,
            scope,
            mode: self.chart_mode(),
            config: &self.config,
        }
    }

    fn rebuild_indices(&mut self) {
        self.taxonomy = TaxonomyRoot::from_people(&self.people);
        self.meta = MetadataIndex::from_taxonomy(&self.taxonomy);
        self.metrics = PersonMetricsIndex::build(&self.people, &self.meta);
        self.usage_scale = UsageScale::fit(self.metrics.usage_values(), &self.config);
    }

    fn refresh_selection(&mut self) {
        self.selection = SelectionSnapshot::compute(
            &self.selected_person_ids,
            &self.hidden_person_ids,
            &self.metrics,
        );
    }
}
