//! Input controller
//!
//! `PackageFilter` owns the filter state for one rendered catalog and turns
//! raw input events into filter passes:
//!
//! | event        | state change          | pass                          |
//! |--------------|-----------------------|-------------------------------|
//! | keystroke    | query                 | debounced                     |
//! | clear        | query emptied         | immediate                     |
//! | field scope  | scope                 | immediate, only with a query  |
//! | own toggle   | own-only              | immediate                     |
//! | escape       | query emptied         | immediate, drops pending pass |
//!
//! Every acted-upon change also writes the query to the URL fragment.

use pkgsift_core::{
    Catalog, FilterState, Location, OwnershipRoster, PackageRecord, VisibilitySet, evaluate,
    fragment, parse_scope,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::error::{EngineError, Result};
use crate::render;
use crate::view::CatalogView;

/// A raw input, normalized from whatever the host page emits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    /// The query input changed; carries its whole current value
    Keystroke { value: String },

    /// The input's clear affordance was used; acts only when `value` is empty
    Clear {
        #[serde(default)]
        value: String,
    },

    /// The field-scope control changed (`""` or `"all"` means full text)
    FieldScope { value: String },

    /// The "own packages only" checkbox changed
    OwnToggle { checked: bool },

    /// Escape pressed anywhere on the page
    Escape,
}

impl InputEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::Keystroke { .. } => "keystroke",
            InputEvent::Clear { .. } => "clear",
            InputEvent::FieldScope { .. } => "field-scope",
            InputEvent::OwnToggle { .. } => "own-toggle",
            InputEvent::Escape => "escape",
        }
    }
}

/// The controls a filter needs on the page. Any missing hook leaves the
/// page as rendered.
#[derive(Debug, Clone)]
pub struct PageHooks<V> {
    /// Current value of the query input
    pub query_field: Option<String>,
    /// The list container with its package elements
    pub container: Option<V>,
    /// Current value of the field-scope control
    pub field_scope: Option<String>,
    /// Current state of the "own packages only" checkbox
    pub own_toggle: Option<bool>,
}

impl<V> PageHooks<V> {
    /// All hooks present, with empty query, no scope and the toggle off
    pub fn new(container: V) -> Self {
        Self {
            query_field: Some(String::new()),
            container: Some(container),
            field_scope: Some(String::new()),
            own_toggle: Some(false),
        }
    }

    pub fn query(mut self, value: impl Into<String>) -> Self {
        self.query_field = Some(value.into());
        self
    }

    pub fn scope(mut self, value: impl Into<String>) -> Self {
        self.field_scope = Some(value.into());
        self
    }

    pub fn own_only(mut self, checked: bool) -> Self {
        self.own_toggle = Some(checked);
        self
    }
}

/// Lifecycle of a mounted filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
    Filtering,
}

/// Outcome of one filter pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub visible: usize,
    pub total: usize,
    /// Nothing was filtered; every element was simply shown
    pub fast_path: bool,
}

/// Incremental filter over one rendered catalog
#[derive(Debug)]
pub struct PackageFilter<V, L> {
    catalog: Catalog,
    roster: OwnershipRoster,
    state: FilterState,
    view: V,
    location: L,
    debouncer: Debouncer,
    visibility: VisibilitySet,
    phase: Phase,
    passes: usize,
}

impl<V: CatalogView, L: Location> PackageFilter<V, L> {
    /// Attach a filter to a rendered page.
    ///
    /// Returns `None` when a hook is missing or the catalog is empty; the page
    /// then keeps showing everything as rendered. Otherwise the current scope
    /// control value is applied and the query is seeded from the URL fragment.
    pub fn mount(
        hooks: PageHooks<V>,
        catalog: Catalog,
        roster: OwnershipRoster,
        location: L,
        debounce: Duration,
    ) -> Option<Self> {
        let PageHooks {
            query_field: Some(query),
            container: Some(view),
            field_scope: Some(scope_value),
            own_toggle: Some(own_only),
        } = hooks
        else {
            tracing::debug!("package filter not mounted: missing page control");
            return None;
        };

        if catalog.is_empty() {
            tracing::debug!("package filter not mounted: empty catalog");
            return None;
        }

        let total = catalog.len();
        let mut filter = Self {
            catalog,
            roster,
            state: FilterState {
                query,
                field_scope: None,
                own_only,
            },
            view,
            location,
            debouncer: Debouncer::new(debounce),
            visibility: VisibilitySet::all(total),
            phase: Phase::Uninitialized,
            passes: 0,
        };

        // Read the fragment before the scope pass rewrites it
        let shared_query = fragment::decode(&filter.location);

        if let Err(e) = filter.change_scope(&scope_value) {
            tracing::warn!(error = %e, "initial field scope pass failed");
        }
        if let Err(e) = filter.seed_query(shared_query) {
            tracing::warn!(error = %e, "initial fragment pass failed");
        }

        filter.phase = Phase::Ready;
        tracing::debug!(packages = total, query = %filter.state.query, "package filter mounted");
        Some(filter)
    }

    /// Process one input event at `now`.
    ///
    /// Returns the report of the pass the event ran immediately, if any.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Result<Option<PassReport>> {
        tracing::trace!(event = event.kind(), "input event");

        match event {
            InputEvent::Keystroke { value } => {
                self.state.query = value;
                self.persist_query();
                if self.debouncer.schedule(now).is_none() {
                    return Err(EngineError::DeadlineOverflow {
                        delay: self.debouncer.delay(),
                    });
                }
                Ok(None)
            }
            InputEvent::Clear { value } => {
                if !value.is_empty() {
                    return Ok(None);
                }
                self.state.query.clear();
                self.persist_query();
                self.debouncer.cancel();
                self.run_pass().map(Some)
            }
            InputEvent::FieldScope { value } => self.change_scope(&value),
            InputEvent::OwnToggle { checked } => {
                self.state.own_only = checked;
                self.persist_query();
                self.run_pass().map(Some)
            }
            InputEvent::Escape => {
                self.state.query.clear();
                self.view.set_query_text("");
                self.persist_query();
                if self.debouncer.cancel() {
                    tracing::debug!("escape preempted pending filter pass");
                }
                self.run_pass().map(Some)
            }
        }
    }

    /// Run the debounced pass if its deadline has passed at `now`
    pub fn tick(&mut self, now: Instant) -> Result<Option<PassReport>> {
        if self.debouncer.fire(now) {
            self.run_pass().map(Some)
        } else {
            Ok(None)
        }
    }

    /// When the pending debounced pass is due
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of passes run since mount
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn roster(&self) -> &OwnershipRoster {
        &self.roster
    }

    /// Visibility as of the last pass
    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    /// Records visible after the last pass
    pub fn visible_records(&self) -> impl Iterator<Item = &PackageRecord> + '_ {
        let records = self.catalog.records();
        self.visibility.visible().map(move |i| &records[i])
    }

    fn change_scope(&mut self, value: &str) -> Result<Option<PassReport>> {
        self.state.field_scope = parse_scope(value);
        if self.state.query.is_empty() {
            return Ok(None);
        }
        self.persist_query();
        self.run_pass().map(Some)
    }

    fn seed_query(&mut self, query: String) -> Result<Option<PassReport>> {
        if query.is_empty() {
            return Ok(None);
        }
        self.view.set_query_text(&query);
        self.state.query = query;
        self.persist_query();
        self.run_pass().map(Some)
    }

    fn persist_query(&mut self) {
        fragment::encode(&mut self.location, &self.state.query);
    }

    fn run_pass(&mut self) -> Result<PassReport> {
        let previous = self.phase;
        self.phase = Phase::Filtering;
        let outcome = self.filter_and_render();
        self.phase = previous;
        outcome
    }

    /// Body of a pass; runs in `Phase::Filtering`
    fn filter_and_render(&mut self) -> Result<PassReport> {
        debug_assert_eq!(self.phase, Phase::Filtering);
        let visibility = evaluate(self.catalog.records(), &self.state, &self.roster)?;
        let fast_path = self.state.is_unfiltered();
        if fast_path {
            render::show_all(&mut self.view, visibility.len());
        } else {
            render::apply(&mut self.view, &visibility);
        }

        let report = PassReport {
            visible: visibility.visible_count(),
            total: visibility.len(),
            fast_path,
        };
        self.visibility = visibility;
        self.passes += 1;

        tracing::debug!(
            query = %self.state.query,
            scope = self.state.scope().unwrap_or("all"),
            own_only = self.state.own_only,
            visible = report.visible,
            total = report.total,
            "filter pass"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;
    use indexmap::IndexMap;
    use pkgsift_core::CoreError;
    use url::Url;

    const DEBOUNCE: Duration = Duration::from_millis(350);

    fn catalog() -> Catalog {
        let record = |name: &str, text: &str, description: &str| {
            let mut fields = IndexMap::new();
            fields.insert("description".to_string(), description.to_string());
            PackageRecord::with_text(name, fields, text)
        };
        Catalog::new(vec![
            record("acme/widget", "Acme Widget", "A widget"),
            record("acme/gadget", "Acme Gadget", "A gadget"),
            record("other/tool", "Other Tool", "Tools by acme"),
        ])
    }

    fn page(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn mount_with(hooks: PageHooks<MemoryView>, url: &str) -> PackageFilter<MemoryView, Url> {
        PackageFilter::mount(
            hooks,
            catalog(),
            OwnershipRoster::new(["acme"]),
            page(url),
            DEBOUNCE,
        )
        .expect("filter should mount")
    }

    fn mount() -> PackageFilter<MemoryView, Url> {
        mount_with(PageHooks::new(MemoryView::new(3)), "https://packages.test/")
    }

    fn key(value: &str) -> InputEvent {
        InputEvent::Keystroke {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_missing_hooks_leave_page_inert() {
        let mut hooks = PageHooks::new(MemoryView::new(3));
        hooks.own_toggle = None;
        let filter = PackageFilter::mount(
            hooks,
            catalog(),
            OwnershipRoster::default(),
            page("https://packages.test/#acme"),
            DEBOUNCE,
        );
        assert!(filter.is_none());

        let mut hooks = PageHooks::new(MemoryView::new(3));
        hooks.query_field = None;
        assert!(
            PackageFilter::mount(
                hooks,
                catalog(),
                OwnershipRoster::default(),
                page("https://packages.test/"),
                DEBOUNCE,
            )
            .is_none()
        );
    }

    #[test]
    fn test_empty_catalog_leaves_page_inert() {
        let filter = PackageFilter::mount(
            PageHooks::new(MemoryView::new(0)),
            Catalog::default(),
            OwnershipRoster::default(),
            page("https://packages.test/"),
            DEBOUNCE,
        );
        assert!(filter.is_none());
    }

    #[test]
    fn test_mount_without_fragment_runs_no_pass() {
        let filter = mount();
        assert_eq!(filter.phase(), Phase::Ready);
        assert_eq!(filter.passes(), 0);
        assert!(filter.visibility().is_everything());
    }

    #[test]
    fn test_fragment_seeds_query_on_mount() {
        let filter = mount_with(
            PageHooks::new(MemoryView::new(3)),
            "https://packages.test/#acme%20g",
        );
        assert_eq!(filter.state().query, "acme g");
        assert_eq!(filter.view().query_text(), "acme g");
        assert_eq!(filter.passes(), 1);
        assert_eq!(filter.view().visible_flags(), &[false, true, false]);
    }

    #[test]
    fn test_prefilled_scope_applies_on_mount() {
        let filter = mount_with(
            PageHooks::new(MemoryView::new(3)).query("acme").scope("description"),
            "https://packages.test/",
        );
        assert_eq!(filter.state().scope(), Some("description"));
        assert_eq!(filter.view().visible_flags(), &[false, false, true]);
    }

    #[test]
    fn test_fragment_wins_over_prefilled_query() {
        let filter = mount_with(
            PageHooks::new(MemoryView::new(3)).query("widget").scope("name"),
            "https://packages.test/#tool",
        );
        assert_eq!(filter.state().query, "tool");
        assert_eq!(filter.passes(), 2);
        assert_eq!(filter.location().fragment(), Some("tool"));
        assert_eq!(filter.view().visible_flags(), &[false, false, true]);
    }

    #[test]
    fn test_keystrokes_are_debounced() {
        let mut filter = mount();
        let start = Instant::now();

        for (i, value) in ["a", "ac", "acm", "acme"].into_iter().enumerate() {
            let now = start + Duration::from_millis(100 * i as u64);
            assert_eq!(filter.handle(key(value), now).unwrap(), None);
            assert_eq!(filter.tick(now).unwrap(), None);
        }
        assert_eq!(filter.location().fragment(), Some("acme"));
        assert_eq!(filter.passes(), 0);

        let last = start + Duration::from_millis(300);
        assert_eq!(filter.tick(last + Duration::from_millis(349)).unwrap(), None);

        let report = filter.tick(last + DEBOUNCE).unwrap().unwrap();
        assert_eq!(report.visible, 2);
        assert_eq!(filter.passes(), 1);
        assert_eq!(filter.pending_deadline(), None);
        assert_eq!(filter.view().visible_flags(), &[true, true, false]);
    }

    #[test]
    fn test_clear_bypasses_debounce() {
        let mut filter = mount();
        let now = Instant::now();
        filter.handle(key("acme"), now).unwrap();
        filter.tick(now + DEBOUNCE).unwrap();

        filter.handle(key(""), now + DEBOUNCE).unwrap();
        let report = filter
            .handle(InputEvent::Clear { value: String::new() }, now + DEBOUNCE)
            .unwrap()
            .unwrap();
        assert!(report.fast_path);
        assert_eq!(filter.pending_deadline(), None);
        assert!(filter.view().visible_flags().iter().all(|v| *v));
    }

    #[test]
    fn test_clear_with_text_is_ignored() {
        let mut filter = mount();
        let outcome = filter
            .handle(
                InputEvent::Clear {
                    value: "acme".to_string(),
                },
                Instant::now(),
            )
            .unwrap();
        assert_eq!(outcome, None);
        assert_eq!(filter.passes(), 0);
    }

    #[test]
    fn test_escape_resets_and_preempts() {
        let mut filter = mount();
        let now = Instant::now();
        filter.handle(key("acme"), now).unwrap();
        filter.tick(now + DEBOUNCE).unwrap();
        filter.handle(key("acme w"), now + DEBOUNCE).unwrap();
        assert!(filter.pending_deadline().is_some());

        let report = filter.handle(InputEvent::Escape, now + DEBOUNCE).unwrap().unwrap();
        assert!(report.fast_path);
        assert_eq!(filter.state().query, "");
        assert_eq!(filter.view().query_text(), "");
        assert_eq!(filter.location().fragment(), Some(""));
        assert_eq!(filter.pending_deadline(), None);
        assert_eq!(filter.visibility().visible_count(), 3);
    }

    #[test]
    fn test_scope_change_without_query_only_records_scope() {
        let mut filter = mount();
        let outcome = filter
            .handle(
                InputEvent::FieldScope {
                    value: "description".to_string(),
                },
                Instant::now(),
            )
            .unwrap();
        assert_eq!(outcome, None);
        assert_eq!(filter.state().scope(), Some("description"));
        assert_eq!(filter.passes(), 0);
    }

    #[test]
    fn test_scope_change_with_query_refilters_immediately() {
        let mut filter = mount();
        let now = Instant::now();
        filter.handle(key("acme"), now).unwrap();
        filter.tick(now + DEBOUNCE).unwrap();
        assert_eq!(filter.view().visible_flags(), &[true, true, false]);

        filter
            .handle(
                InputEvent::FieldScope {
                    value: "description".to_string(),
                },
                now + DEBOUNCE,
            )
            .unwrap();
        assert_eq!(filter.view().visible_flags(), &[false, false, true]);

        filter
            .handle(
                InputEvent::FieldScope {
                    value: "all".to_string(),
                },
                now + DEBOUNCE,
            )
            .unwrap();
        assert_eq!(filter.state().scope(), None);
        assert_eq!(filter.view().visible_flags(), &[true, true, false]);
    }

    #[test]
    fn test_own_toggle_always_filters() {
        let mut filter = mount();
        let report = filter
            .handle(InputEvent::OwnToggle { checked: true }, Instant::now())
            .unwrap()
            .unwrap();
        assert!(!report.fast_path);
        assert_eq!(report.visible, 2);
        assert_eq!(filter.view().visible_flags(), &[true, true, false]);

        filter
            .handle(InputEvent::OwnToggle { checked: false }, Instant::now())
            .unwrap();
        assert_eq!(filter.view().visible_flags(), &[true, true, true]);
        assert_eq!(filter.location().fragment(), Some(""));
    }

    #[test]
    fn test_filtered_pass_never_writes_to_a_shown_container() {
        let mut filter = mount();
        let now = Instant::now();
        filter.handle(key("gadget"), now).unwrap();
        filter.tick(now + DEBOUNCE).unwrap();

        let stats = filter.view().stats();
        assert_eq!(stats.hides, 1);
        assert_eq!(stats.reveals, 1);
        assert_eq!(stats.exposed_writes, 0);
        assert!(!filter.view().is_container_hidden());
    }

    #[test]
    fn test_missing_scoped_field_leaves_view_untouched() {
        let mut filter = mount();
        let now = Instant::now();
        filter
            .handle(
                InputEvent::FieldScope {
                    value: "license".to_string(),
                },
                now,
            )
            .unwrap();
        filter.handle(key("acme"), now).unwrap();

        let err = filter.tick(now + DEBOUNCE).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::MissingField { .. })
        ));
        assert_eq!(filter.phase(), Phase::Ready);
        assert_eq!(filter.passes(), 0);
        assert_eq!(filter.view().stats().hides, 0);
        assert!(!filter.view().is_container_hidden());
    }

    #[test]
    fn test_phase_returns_to_ready_after_each_pass() {
        let mut filter = mount();
        let now = Instant::now();

        filter
            .handle(InputEvent::OwnToggle { checked: true }, now)
            .unwrap();
        assert_eq!(filter.phase(), Phase::Ready);

        filter.handle(InputEvent::Escape, now).unwrap();
        assert_eq!(filter.phase(), Phase::Ready);
        assert_eq!(filter.passes(), 2);
    }

    #[test]
    fn test_unrepresentable_debounce_is_an_error() {
        let mut filter = PackageFilter::mount(
            PageHooks::new(MemoryView::new(3)),
            catalog(),
            OwnershipRoster::new(["acme"]),
            page("https://packages.test/"),
            Duration::MAX,
        )
        .unwrap();

        let err = filter.handle(key("a"), Instant::now()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::DeadlineOverflow { delay } if delay == Duration::MAX
        ));
        // The keystroke itself still landed
        assert_eq!(filter.state().query, "a");
        assert_eq!(filter.location().fragment(), Some("a"));
        assert_eq!(filter.pending_deadline(), None);
        assert_eq!(filter.passes(), 0);
    }

    #[test]
    fn test_event_serialization() {
        let events: Vec<InputEvent> = serde_yaml::from_str(
            r#"
- type: keystroke
  value: acme
- type: clear
- type: field-scope
  value: name
- type: own-toggle
  checked: true
- type: escape
"#,
        )
        .unwrap();

        let kinds: Vec<&str> = events.iter().map(InputEvent::kind).collect();
        assert_eq!(
            kinds,
            vec!["keystroke", "clear", "field-scope", "own-toggle", "escape"]
        );
        assert_eq!(
            events[1],
            InputEvent::Clear {
                value: String::new()
            }
        );
    }
}
