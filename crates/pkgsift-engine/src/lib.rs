//! pkgsift Engine - Incremental filtering of a rendered package catalog
//!
//! Wires the pure pieces of `pkgsift-core` to a page:
//!
//! - **Input controller** (`PackageFilter`): turns keystrokes, the clear
//!   affordance, field-scope and ownership changes, and Escape into filter
//!   passes, debouncing free-text input.
//! - **Render applier** (`render`): flips element visibility inside a single
//!   hide/reveal of the list container.
//! - **Driver** (`runtime::drive`): a tokio event loop racing input events
//!   against the pending debounce deadline.
//! - **Replay** (`replay`): the same controller fed from a timed script in
//!   virtual time.
//!
//! ## Example
//!
//! ```rust
//! use pkgsift_core::{Catalog, OwnershipRoster, DEFAULT_DEBOUNCE};
//! use pkgsift_engine::{InputEvent, MemoryView, PackageFilter, PageHooks};
//! use std::time::Instant;
//! use url::Url;
//!
//! let catalog = Catalog::from_yaml(
//!     "packages:\n  - name: acme/widgets\n  - name: other/tools\n",
//! )?;
//! let view = MemoryView::new(catalog.len());
//! let location = Url::parse("https://packages.example.com/")?;
//!
//! let mut filter = PackageFilter::mount(
//!     PageHooks::new(view),
//!     catalog,
//!     OwnershipRoster::new(["acme"]),
//!     location,
//!     DEFAULT_DEBOUNCE,
//! )
//! .expect("all hooks present");
//!
//! filter.handle(InputEvent::OwnToggle { checked: true }, Instant::now())?;
//! assert_eq!(filter.view().visible_flags(), &[true, false]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod controller;
pub mod debounce;
pub mod error;
pub mod render;
pub mod replay;
pub mod runtime;
pub mod view;

pub use controller::{InputEvent, PackageFilter, PageHooks, PassReport, Phase};
pub use debounce::Debouncer;
pub use error::{EngineError, Result};
pub use replay::{MAX_STEP_OFFSET, ReplayPass, ScriptStep, Trigger, parse_script, replay};
pub use runtime::drive;
pub use view::{CatalogView, MemoryView, ViewStats};
