//! # story-view
//!
//! Everything between a dataset snapshot and what the gallery shows:
//!
//! - [`derive_facets`] builds the option lists for the selection controls
//! - [`apply`] filters a snapshot by a [`FacetSelection`]
//! - [`Presenter`] reveals the filtered view in viewport-sized batches
//! - [`DatasetLoader`] decides between the cache and a gated upstream run
//! - [`ViewSession`] keeps all of the above in step for one session

pub mod facets;
pub mod filter;
pub mod gate;
pub mod loader;
pub mod presenter;
pub mod probe;
pub mod selection;
pub mod session;

pub use facets::{FacetOptions, derive_facets};
pub use filter::{FilterOptions, FilteredView, apply};
pub use gate::{AggregationGate, Ticket};
pub use loader::{DatasetLoader, LoadError, LoadOutcome};
pub use presenter::{Presenter, PresenterState};
pub use probe::{CapacityProbe, FixedProbe, GridProbe};
pub use selection::{FacetSelection, SelectionEvent};
pub use session::{SessionSettings, ViewSession};
