//! `hr-journey` — endpoint resolution and journey planning over a site graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`location`] | `Location` and its geofence polygon                         |
//! | [`site`]     | `SiteIndex` — cached vertex grouping by containing location |
//! | [`marker`]   | `Endpoint`, `Marker`, `resolve`                             |
//! | [`journey`]  | `Journey`, `JourneyConfig`, `build_journey`, `plan_journey` |
//! | [`error`]    | `JourneyError`, `JourneyResult<T>`                          |
//!
//! # Typical use
//!
//! ```rust,ignore
//! let graph = hr_graph::build_graph(&route);
//! let site = SiteIndex::new(&graph, locations);   // cache per site
//! let journey = plan_journey(
//!     &graph,
//!     &site,
//!     Endpoint::Position(truck_fix),
//!     Endpoint::Location(crusher),
//!     &JourneyConfig::default(),
//! );
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod journey;
pub mod location;
pub mod marker;
pub mod site;


pub use error::{JourneyError, JourneyResult};
pub use journey::{Journey, JourneyConfig, build_journey, plan_journey};
pub use location::Location;
pub use marker::{Endpoint, Marker, resolve};
pub use site::SiteIndex;
