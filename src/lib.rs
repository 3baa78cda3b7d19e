pub mod classify;
pub mod coordinate;
pub mod error;
pub mod geo;
pub mod index;
pub mod logging;
pub mod record;
pub mod report;

pub use classify::{classify, ClassificationResult, ClassifierConfig, Tag};
pub use coordinate::{normalize, Axis, RawCoordinate};
pub use error::{CorridorError, Endpoint};
pub use geo::{haversine_km, Coordinate};
pub use index::PlaceIndex;
pub use record::{read_places_from_path, LoadedDataset, PlaceRecord};
pub use report::Report;
