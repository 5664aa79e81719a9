//! Resource-calendar engine: pure data transformations that turn resources,
//! projects, holidays, and leave into render-ready timeline groupings and
//! work-day statistics. All operations are synchronous total functions over
//! immutable snapshots; mutating operations return new collections.

pub mod calendar;
pub mod editor;
pub mod grouping;
pub mod model;
pub mod stats;
pub mod validator;
