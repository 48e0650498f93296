pub mod client;
pub mod normalize;

pub use client::{FetchError, WeatherClient};
pub use normalize::{normalize, ProviderReport};
