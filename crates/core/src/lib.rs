#![forbid(unsafe_code)]

mod clock;
pub mod codec;
pub mod feed;
mod product;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use feed::{CAROUSEL_TITLE, Carousel, Navigator, RecentlyViewedFeed};
pub use product::{NewProductView, ProductView};
pub use store::{RecentlyViewed, StoreConfig};
