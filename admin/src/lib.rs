//! # Rifa Admin
//!
//! Review surfaces for the raffle dashboard:
//!
//! - **Purchase review** - filtered, paginated listing with optimistic
//!   inline status edits (rolled back and surfaced on failure)
//! - **Leaderboard** - paginated "most tickets bought" ranking
//! - **Number search** - owner lookup for one ticket number
//! - **Price management** - staged edits behind an explicit confirm step
//!
//! Every surface is a [`Reducer`](rifa_core::reducer::Reducer) over an
//! [`AdminGateway`](environment::AdminGateway). A lost session (HTTP 401)
//! never renders inline; it flips `redirect_to_landing` so the router can
//! leave the dashboard.

pub mod environment;
pub mod mocks;
pub mod reducers;

pub use environment::{AdminEnvironment, AdminGateway};
pub use reducers::{
    LeaderboardAction, LeaderboardReducer, LeaderboardState, PriceAdminAction, PriceAdminReducer,
    PriceAdminState, ReviewAction, ReviewReducer, ReviewState, SearchAction, SearchReducer,
    SearchState,
};
