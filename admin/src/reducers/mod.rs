//! Admin reducers, one per dashboard surface.

pub mod leaderboard;
pub mod prices;
pub mod review;
pub mod search;

pub use leaderboard::{LeaderboardAction, LeaderboardReducer, LeaderboardState};
pub use prices::{PriceAdminAction, PriceAdminReducer, PriceAdminState};
pub use review::{ReviewAction, ReviewReducer, ReviewState};
pub use search::{SearchAction, SearchReducer, SearchState};
