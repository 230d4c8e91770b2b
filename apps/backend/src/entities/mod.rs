pub mod match_snapshots;
pub mod seat_hands;

pub use match_snapshots::Entity as MatchSnapshots;
pub use match_snapshots::Model as MatchSnapshot;
pub use seat_hands::Entity as SeatHands;
pub use seat_hands::Model as SeatHand;
