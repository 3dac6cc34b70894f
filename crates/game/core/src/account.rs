/// Account totals reported by the server.
///
/// Fetched at the start of every tick and again after each purchase inside an
/// upgrade loop, since purchases spend gold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub gems: i32,
    pub gold: i32,
    pub fame: i32,
}
